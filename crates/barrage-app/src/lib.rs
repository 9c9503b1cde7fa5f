//! BARRAGE host application.
//!
//! Runs the simulation engine on its own thread at a fixed tick rate and
//! publishes the latest snapshot. A renderer or, in the headless binary,
//! the autopilot reads snapshots and sends key events back.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use barrage_core as core;
