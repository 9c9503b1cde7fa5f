//! Simulation engine for BARRAGE.
//!
//! Owns every entity list and system, runs the play tick at whatever rate
//! the host drives it, and produces `FrameSnapshot`s for the renderer.

pub mod engine;
pub mod entities;
pub mod persistence;
pub mod play;
pub mod scenes;
pub mod systems;

pub use barrage_core as core;
pub use engine::GameEngine;
