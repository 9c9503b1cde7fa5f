//! Core types and definitions for the BARRAGE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! configuration, geometry helpers, the input contract, events, and the
//! render snapshot. It has no dependency on any runtime or windowing layer.

pub mod config;
pub mod enums;
pub mod error;
pub mod events;
pub mod input;
pub mod math;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
