//! Systems that operate on the play scene's entities each tick.
//!
//! Systems own only the state the contract gives them (formation offset,
//! wave counter, collision buffer, score). Entity lists are owned by
//! `PlayState` and lent to systems for the duration of a call.

pub mod collision;
pub mod formation;
pub mod score;
pub mod snapshot;
pub mod spawn;
