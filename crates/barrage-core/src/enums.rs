//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Logical input actions, decoupled from physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Shoot,
    Power,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Left, Action::Right, Action::Shoot, Action::Power];
}

/// Enemy rank. Used for colour and score-tier classification only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Front row of a fresh wave.
    Elite,
    Soldier,
    #[default]
    Drone,
}

impl EnemyKind {
    /// Rank for a grid row: row 0 strongest, row 1 mid, the rest weakest.
    pub fn for_row(row: u32) -> Self {
        match row {
            0 => EnemyKind::Elite,
            1 => EnemyKind::Soldier,
            _ => EnemyKind::Drone,
        }
    }
}

/// Items dropped by destroyed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Timed fan-shaped fire.
    SpreadShot,
    ExtraLife,
    /// Fills the power resource.
    PowerCharge,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::SpreadShot,
        PowerupKind::ExtraLife,
        PowerupKind::PowerCharge,
    ];
}

/// Top-level scene of the state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    #[default]
    Menu,
    Play,
    GameOver,
}
