//! Events emitted by the simulation for scoring, UI and audio feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, PowerupKind};

/// One detected overlap. Indices refer to positions in the entity lists
/// passed to the collision pass that produced the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CollisionEvent {
    BulletEnemy {
        bullet: usize,
        enemy: usize,
        kind: EnemyKind,
        position: Vec2,
    },
    BulletBoss {
        bullet: usize,
        damage: u32,
        position: Vec2,
    },
    PowerEnemy {
        projectile: usize,
        enemy: usize,
        kind: EnemyKind,
        position: Vec2,
    },
    PowerBoss {
        projectile: usize,
        damage: u32,
        position: Vec2,
    },
    EnemyReachBottom {
        enemy: usize,
        position: Vec2,
    },
    PlayerPowerup {
        powerup: usize,
        kind: PowerupKind,
    },
}

/// Everything the play scene reports to rendering/UI in one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum GameEvent {
    Collision(CollisionEvent),
    WaveStarted { wave: u32, boss: bool },
    WaveCleared { wave: u32 },
    LifeLost { lives: u32 },
    BossDefeated { wave: u32 },
    PowerAttackFired { origin: Vec2 },
    PowerupCollected { kind: PowerupKind },
    GameOver { score: u64, wave: u32 },
}
