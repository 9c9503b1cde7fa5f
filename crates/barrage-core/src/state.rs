//! Frame snapshot: the complete read-only state handed to the renderer
//! after each tick. The simulation never draws anything itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, PowerupKind, SceneKind};
use crate::events::GameEvent;
use crate::types::SimTime;

/// One persisted scoreboard record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Uppercase, at most 10 characters.
    pub name: String,
    pub score: u64,
    /// Milliseconds since the Unix epoch.
    pub date: u64,
}

/// Complete state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub scene: SceneKind,
    pub player_name: String,
    pub hud: HudView,
    pub wave_transition: bool,
    pub transition_remaining_ms: f32,
    pub player: Option<PlayerView>,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub projectiles: Vec<ProjectileView>,
    pub powerups: Vec<PowerupView>,
    pub events: Vec<GameEvent>,
    /// Filled in the menu and game-over scenes.
    pub scoreboard: Vec<ScoreEntry>,
    pub game_over: Option<GameOverView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub lives: u32,
    pub power: u32,
    pub power_max: u32,
    pub power_ready: bool,
    pub wave: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub size: Vec2,
    pub fire_cooldown_ms: f32,
    pub spread_remaining_ms: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    /// World position (local position + formation offset).
    pub position: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub alive: bool,
    pub dying: bool,
    pub death_timer_ms: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub position: Vec2,
    pub size: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub dying: bool,
    pub death_timer_ms: f32,
    pub hit_flash_ms: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerupView {
    pub position: Vec2,
    pub size: f32,
    pub kind: PowerupKind,
}

/// Result carried into the game-over scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverView {
    pub score: u64,
    pub wave: u32,
    pub player_name: String,
    pub saved: bool,
    /// 1-based scoreboard position of this run, if it made the table.
    pub rank: Option<usize>,
}
