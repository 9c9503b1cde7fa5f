//! Static game configuration.
//!
//! One immutable `GameConfig` is built at session start and passed by
//! reference into every component. Nothing in the simulation reads global
//! tunables. All durations ending in `_ms` are milliseconds; speeds are
//! pixels per second.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::Action;
use crate::error::ConfigError;

/// Logical canvas dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Distance from the bottom of the canvas to the ship's centre.
    pub bottom_offset: f32,
    pub fire_cooldown_ms: f32,
    /// Bullets per volley while spread fire is active.
    pub spread_count: u32,
    /// Horizontal speed step between adjacent spread bullets.
    pub spread_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 40.0,
            speed: 300.0,
            bottom_offset: 60.0,
            fire_cooldown_ms: 250.0,
            spread_count: 3,
            spread_speed: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 12.0,
            speed: 500.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub rows: u32,
    pub cols: u32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    /// Centre y of the first row when a wave spawns.
    pub start_y: f32,
    pub base_speed: f32,
    pub speed_increase_per_wave: f32,
    pub step_down: f32,
    /// Horizontal distance from each canvas edge to the formation bound.
    pub bounds_margin: f32,
    pub death_duration_ms: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 30.0,
            rows: 4,
            cols: 8,
            spacing_x: 60.0,
            spacing_y: 50.0,
            start_y: 60.0,
            base_speed: 40.0,
            speed_increase_per_wave: 10.0,
            step_down: 20.0,
            bounds_margin: 20.0,
            death_duration_ms: 300.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub width: f32,
    pub height: f32,
    pub y: f32,
    pub base_hp: u32,
    /// Extra hit points for every boss after the first.
    pub hp_per_encounter: u32,
    pub speed: f32,
    pub patrol_margin: f32,
    /// A boss replaces the grid every `spawn_interval` waves.
    pub spawn_interval: u32,
    pub death_duration_ms: f32,
    pub hit_flash_ms: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 60.0,
            y: 100.0,
            base_hp: 20,
            hp_per_encounter: 10,
            speed: 120.0,
            patrol_margin: 20.0,
            spawn_interval: 3,
            death_duration_ms: 1000.0,
            hit_flash_ms: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    pub max: u32,
    pub per_kill: u32,
    pub per_boss_kill: u32,
    pub projectile_speed: f32,
    pub projectile_size: f32,
    /// Projectiles survive this far past the canvas edge.
    pub offscreen_margin: f32,
    pub boss_damage: u32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            max: 100,
            per_kill: 10,
            per_boss_kill: 50,
            projectile_speed: 400.0,
            projectile_size: 16.0,
            offscreen_margin: 50.0,
            boss_damage: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub per_kill: u64,
    pub per_boss_kill: u64,
    pub lives_max: u32,
    pub scoreboard_size: usize,
    pub name_max_len: usize,
    pub storage_key: String,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            per_kill: 100,
            per_boss_kill: 1000,
            lives_max: 3,
            scoreboard_size: 10,
            name_max_len: 10,
            storage_key: "barrage_highscores".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Enemies whose bottom edge reaches this y end the wave attempt.
    pub bottom_line_y: f32,
    pub wave_transition_ms: f32,
    /// Frame deltas are clamped to this many seconds.
    pub max_frame_delta: f32,
    pub tick_rate: u32,
    pub seed: u64,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            bottom_line_y: 500.0,
            wave_transition_ms: 2000.0,
            max_frame_delta: 0.1,
            tick_rate: 60,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    /// Probability in `[0, 1]` that a destroyed enemy drops an item.
    pub drop_chance: f64,
    pub fall_speed: f32,
    pub size: f32,
    pub spread_duration_ms: f32,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.08,
            fall_speed: 120.0,
            size: 20.0,
            spread_duration_ms: 8000.0,
        }
    }
}

/// Action to physical key identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings(pub BTreeMap<Action, BTreeSet<String>>);

impl KeyBindings {
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = &str> {
        self.0.get(&action).into_iter().flatten().map(String::as_str)
    }

    /// Every action bound to `key`.
    pub fn actions_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = Action> + 'a {
        self.0
            .iter()
            .filter(move |(_, keys)| keys.contains(key))
            .map(|(action, _)| *action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bind = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect::<BTreeSet<_>>();
        let mut map = BTreeMap::new();
        map.insert(Action::Left, bind(&["ArrowLeft", "KeyA"]));
        map.insert(Action::Right, bind(&["ArrowRight", "KeyD"]));
        map.insert(Action::Shoot, bind(&["Space"]));
        map.insert(Action::Power, bind(&["KeyE", "ShiftLeft"]));
        Self(map)
    }
}

/// Complete static configuration for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub enemy: EnemyConfig,
    pub boss: BossConfig,
    pub power: PowerConfig,
    pub score: ScoreConfig,
    pub play: PlayConfig,
    pub powerups: PowerupConfig,
    pub keys: KeyBindings,
}

impl GameConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas.width", self.canvas.width),
            ("canvas.height", self.canvas.height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("player.speed", self.player.speed),
            ("bullet.width", self.bullet.width),
            ("bullet.height", self.bullet.height),
            ("bullet.speed", self.bullet.speed),
            ("enemy.width", self.enemy.width),
            ("enemy.height", self.enemy.height),
            ("boss.width", self.boss.width),
            ("boss.height", self.boss.height),
            ("power.projectile_speed", self.power.projectile_speed),
            ("power.projectile_size", self.power.projectile_size),
            ("play.max_frame_delta", self.play.max_frame_delta),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.boss.spawn_interval == 0 {
            return Err(ConfigError::Invalid("boss.spawn_interval must be non-zero".into()));
        }
        if self.power.max == 0 {
            return Err(ConfigError::Invalid("power.max must be non-zero".into()));
        }
        if self.score.lives_max == 0 {
            return Err(ConfigError::Invalid("score.lives_max must be non-zero".into()));
        }
        if self.play.tick_rate == 0 {
            return Err(ConfigError::Invalid("play.tick_rate must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.powerups.drop_chance) {
            return Err(ConfigError::Invalid("powerups.drop_chance must be within [0, 1]".into()));
        }
        let (min_x, max_x) = self.formation_bounds();
        if max_x - min_x < self.enemy.width {
            return Err(ConfigError::Invalid(
                "enemy.bounds_margin leaves no room for the formation".into(),
            ));
        }
        Ok(())
    }

    /// Horizontal bounds `[min_x, max_x]` the formation sweeps between.
    pub fn formation_bounds(&self) -> (f32, f32) {
        (
            self.enemy.bounds_margin,
            self.canvas.width - self.enemy.bounds_margin,
        )
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player.width, self.player.height)
    }

    pub fn bullet_size(&self) -> Vec2 {
        Vec2::new(self.bullet.width, self.bullet.height)
    }

    pub fn enemy_size(&self) -> Vec2 {
        Vec2::new(self.enemy.width, self.enemy.height)
    }

    pub fn boss_size(&self) -> Vec2 {
        Vec2::new(self.boss.width, self.boss.height)
    }

    /// Seconds per tick at the configured tick rate.
    pub fn tick_secs(&self) -> f32 {
        1.0 / self.play.tick_rate as f32
    }
}
