//! Score, lives, power resource and the persisted scoreboard.
//!
//! Storage failures never escape this module: a failed load reads as an
//! empty scoreboard and a failed save reports `false`. Both are logged.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use barrage_core::config::GameConfig;
use barrage_core::state::ScoreEntry;

use crate::persistence::ScoreStore;

pub struct ScoreSystem {
    score: u64,
    lives: u32,
    power: u32,
    player_name: String,
    store: Box<dyn ScoreStore + Send>,

    lives_max: u32,
    power_max: u32,
    kill_points: u64,
    kill_power: u32,
    boss_points: u64,
    boss_power: u32,
    scoreboard_size: usize,
    name_max_len: usize,
    storage_key: String,
}

impl std::fmt::Debug for ScoreSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreSystem")
            .field("score", &self.score)
            .field("lives", &self.lives)
            .field("power", &self.power)
            .field("player_name", &self.player_name)
            .finish_non_exhaustive()
    }
}

impl ScoreSystem {
    pub fn new(config: &GameConfig, store: Box<dyn ScoreStore + Send>) -> Self {
        Self {
            score: 0,
            lives: config.score.lives_max,
            power: 0,
            player_name: String::new(),
            store,
            lives_max: config.score.lives_max,
            power_max: config.power.max,
            kill_points: config.score.per_kill,
            kill_power: config.power.per_kill,
            boss_points: config.score.per_boss_kill,
            boss_power: config.power.per_boss_kill,
            scoreboard_size: config.score.scoreboard_size,
            name_max_len: config.score.name_max_len,
            storage_key: config.score.storage_key.clone(),
        }
    }

    /// Fresh run: zero score and power, full lives. The player name stays.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.lives_max;
        self.power = 0;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn power_max(&self) -> u32 {
        self.power_max
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Standard enemy kill reward.
    pub fn add_kill(&mut self) {
        self.add_kill_with(self.kill_points, self.kill_power);
    }

    pub fn add_kill_with(&mut self, points: u64, power: u32) {
        self.score += points;
        self.power = self.power.saturating_add(power).min(self.power_max);
    }

    pub fn add_boss_kill(&mut self) {
        self.add_kill_with(self.boss_points, self.boss_power);
    }

    /// All-or-nothing: succeeds only at full power, then empties it.
    pub fn consume_power(&mut self) -> bool {
        if !self.is_power_ready() {
            return false;
        }
        self.power = 0;
        true
    }

    pub fn fill_power(&mut self) {
        self.power = self.power_max;
    }

    pub fn is_power_ready(&self) -> bool {
        self.power == self.power_max
    }

    /// Returns the remaining lives, never below zero.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Returns the new lives count, capped at the maximum.
    pub fn add_life(&mut self) -> u32 {
        self.lives = (self.lives + 1).min(self.lives_max);
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Trimmed, uppercased and cut to the maximum name length.
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name
            .trim()
            .to_uppercase()
            .chars()
            .take(self.name_max_len)
            .collect();
    }

    /// The persisted list as stored, or empty if it cannot be read.
    pub fn scoreboard(&self) -> Vec<ScoreEntry> {
        match self.store.load_list(&self.storage_key) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = %self.storage_key, %err, "scoreboard unavailable");
                Vec::new()
            }
        }
    }

    /// Append this run to the scoreboard, keep the best entries and persist.
    /// Refused for an empty name or a zero score.
    pub fn save_score(&mut self) -> bool {
        if self.player_name.is_empty() || self.score == 0 {
            return false;
        }
        let mut entries = self.scoreboard();
        entries.push(ScoreEntry {
            name: self.player_name.clone(),
            score: self.score,
            date: now_millis(),
        });
        // Stable: equal scores keep their earlier order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.scoreboard_size);

        match self.store.save_list(&self.storage_key, &entries) {
            Ok(()) => {
                info!(
                    name = %self.player_name,
                    score = self.score,
                    rank = ?self.current_rank(),
                    "score saved"
                );
                true
            }
            Err(err) => {
                warn!(key = %self.storage_key, %err, "failed to save score");
                false
            }
        }
    }

    /// True if the table has a free slot or `candidate` beats the last entry.
    pub fn is_high_score(&self, candidate: u64) -> bool {
        let entries = self.scoreboard();
        if entries.len() < self.scoreboard_size {
            return true;
        }
        entries
            .get(self.scoreboard_size.saturating_sub(1))
            .map_or(true, |last| candidate > last.score)
    }

    /// 1-based position of the first entry matching the current name and
    /// score. Two runs with the same name and score are indistinguishable.
    pub fn current_rank(&self) -> Option<usize> {
        self.scoreboard()
            .iter()
            .take(self.scoreboard_size)
            .position(|e| e.name == self.player_name && e.score == self.score)
            .map(|i| i + 1)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
