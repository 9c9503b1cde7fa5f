//! Wave spawning: grid generation, boss-wave policy and difficulty ramp.

use glam::Vec2;
use rand::Rng;

use barrage_core::config::GameConfig;
use barrage_core::enums::EnemyKind;

use crate::entities::{Boss, Enemy};

/// Wave counter and boss-encounter bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SpawnSystem {
    wave: u32,
    bosses_spawned: u32,
}

impl SpawnSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the wave counter and return the new wave number.
    pub fn next_wave(&mut self) -> u32 {
        self.wave += 1;
        self.wave
    }

    pub fn current_wave(&self) -> u32 {
        self.wave
    }

    pub fn reset(&mut self) {
        self.wave = 0;
        self.bosses_spawned = 0;
    }

    /// Boss waves replace the grid every `boss.spawn_interval` waves.
    pub fn should_spawn_boss(&self, wave: u32, config: &GameConfig) -> bool {
        wave > 0 && wave % config.boss.spawn_interval == 0
    }

    /// Linear ramp: wave 0 moves at exactly the base speed.
    pub fn speed_for_wave(&self, wave: u32, config: &GameConfig) -> f32 {
        config.enemy.base_speed + wave as f32 * config.enemy.speed_increase_per_wave
    }

    /// Lay out a `rows × cols` grid, horizontally centred on the canvas,
    /// row 0 at `enemy.start_y`. Local positions already include the grid
    /// origin so a fresh formation starts with a zero offset.
    pub fn create_wave(&self, rows: u32, cols: u32, config: &GameConfig) -> Vec<Enemy> {
        let e = &config.enemy;
        let grid_width = cols.saturating_sub(1) as f32 * e.spacing_x;
        let start_x = (config.canvas.width - grid_width) / 2.0;

        let mut enemies = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let local = Vec2::new(
                    start_x + col as f32 * e.spacing_x,
                    e.start_y + row as f32 * e.spacing_y,
                );
                enemies.push(Enemy::new(
                    local,
                    config.enemy_size(),
                    EnemyKind::for_row(row),
                    e.death_duration_ms,
                ));
            }
        }
        enemies
    }

    /// Spawn the next boss. Each encounter adds `boss.hp_per_encounter`
    /// hit points; the initial patrol direction is random.
    pub fn create_boss<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) -> Boss {
        let max_hp = config.boss.base_hp + self.bosses_spawned * config.boss.hp_per_encounter;
        self.bosses_spawned += 1;
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        Boss::new(config, max_hp, direction)
    }

    pub fn bosses_spawned(&self) -> u32 {
        self.bosses_spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn wave_counter_is_monotonic_until_reset() {
        let mut spawn = SpawnSystem::new();
        assert_eq!(spawn.current_wave(), 0);
        assert_eq!(spawn.next_wave(), 1);
        assert_eq!(spawn.next_wave(), 2);
        spawn.reset();
        assert_eq!(spawn.current_wave(), 0);
        assert_eq!(spawn.next_wave(), 1);
    }

    #[test]
    fn boss_every_third_wave() {
        let config = GameConfig::default();
        let spawn = SpawnSystem::new();
        let bosses: Vec<u32> = (0..10).filter(|&w| spawn.should_spawn_boss(w, &config)).collect();
        assert_eq!(bosses, vec![3, 6, 9]);
    }

    #[test]
    fn speed_ramps_linearly() {
        let config = GameConfig::default();
        let spawn = SpawnSystem::new();
        assert_eq!(spawn.speed_for_wave(0, &config), config.enemy.base_speed);
        assert_eq!(
            spawn.speed_for_wave(4, &config),
            config.enemy.base_speed + 4.0 * config.enemy.speed_increase_per_wave
        );
    }

    #[test]
    fn grid_layout_and_ranks() {
        let config = GameConfig::default();
        let enemies = SpawnSystem::new().create_wave(4, 8, &config);
        assert_eq!(enemies.len(), 32);
        assert!(enemies.iter().all(|e| e.is_alive()));

        let kinds: Vec<EnemyKind> = enemies.iter().step_by(8).map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EnemyKind::Elite, EnemyKind::Soldier, EnemyKind::Drone, EnemyKind::Drone]
        );

        // Centred: first and last column equidistant from the canvas edges.
        let first = enemies[0].local.x;
        let last = enemies[7].local.x;
        assert_eq!(first, config.canvas.width - last);
        assert_eq!(enemies[0].local.y, config.enemy.start_y);
        assert_eq!(enemies[8].local.y, config.enemy.start_y + config.enemy.spacing_y);
    }

    #[test]
    fn boss_hp_scales_per_encounter() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut spawn = SpawnSystem::new();
        let first = spawn.create_boss(&config, &mut rng);
        let second = spawn.create_boss(&config, &mut rng);
        assert_eq!(first.max_hp, config.boss.base_hp);
        assert_eq!(second.max_hp, config.boss.base_hp + config.boss.hp_per_encounter);
        assert_eq!(second.hp, second.max_hp);
        assert!(first.direction == 1.0 || first.direction == -1.0);
    }
}
