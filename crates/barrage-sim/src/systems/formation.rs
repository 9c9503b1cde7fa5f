//! Formation kinematics: the shared sweep-and-step-down motion of a wave.
//!
//! Every enemy's world position is its local position plus the formation
//! offset. Each tick the offset slides horizontally; when the extent of the
//! alive-or-dying enemies reaches a horizontal bound the direction flips and
//! the formation steps down once.

use glam::Vec2;

use barrage_core::config::GameConfig;

use crate::entities::Enemy;

#[derive(Debug, Clone, PartialEq)]
pub struct FormationController {
    pub offset_x: f32,
    pub offset_y: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub speed: f32,
    pub step_down: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl FormationController {
    pub fn new(config: &GameConfig) -> Self {
        let (min_x, max_x) = config.formation_bounds();
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            direction: 1.0,
            speed: config.enemy.base_speed,
            step_down: config.enemy.step_down,
            min_x,
            max_x,
        }
    }

    /// Fresh formation for a new wave: zero offset, moving right.
    pub fn reset(&mut self, speed: f32) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.direction = 1.0;
        self.speed = speed;
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    pub fn increase_speed(&mut self, amount: f32) {
        self.speed += amount;
    }

    /// Advance one tick. Returns true if the direction flipped.
    ///
    /// The offset is not clamped on a flip: the formation may sit slightly
    /// past the bound for one tick before the reversed motion pulls it back.
    pub fn update(&mut self, dt: f32, enemies: &[Enemy]) -> bool {
        self.offset_x += self.speed * self.direction * dt;

        let offset = self.offset();
        let mut extent: Option<(f32, f32)> = None;
        for enemy in enemies.iter().filter(|e| e.is_alive() || e.is_dying()) {
            let b = enemy.bounds(offset);
            extent = Some(match extent {
                Some((left, right)) => (left.min(b.left()), right.max(b.right())),
                None => (b.left(), b.right()),
            });
        }
        let Some((left, right)) = extent else {
            return false;
        };

        if self.direction > 0.0 && right >= self.max_x {
            self.direction = -1.0;
            self.offset_y += self.step_down;
            true
        } else if self.direction < 0.0 && left <= self.min_x {
            self.direction = 1.0;
            self.offset_y += self.step_down;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::enums::EnemyKind;

    fn setup() -> (GameConfig, FormationController) {
        let config = GameConfig::default();
        let formation = FormationController::new(&config);
        (config, formation)
    }

    fn enemy_at(x: f32, config: &GameConfig) -> Enemy {
        Enemy::new(
            Vec2::new(x, 100.0),
            config.enemy_size(),
            EnemyKind::Drone,
            config.enemy.death_duration_ms,
        )
    }

    #[test]
    fn sweeps_right_without_flipping_mid_canvas() {
        let (config, mut formation) = setup();
        let enemies = vec![enemy_at(400.0, &config)];
        assert!(!formation.update(0.1, &enemies));
        assert_eq!(formation.offset_x, config.enemy.base_speed * 0.1);
        assert_eq!(formation.offset_y, 0.0);
        assert_eq!(formation.direction, 1.0);
    }

    #[test]
    fn flips_and_steps_down_at_right_bound() {
        let (config, mut formation) = setup();
        // Right edge lands exactly on max_x after one 0.1s step.
        let step = config.enemy.base_speed * 0.1;
        let x = formation.max_x - config.enemy.width / 2.0 - step;
        let enemies = vec![enemy_at(x, &config)];

        assert!(formation.update(0.1, &enemies));
        assert_eq!(formation.direction, -1.0);
        assert_eq!(formation.offset_y, config.enemy.step_down);
        // Not clamped.
        assert_eq!(formation.offset_x, step);

        // Moving left again: no second flip.
        assert!(!formation.update(0.1, &enemies));
        assert_eq!(formation.offset_y, config.enemy.step_down);
    }

    #[test]
    fn flips_at_left_bound() {
        let (config, mut formation) = setup();
        formation.direction = -1.0;
        let enemies = vec![enemy_at(formation.min_x + config.enemy.width / 2.0, &config)];
        assert!(formation.update(0.1, &enemies));
        assert_eq!(formation.direction, 1.0);
        assert_eq!(formation.offset_y, config.enemy.step_down);
    }

    #[test]
    fn dying_enemies_count_removed_do_not() {
        let (config, mut formation) = setup();
        let mut edge = enemy_at(formation.max_x - config.enemy.width / 2.0, &config);
        let middle = enemy_at(400.0, &config);

        edge.start_death();
        let enemies = vec![edge.clone(), middle.clone()];
        assert!(formation.update(0.01, &enemies));

        formation.reset(config.enemy.base_speed);
        edge.update(10.0);
        assert!(edge.is_removed());
        let enemies = vec![edge, middle];
        assert!(!formation.update(0.01, &enemies));
        assert_eq!(formation.direction, 1.0);
    }

    #[test]
    fn empty_formation_never_flips() {
        let (_, mut formation) = setup();
        formation.offset_x = 10_000.0;
        assert!(!formation.update(0.1, &[]));
        assert_eq!(formation.direction, 1.0);
        assert_eq!(formation.offset_y, 0.0);
    }

    #[test]
    fn increase_speed_adds() {
        let (config, mut formation) = setup();
        formation.increase_speed(15.0);
        assert_eq!(formation.speed, config.enemy.base_speed + 15.0);
    }
}
