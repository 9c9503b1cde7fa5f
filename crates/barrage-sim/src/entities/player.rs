use glam::Vec2;

use barrage_core::config::GameConfig;
use barrage_core::enums::Action;
use barrage_core::input::InputState;
use barrage_core::math::clamp;
use barrage_core::types::Aabb;

use super::{to_ms, Bullet};

/// The player's ship. `position` is the centre of the ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub fire_cooldown_ms: f32,
    pub fire_cooldown_max_ms: f32,
    /// Remaining spread-fire time from a powerup.
    pub spread_remaining_ms: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Self::spawn_point(config),
            size: config.player_size(),
            speed: config.player.speed,
            fire_cooldown_ms: 0.0,
            fire_cooldown_max_ms: config.player.fire_cooldown_ms,
            spread_remaining_ms: 0.0,
        }
    }

    fn spawn_point(config: &GameConfig) -> Vec2 {
        Vec2::new(
            config.canvas.width / 2.0,
            config.canvas.height - config.player.bottom_offset,
        )
    }

    /// Back to the spawn point with weapons ready.
    pub fn reset(&mut self, config: &GameConfig) {
        self.position = Self::spawn_point(config);
        self.fire_cooldown_ms = 0.0;
        self.spread_remaining_ms = 0.0;
    }

    /// Horizontal movement and timer countdown. Firing is driven by the
    /// play scene through [`Player::shoot`] / [`Player::shoot_spread`].
    pub fn update(&mut self, dt: f32, input: &InputState, canvas_width: f32) {
        let mut direction = 0.0;
        if input.is_action_active(Action::Left) {
            direction -= 1.0;
        }
        if input.is_action_active(Action::Right) {
            direction += 1.0;
        }
        let half = self.size.x / 2.0;
        self.position.x = clamp(
            self.position.x + direction * self.speed * dt,
            half,
            canvas_width - half,
        );

        let dt_ms = to_ms(dt);
        self.fire_cooldown_ms = (self.fire_cooldown_ms - dt_ms).max(0.0);
        self.spread_remaining_ms = (self.spread_remaining_ms - dt_ms).max(0.0);
    }

    pub fn can_shoot(&self) -> bool {
        self.fire_cooldown_ms <= 0.0
    }

    pub fn spread_active(&self) -> bool {
        self.spread_remaining_ms > 0.0
    }

    /// Where bullets leave the ship: top centre.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.y - self.size.y / 2.0)
    }

    /// Fire one bullet straight up if the cooldown has elapsed.
    /// A refused shot leaves the cooldown untouched.
    pub fn shoot(&mut self, config: &GameConfig) -> Option<Bullet> {
        if !self.can_shoot() {
            return None;
        }
        self.fire_cooldown_ms = self.fire_cooldown_max_ms;
        Some(Bullet::new(
            self.muzzle(),
            Vec2::new(0.0, -config.bullet.speed),
            config.bullet_size(),
        ))
    }

    /// Fire `count` bullets fanned out horizontally, gated by the same
    /// cooldown as [`Player::shoot`].
    pub fn shoot_spread(&mut self, count: u32, config: &GameConfig) -> Vec<Bullet> {
        if !self.can_shoot() || count == 0 {
            return Vec::new();
        }
        self.fire_cooldown_ms = self.fire_cooldown_max_ms;
        let center = (count - 1) as f32 / 2.0;
        (0..count)
            .map(|i| {
                let vx = (i as f32 - center) * config.player.spread_speed;
                Bullet::new(
                    self.muzzle(),
                    Vec2::new(vx, -config.bullet.speed),
                    config.bullet_size(),
                )
            })
            .collect()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GameConfig, Player, InputState) {
        let config = GameConfig::default();
        let player = Player::new(&config);
        let input = InputState::new(config.keys.clone());
        (config, player, input)
    }

    #[test]
    fn shoot_when_ready() {
        let (config, mut player, _) = setup();
        let bullet = player.shoot(&config).unwrap();
        assert_eq!(bullet.position.x, player.position.x);
        assert_eq!(bullet.position.y, player.position.y - player.size.y / 2.0);
        assert!(bullet.velocity.y < 0.0);
        assert_eq!(bullet.velocity.x, 0.0);
        assert_eq!(player.fire_cooldown_ms, config.player.fire_cooldown_ms);
    }

    #[test]
    fn shoot_on_cooldown_is_refused() {
        let (config, mut player, _) = setup();
        player.fire_cooldown_ms = 120.0;
        assert!(player.shoot(&config).is_none());
        assert_eq!(player.fire_cooldown_ms, 120.0);
        assert!(player.shoot_spread(3, &config).is_empty());
        assert_eq!(player.fire_cooldown_ms, 120.0);
    }

    #[test]
    fn spread_fans_symmetrically() {
        let (config, mut player, _) = setup();
        let bullets = player.shoot_spread(3, &config);
        assert_eq!(bullets.len(), 3);
        assert_eq!(bullets[0].velocity.x, -config.player.spread_speed);
        assert_eq!(bullets[1].velocity.x, 0.0);
        assert_eq!(bullets[2].velocity.x, config.player.spread_speed);
        assert!(bullets.iter().all(|b| b.velocity.y < 0.0));
        assert!(!player.can_shoot());
    }

    #[test]
    fn movement_is_clamped_to_canvas() {
        let (config, mut player, mut input) = setup();
        input.key_down("ArrowLeft");
        for _ in 0..100 {
            player.update(0.1, &input, config.canvas.width);
        }
        assert_eq!(player.position.x, player.size.x / 2.0);

        input.key_up("ArrowLeft");
        input.key_down("KeyD");
        for _ in 0..100 {
            player.update(0.1, &input, config.canvas.width);
        }
        assert_eq!(player.position.x, config.canvas.width - player.size.x / 2.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let (config, mut player, mut input) = setup();
        let start = player.position.x;
        input.key_down("KeyA");
        input.key_down("KeyD");
        player.update(0.1, &input, config.canvas.width);
        assert_eq!(player.position.x, start);
    }

    #[test]
    fn cooldown_counts_down_to_zero() {
        let (config, mut player, input) = setup();
        player.shoot(&config);
        player.update(0.1, &input, config.canvas.width);
        assert!((player.fire_cooldown_ms - 150.0).abs() < 1e-3);
        player.update(0.1, &input, config.canvas.width);
        player.update(0.1, &input, config.canvas.width);
        assert_eq!(player.fire_cooldown_ms, 0.0);
        assert!(player.can_shoot());
    }

    #[test]
    fn reset_restores_spawn_and_cooldown() {
        let (config, mut player, _) = setup();
        player.position.x = 10.0;
        player.fire_cooldown_ms = 200.0;
        player.spread_remaining_ms = 500.0;
        player.reset(&config);
        assert_eq!(player, Player::new(&config));
    }
}
