use glam::Vec2;

use barrage_core::config::GameConfig;
use barrage_core::enums::PowerupKind;
use barrage_core::types::Aabb;

/// A collectible item falling from a destroyed enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    pub position: Vec2,
    pub kind: PowerupKind,
    pub size: f32,
    pub fall_speed: f32,
    pub active: bool,
}

impl Powerup {
    pub fn new(position: Vec2, kind: PowerupKind, config: &GameConfig) -> Self {
        Self {
            position,
            kind,
            size: config.powerups.size,
            fall_speed: config.powerups.fall_speed,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32, canvas_height: f32) {
        if !self.active {
            return;
        }
        self.position.y += self.fall_speed * dt;
        if self.position.y - self.size / 2.0 > canvas_height {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, Vec2::splat(self.size))
    }
}
