use glam::Vec2;

use barrage_core::config::GameConfig;
use barrage_core::math::eight_directions;
use barrage_core::types::Aabb;

/// One projectile of a radial power burst.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerProjectile {
    pub position: Vec2,
    /// Unit length.
    pub direction: Vec2,
    pub speed: f32,
    pub size: f32,
    pub active: bool,
}

impl PowerProjectile {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, Vec2::splat(self.size))
    }
}

/// A burst of eight projectiles flying out along the compass directions.
/// Active while at least one projectile is.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerAttack {
    pub origin: Vec2,
    pub projectiles: Vec<PowerProjectile>,
    offscreen_margin: f32,
}

impl PowerAttack {
    pub fn new(origin: Vec2, config: &GameConfig) -> Self {
        let projectiles = eight_directions()
            .into_iter()
            .map(|direction| PowerProjectile {
                position: origin,
                direction,
                speed: config.power.projectile_speed,
                size: config.power.projectile_size,
                active: true,
            })
            .collect();
        Self {
            origin,
            projectiles,
            offscreen_margin: config.power.offscreen_margin,
        }
    }

    /// Move every live projectile; drop those past the canvas plus margin.
    pub fn update(&mut self, dt: f32, canvas: Vec2) {
        let margin = self.offscreen_margin;
        for p in self.projectiles.iter_mut().filter(|p| p.active) {
            p.position += p.direction * p.speed * dt;
            if p.position.x < -margin
                || p.position.x > canvas.x + margin
                || p.position.y < -margin
                || p.position.y > canvas.y + margin
            {
                p.active = false;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.projectiles.iter().any(|p| p.active)
    }
}
