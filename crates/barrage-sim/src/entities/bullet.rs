use glam::Vec2;

use barrage_core::types::Aabb;

/// A player projectile. Inactive bullets are removed and never collide.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    /// Negative y is upward.
    pub velocity: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Bullet {
    pub fn new(position: Vec2, velocity: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity,
            size,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32, canvas: Vec2) {
        if !self.active {
            return;
        }
        self.position += self.velocity * dt;
        if self.is_off_screen(canvas) {
            self.active = false;
        }
    }

    /// True once the whole bullet has left the canvas.
    pub fn is_off_screen(&self, canvas: Vec2) -> bool {
        let b = self.bounds();
        b.bottom() < 0.0 || b.top() > canvas.y || b.right() < 0.0 || b.left() > canvas.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }
}
