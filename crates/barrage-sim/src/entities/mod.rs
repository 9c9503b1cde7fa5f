//! Entity state and entity-local behaviour.
//!
//! Entities own their kinematics and timers. Cross-entity logic
//! (collisions, scoring, spawning) lives in `crate::systems`.
//! Timer fields are milliseconds; `update` takes the frame delta in seconds
//! and converts once.

pub mod boss;
pub mod bullet;
pub mod enemy;
pub mod player;
pub mod power_attack;
pub mod powerup;

pub use boss::Boss;
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use player::Player;
pub use power_attack::{PowerAttack, PowerProjectile};
pub use powerup::Powerup;

/// Seconds to milliseconds, the one conversion point for timer fields.
pub(crate) fn to_ms(dt: f32) -> f32 {
    dt * 1000.0
}
