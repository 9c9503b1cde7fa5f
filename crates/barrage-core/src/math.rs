//! Pure math helpers. No state.

use glam::Vec2;
use rand::Rng;

use crate::types::Aabb;

/// Clamp `value` into `[min, max]`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Strict AABB overlap:
/// `a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y`.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Linear interpolation between `a` and `b` by `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Uniform float in `[min, max)`. Returns `min` for an empty range.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Uniform integer in `[min, max]` (inclusive). Returns `min` for an empty range.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// The eight compass directions as unit vectors, clockwise from north.
/// Screen space: negative y is up.
pub fn eight_directions() -> [Vec2; 8] {
    let d = std::f32::consts::FRAC_1_SQRT_2;
    [
        Vec2::new(0.0, -1.0),
        Vec2::new(d, -d),
        Vec2::new(1.0, 0.0),
        Vec2::new(d, d),
        Vec2::new(0.0, 1.0),
        Vec2::new(-d, d),
        Vec2::new(-1.0, 0.0),
        Vec2::new(-d, -d),
    ]
}
