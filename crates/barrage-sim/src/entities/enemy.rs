use glam::Vec2;

use barrage_core::enums::EnemyKind;
use barrage_core::types::Aabb;

use super::to_ms;

/// Enemy lifecycle. `Alive` is collidable; `Dying` plays the death
/// animation and still counts toward the formation's extent; `Removed`
/// is filtered out of the active list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeState {
    Alive,
    Dying { timer_ms: f32 },
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Position relative to the formation origin.
    pub local: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    death_duration_ms: f32,
    state: LifeState,
}

impl Enemy {
    pub fn new(local: Vec2, size: Vec2, kind: EnemyKind, death_duration_ms: f32) -> Self {
        Self {
            local,
            size,
            kind,
            death_duration_ms,
            state: LifeState::Alive,
        }
    }

    pub fn world_position(&self, offset: Vec2) -> Vec2 {
        self.local + offset
    }

    pub fn bounds(&self, offset: Vec2) -> Aabb {
        Aabb::from_center(self.world_position(offset), self.size)
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Alive
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, LifeState::Dying { .. })
    }

    pub fn is_removed(&self) -> bool {
        self.state == LifeState::Removed
    }

    pub fn death_timer_ms(&self) -> f32 {
        match self.state {
            LifeState::Dying { timer_ms } => timer_ms,
            _ => 0.0,
        }
    }

    /// Alive → Dying. Returns false (and does nothing) unless alive, so a
    /// kill can only ever be registered once.
    pub fn start_death(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.state = LifeState::Dying {
            timer_ms: self.death_duration_ms,
        };
        true
    }

    /// Advance the death animation. Dying → Removed when the timer runs out.
    pub fn update(&mut self, dt: f32) {
        if let LifeState::Dying { timer_ms } = self.state {
            let remaining = timer_ms - to_ms(dt);
            self.state = if remaining <= 0.0 {
                LifeState::Removed
            } else {
                LifeState::Dying {
                    timer_ms: remaining,
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> Enemy {
        Enemy::new(Vec2::new(100.0, 60.0), Vec2::new(40.0, 30.0), EnemyKind::Drone, 300.0)
    }

    #[test]
    fn world_position_applies_offset() {
        let e = enemy();
        assert_eq!(e.world_position(Vec2::new(5.0, 20.0)), Vec2::new(105.0, 80.0));
        let b = e.bounds(Vec2::ZERO);
        assert_eq!(b.left(), 80.0);
        assert_eq!(b.bottom(), 75.0);
    }

    #[test]
    fn death_is_registered_once() {
        let mut e = enemy();
        assert!(e.start_death());
        assert!(e.is_dying());
        assert!(!e.is_alive());
        assert!(!e.start_death());
        assert_eq!(e.death_timer_ms(), 300.0);
    }

    #[test]
    fn death_timer_runs_out() {
        let mut e = enemy();
        e.start_death();
        e.update(0.1);
        assert!(e.is_dying());
        assert!((e.death_timer_ms() - 200.0).abs() < 1e-3);
        e.update(0.1);
        e.update(0.1);
        assert!(e.is_removed());
        assert!(!e.is_dying());
    }

    #[test]
    fn alive_enemy_ignores_update() {
        let mut e = enemy();
        e.update(10.0);
        assert!(e.is_alive());
    }
}
