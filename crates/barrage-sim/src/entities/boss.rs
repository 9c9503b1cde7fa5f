use glam::Vec2;

use barrage_core::config::GameConfig;
use barrage_core::types::Aabb;

use super::to_ms;

/// Boss lifecycle. Only `Fighting` is collidable; `Dying` plays the death
/// animation; `Defeated` means the encounter is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossState {
    Fighting,
    Dying { timer_ms: f32 },
    Defeated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub position: Vec2,
    pub size: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub speed: f32,
    pub hit_flash_ms: f32,
    min_x: f32,
    max_x: f32,
    death_duration_ms: f32,
    hit_flash_duration_ms: f32,
    state: BossState,
}

impl Boss {
    /// A boss at the top centre. `max_hp` and `direction` are chosen by the
    /// spawn policy.
    pub fn new(config: &GameConfig, max_hp: u32, direction: f32) -> Self {
        let half = config.boss.width / 2.0;
        Self {
            position: Vec2::new(config.canvas.width / 2.0, config.boss.y),
            size: config.boss_size(),
            hp: max_hp,
            max_hp,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            speed: config.boss.speed,
            hit_flash_ms: 0.0,
            min_x: config.boss.patrol_margin + half,
            max_x: config.canvas.width - config.boss.patrol_margin - half,
            death_duration_ms: config.boss.death_duration_ms,
            hit_flash_duration_ms: config.boss.hit_flash_ms,
            state: BossState::Fighting,
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    /// False only once the death animation has finished.
    pub fn is_active(&self) -> bool {
        self.state != BossState::Defeated
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, BossState::Dying { .. })
    }

    pub fn is_collidable(&self) -> bool {
        self.state == BossState::Fighting
    }

    pub fn death_timer_ms(&self) -> f32 {
        match self.state {
            BossState::Dying { timer_ms } => timer_ms,
            _ => 0.0,
        }
    }

    /// Apply damage. hp saturates at 0; returns true only for the hit that
    /// starts the death animation.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_collidable() {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        self.hit_flash_ms = self.hit_flash_duration_ms;
        if self.hp == 0 {
            self.state = BossState::Dying {
                timer_ms: self.death_duration_ms,
            };
            return true;
        }
        false
    }

    /// Patrol back and forth while fighting; count down the death animation
    /// while dying.
    pub fn update(&mut self, dt: f32) {
        let dt_ms = to_ms(dt);
        self.hit_flash_ms = (self.hit_flash_ms - dt_ms).max(0.0);

        match self.state {
            BossState::Fighting => {
                self.position.x += self.speed * self.direction * dt;
                if self.position.x >= self.max_x {
                    self.position.x = self.max_x;
                    self.direction = -1.0;
                } else if self.position.x <= self.min_x {
                    self.position.x = self.min_x;
                    self.direction = 1.0;
                }
            }
            BossState::Dying { timer_ms } => {
                let remaining = timer_ms - dt_ms;
                self.state = if remaining <= 0.0 {
                    BossState::Defeated
                } else {
                    BossState::Dying {
                        timer_ms: remaining,
                    }
                };
            }
            BossState::Defeated => {}
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }
}
