//! Collision detection and minimal resolution.
//!
//! Each pass scans one pair category, applies the entity-local change a hit
//! implies (deactivate a bullet, start an enemy's death) and returns the
//! events it produced. Every event is also appended to a per-tick buffer
//! that the play scene clears at the start of the tick. Scoring, lives and
//! boss damage are applied by the caller.

use glam::Vec2;

use barrage_core::events::CollisionEvent;

use crate::entities::{Boss, Bullet, Enemy, Player, PowerAttack, Powerup};

#[derive(Debug, Clone, Default)]
pub struct CollisionSystem {
    events: Vec<CollisionEvent>,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events accumulated since the last `clear()`.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, found: &[CollisionEvent]) {
        self.events.extend_from_slice(found);
    }

    /// First match wins: each active bullet kills at most one alive enemy,
    /// the earliest overlapping one in list order.
    pub fn bullets_vs_enemies(
        &mut self,
        bullets: &mut [Bullet],
        enemies: &mut [Enemy],
        offset: Vec2,
    ) -> Vec<CollisionEvent> {
        let mut found = Vec::new();
        for (bi, bullet) in bullets.iter_mut().enumerate() {
            if !bullet.active {
                continue;
            }
            let bullet_box = bullet.bounds();
            for (ei, enemy) in enemies.iter_mut().enumerate() {
                if !enemy.is_alive() || !bullet_box.overlaps(&enemy.bounds(offset)) {
                    continue;
                }
                found.push(CollisionEvent::BulletEnemy {
                    bullet: bi,
                    enemy: ei,
                    kind: enemy.kind,
                    position: enemy.world_position(offset),
                });
                bullet.active = false;
                enemy.start_death();
                break;
            }
        }
        self.record(&found);
        found
    }

    /// Every overlapping bullet scores a hit, so one tick may land several.
    pub fn bullets_vs_boss(
        &mut self,
        bullets: &mut [Bullet],
        boss: Option<&Boss>,
        damage: u32,
    ) -> Vec<CollisionEvent> {
        let Some(boss) = boss.filter(|b| b.is_collidable()) else {
            return Vec::new();
        };
        let boss_box = boss.bounds();
        let mut found = Vec::new();
        for (bi, bullet) in bullets.iter_mut().enumerate() {
            if bullet.active && bullet.bounds().overlaps(&boss_box) {
                bullet.active = false;
                found.push(CollisionEvent::BulletBoss {
                    bullet: bi,
                    damage,
                    position: bullet.position,
                });
            }
        }
        self.record(&found);
        found
    }

    /// Projectiles pass through enemies, so one may kill several in a tick.
    pub fn power_attack_vs_enemies(
        &mut self,
        attack: Option<&mut PowerAttack>,
        enemies: &mut [Enemy],
        offset: Vec2,
    ) -> Vec<CollisionEvent> {
        let Some(attack) = attack else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for (pi, projectile) in attack.projectiles.iter().enumerate() {
            if !projectile.active {
                continue;
            }
            let projectile_box = projectile.bounds();
            for (ei, enemy) in enemies.iter_mut().enumerate() {
                if enemy.is_alive() && projectile_box.overlaps(&enemy.bounds(offset)) {
                    enemy.start_death();
                    found.push(CollisionEvent::PowerEnemy {
                        projectile: pi,
                        enemy: ei,
                        kind: enemy.kind,
                        position: enemy.world_position(offset),
                    });
                }
            }
        }
        self.record(&found);
        found
    }

    /// A projectile is spent on its first boss hit.
    pub fn power_attack_vs_boss(
        &mut self,
        attack: Option<&mut PowerAttack>,
        boss: Option<&Boss>,
        damage: u32,
    ) -> Vec<CollisionEvent> {
        let (Some(attack), Some(boss)) = (attack, boss.filter(|b| b.is_collidable())) else {
            return Vec::new();
        };
        let boss_box = boss.bounds();
        let mut found = Vec::new();
        for (pi, projectile) in attack.projectiles.iter_mut().enumerate() {
            if projectile.active && projectile.bounds().overlaps(&boss_box) {
                projectile.active = false;
                found.push(CollisionEvent::PowerBoss {
                    projectile: pi,
                    damage,
                    position: projectile.position,
                });
            }
        }
        self.record(&found);
        found
    }

    /// True if any alive enemy's bottom edge has reached `bottom_line_y`.
    /// Stops at the first violator and records a single event.
    pub fn enemy_reaches_bottom(
        &mut self,
        enemies: &[Enemy],
        offset: Vec2,
        bottom_line_y: f32,
    ) -> bool {
        let violator = enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .find(|(_, e)| e.bounds(offset).bottom() >= bottom_line_y);
        match violator {
            Some((ei, enemy)) => {
                self.events.push(CollisionEvent::EnemyReachBottom {
                    enemy: ei,
                    position: enemy.world_position(offset),
                });
                true
            }
            None => false,
        }
    }

    pub fn player_vs_powerups(
        &mut self,
        player: &Player,
        powerups: &mut [Powerup],
    ) -> Vec<CollisionEvent> {
        let player_box = player.bounds();
        let mut found = Vec::new();
        for (pi, powerup) in powerups.iter_mut().enumerate() {
            if powerup.active && powerup.bounds().overlaps(&player_box) {
                powerup.active = false;
                found.push(CollisionEvent::PlayerPowerup {
                    powerup: pi,
                    kind: powerup.kind,
                });
            }
        }
        self.record(&found);
        found
    }
}
