//! Scripted player for headless runs.
//!
//! Reads each published snapshot and turns it into key presses: hold fire,
//! slide under the lowest enemy (or the boss, or a falling powerup), and
//! trigger the power attack whenever it is charged.

use std::collections::BTreeSet;

use barrage_core::enums::SceneKind;
use barrage_core::state::FrameSnapshot;

use crate::state::GameLoopCommand;

const KEY_LEFT: &str = "ArrowLeft";
const KEY_RIGHT: &str = "ArrowRight";
const KEY_SHOOT: &str = "Space";
const KEY_POWER: &str = "KeyE";

#[derive(Debug, Clone)]
pub struct Autopilot {
    held: BTreeSet<&'static str>,
    /// Horizontal dead zone around the target, in pixels.
    tolerance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            held: BTreeSet::new(),
            tolerance: 6.0,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> impl Iterator<Item = &str> {
        self.held.iter().copied()
    }

    /// Key transitions that move from the currently held keys to what this
    /// frame calls for.
    pub fn steer(&mut self, snapshot: &FrameSnapshot) -> Vec<GameLoopCommand> {
        let wanted = self.wanted_keys(snapshot);

        let mut commands: Vec<GameLoopCommand> = self
            .held
            .difference(&wanted)
            .map(|key| GameLoopCommand::KeyUp(key.to_string()))
            .collect();
        commands.extend(
            wanted
                .difference(&self.held)
                .map(|key| GameLoopCommand::KeyDown(key.to_string())),
        );
        self.held = wanted;
        commands
    }

    fn wanted_keys(&self, snapshot: &FrameSnapshot) -> BTreeSet<&'static str> {
        let mut wanted = BTreeSet::new();
        match snapshot.scene {
            // Tap fire: every other frame is a fresh press.
            SceneKind::Menu => {
                if !self.held.contains(KEY_SHOOT) {
                    wanted.insert(KEY_SHOOT);
                }
            }
            SceneKind::GameOver => {}
            SceneKind::Play => {
                wanted.insert(KEY_SHOOT);
                if snapshot.hud.power_ready && !self.held.contains(KEY_POWER) {
                    wanted.insert(KEY_POWER);
                }
                if let (Some(player), Some(target)) = (&snapshot.player, target_x(snapshot)) {
                    let dx = target - player.position.x;
                    if dx < -self.tolerance {
                        wanted.insert(KEY_LEFT);
                    } else if dx > self.tolerance {
                        wanted.insert(KEY_RIGHT);
                    }
                }
            }
        }
        wanted
    }
}

/// Where the ship should line up: a falling powerup first, then the boss,
/// then the lowest alive enemy nearest the ship.
fn target_x(snapshot: &FrameSnapshot) -> Option<f32> {
    if let Some(powerup) = snapshot
        .powerups
        .iter()
        .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
    {
        return Some(powerup.position.x);
    }
    if let Some(boss) = &snapshot.boss {
        return Some(boss.position.x);
    }
    let ship_x = snapshot.player.as_ref().map_or(0.0, |p| p.position.x);
    let lowest = snapshot
        .enemies
        .iter()
        .filter(|e| e.alive)
        .map(|e| e.position.y)
        .max_by(f32::total_cmp)?;
    snapshot
        .enemies
        .iter()
        .filter(|e| e.alive && e.position.y == lowest)
        .min_by(|a, b| {
            (a.position.x - ship_x)
                .abs()
                .total_cmp(&(b.position.x - ship_x).abs())
        })
        .map(|e| e.position.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::enums::EnemyKind;
    use barrage_core::state::{EnemyView, PlayerView};
    use glam::Vec2;

    fn play_snapshot(player_x: f32, enemies: &[(f32, f32)]) -> FrameSnapshot {
        FrameSnapshot {
            scene: SceneKind::Play,
            player: Some(PlayerView {
                position: Vec2::new(player_x, 540.0),
                size: Vec2::new(50.0, 40.0),
                fire_cooldown_ms: 0.0,
                spread_remaining_ms: 0.0,
            }),
            enemies: enemies
                .iter()
                .map(|&(x, y)| EnemyView {
                    position: Vec2::new(x, y),
                    size: Vec2::new(40.0, 30.0),
                    kind: EnemyKind::Drone,
                    alive: true,
                    dying: false,
                    death_timer_ms: 0.0,
                })
                .collect(),
            ..FrameSnapshot::default()
        }
    }

    #[test]
    fn menu_taps_fire() {
        let mut pilot = Autopilot::new();
        let menu = FrameSnapshot::default();
        assert_eq!(pilot.steer(&menu), vec![GameLoopCommand::KeyDown("Space".into())]);
        assert_eq!(pilot.steer(&menu), vec![GameLoopCommand::KeyUp("Space".into())]);
        assert_eq!(pilot.steer(&menu), vec![GameLoopCommand::KeyDown("Space".into())]);
    }

    #[test]
    fn play_chases_lowest_nearest_enemy() {
        let mut pilot = Autopilot::new();
        let snap = play_snapshot(400.0, &[(100.0, 200.0), (300.0, 200.0), (420.0, 150.0)]);
        let commands = pilot.steer(&snap);
        assert!(commands.contains(&GameLoopCommand::KeyDown("ArrowLeft".into())));
        assert!(commands.contains(&GameLoopCommand::KeyDown("Space".into())));

        // Lined up: stop moving, keep firing.
        let snap = play_snapshot(302.0, &[(300.0, 200.0)]);
        assert_eq!(pilot.steer(&snap), vec![GameLoopCommand::KeyUp("ArrowLeft".into())]);
        assert!(pilot.held().eq(["Space"]));
    }

    #[test]
    fn power_is_pulsed_when_ready() {
        let mut pilot = Autopilot::new();
        let mut snap = play_snapshot(400.0, &[]);
        snap.hud.power_ready = true;
        assert!(pilot.steer(&snap).contains(&GameLoopCommand::KeyDown("KeyE".into())));
        assert!(pilot.steer(&snap).contains(&GameLoopCommand::KeyUp("KeyE".into())));
    }

    #[test]
    fn game_over_releases_everything() {
        let mut pilot = Autopilot::new();
        pilot.steer(&play_snapshot(400.0, &[(100.0, 100.0)]));
        let over = FrameSnapshot {
            scene: SceneKind::GameOver,
            ..FrameSnapshot::default()
        };
        let commands = pilot.steer(&over);
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| matches!(c, GameLoopCommand::KeyUp(_))));
        assert_eq!(pilot.held().count(), 0);
    }
}
