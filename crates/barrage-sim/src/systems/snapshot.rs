//! Snapshot system: reads the current scene and builds a `FrameSnapshot`.
//!
//! This system is read-only. It never modifies simulation state.

use barrage_core::events::GameEvent;
use barrage_core::state::*;
use barrage_core::types::SimTime;

use crate::play::PlayState;
use crate::scenes::Scene;
use crate::systems::score::ScoreSystem;

/// Build the complete render state for the current scene.
pub fn build_snapshot(
    time: &SimTime,
    scene: &Scene,
    score: &ScoreSystem,
    events: Vec<GameEvent>,
) -> FrameSnapshot {
    let mut snapshot = FrameSnapshot {
        time: *time,
        scene: scene.kind(),
        player_name: score.player_name().to_string(),
        hud: build_hud(score, 0),
        events,
        ..FrameSnapshot::default()
    };

    match scene {
        Scene::Menu(menu) => {
            snapshot.scoreboard = menu.scoreboard.clone();
        }
        Scene::Play(play) => fill_play(&mut snapshot, play, score),
        Scene::GameOver(over) => {
            snapshot.hud.wave = over.result.wave;
            snapshot.scoreboard = over.scoreboard.clone();
            snapshot.game_over = Some(over.result.clone());
        }
    }
    snapshot
}

fn build_hud(score: &ScoreSystem, wave: u32) -> HudView {
    HudView {
        score: score.score(),
        lives: score.lives(),
        power: score.power(),
        power_max: score.power_max(),
        power_ready: score.is_power_ready(),
        wave,
    }
}

fn fill_play(snapshot: &mut FrameSnapshot, play: &PlayState, score: &ScoreSystem) {
    let offset = play.formation().offset();

    snapshot.hud = build_hud(score, play.wave());
    snapshot.wave_transition = play.in_wave_transition();
    snapshot.transition_remaining_ms = play.transition_remaining_ms();

    let player = play.player();
    snapshot.player = Some(PlayerView {
        position: player.position,
        size: player.size,
        fire_cooldown_ms: player.fire_cooldown_ms,
        spread_remaining_ms: player.spread_remaining_ms,
    });

    snapshot.bullets = play
        .bullets()
        .iter()
        .filter(|b| b.active)
        .map(|b| BulletView {
            position: b.position,
            size: b.size,
        })
        .collect();

    snapshot.enemies = play
        .enemies()
        .iter()
        .filter(|e| !e.is_removed())
        .map(|e| EnemyView {
            position: e.world_position(offset),
            size: e.size,
            kind: e.kind,
            alive: e.is_alive(),
            dying: e.is_dying(),
            death_timer_ms: e.death_timer_ms(),
        })
        .collect();

    snapshot.boss = play.boss().filter(|b| b.is_active()).map(|b| BossView {
        position: b.position,
        size: b.size,
        hp: b.hp,
        max_hp: b.max_hp,
        dying: b.is_dying(),
        death_timer_ms: b.death_timer_ms(),
        hit_flash_ms: b.hit_flash_ms,
    });

    snapshot.projectiles = play
        .power_attack()
        .map(|attack| {
            attack
                .projectiles
                .iter()
                .filter(|p| p.active)
                .map(|p| ProjectileView {
                    position: p.position,
                    size: p.size,
                })
                .collect()
        })
        .unwrap_or_default();

    snapshot.powerups = play
        .powerups()
        .iter()
        .filter(|p| p.active)
        .map(|p| PowerupView {
            position: p.position,
            size: p.size,
            kind: p.kind,
        })
        .collect();
}
