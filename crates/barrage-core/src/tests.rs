use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GameConfig;
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::{CollisionEvent, GameEvent};
use crate::math::*;
use crate::state::{FrameSnapshot, ScoreEntry};
use crate::types::Aabb;

// ---- AABB overlap ----

#[test]
fn test_overlap_is_symmetric() {
    let boxes = [
        Aabb::new(0.0, 0.0, 10.0, 10.0),
        Aabb::new(5.0, 5.0, 10.0, 10.0),
        Aabb::new(10.0, 0.0, 10.0, 10.0),
        Aabb::new(-3.0, 2.0, 4.0, 40.0),
        Aabb::new(100.0, 100.0, 1.0, 1.0),
    ];
    for a in &boxes {
        for b in &boxes {
            assert_eq!(aabb_overlap(a, b), aabb_overlap(b, a), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn test_touching_edges_do_not_overlap() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
    let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
    let corner = Aabb::new(10.0, 10.0, 10.0, 10.0);
    assert!(!aabb_overlap(&a, &right));
    assert!(!aabb_overlap(&a, &below));
    assert!(!aabb_overlap(&a, &corner));
}

#[test]
fn test_contained_box_overlaps() {
    let outer = Aabb::new(0.0, 0.0, 20.0, 20.0);
    let inner = Aabb::new(5.0, 5.0, 5.0, 5.0);
    assert!(aabb_overlap(&outer, &inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn test_aabb_from_center() {
    let b = Aabb::from_center(Vec2::new(100.0, 50.0), Vec2::new(40.0, 30.0));
    assert_eq!(b.left(), 80.0);
    assert_eq!(b.right(), 120.0);
    assert_eq!(b.top(), 35.0);
    assert_eq!(b.bottom(), 65.0);
    assert_eq!(b.center(), Vec2::new(100.0, 50.0));
}

// ---- Scalar helpers ----

#[test]
fn test_clamp_ranges_and_idempotence() {
    assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    for v in [-100.0, -0.5, 0.0, 3.3, 10.0, 42.0] {
        let once = clamp(v, 0.0, 10.0);
        assert_eq!(clamp(once, 0.0, 10.0), once);
    }
}

#[test]
fn test_lerp_and_distance() {
    assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
    assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
}

#[test]
fn test_angle_conversion() {
    assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
    assert!((rad_to_deg(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
}

#[test]
fn test_random_helpers_stay_in_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..1000 {
        let f = random_range(&mut rng, -2.0, 3.0);
        assert!((-2.0..3.0).contains(&f));
        let i = random_int(&mut rng, 1, 6);
        assert!((1..=6).contains(&i));
    }
    assert_eq!(random_range(&mut rng, 4.0, 4.0), 4.0);
    assert_eq!(random_int(&mut rng, 9, 2), 9);
}

#[test]
fn test_eight_directions_are_unit_and_distinct() {
    let dirs = eight_directions();
    for (i, d) in dirs.iter().enumerate() {
        assert!((d.length() - 1.0).abs() < 1e-6, "direction {i} not unit: {d:?}");
        for other in &dirs[i + 1..] {
            assert!(d.distance(*other) > 0.5);
        }
    }
    // First direction points up the screen.
    assert_eq!(dirs[0], Vec2::new(0.0, -1.0));
}

// ---- Configuration ----

#[test]
fn test_default_config_is_valid() {
    let config = GameConfig::default();
    config.validate().unwrap();
    assert_eq!(config.boss.spawn_interval, 3);
    assert_eq!(config.score.scoreboard_size, 10);
    assert_eq!(config.play.max_frame_delta, 0.1);
    assert_eq!(config.play.wave_transition_ms, 2000.0);
}

#[test]
fn test_partial_json_uses_defaults() {
    let config = GameConfig::from_json_str(r#"{ "enemy": { "rows": 2 }, "score": { "lives_max": 5 } }"#)
        .unwrap();
    assert_eq!(config.enemy.rows, 2);
    assert_eq!(config.enemy.cols, 8);
    assert_eq!(config.score.lives_max, 5);
    assert_eq!(config.canvas.width, 800.0);
}

#[test]
fn test_invalid_config_rejected() {
    let err = GameConfig::from_json_str(r#"{ "boss": { "spawn_interval": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = GameConfig::from_json_str(r#"{ "canvas": { "width": -5.0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("barrage_test_missing_config.json");
    let _ = std::fs::remove_file(&path);
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_key_bindings_serde() {
    let config = GameConfig::default();
    let json = serde_json::to_string(&config.keys).unwrap();
    let back: crate::config::KeyBindings = serde_json::from_str(&json).unwrap();
    assert_eq!(config.keys, back);
    assert!(back.keys_for(Action::Shoot).any(|k| k == "Space"));
}

#[test]
fn test_enemy_kind_for_row() {
    assert_eq!(EnemyKind::for_row(0), EnemyKind::Elite);
    assert_eq!(EnemyKind::for_row(1), EnemyKind::Soldier);
    assert_eq!(EnemyKind::for_row(2), EnemyKind::Drone);
    assert_eq!(EnemyKind::for_row(7), EnemyKind::Drone);
}

// ---- Serialization of render/event types ----

#[test]
fn test_game_event_serde() {
    let events = vec![
        GameEvent::Collision(CollisionEvent::BulletEnemy {
            bullet: 0,
            enemy: 3,
            kind: EnemyKind::Elite,
            position: Vec2::new(1.0, 2.0),
        }),
        GameEvent::Collision(CollisionEvent::BulletBoss {
            bullet: 1,
            damage: 1,
            position: Vec2::ZERO,
        }),
        GameEvent::WaveStarted { wave: 3, boss: true },
        GameEvent::LifeLost { lives: 2 },
        GameEvent::PowerupCollected {
            kind: PowerupKind::ExtraLife,
        },
        GameEvent::GameOver { score: 1200, wave: 4 },
    ];
    for event in &events {
        let json = serde_json::to_string(event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(*event, back);
    }
}

#[test]
fn test_score_entry_shape() {
    let entry = ScoreEntry {
        name: "ACE".into(),
        score: 4200,
        date: 1_700_000_000_000,
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["name"], "ACE");
    assert_eq!(json["score"], 4200);
    assert_eq!(json["date"], 1_700_000_000_000u64);
}

#[test]
fn test_default_snapshot_serializes() {
    let snapshot = FrameSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.scene, SceneKind::Menu);
    assert!(back.enemies.is_empty());
}
