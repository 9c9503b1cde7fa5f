//! Headless BARRAGE session: the game loop thread plays against the
//! autopilot until game over or a tick limit, then logs the result.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use barrage_app::autopilot::Autopilot;
use barrage_app::game_loop::{spawn_game_loop, tick_duration};
use barrage_app::state::{AppState, GameLoopCommand};
use barrage_core::config::GameConfig;
use barrage_core::enums::SceneKind;
use barrage_sim::persistence::JsonFileStore;

#[derive(Parser)]
#[command(name = "barrage")]
#[command(about = "Run a headless BARRAGE session driven by the autopilot")]
struct Args {
    /// JSON configuration file; defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many simulation ticks
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Name recorded on the scoreboard
    #[arg(short, long, default_value = "AUTO")]
    name: String,

    /// Directory holding the scoreboard file
    #[arg(long)]
    scores_dir: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let scores_dir = args
        .scores_dir
        .unwrap_or_else(|| std::env::temp_dir().join("barrage"));
    info!(scores_dir = %scores_dir.display(), ticks = args.ticks, "starting headless session");

    let poll = tick_duration(&config);
    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(
        config,
        Box::new(JsonFileStore::new(scores_dir)),
        Arc::clone(&state.latest_snapshot),
    )?;
    if let Ok(mut guard) = state.command_tx.lock() {
        *guard = Some(tx);
    }
    state.send(GameLoopCommand::SetPlayerName(args.name));

    let mut pilot = Autopilot::new();
    let mut last_tick = None;
    let mut outcome = None;
    let started = Instant::now();
    'session: loop {
        std::thread::sleep(poll);
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        if last_tick == Some(snapshot.time.tick) {
            continue;
        }
        last_tick = Some(snapshot.time.tick);

        if snapshot.scene == SceneKind::GameOver {
            outcome = snapshot.game_over;
            break;
        }
        if snapshot.time.tick >= args.ticks {
            info!(
                score = snapshot.hud.score,
                wave = snapshot.hud.wave,
                lives = snapshot.hud.lives,
                "tick limit reached"
            );
            break;
        }
        for command in pilot.steer(&snapshot) {
            if !state.send(command) {
                warn!("game loop stopped unexpectedly");
                break 'session;
            }
        }
    }

    state.send(GameLoopCommand::Shutdown);
    if handle.join().is_err() {
        warn!("game loop thread panicked");
    }

    match outcome {
        Some(result) => info!(
            score = result.score,
            wave = result.wave,
            saved = result.saved,
            rank = ?result.rank,
            elapsed = ?started.elapsed(),
            "session finished"
        ),
        None => info!(elapsed = ?started.elapsed(), "session stopped before game over"),
    }
    Ok(())
}
