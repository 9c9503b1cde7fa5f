//! Game loop thread: runs the engine at the configured tick rate and
//! publishes snapshots.
//!
//! The engine is built on the caller's thread so an invalid config is
//! reported before anything spawns, then moved into the loop thread.
//! Commands arrive via an `mpsc` channel; the latest snapshot is stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info};

use barrage_core::config::GameConfig;
use barrage_core::state::FrameSnapshot;
use barrage_sim::persistence::ScoreStore;
use barrage_sim::GameEngine;

use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick.
pub fn tick_duration(config: &GameConfig) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(config.play.tick_rate.max(1)))
}

/// Spawns the game loop in a new named thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: GameConfig,
    store: Box<dyn ScoreStore + Send>,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let tick = tick_duration(&config);
    let dt = config.tick_secs();
    let engine = GameEngine::new(config, store).context("invalid game config")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("barrage-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, tick, dt, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// Apply one command. Returns false when the loop should stop.
pub fn apply_command(engine: &mut GameEngine, command: GameLoopCommand) -> bool {
    match command {
        GameLoopCommand::KeyDown(key) => engine.key_down(&key),
        GameLoopCommand::KeyUp(key) => engine.key_up(&key),
        GameLoopCommand::ReleaseAllKeys => engine.release_all_keys(),
        GameLoopCommand::SetPlayerName(name) => engine.set_player_name(&name),
        GameLoopCommand::Shutdown => return false,
    }
    true
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: GameEngine,
    tick: Duration,
    dt: f32,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    info!(tick_ms = tick.as_secs_f64() * 1000.0, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !apply_command(&mut engine, command) {
                        info!("game loop shutting down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    info!("command channel closed, stopping game loop");
                    return;
                }
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick(dt);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            debug!(behind_ms = (now - next_tick_time).as_millis() as u64, "loop fell behind");
            next_tick_time = now;
        }
    }
}
