//! State shared between the game loop thread and its driver.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use barrage_core::state::FrameSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// Physical key pressed (key id such as `"Space"` or `"ArrowLeft"`).
    KeyDown(String),
    KeyUp(String),
    /// Drop all held keys, e.g. on focus loss.
    ReleaseAllKeys,
    SetPlayerName(String),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles held by whoever drives the loop.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex`; the latest
/// snapshot is shared with the loop thread through `Arc<Mutex<_>>`.
pub struct AppState {
    /// `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the loop. Returns false if the loop is not
    /// running or has already stopped.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(guard) => guard.as_ref().is_some_and(|tx| tx.send(command).is_ok()),
            Err(_) => false,
        }
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
