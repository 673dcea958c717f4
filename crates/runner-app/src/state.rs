//! State shared between the game loop thread and its clients.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use runner_core::commands::RunCommand;
use runner_core::state::RunSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A run command to forward to the session.
    Run(RunCommand),
    /// Steer the player toward a lane.
    Steer(usize),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Client side of a running game loop.
///
/// `mpsc::Sender` is wrapped in a `Mutex` so the handle can be shared
/// between threads.
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop after each tick.
    pub latest_snapshot: Arc<Mutex<Option<RunSnapshot>>>,
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

    /// Send a command to the loop. Returns `false` when no loop is
    /// attached or it has stopped.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(lock) = self.command_tx.lock() else {
            return false;
        };
        lock.as_ref().is_some_and(|tx| tx.send(command).is_ok())
    }

    pub fn latest(&self) -> Option<RunSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
