//! Game loop thread: steps a session at the fixed tick rate and publishes
//! snapshots.
//!
//! The session is moved into the thread. Commands arrive via `mpsc`; the
//! latest snapshot is stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use runner_core::constants::{DT, TICK_RATE};
use runner_core::state::{RunResult, RunSnapshot};
use runner_save::KeyValueStore;

use crate::error::AppError;
use crate::session::Session;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawn the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the final result once
/// the loop shuts down.
pub fn spawn_game_loop<S>(
    session: Session<S>,
    latest_snapshot: Arc<Mutex<Option<RunSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<Result<RunResult, AppError>>), AppError>
where
    S: KeyValueStore + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("runner-game-loop".into())
        .spawn(move || run_game_loop(session, cmd_rx, &latest_snapshot))
        .map_err(AppError::Thread)?;

    Ok((cmd_tx, handle))
}

/// Runs until Shutdown or channel disconnect, then ends the run.
fn run_game_loop<S: KeyValueStore>(
    mut session: Session<S>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<RunSnapshot>>,
) -> Result<RunResult, AppError> {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Run(cmd)) => session.queue_command(cmd),
                Ok(GameLoopCommand::Steer(lane)) => session.player_mut().set_target_lane(lane),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::debug!("game loop stopping");
                    return session.finish();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick, storing the snapshot for polling
        match session.step(DT) {
            Ok(snapshot) => {
                if let Ok(mut lock) = latest_snapshot.lock() {
                    *lock = Some(snapshot);
                }
            }
            Err(err) => tracing::error!(%err, "tick failed"),
        }

        // 3. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
