//! Run engine: the segment streamer.
//!
//! `RunEngine` owns the object pool, the active lists and run counters.
//! Each tick it reads the player's z, spawns at most one segment ahead,
//! sweeps what fell behind, and accrues score from the real elapsed time.
//! Completely headless, so runs are reproducible from a seed.

use std::collections::VecDeque;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use runner_core::commands::RunCommand;
use runner_core::config::StreamingConfig;
use runner_core::enums::{EntityCategory, PowerUpKind, RunPhase};
use runner_core::error::ConfigError;
use runner_core::events::RunEvent;
use runner_core::state::{ActiveCounts, Diagnostics, RunResult, RunSnapshot};
use runner_core::types::{EntityHandle, SimTime};

use crate::active::{ActiveEntity, ActiveLists};
use crate::notify::EventBus;
use crate::pool::ObjectPool;
use crate::systems;
use crate::systems::scoring::RunState;
use crate::world_setup;

/// Configuration for starting a new run engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same track.
    pub seed: u64,
    pub streaming: StreamingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            streaming: StreamingConfig::default(),
        }
    }
}

pub struct RunEngine {
    pool: ObjectPool,
    config: StreamingConfig,
    seed: u64,
    rng: ChaCha8Rng,
    phase: RunPhase,
    time: SimTime,
    frontier: Vec3,
    active: ActiveLists,
    run: RunState,
    diagnostics: Diagnostics,
    events: EventBus,
    command_queue: VecDeque<RunCommand>,
}

impl RunEngine {
    /// Create an engine around an already warmed pool.
    ///
    /// Configuration problems fail here; tags the pool lacks are only
    /// reported, and their spawns are skipped at run time.
    pub fn new(config: SimConfig, pool: ObjectPool) -> Result<Self, ConfigError> {
        config.streaming.validate()?;

        let missing = world_setup::missing_tags(&pool, &config.streaming);
        if !missing.is_empty() {
            tracing::warn!(?missing, "configured tags have no pool");
        }

        let mut engine = Self {
            pool,
            config: config.streaming,
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            phase: RunPhase::Running,
            time: SimTime::default(),
            frontier: Vec3::ZERO,
            active: ActiveLists::default(),
            run: RunState::default(),
            diagnostics: Diagnostics::default(),
            events: EventBus::default(),
            command_queue: VecDeque::new(),
        };
        engine.start_run();
        Ok(engine)
    }

    /// Create an engine with a pool sized by `PoolSpec::defaults_for`.
    pub fn with_default_pools(config: SimConfig) -> Result<Self, ConfigError> {
        config.streaming.validate()?;
        let pool = world_setup::default_pool(&config.streaming)?;
        Self::new(config, pool)
    }

    /// Register a listener invoked synchronously for every event.
    pub fn subscribe(&mut self, listener: impl FnMut(&RunEvent) + Send + 'static) {
        self.events.subscribe(listener);
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: RunCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance one tick with the player at `player_z`, `dt` seconds after
    /// the previous tick.
    pub fn tick(&mut self, player_z: f32, dt: f64) -> RunSnapshot {
        self.process_commands();

        if self.phase == RunPhase::Running {
            self.run_systems(player_z, dt);
            self.time.advance(dt);
        }

        self.snapshot()
    }

    /// Snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> RunSnapshot {
        let events = self.events.drain();
        systems::snapshot::build_snapshot(
            &self.time,
            self.phase,
            self.frontier,
            &self.run,
            &self.active,
            &self.pool,
            &self.diagnostics,
            events,
        )
    }

    /// Collision callback: the player touched a coin.
    ///
    /// Returns `false` when the coin is not on the track (already collected
    /// or reclaimed) or the run is over.
    pub fn collect_coin(&mut self, handle: EntityHandle) -> bool {
        if self.phase != RunPhase::Running {
            return false;
        }
        let Some(entry) = take_entry(&self.pool, &mut self.active.coins, handle) else {
            return false;
        };
        systems::reclamation::reclaim(
            &mut self.pool,
            &mut self.events,
            EntityCategory::Coin,
            entry,
        );
        systems::scoring::add_coin(&mut self.run, &mut self.events);
        true
    }

    /// Move a coin that is still on the track, e.g. while a magnet pulls it.
    ///
    /// Only the transform changes; reclamation keeps using the spawn z.
    /// Returns `false` for coins not on the track or after game over.
    pub fn move_coin(&mut self, handle: EntityHandle, position: Vec3) -> bool {
        if self.phase != RunPhase::Running {
            return false;
        }
        let Some(lease) = self.pool.lease(handle) else {
            return false;
        };
        let on_track = self
            .active
            .coins
            .iter()
            .any(|e| e.handle == handle && e.lease == lease);
        on_track && self.pool.set_position(handle, position).is_ok()
    }

    /// Collision callback: the player touched a power-up. Returns its kind
    /// so the player controller can start the effect.
    pub fn collect_power_up(&mut self, handle: EntityHandle) -> Option<PowerUpKind> {
        if self.phase != RunPhase::Running {
            return None;
        }
        let entry = take_entry(&self.pool, &mut self.active.power_ups, handle)?;
        systems::reclamation::reclaim(
            &mut self.pool,
            &mut self.events,
            EntityCategory::PowerUp,
            entry,
        );
        let kind = entry.power_up?;
        self.events.emit(RunEvent::PowerUpActivated { kind });
        Some(kind)
    }

    /// End the run. Spawning, reclamation and scoring stop until restart.
    /// Calling it again returns the same result without new events.
    pub fn game_over(&mut self) -> RunResult {
        let result = self.result();
        if self.phase == RunPhase::Running {
            self.phase = RunPhase::GameOver;
            tracing::info!(coins = result.coins, score = result.score, "game over");
            self.events.emit(RunEvent::GameOver {
                coins: result.coins,
                score: result.score,
            });
        }
        result
    }

    /// Return everything to the pool and begin a fresh run on the same seed
    /// stream.
    pub fn restart(&mut self) {
        for (category, entry) in self.active.drain_all() {
            systems::reclamation::reclaim(&mut self.pool, &mut self.events, category, entry);
        }
        self.start_run();
        self.events.emit(RunEvent::CoinCountChanged { coins: 0 });
        self.events.emit(RunEvent::ScoreChanged { score: 0 });
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frontier(&self) -> Vec3 {
        self.frontier
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    pub fn pool(&self) -> &ObjectPool {
        &self.pool
    }

    pub fn active(&self) -> &ActiveLists {
        &self.active
    }

    pub fn active_counts(&self) -> ActiveCounts {
        self.active.counts()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            forced_reuses: self.pool.forced_reuses() as u32,
            ..self.diagnostics
        }
    }

    pub fn result(&self) -> RunResult {
        RunResult {
            coins: self.run.coins,
            score: self.run.score_points(),
        }
    }

    /// Current positions of one category's active entities, in spawn order.
    pub fn positions(&self, category: EntityCategory) -> Vec<(EntityHandle, Vec3)> {
        self.active
            .iter(category)
            .filter_map(|e| {
                self.pool
                    .transform(e.handle)
                    .map(|t| (e.handle, t.position))
            })
            .collect()
    }

    fn start_run(&mut self) {
        self.phase = RunPhase::Running;
        self.time = SimTime::default();
        self.run = RunState::default();
        self.diagnostics = Diagnostics::default();
        self.frontier = world_setup::spawn_start_segment(
            &mut self.pool,
            &mut self.active,
            &self.config,
            &mut self.events,
            &mut self.diagnostics,
        );
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: RunCommand) {
        match command {
            RunCommand::CollectCoin { entity } => {
                self.collect_coin(entity);
            }
            RunCommand::CollectPowerUp { entity } => {
                self.collect_power_up(entity);
            }
            RunCommand::GameOver => {
                self.game_over();
            }
            RunCommand::Restart => self.restart(),
        }
    }

    fn run_systems(&mut self, player_z: f32, dt: f64) {
        // 1. Spawn ahead
        systems::segment_spawner::run(
            &mut self.pool,
            &mut self.active,
            &mut self.frontier,
            &mut self.rng,
            &self.config,
            &mut self.events,
            &mut self.diagnostics,
            player_z,
        );
        // 2. Reclaim behind
        systems::reclamation::run(
            &mut self.pool,
            &mut self.active,
            &mut self.events,
            player_z,
            self.config.destroy_distance,
        );
        // 3. Score
        systems::scoring::run(&mut self.run, self.config.score_rate, dt, &mut self.events);
    }
}

/// Remove the live entry for `handle`: the one whose lease is the
/// instance's current lease.
fn take_entry(
    pool: &ObjectPool,
    list: &mut Vec<ActiveEntity>,
    handle: EntityHandle,
) -> Option<ActiveEntity> {
    let lease = pool.lease(handle)?;
    let idx = list
        .iter()
        .position(|e| e.handle == handle && e.lease == lease)?;
    Some(list.remove(idx))
}
