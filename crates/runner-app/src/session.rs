//! One player's play session: engine, player model and saved progress.
//!
//! The selected character is read when a run starts; the result is banked
//! exactly once when the run ends.

use runner_core::commands::RunCommand;
use runner_core::enums::RunPhase;
use runner_core::state::{RunResult, RunSnapshot};
use runner_save::{CharacterId, KeyValueStore, SaveData};
use runner_sim::{RunEngine, SimConfig};

use crate::error::AppError;
use crate::player::PlayerModel;

pub struct Session<S> {
    engine: RunEngine,
    player: PlayerModel,
    save: SaveData<S>,
    character: CharacterId,
    /// Result of the current run once banked.
    banked: Option<RunResult>,
    runs: u32,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(config: SimConfig, save: SaveData<S>) -> Result<Self, AppError> {
        let engine = RunEngine::with_default_pools(config)?;
        let player = new_player(&engine);
        let character = save.selected();
        tracing::info!(%character, seed = engine.seed(), "session started");
        Ok(Self {
            engine,
            player,
            save,
            character,
            banked: None,
            runs: 1,
        })
    }

    pub fn engine(&self) -> &RunEngine {
        &self.engine
    }

    pub fn player(&self) -> &PlayerModel {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerModel {
        &mut self.player
    }

    pub fn save(&self) -> &SaveData<S> {
        &self.save
    }

    /// Character the current run is played with.
    pub fn character(&self) -> &CharacterId {
        &self.character
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn is_over(&self) -> bool {
        self.engine.phase() == RunPhase::GameOver
    }

    /// Forward a command to the engine. `Restart` also resets the player
    /// and re-reads the selected character.
    pub fn queue_command(&mut self, command: RunCommand) {
        if matches!(command, RunCommand::Restart) {
            self.restart();
        } else {
            self.engine.queue_command(command);
        }
    }

    pub fn restart(&mut self) {
        self.engine.restart();
        self.player = new_player(&self.engine);
        self.character = self.save.selected();
        self.banked = None;
        self.runs += 1;
        tracing::info!(character = %self.character, run = self.runs, "run restarted");
    }

    /// Advance one tick of `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Result<RunSnapshot, AppError> {
        if !self.is_over() {
            // 1. Move the player
            self.player.steer(&self.engine);
            self.player.advance(dt);

            // 2. Magnet draws coins in
            for (coin, position) in self.player.magnet_pulls(&self.engine, dt) {
                self.engine.move_coin(coin, position);
            }

            // 3. Resolve contacts
            let contacts = self.player.contacts(&self.engine);
            for coin in contacts.coins {
                self.engine.collect_coin(coin);
            }
            for power_up in contacts.power_ups {
                self.engine.collect_power_up(power_up);
            }
            if contacts.hit_obstacle {
                self.engine.queue_command(RunCommand::GameOver);
            }
        }

        // 4. Stream
        let snapshot = self.engine.tick(self.player.z(), dt);

        // 5. Effects follow the engine's activations
        for event in &snapshot.events {
            self.player.apply_event(event);
        }

        // 6. Bank the result once
        if self.is_over() && self.banked.is_none() {
            self.bank()?;
        }

        Ok(snapshot)
    }

    /// Step until the run ends or `max_secs` of run time pass. Ends the run
    /// if still going, and returns its result.
    pub fn run_for(&mut self, max_secs: f64, dt: f64) -> Result<RunResult, AppError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(AppError::InvalidStep(dt));
        }
        while !self.is_over() && self.engine.time().elapsed_secs < max_secs {
            self.step(dt)?;
        }
        self.finish()
    }

    /// End the run now and bank it. Idempotent.
    pub fn finish(&mut self) -> Result<RunResult, AppError> {
        let result = self.engine.game_over();
        if self.banked.is_none() {
            self.bank()?;
        }
        Ok(result)
    }

    fn bank(&mut self) -> Result<(), AppError> {
        let result = self.engine.result();
        self.banked = Some(result);
        self.save.record_run(result);
        self.save.save()?;
        Ok(())
    }
}

fn new_player(engine: &RunEngine) -> PlayerModel {
    let config = engine.config();
    PlayerModel::new(config.start_position, config.placement.lanes.clone())
}
