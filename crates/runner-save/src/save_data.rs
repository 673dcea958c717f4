//! Typed access to player progress.

use std::fmt;

use serde::{Deserialize, Serialize};

use runner_core::state::RunResult;

use crate::error::SaveError;
use crate::store::{KeyValueStore, Value};

const COINS_KEY: &str = "total_coins";
const HIGH_SCORE_KEY: &str = "high_score";
const SELECTED_KEY: &str = "selected_player";
const UNLOCKED_PREFIX: &str = "player_unlocked_";

/// Name of the character that is always unlocked.
pub const DEFAULT_CHARACTER: &str = "Default";

/// A character, addressed by roster index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    Index(usize),
    Named(String),
}

impl CharacterId {
    /// Whether this character is unlocked on a fresh save.
    pub fn unlocked_by_default(&self) -> bool {
        match self {
            CharacterId::Index(i) => *i == 0,
            CharacterId::Named(name) => name == DEFAULT_CHARACTER,
        }
    }

    fn unlock_key(&self) -> String {
        format!("{UNLOCKED_PREFIX}{self}")
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        CharacterId::Index(0)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterId::Index(i) => write!(f, "{i}"),
            CharacterId::Named(name) => f.write_str(name),
        }
    }
}

pub struct SaveData<S> {
    store: S,
}

impl<S: KeyValueStore> SaveData<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    // --- Coins ---

    pub fn total_coins(&self) -> u32 {
        clamp_u32(self.store.get_int(COINS_KEY, 0))
    }

    pub fn add_coins(&mut self, amount: u32) {
        let total = self.total_coins().saturating_add(amount);
        self.store.set(COINS_KEY, Value::Int(total.into()));
    }

    pub fn has_enough_coins(&self, cost: u32) -> bool {
        self.total_coins() >= cost
    }

    /// Deduct `cost`; the balance never goes negative. Returns the new total.
    pub fn spend_coins(&mut self, cost: u32) -> Result<u32, SaveError> {
        let available = self.total_coins();
        let remaining = available
            .checked_sub(cost)
            .ok_or(SaveError::InsufficientCoins { cost, available })?;
        self.store.set(COINS_KEY, Value::Int(remaining.into()));
        Ok(remaining)
    }

    // --- High score ---

    pub fn high_score(&self) -> u32 {
        clamp_u32(self.store.get_int(HIGH_SCORE_KEY, 0))
    }

    /// Keep `score` if it beats the stored high score. Returns whether it did.
    pub fn submit_score(&mut self, score: u32) -> bool {
        if score <= self.high_score() {
            return false;
        }
        self.store.set(HIGH_SCORE_KEY, Value::Int(score.into()));
        true
    }

    // --- Characters ---

    pub fn is_unlocked(&self, id: &CharacterId) -> bool {
        let default = i64::from(id.unlocked_by_default());
        self.store.get_int(&id.unlock_key(), default) == 1
    }

    pub fn unlock(&mut self, id: &CharacterId) {
        self.store.set(&id.unlock_key(), Value::Int(1));
    }

    /// The selected character. Stored as an integer for roster indices and
    /// a string for names; index 0 when nothing was selected.
    pub fn selected(&self) -> CharacterId {
        match self.store.get(SELECTED_KEY) {
            Some(Value::Int(i)) => CharacterId::Index(usize::try_from(i).unwrap_or(0)),
            Some(Value::Text(name)) => CharacterId::Named(name),
            None => CharacterId::default(),
        }
    }

    /// Roster index of the selected character, or 0 when a name is selected.
    pub fn selected_index(&self) -> usize {
        match self.selected() {
            CharacterId::Index(i) => i,
            CharacterId::Named(_) => 0,
        }
    }

    /// Name of the selected character, or `"Default"` when an index is
    /// selected.
    pub fn selected_name(&self) -> String {
        match self.selected() {
            CharacterId::Named(name) => name,
            CharacterId::Index(_) => DEFAULT_CHARACTER.to_string(),
        }
    }

    pub fn select(&mut self, id: &CharacterId) {
        let value = match id {
            CharacterId::Index(i) => Value::Int(i64::try_from(*i).unwrap_or(i64::MAX)),
            CharacterId::Named(name) => Value::Text(name.clone()),
        };
        self.store.set(SELECTED_KEY, value);
    }

    // --- Runs ---

    /// Bank a finished run's coins and merge its score into the high
    /// score. Returns whether the score is a new high.
    pub fn record_run(&mut self, result: RunResult) -> bool {
        self.add_coins(result.coins);
        let new_high = self.submit_score(result.score);
        tracing::info!(
            coins = result.coins,
            score = result.score,
            total_coins = self.total_coins(),
            new_high,
            "run recorded"
        );
        new_high
    }

    pub fn save(&mut self) -> Result<(), SaveError> {
        self.store.flush()
    }
}

fn clamp_u32(v: i64) -> u32 {
    u32::try_from(v.max(0)).unwrap_or(u32::MAX)
}
