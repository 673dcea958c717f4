//! Distance-free scoring: points accrue with running time.

use serde::{Deserialize, Serialize};

use runner_core::events::RunEvent;

use crate::notify::EventBus;

/// Counters for the current run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunState {
    pub coins: u32,
    /// Fractional score; only whole points are reported.
    pub score: f64,
}

impl RunState {
    pub fn score_points(&self) -> u32 {
        self.score.floor() as u32
    }
}

/// Accrue `rate * dt` points; notify when the whole-point score changes.
pub fn run(state: &mut RunState, rate: f64, dt: f64, events: &mut EventBus) {
    if dt.is_nan() || dt <= 0.0 {
        return;
    }
    let before = state.score_points();
    state.score += rate * dt;
    let after = state.score_points();
    if after != before {
        events.emit(RunEvent::ScoreChanged { score: after });
    }
}

/// Count one collected coin and notify.
pub fn add_coin(state: &mut RunState, events: &mut EventBus) {
    state.coins += 1;
    events.emit(RunEvent::CoinCountChanged { coins: state.coins });
}
