//! Snapshot builder: assembles the `RunSnapshot` after each tick.

use glam::Vec3;

use runner_core::enums::RunPhase;
use runner_core::events::RunEvent;
use runner_core::state::{Diagnostics, RunSnapshot};
use runner_core::types::SimTime;

use crate::active::ActiveLists;
use crate::pool::ObjectPool;
use crate::systems::scoring::RunState;

pub fn build_snapshot(
    time: &SimTime,
    phase: RunPhase,
    frontier: Vec3,
    run: &RunState,
    active: &ActiveLists,
    pool: &ObjectPool,
    diagnostics: &Diagnostics,
    events: Vec<RunEvent>,
) -> RunSnapshot {
    RunSnapshot {
        time: *time,
        phase,
        frontier_z: frontier.z,
        coins: run.coins,
        score: run.score_points(),
        active: active.counts(),
        pools: pool.views(),
        diagnostics: Diagnostics {
            forced_reuses: pool.forced_reuses() as u32,
            ..*diagnostics
        },
        events,
    }
}
