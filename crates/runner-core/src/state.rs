//! Run snapshot: the complete visible state of the streamer after a tick.

use serde::{Deserialize, Serialize};

use crate::enums::RunPhase;
use crate::events::RunEvent;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub time: SimTime,
    pub phase: RunPhase,
    /// Anchor z of the most recently spawned segment.
    pub frontier_z: f32,
    pub coins: u32,
    pub score: u32,
    pub active: ActiveCounts,
    pub pools: Vec<PoolView>,
    pub diagnostics: Diagnostics,
    /// Events emitted since the previous snapshot.
    pub events: Vec<RunEvent>,
}

/// Sizes of the four active lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCounts {
    pub segments: usize,
    pub coins: usize,
    pub obstacles: usize,
    pub power_ups: usize,
}

impl ActiveCounts {
    pub fn total(&self) -> usize {
        self.segments + self.coins + self.obstacles + self.power_ups
    }
}

/// Occupancy of one tagged pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolView {
    pub tag: String,
    pub size: usize,
    pub active: usize,
}

/// Counters for conditions the streamer absorbed instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Spawns skipped because their tag had no pool.
    pub unknown_tags: u32,
    /// Obstacles skipped after the retry budget ran out.
    pub placement_exhausted: u32,
    /// Acquires that relocated an instance still on the track.
    pub forced_reuses: u32,
}

/// Final tally of a run, handed to persistence at game over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub coins: u32,
    pub score: u32,
}
