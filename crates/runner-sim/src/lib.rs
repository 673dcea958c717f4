//! Streaming engine for the runner.
//!
//! Owns the object pool (a hecs world of pre-warmed instances), spawns
//! segments and their contents ahead of the player, reclaims them behind
//! the player, and produces a `RunSnapshot` per tick.

pub mod active;
pub mod engine;
pub mod notify;
pub mod pool;
pub mod systems;
pub mod world_setup;

pub use engine::{RunEngine, SimConfig};
pub use runner_core::state::RunResult;
pub use pool::ObjectPool;
pub use runner_core as core;
