//! Per-tick systems run by the engine.
//!
//! Systems are plain functions over the pool, the active lists and run
//! state. They do not own state of their own.

pub mod reclamation;
pub mod scoring;
pub mod segment_spawner;
pub mod snapshot;
