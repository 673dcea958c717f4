//! Placement generation for track segments.
//!
//! Pure functions: given a segment anchor, the placement configuration and
//! an RNG, decide where coins, obstacles and power-ups go. Nothing here
//! touches pools or the ECS.

pub mod coins;
pub mod layout;
pub mod obstacles;
pub mod power_ups;
pub mod span;

pub use layout::{layout_segment, SegmentLayout};
pub use obstacles::{ObstacleOutcome, ObstaclePlacement, PlacementExhausted};
pub use power_ups::PowerUpPlacement;

pub use runner_core as core;

#[cfg(test)]
mod tests;
