//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Streamer lifecycle. `GameOver` is terminal for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Running,
    GameOver,
}

/// Which active list an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Segment,
    Coin,
    Obstacle,
    PowerUp,
}

/// Power-up flavours placed on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary obstacle immunity with a speed boost and flicker.
    Invisibility,
    /// Temporary coin attraction.
    Magnet,
}
