//! Notifications emitted by the streaming core.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityCategory, PowerUpKind};

/// Events fired synchronously as run state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunEvent {
    /// Coins collected this run changed.
    CoinCountChanged { coins: u32 },
    /// Whole-point score changed.
    ScoreChanged { score: u32 },
    /// A track segment was placed at the new frontier.
    SegmentSpawned { tag: String, z: f32 },
    /// A coin, obstacle or power-up was placed on a segment.
    EntitySpawned {
        category: EntityCategory,
        tag: String,
        position: Vec3,
    },
    /// An entity fell behind the player and went back to its pool.
    EntityReclaimed { category: EntityCategory, tag: String },
    /// The player touched a power-up.
    PowerUpActivated { kind: PowerUpKind },
    /// The run ended.
    GameOver { coins: u32, score: u32 },
}
