//! Timed power-up effects for the player.
//!
//! Each effect is a small state machine advanced by an explicit `dt`, so it
//! runs under any driver without a coroutine scheduler. Effects never hold
//! on to player state beyond the snapshot they restore on exit.

pub mod invisibility;
pub mod magnet;

pub use invisibility::{Appearance, InvisibilityEffect, InvisibilityParams};
pub use magnet::MagnetEffect;

use serde::{Deserialize, Serialize};

/// What an effect did in response to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTransition {
    /// Started from idle.
    Started,
    /// A running instance was cancelled and restored, then started again.
    Restarted,
    /// Ran its full duration; pre-effect state restored.
    Completed,
    /// Stopped early; pre-effect state restored.
    Cancelled,
    /// Visibility flipped during a flicker.
    Flicker { visible: bool },
}
