//! Commands sent from collaborators (collision handling, UI) to the streamer.
//!
//! Queued commands are applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::EntityHandle;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunCommand {
    /// The player touched a coin.
    CollectCoin { entity: EntityHandle },
    /// The player touched a power-up.
    CollectPowerUp { entity: EntityHandle },
    /// The player hit an obstacle; ends the run.
    GameOver,
    /// Reclaim everything and start a fresh run.
    Restart,
}
