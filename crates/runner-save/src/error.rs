use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not enough coins: need {cost}, have {available}")]
    InsufficientCoins { cost: u32, available: u32 },

    #[error("character {0} is already unlocked")]
    AlreadyUnlocked(usize),

    #[error("character {0} is locked")]
    Locked(usize),

    #[error("no character at index {0}")]
    UnknownCharacter(usize),
}
