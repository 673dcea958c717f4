use thiserror::Error;

use runner_core::error::ConfigError;
use runner_save::SaveError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("time step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("game loop thread: {0}")]
    Thread(#[source] std::io::Error),
}
