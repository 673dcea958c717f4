//! Error types shared across the streaming crates.

use thiserror::Error;

/// Configuration rejected at construction or warm-up time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: {field} must be finite")]
    NonFinite { field: &'static str },

    #[error("invalid configuration: segment offset z must be positive, got {0}")]
    NonPositiveOffset(f32),

    #[error("invalid configuration: {field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("invalid configuration: at least one lane is required")]
    NoLanes,

    #[error("invalid configuration: {list} tag list is empty")]
    NoTags { list: &'static str },

    #[error("invalid configuration: {which} placement span is empty (segment length {length}, margin {margin})")]
    EmptySpan {
        which: &'static str,
        length: f32,
        margin: f32,
    },

    #[error("invalid configuration: coin row ends at {end} past a segment of length {length}")]
    CoinRowOverflow { end: f32, length: f32 },

    #[error("invalid configuration: obstacle count range {min}..={max} is inverted")]
    InvertedCountRange { min: u32, max: u32 },

    #[error("invalid configuration: obstacle retry budget must be at least 1")]
    ZeroRetryBudget,

    #[error("invalid configuration: {field} must lie in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },

    #[error("invalid configuration: pool '{tag}' must hold at least one instance")]
    EmptyPool { tag: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Failures reported by the object pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Acquire on a tag that was never warmed up.
    #[error("unknown pool tag '{0}'")]
    UnknownTag(String),

    /// Handle does not belong to this pool.
    #[error("handle {0:#x} does not belong to this pool")]
    StaleHandle(u64),
}

pub type PoolResult<T> = Result<T, PoolError>;
