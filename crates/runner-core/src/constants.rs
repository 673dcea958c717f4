//! Streaming constants and tuning parameters.
//!
//! These are the defaults behind `StreamingConfig::default()`; a run can
//! override any of them through configuration.

/// Nominal driver tick rate (Hz). Score accrual uses the real `dt` passed
/// to each tick, never this value.
pub const TICK_RATE: u32 = 60;

/// Seconds per nominal tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Track layout ---

/// Distance between consecutive segment anchors along z.
pub const SEGMENT_LENGTH: f32 = 50.0;

/// Player lookahead: a segment spawns once `player.z + trigger` passes the frontier.
pub const SPAWN_TRIGGER_DISTANCE: f32 = 100.0;

/// Trailing distance beyond which spawned entities are reclaimed.
pub const DESTROY_DISTANCE: f32 = 60.0;

/// Lateral offset between lanes (three lanes centred on x = 0).
pub const LANE_OFFSET: f32 = 3.0;

// --- Coins ---

pub const COINS_PER_SEGMENT: u32 = 10;

/// Gap between the segment anchor and the first coin.
pub const COIN_START_MARGIN: f32 = 2.0;

/// Gap between consecutive coins in a row.
pub const COIN_SPACING: f32 = 2.0;

pub const COIN_HEIGHT: f32 = 1.0;

// --- Obstacles ---

pub const OBSTACLE_COUNT_MIN: u32 = 1;
pub const OBSTACLE_COUNT_MAX: u32 = 3;

/// Minimum planar distance between two obstacles of one segment.
pub const OBSTACLE_MIN_SEPARATION: f32 = 8.0;

/// Candidate draws per obstacle before it is skipped.
pub const OBSTACLE_RETRY_BUDGET: u32 = 20;

/// Keep-out at both ends of a segment for obstacle z.
pub const OBSTACLE_MARGIN: f32 = 5.0;

pub const OBSTACLE_HEIGHT: f32 = 0.0;

// --- Power-ups ---

/// Chance that a segment carries a power-up.
pub const POWER_UP_CHANCE: f64 = 0.2;

/// Share of spawned power-ups that are invisibility (rest are magnets).
pub const INVISIBILITY_WEIGHT: f64 = 0.5;

/// Keep-out at both ends of a segment for power-up z.
pub const POWER_UP_MARGIN: f32 = 10.0;

pub const POWER_UP_HEIGHT: f32 = 1.0;

// --- Scoring ---

/// Score points per second of running.
pub const SCORE_RATE: f64 = 10.0;

// --- Pool tags ---

pub const SEGMENT_TAGS: [&str; 3] = ["Segment1", "Segment2", "Segment3"];
pub const COIN_TAG: &str = "Coin";
pub const OBSTACLE_TAGS: [&str; 2] = ["Obstacle1", "Obstacle2"];
pub const INVISIBILITY_TAG: &str = "Invisibility";
pub const MAGNET_TAG: &str = "Magnet";

/// Extra instances per pool beyond the computed in-flight maximum.
pub const POOL_HEADROOM: usize = 2;

// --- Player (driver defaults) ---

pub const PLAYER_FORWARD_SPEED: f32 = 5.0;
/// Lateral speed when changing lanes (units/s).
pub const PLAYER_TURN_SPEED: f32 = 10.0;
/// Planar distance at which the player touches a coin or power-up.
pub const PICKUP_RADIUS: f32 = 1.0;
/// Planar distance at which the player hits an obstacle.
pub const OBSTACLE_HIT_RADIUS: f32 = 0.8;

pub const INVISIBILITY_DURATION: f64 = 5.0;
pub const INVISIBILITY_SPEED_MULTIPLIER: f32 = 1.5;
pub const FLICKER_INTERVAL: f64 = 0.1;

pub const MAGNET_DURATION: f64 = 5.0;
pub const MAGNET_RADIUS: f32 = 5.0;
/// Speed at which a magnet draws coins toward the player (units/s).
pub const MAGNET_PULL_SPEED: f32 = 40.0;
