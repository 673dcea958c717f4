//! Streaming configuration, loaded once at startup and validated there.
//!
//! Every field has a default from [`crate::constants`], so a TOML file only
//! needs to name what it overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EntityCategory;
use crate::error::ConfigError;

/// Everything the segment streamer needs to know about the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Anchor of the starting segment; the frontier begins here.
    pub start_position: Vec3,
    /// Displacement from one segment anchor to the next.
    pub segment_offset: Vec3,
    pub spawn_trigger_distance: f32,
    pub destroy_distance: f32,
    /// Score points accrued per second of running.
    pub score_rate: f64,
    pub tags: TagConfig,
    pub placement: PlacementConfig,
}

/// Pool tags for every kind of spawned entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Segment variants; one is picked uniformly per spawn.
    pub segments: Vec<String>,
    pub coin: String,
    /// Obstacle variants; one is picked uniformly per accepted obstacle.
    pub obstacles: Vec<String>,
    pub invisibility: String,
    pub magnet: String,
}

/// Placement tuning for coins, obstacles and power-ups within a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Lane x-offsets.
    pub lanes: Vec<f32>,

    pub coins_per_segment: u32,
    pub coin_start_margin: f32,
    pub coin_spacing: f32,
    pub coin_height: f32,

    pub obstacle_count_min: u32,
    pub obstacle_count_max: u32,
    pub obstacle_min_separation: f32,
    pub obstacle_retry_budget: u32,
    pub obstacle_margin: f32,
    pub obstacle_height: f32,

    pub power_up_chance: f64,
    /// Probability that a spawned power-up is invisibility rather than magnet.
    pub invisibility_weight: f64,
    pub power_up_margin: f32,
    pub power_up_height: f32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::ZERO,
            segment_offset: Vec3::new(0.0, 0.0, SEGMENT_LENGTH),
            spawn_trigger_distance: SPAWN_TRIGGER_DISTANCE,
            destroy_distance: DESTROY_DISTANCE,
            score_rate: SCORE_RATE,
            tags: TagConfig::default(),
            placement: PlacementConfig::default(),
        }
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            segments: SEGMENT_TAGS.iter().map(|t| t.to_string()).collect(),
            coin: COIN_TAG.to_string(),
            obstacles: OBSTACLE_TAGS.iter().map(|t| t.to_string()).collect(),
            invisibility: INVISIBILITY_TAG.to_string(),
            magnet: MAGNET_TAG.to_string(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            lanes: vec![-LANE_OFFSET, 0.0, LANE_OFFSET],
            coins_per_segment: COINS_PER_SEGMENT,
            coin_start_margin: COIN_START_MARGIN,
            coin_spacing: COIN_SPACING,
            coin_height: COIN_HEIGHT,
            obstacle_count_min: OBSTACLE_COUNT_MIN,
            obstacle_count_max: OBSTACLE_COUNT_MAX,
            obstacle_min_separation: OBSTACLE_MIN_SEPARATION,
            obstacle_retry_budget: OBSTACLE_RETRY_BUDGET,
            obstacle_margin: OBSTACLE_MARGIN,
            obstacle_height: OBSTACLE_HEIGHT,
            power_up_chance: POWER_UP_CHANCE,
            invisibility_weight: INVISIBILITY_WEIGHT,
            power_up_margin: POWER_UP_MARGIN,
            power_up_height: POWER_UP_HEIGHT,
        }
    }
}

impl StreamingConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Length of one segment along the track.
    pub fn segment_length(&self) -> f32 {
        self.segment_offset.z
    }

    /// Reject degenerate settings up front so ticks never have to.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("start_position", self.start_position),
            ("segment_offset", self.segment_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if self.segment_offset.z <= 0.0 {
            return Err(ConfigError::NonPositiveOffset(self.segment_offset.z));
        }
        non_negative("spawn_trigger_distance", self.spawn_trigger_distance as f64)?;
        non_negative("destroy_distance", self.destroy_distance as f64)?;
        non_negative("score_rate", self.score_rate)?;

        if self.tags.segments.is_empty() {
            return Err(ConfigError::NoTags { list: "segment" });
        }
        if self.tags.obstacles.is_empty() && self.placement.obstacle_count_max > 0 {
            return Err(ConfigError::NoTags { list: "obstacle" });
        }

        self.placement.validate(self.segment_length())
    }
}

impl PlacementConfig {
    /// Validate placement against a segment of the given length.
    pub fn validate(&self, length: f32) -> Result<(), ConfigError> {
        if self.lanes.is_empty() {
            return Err(ConfigError::NoLanes);
        }
        if self.lanes.iter().any(|x| !x.is_finite()) {
            return Err(ConfigError::NonFinite { field: "lanes" });
        }

        non_negative("coin_start_margin", self.coin_start_margin as f64)?;
        non_negative("coin_spacing", self.coin_spacing as f64)?;
        if self.coins_per_segment > 0 {
            let end = self.coin_start_margin
                + (self.coins_per_segment - 1) as f32 * self.coin_spacing;
            if end > length {
                return Err(ConfigError::CoinRowOverflow { end, length });
            }
        }

        if self.obstacle_count_min > self.obstacle_count_max {
            return Err(ConfigError::InvertedCountRange {
                min: self.obstacle_count_min,
                max: self.obstacle_count_max,
            });
        }
        if self.obstacle_count_max > 0 {
            if self.obstacle_retry_budget == 0 {
                return Err(ConfigError::ZeroRetryBudget);
            }
            non_negative("obstacle_min_separation", self.obstacle_min_separation as f64)?;
            span_check("obstacle", length, self.obstacle_margin)?;
        }

        probability("power_up_chance", self.power_up_chance)?;
        probability("invisibility_weight", self.invisibility_weight)?;
        if self.power_up_chance > 0.0 {
            span_check("power-up", length, self.power_up_margin)?;
        }

        for (field, value) in [
            ("coin_height", self.coin_height),
            ("obstacle_height", self.obstacle_height),
            ("power_up_height", self.power_up_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Probability { field, value });
    }
    Ok(())
}

/// `length - margin > margin`, with a non-negative margin.
fn span_check(which: &'static str, length: f32, margin: f32) -> Result<(), ConfigError> {
    if margin < 0.0 || !margin.is_finite() || length - margin <= margin {
        return Err(ConfigError::EmptySpan {
            which,
            length,
            margin,
        });
    }
    Ok(())
}

/// One pool declaration: a tag, the kind of entity it holds, and its size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSpec {
    pub tag: String,
    pub category: EntityCategory,
    pub size: usize,
}

impl PoolSpec {
    pub fn new(tag: impl Into<String>, category: EntityCategory, size: usize) -> Self {
        Self {
            tag: tag.into(),
            category,
            size,
        }
    }

    /// Pool sizes large enough that no instance is still on the track when
    /// its turn in the rotation comes round again.
    ///
    /// Live segments are bounded by the lookahead plus the trailing window;
    /// every tag is sized as if it were picked for all of them.
    pub fn defaults_for(config: &StreamingConfig) -> Vec<PoolSpec> {
        let window = config.spawn_trigger_distance + config.destroy_distance;
        let live_segments =
            (window / config.segment_length().max(f32::EPSILON)).ceil() as usize + POOL_HEADROOM;
        let placement = &config.placement;

        let mut specs: Vec<PoolSpec> = config
            .tags
            .segments
            .iter()
            .map(|tag| PoolSpec::new(tag.as_str(), EntityCategory::Segment, live_segments))
            .collect();
        specs.push(PoolSpec::new(
            config.tags.coin.as_str(),
            EntityCategory::Coin,
            (live_segments * placement.coins_per_segment as usize).max(1),
        ));
        for tag in &config.tags.obstacles {
            specs.push(PoolSpec::new(
                tag.as_str(),
                EntityCategory::Obstacle,
                (live_segments * placement.obstacle_count_max as usize).max(1),
            ));
        }
        for tag in [&config.tags.invisibility, &config.tags.magnet] {
            specs.push(PoolSpec::new(
                tag.as_str(),
                EntityCategory::PowerUp,
                live_segments,
            ));
        }
        specs
    }
}
