//! Full layout of one freshly spawned segment.

use glam::Vec3;
use rand::Rng;

use runner_core::config::PlacementConfig;

use crate::coins::place_coins;
use crate::obstacles::{place_obstacles, ObstacleOutcome};
use crate::power_ups::{place_power_up, PowerUpPlacement};

/// Everything to spawn on one segment, each list in increasing z where
/// ordering is defined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentLayout {
    pub coin_lane: Option<usize>,
    pub coins: Vec<Vec3>,
    pub obstacles: ObstacleOutcome,
    pub power_up: Option<PowerUpPlacement>,
}

/// Lay out a segment anchored at `anchor` and `length` long.
///
/// Draw order is fixed (coins, obstacles, power-up) so a seeded RNG
/// reproduces the same track.
pub fn layout_segment(
    anchor: Vec3,
    length: f32,
    config: &PlacementConfig,
    obstacle_variants: usize,
    rng: &mut impl Rng,
) -> SegmentLayout {
    let (coin_lane, coins) = match place_coins(anchor, config, rng) {
        Some((lane, coins)) => (Some(lane), coins),
        None => (None, Vec::new()),
    };

    let mut obstacles = place_obstacles(anchor, length, config, obstacle_variants, rng);
    // Accepted in sampling order; spawn in track order.
    obstacles
        .placed
        .sort_by(|a, b| a.position.z.total_cmp(&b.position.z));

    SegmentLayout {
        coin_lane,
        coins,
        obstacles,
        power_up: place_power_up(anchor, length, config, rng),
    }
}
