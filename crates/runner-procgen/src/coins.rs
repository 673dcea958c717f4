//! Coin rows: one random lane per segment, evenly spaced along z.

use glam::Vec3;
use rand::Rng;

use runner_core::config::PlacementConfig;

/// Place a segment's coin row. Returns the chosen lane index and the coin
/// positions in increasing z.
///
/// Only the lane is random; spacing is fixed by configuration.
pub fn place_coins(
    anchor: Vec3,
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Option<(usize, Vec<Vec3>)> {
    if config.lanes.is_empty() || config.coins_per_segment == 0 {
        return None;
    }

    let lane = rng.gen_range(0..config.lanes.len());
    let x = anchor.x + config.lanes[lane];
    let y = anchor.y + config.coin_height;
    let start = anchor.z + config.coin_start_margin;

    let coins = (0..config.coins_per_segment)
        .map(|i| Vec3::new(x, y, start + i as f32 * config.coin_spacing))
        .collect();
    Some((lane, coins))
}
