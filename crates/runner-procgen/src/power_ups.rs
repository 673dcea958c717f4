//! Optional power-up per segment.

use glam::Vec3;
use rand::Rng;

use runner_core::config::PlacementConfig;
use runner_core::enums::PowerUpKind;

use crate::span::ZSpan;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpPlacement {
    pub position: Vec3,
    pub kind: PowerUpKind,
}

/// Roll for a power-up on the segment starting at `anchor`.
pub fn place_power_up(
    anchor: Vec3,
    length: f32,
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Option<PowerUpPlacement> {
    if config.lanes.is_empty() || !rng.gen_bool(config.power_up_chance.clamp(0.0, 1.0)) {
        return None;
    }

    let lane = rng.gen_range(0..config.lanes.len());
    let z = ZSpan::within(anchor.z, length, config.power_up_margin).sample(rng);
    let kind = if rng.gen_bool(config.invisibility_weight.clamp(0.0, 1.0)) {
        PowerUpKind::Invisibility
    } else {
        PowerUpKind::Magnet
    };

    Some(PowerUpPlacement {
        position: Vec3::new(
            anchor.x + config.lanes[lane],
            anchor.y + config.power_up_height,
            z,
        ),
        kind,
    })
}
