//! Obstacle scattering by rejection sampling.
//!
//! Each obstacle gets a fixed number of candidate draws. A candidate is
//! accepted only if it keeps the minimum planar separation from every
//! obstacle already accepted in the same segment. When the draws run out
//! the obstacle is dropped, never squeezed in closer.

use glam::Vec3;
use rand::Rng;
use thiserror::Error;

use runner_core::config::PlacementConfig;
use runner_core::types::planar_distance;

use crate::span::ZSpan;

/// An obstacle slot that found no spot within the retry budget.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("placement exhausted: obstacle {slot} found no spot after {attempts} attempts")]
pub struct PlacementExhausted {
    /// Zero-based slot within the segment's requested obstacles.
    pub slot: u32,
    pub attempts: u32,
}

/// An accepted obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePlacement {
    pub position: Vec3,
    /// Index into the configured obstacle variants.
    pub variant: usize,
}

/// Result of scattering one segment's obstacles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleOutcome {
    /// Number of obstacles drawn from the count range.
    pub requested: u32,
    pub placed: Vec<ObstaclePlacement>,
    pub exhausted: Vec<PlacementExhausted>,
}

/// Scatter obstacles across the segment starting at `anchor`.
///
/// `variants` is the number of obstacle kinds to choose between; with no
/// variants nothing is placed.
pub fn place_obstacles(
    anchor: Vec3,
    length: f32,
    config: &PlacementConfig,
    variants: usize,
    rng: &mut impl Rng,
) -> ObstacleOutcome {
    let mut outcome = ObstacleOutcome::default();
    if config.lanes.is_empty() || variants == 0 || config.obstacle_count_max == 0 {
        return outcome;
    }

    let min = config.obstacle_count_min.min(config.obstacle_count_max);
    outcome.requested = rng.gen_range(min..=config.obstacle_count_max);
    outcome.placed.reserve(outcome.requested as usize);

    let span = ZSpan::within(anchor.z, length, config.obstacle_margin);
    let y = anchor.y + config.obstacle_height;

    for slot in 0..outcome.requested {
        match find_spot(anchor.x, y, span, config, &outcome.placed, rng) {
            Some(position) => outcome.placed.push(ObstaclePlacement {
                position,
                variant: rng.gen_range(0..variants),
            }),
            None => {
                let exhausted = PlacementExhausted {
                    slot,
                    attempts: config.obstacle_retry_budget,
                };
                tracing::debug!(anchor_z = anchor.z, "{exhausted}");
                outcome.exhausted.push(exhausted);
            }
        }
    }
    outcome
}

fn find_spot(
    base_x: f32,
    y: f32,
    span: ZSpan,
    config: &PlacementConfig,
    accepted: &[ObstaclePlacement],
    rng: &mut impl Rng,
) -> Option<Vec3> {
    for _ in 0..config.obstacle_retry_budget {
        let lane = rng.gen_range(0..config.lanes.len());
        let candidate = Vec3::new(base_x + config.lanes[lane], y, span.sample(rng));

        let clear = accepted
            .iter()
            .all(|o| planar_distance(o.position, candidate) >= config.obstacle_min_separation);
        if clear {
            return Some(candidate);
        }
    }
    None
}
