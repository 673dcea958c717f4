//! Segment spawning: advance the frontier once the player is close enough,
//! place a segment there, and populate it from the placement generator.

use glam::{Quat, Vec3};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use runner_core::config::StreamingConfig;
use runner_core::enums::{EntityCategory, PowerUpKind};
use runner_core::events::RunEvent;
use runner_core::state::Diagnostics;
use runner_procgen::layout_segment;

use crate::active::{ActiveEntity, ActiveLists};
use crate::notify::EventBus;
use crate::pool::ObjectPool;

/// Spawn at most one segment. Returns whether the frontier advanced.
pub fn run(
    pool: &mut ObjectPool,
    active: &mut ActiveLists,
    frontier: &mut Vec3,
    rng: &mut ChaCha8Rng,
    config: &StreamingConfig,
    events: &mut EventBus,
    diagnostics: &mut Diagnostics,
    player_z: f32,
) -> bool {
    if player_z + config.spawn_trigger_distance <= frontier.z {
        return false;
    }

    *frontier += config.segment_offset;
    let anchor = *frontier;

    if let Some(tag) = config.tags.segments.choose(rng) {
        if let Some(entry) = spawn(pool, tag, anchor, None, diagnostics) {
            active.segments.push_back(entry);
            events.emit(RunEvent::SegmentSpawned {
                tag: tag.clone(),
                z: anchor.z,
            });
        }
    }

    let layout = layout_segment(
        anchor,
        config.segment_length(),
        &config.placement,
        config.tags.obstacles.len(),
        rng,
    );
    diagnostics.placement_exhausted += layout.obstacles.exhausted.len() as u32;

    for position in layout.coins {
        if let Some(entry) = spawn(pool, &config.tags.coin, position, None, diagnostics) {
            active.coins.push(entry);
            spawned(events, EntityCategory::Coin, &config.tags.coin, position);
        }
    }

    for obstacle in layout.obstacles.placed {
        let tag = &config.tags.obstacles[obstacle.variant];
        if let Some(entry) = spawn(pool, tag, obstacle.position, None, diagnostics) {
            active.obstacles.push(entry);
            spawned(events, EntityCategory::Obstacle, tag, obstacle.position);
        }
    }

    if let Some(power_up) = layout.power_up {
        let tag = match power_up.kind {
            PowerUpKind::Invisibility => &config.tags.invisibility,
            PowerUpKind::Magnet => &config.tags.magnet,
        };
        if let Some(entry) = spawn(pool, tag, power_up.position, Some(power_up.kind), diagnostics) {
            active.power_ups.push(entry);
            spawned(events, EntityCategory::PowerUp, tag, power_up.position);
        }
    }

    true
}

/// Acquire one instance. Unknown tags are counted and skipped.
pub(crate) fn spawn(
    pool: &mut ObjectPool,
    tag: &str,
    position: Vec3,
    power_up: Option<PowerUpKind>,
    diagnostics: &mut Diagnostics,
) -> Option<ActiveEntity> {
    match pool.acquire(tag, position, Quat::IDENTITY) {
        Ok(handle) => Some(ActiveEntity {
            handle,
            lease: pool.lease(handle).unwrap_or_default(),
            z: position.z,
            power_up,
        }),
        Err(err) => {
            diagnostics.unknown_tags += 1;
            tracing::warn!(%err, z = position.z, "spawn skipped");
            None
        }
    }
}

fn spawned(events: &mut EventBus, category: EntityCategory, tag: &str, position: Vec3) {
    events.emit(RunEvent::EntitySpawned {
        category,
        tag: tag.to_string(),
        position,
    });
}
