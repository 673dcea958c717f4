//! Run setup: pool warm-up and the starting segment.

use glam::Vec3;

use runner_core::config::{PoolSpec, StreamingConfig};
use runner_core::error::ConfigError;
use runner_core::events::RunEvent;
use runner_core::state::Diagnostics;

use crate::active::ActiveLists;
use crate::notify::EventBus;
use crate::pool::ObjectPool;
use crate::systems::segment_spawner;

/// Pool warmed with `PoolSpec::defaults_for(config)`.
pub fn default_pool(config: &StreamingConfig) -> Result<ObjectPool, ConfigError> {
    ObjectPool::with_specs(&PoolSpec::defaults_for(config))
}

/// Every tag the configuration can ask for that the pool was never warmed for.
pub fn missing_tags(pool: &ObjectPool, config: &StreamingConfig) -> Vec<String> {
    let tags = &config.tags;
    tags.segments
        .iter()
        .chain(std::iter::once(&tags.coin))
        .chain(tags.obstacles.iter())
        .chain([&tags.invisibility, &tags.magnet])
        .filter(|tag| !pool.contains_tag(tag))
        .cloned()
        .collect()
}

/// Place the starting segment (first segment tag, no contents) and return
/// the initial frontier.
pub fn spawn_start_segment(
    pool: &mut ObjectPool,
    active: &mut ActiveLists,
    config: &StreamingConfig,
    events: &mut EventBus,
    diagnostics: &mut Diagnostics,
) -> Vec3 {
    let start = config.start_position;
    if let Some(tag) = config.tags.segments.first() {
        if let Some(entry) = segment_spawner::spawn(pool, tag, start, None, diagnostics) {
            active.segments.push_back(entry);
            events.emit(RunEvent::SegmentSpawned {
                tag: tag.clone(),
                z: start.z,
            });
        }
    }
    start
}
