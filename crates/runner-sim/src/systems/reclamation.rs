//! Reclamation sweep: return entities that fell too far behind the player.

use runner_core::enums::EntityCategory;
use runner_core::events::RunEvent;

use crate::active::{ActiveEntity, ActiveLists};
use crate::notify::EventBus;
use crate::pool::ObjectPool;

/// Sweep all four lists. Returns how many entries were removed.
pub fn run(
    pool: &mut ObjectPool,
    active: &mut ActiveLists,
    events: &mut EventBus,
    player_z: f32,
    destroy_distance: f32,
) -> usize {
    let behind = |entry: &ActiveEntity| player_z - entry.z > destroy_distance;
    let mut removed = 0;

    // Segments are FIFO in z: stop at the first one still in range.
    while let Some(front) = active.segments.front().copied() {
        if !behind(&front) {
            break;
        }
        active.segments.pop_front();
        reclaim(pool, events, EntityCategory::Segment, front);
        removed += 1;
    }

    for (category, list) in [
        (EntityCategory::Coin, &mut active.coins),
        (EntityCategory::Obstacle, &mut active.obstacles),
        (EntityCategory::PowerUp, &mut active.power_ups),
    ] {
        list.retain(|&entry| {
            if behind(&entry) {
                reclaim(pool, events, category, entry);
                removed += 1;
                false
            } else {
                true
            }
        });
    }

    removed
}

/// Release an entry's instance unless it has been handed out again since.
pub(crate) fn reclaim(
    pool: &mut ObjectPool,
    events: &mut EventBus,
    category: EntityCategory,
    entry: ActiveEntity,
) {
    match pool.release_lease(entry.handle, entry.lease) {
        Ok(true) => {
            let tag = pool.tag_of(entry.handle).unwrap_or_default().to_string();
            events.emit(RunEvent::EntityReclaimed { category, tag });
        }
        // Instance belongs to a newer entry, or was already released.
        Ok(false) => tracing::debug!(?category, lease = entry.lease, "stale entry dropped"),
        Err(err) => tracing::warn!(%err, ?category, "reclaim failed"),
    }
}
