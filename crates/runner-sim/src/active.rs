//! Active entity lists: what is currently on the track, per category.
//!
//! Entries are appended in spawn order, which is increasing z within each
//! list. Segments are strictly FIFO; the other lists are swept by scanning.

use std::collections::VecDeque;

use runner_core::enums::{EntityCategory, PowerUpKind};
use runner_core::state::ActiveCounts;
use runner_core::types::EntityHandle;

/// One spawned entity borrowed from the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEntity {
    pub handle: EntityHandle,
    /// Pool lease taken at spawn; releases are guarded by it.
    pub lease: u64,
    /// Spawn z, used for reclamation.
    pub z: f32,
    pub power_up: Option<PowerUpKind>,
}

#[derive(Debug, Default)]
pub struct ActiveLists {
    pub segments: VecDeque<ActiveEntity>,
    pub coins: Vec<ActiveEntity>,
    pub obstacles: Vec<ActiveEntity>,
    pub power_ups: Vec<ActiveEntity>,
}

impl ActiveLists {
    pub fn counts(&self) -> ActiveCounts {
        ActiveCounts {
            segments: self.segments.len(),
            coins: self.coins.len(),
            obstacles: self.obstacles.len(),
            power_ups: self.power_ups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }

    /// Entries of one category, in spawn order.
    pub fn iter(&self, category: EntityCategory) -> Box<dyn Iterator<Item = &ActiveEntity> + '_> {
        match category {
            EntityCategory::Segment => Box::new(self.segments.iter()),
            EntityCategory::Coin => Box::new(self.coins.iter()),
            EntityCategory::Obstacle => Box::new(self.obstacles.iter()),
            EntityCategory::PowerUp => Box::new(self.power_ups.iter()),
        }
    }

    /// Empty every list, yielding what was in them.
    pub fn drain_all(&mut self) -> Vec<(EntityCategory, ActiveEntity)> {
        let mut drained = Vec::with_capacity(self.counts().total());
        drained.extend(self.segments.drain(..).map(|e| (EntityCategory::Segment, e)));
        drained.extend(self.coins.drain(..).map(|e| (EntityCategory::Coin, e)));
        drained.extend(self.obstacles.drain(..).map(|e| (EntityCategory::Obstacle, e)));
        drained.extend(self.power_ups.drain(..).map(|e| (EntityCategory::PowerUp, e)));
        drained
    }
}
