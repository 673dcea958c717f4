//! Tag-indexed object pool backed by a hecs world.
//!
//! Every instance is spawned once at warm-up and lives for the lifetime of
//! the pool. Acquire takes the instance at the head of its tag's rotation,
//! activates and moves it, and puts it back at the tail, so the least
//! recently acquired instance is always the next one handed out. An
//! instance that is still active when its turn comes is relocated anyway;
//! pools must be sized for the maximum number in flight.

use std::collections::{HashMap, VecDeque};

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use runner_core::config::PoolSpec;
use runner_core::enums::EntityCategory;
use runner_core::error::{ConfigError, PoolError, PoolResult};
use runner_core::state::PoolView;
use runner_core::types::{EntityHandle, Transform};

/// Pool bookkeeping attached to every instance.
#[derive(Debug, Clone, Copy)]
pub struct Instance {
    /// Index of the owning tag pool.
    pub pool: usize,
    pub active: bool,
    /// Bumped on every acquire of this instance.
    pub lease: u64,
}

#[derive(Debug)]
struct TagPool {
    tag: String,
    category: EntityCategory,
    rotation: VecDeque<Entity>,
    active: usize,
    forced_reuses: u64,
}

/// Occupancy counters for one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub size: usize,
    pub active: usize,
    pub forced_reuses: u64,
}

#[derive(Default)]
pub struct ObjectPool {
    world: World,
    index: HashMap<String, usize>,
    pools: Vec<TagPool>,
}

impl ObjectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool and warm every declared tag.
    pub fn with_specs(specs: &[PoolSpec]) -> Result<Self, ConfigError> {
        let mut pool = Self::new();
        for spec in specs {
            pool.warm_up(&spec.tag, spec.category, spec.size)?;
        }
        Ok(pool)
    }

    /// Pre-create `count` inactive instances for `tag`.
    ///
    /// Warming a tag a second time is ignored.
    pub fn warm_up(
        &mut self,
        tag: &str,
        category: EntityCategory,
        count: usize,
    ) -> Result<(), ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyPool {
                tag: tag.to_string(),
            });
        }
        if self.index.contains_key(tag) {
            tracing::warn!(tag, "pool already warmed, ignoring");
            return Ok(());
        }

        let pool = self.pools.len();
        let rotation = (0..count)
            .map(|_| {
                self.world.spawn((
                    Instance {
                        pool,
                        active: false,
                        lease: 0,
                    },
                    Transform::default(),
                ))
            })
            .collect();

        self.pools.push(TagPool {
            tag: tag.to_string(),
            category,
            rotation,
            active: 0,
            forced_reuses: 0,
        });
        self.index.insert(tag.to_string(), pool);
        tracing::debug!(tag, count, ?category, "pool warmed");
        Ok(())
    }

    /// Hand out the least recently acquired instance for `tag`, active and
    /// placed at `position`/`rotation`.
    pub fn acquire(&mut self, tag: &str, position: Vec3, rotation: Quat) -> PoolResult<EntityHandle> {
        let &idx = self
            .index
            .get(tag)
            .ok_or_else(|| PoolError::UnknownTag(tag.to_string()))?;
        let pool = &mut self.pools[idx];

        let entity = pool
            .rotation
            .pop_front()
            .ok_or_else(|| PoolError::UnknownTag(tag.to_string()))?;
        pool.rotation.push_back(entity);

        let (instance, transform) = self
            .world
            .query_one_mut::<(&mut Instance, &mut Transform)>(entity)
            .map_err(|_| PoolError::StaleHandle(entity.to_bits().get()))?;

        if instance.active {
            pool.forced_reuses += 1;
            tracing::warn!(
                tag,
                from_z = transform.position.z,
                to_z = position.z,
                "pool exhausted, relocating an in-flight instance"
            );
        } else {
            instance.active = true;
            pool.active += 1;
        }
        instance.lease += 1;
        transform.position = position;
        transform.rotation = rotation;

        Ok(EntityHandle::from_bits(entity.to_bits().get()))
    }

    /// Deactivate an instance. Returns `Ok(false)` if it was already inactive.
    ///
    /// The instance keeps its place in the rotation.
    pub fn release(&mut self, handle: EntityHandle) -> PoolResult<bool> {
        self.release_if(handle, |_| true)
    }

    /// Deactivate an instance only if it has not been re-acquired since the
    /// acquire that produced `lease`.
    pub fn release_lease(&mut self, handle: EntityHandle, lease: u64) -> PoolResult<bool> {
        self.release_if(handle, |instance| instance.lease == lease)
    }

    fn release_if(
        &mut self,
        handle: EntityHandle,
        pred: impl FnOnce(&Instance) -> bool,
    ) -> PoolResult<bool> {
        let entity = self.entity(handle)?;
        let instance = self
            .world
            .query_one_mut::<&mut Instance>(entity)
            .map_err(|_| PoolError::StaleHandle(handle.to_bits()))?;

        if !instance.active || !pred(instance) {
            return Ok(false);
        }
        instance.active = false;
        self.pools[instance.pool].active -= 1;
        Ok(true)
    }

    /// Move an instance without changing its active state.
    pub fn set_position(&mut self, handle: EntityHandle, position: Vec3) -> PoolResult<()> {
        let entity = self.entity(handle)?;
        let transform = self
            .world
            .query_one_mut::<&mut Transform>(entity)
            .map_err(|_| PoolError::StaleHandle(handle.to_bits()))?;
        transform.position = position;
        Ok(())
    }

    pub fn instance(&self, handle: EntityHandle) -> Option<Instance> {
        let entity = self.entity(handle).ok()?;
        self.world.get::<&Instance>(entity).ok().map(|i| *i)
    }

    pub fn transform(&self, handle: EntityHandle) -> Option<Transform> {
        let entity = self.entity(handle).ok()?;
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    pub fn is_active(&self, handle: EntityHandle) -> bool {
        self.instance(handle).is_some_and(|i| i.active)
    }

    pub fn lease(&self, handle: EntityHandle) -> Option<u64> {
        self.instance(handle).map(|i| i.lease)
    }

    pub fn tag_of(&self, handle: EntityHandle) -> Option<&str> {
        let instance = self.instance(handle)?;
        Some(self.pools[instance.pool].tag.as_str())
    }

    pub fn category_of(&self, tag: &str) -> Option<EntityCategory> {
        self.index.get(tag).map(|&idx| self.pools[idx].category)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    pub fn stats(&self, tag: &str) -> Option<PoolStats> {
        self.index.get(tag).map(|&idx| {
            let pool = &self.pools[idx];
            PoolStats {
                size: pool.rotation.len(),
                active: pool.active,
                forced_reuses: pool.forced_reuses,
            }
        })
    }

    /// Instances currently active across every tag.
    pub fn total_active(&self) -> usize {
        self.pools.iter().map(|p| p.active).sum()
    }

    pub fn forced_reuses(&self) -> u64 {
        self.pools.iter().map(|p| p.forced_reuses).sum()
    }

    /// Per-tag occupancy, in warm-up order.
    pub fn views(&self) -> Vec<PoolView> {
        self.pools
            .iter()
            .map(|p| PoolView {
                tag: p.tag.clone(),
                size: p.rotation.len(),
                active: p.active,
            })
            .collect()
    }

    fn entity(&self, handle: EntityHandle) -> PoolResult<Entity> {
        Entity::from_bits(handle.to_bits())
            .filter(|&e| self.world.contains(e))
            .ok_or(PoolError::StaleHandle(handle.to_bits()))
    }
}
