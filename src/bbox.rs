//! Bounding box calculation with caching
//!
//! Entity bounding boxes can be expensive to compute (curve extents solve
//! polynomial roots), so repeated queries go through a [`Cache`] keyed by
//! entity handle. Handle-less (virtual) entities can opt into uuid-based
//! keys. HATCH entities are never cached: all boundary paths of a hatch
//! share one handle, so a cached box could not be invalidated reliably per
//! path.

use crate::entities::{Entity, EntityType};
use crate::types::BoundingBox;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CacheKey {
    Handle(crate::types::Handle),
    Uuid(Uuid),
}

/// Bounding box cache with hit/miss accounting
#[derive(Debug, Clone, Default)]
pub struct Cache {
    boxes: HashMap<CacheKey, BoundingBox>,
    use_uuid: bool,
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl Cache {
    /// Create a cache keyed by entity handles only
    pub fn new() -> Self {
        Cache::default()
    }

    /// Create a cache that also keys handle-less entities by uuid
    pub fn with_uuid() -> Self {
        Cache {
            use_uuid: true,
            ..Cache::default()
        }
    }

    fn key(&self, entity: &EntityType) -> Option<CacheKey> {
        if matches!(entity, EntityType::Hatch(_)) {
            return None;
        }
        let entity = entity.as_entity();
        if entity.handle().is_valid() {
            Some(CacheKey::Handle(entity.handle()))
        } else if self.use_uuid {
            Some(CacheKey::Uuid(entity.uuid()))
        } else {
            None
        }
    }

    /// Cached box for an entity; counts a hit or miss
    pub fn get(&mut self, entity: &EntityType) -> Option<BoundingBox> {
        match self.key(entity).and_then(|key| self.boxes.get(&key)) {
            Some(bbox) => {
                self.hits += 1;
                Some(*bbox)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store the box of an entity; uncacheable entities are ignored
    pub fn store(&mut self, entity: &EntityType, bbox: BoundingBox) {
        if let Some(key) = self.key(entity) {
            self.boxes.insert(key, bbox);
        }
    }

    /// Drop the cached box of an entity; true if one was cached
    pub fn invalidate(&mut self, entity: &EntityType) -> bool {
        match self.key(entity) {
            Some(key) => self.boxes.remove(&key).is_some(),
            None => false,
        }
    }

    /// Number of cached boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Bounding box over many entities, consulting and filling the cache
pub fn extents_cached<'a, I>(entities: I, cache: &mut Cache) -> BoundingBox
where
    I: IntoIterator<Item = &'a EntityType>,
{
    let mut total = BoundingBox::new();
    for entity in entities {
        let bbox = match cache.get(entity) {
            Some(bbox) => bbox,
            None => {
                let bbox = entity.as_entity().bounding_box();
                cache.store(entity, bbox);
                bbox
            }
        };
        total.extend_box(&bbox);
    }
    total
}

/// Bounding box over many entities without caching
pub fn extents<'a, I>(entities: I) -> BoundingBox
where
    I: IntoIterator<Item = &'a EntityType>,
{
    let mut total = BoundingBox::new();
    for entity in entities {
        total.extend_box(&entity.as_entity().bounding_box());
    }
    total
}
