//! Priority-ordered registry of transforms.
//!
//! Each priority slot holds at most one transform. Slots are visited in
//! ascending order, and the same order drives both the rewrite pass and the
//! wrap pass of the pipeline. The registry is created once by the host and
//! shared (`Arc<PriorityRegistry>`) between registrants and the pipeline.

mod snapshot;

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::transform::Transform;

pub use snapshot::OrderedTransforms;

/// Ordering key; lower values run earlier.
pub type Priority = i32;

/// Shared map of priority -> transform.
#[derive(Default)]
pub struct PriorityRegistry {
    slots: RwLock<BTreeMap<Priority, Arc<dyn Transform>>>,
}

impl PriorityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `priority` for `transform`.
    ///
    /// Returns false without touching the registry when the slot is already
    /// taken, or when `transform` already holds another slot. An instance
    /// must be unregistered before it can move.
    pub fn register(&self, transform: Arc<dyn Transform>, priority: Priority) -> bool {
        let mut slots = self.write();
        if slots.contains_key(&priority) {
            tracing::debug!(
                "priority {} already taken; rejecting {}",
                priority,
                transform.name()
            );
            return false;
        }
        if slots.values().any(|held| Arc::ptr_eq(held, &transform)) {
            tracing::debug!(
                "{} is already registered; rejecting priority {}",
                transform.name(),
                priority
            );
            return false;
        }
        tracing::debug!("registered {} at priority {}", transform.name(), priority);
        slots.insert(priority, transform);
        true
    }

    /// Release `priority` if and only if it holds exactly `transform`
    /// (same allocation). An empty slot and a different occupant both give
    /// false.
    pub fn unregister(&self, transform: &Arc<dyn Transform>, priority: Priority) -> bool {
        let mut slots = self.write();
        let held = slots
            .get(&priority)
            .is_some_and(|current| Arc::ptr_eq(current, transform));
        if !held {
            return false;
        }
        slots.remove(&priority);
        tracing::debug!("unregistered {} from priority {}", transform.name(), priority);
        true
    }

    /// Transforms in ascending priority order as of this call.
    pub fn ordered_transforms(&self) -> OrderedTransforms {
        let slots = self.read();
        OrderedTransforms::new(slots.values().cloned().collect())
    }

    /// Occupied priorities, ascending.
    pub fn priorities(&self) -> Vec<Priority> {
        self.read().keys().copied().collect()
    }

    pub fn contains(&self, priority: Priority) -> bool {
        self.read().contains_key(&priority)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Every mutation is a single BTreeMap call made under the write lock, so a
    // poisoned lock still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<Priority, Arc<dyn Transform>>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<Priority, Arc<dyn Transform>>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PriorityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.read();
        f.debug_map()
            .entries(slots.iter().map(|(p, t)| (p, t.name())))
            .finish()
    }
}
