//! Capabilities an entity category exposes to the plan core.
//!
//! Categories own their instances and their business logic. The core only
//! enumerates, clears and notifies them.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// An instance whose cached diagnostics can be flagged stale.
pub trait ChangeTracked: Send + Sync {
    /// Flags the instance for lazy recomputation on next read.
    fn mark_changed(&self);
}

/// Clear and count, implemented by every erasable category.
pub trait CategoryStore: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every instance, releasing their resources.
    fn clear(&self);
}

/// The operation category additionally enumerates its live instances.
pub trait OperationStore: CategoryStore {
    /// Snapshot of the instances live at the time of the call.
    fn all(&self) -> Vec<Arc<dyn ChangeTracked>>;
}

/// Generic in-memory category: an ordered list of shared instances.
pub struct EntityStore<T> {
    entries: RwLock<Vec<Arc<T>>>,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Adds an instance and returns the shared handle to it.
    pub fn insert(&self, entity: T) -> Arc<T> {
        let entity = Arc::new(entity);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&entity));
        entity
    }

    /// Instances in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EntityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field(
                "len",
                &self.entries.read().unwrap_or_else(PoisonError::into_inner).len(),
            )
            .finish()
    }
}

impl<T: Send + Sync> CategoryStore for EntityStore<T> {
    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn clear(&self) {
        // Take the list out first so instance destructors run unlocked.
        let removed = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *entries)
        };
        drop(removed);
    }
}

impl<T: ChangeTracked + 'static> OperationStore for EntityStore<T> {
    fn all(&self) -> Vec<Arc<dyn ChangeTracked>> {
        self.snapshot()
            .into_iter()
            .map(|entity| entity as Arc<dyn ChangeTracked>)
            .collect()
    }
}

/// Stand-in for a category the embedder did not wire. Always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedCategory;

impl CategoryStore for DetachedCategory {
    fn len(&self) -> usize {
        0
    }

    fn clear(&self) {}
}

impl OperationStore for DetachedCategory {
    fn all(&self) -> Vec<Arc<dyn ChangeTracked>> {
        Vec::new()
    }
}
