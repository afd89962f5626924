//! # Schema Store
//!
//! Holds the current schema generation and hands out immutable snapshots.
//!
//! ## Concurrency
//!
//! A generation is an `Arc<[VehicleDataItem]>`. Readers clone the `Arc`
//! under a short read lock and then work on the snapshot without any lock
//! held, so a policy reload never blocks or tears an in-flight
//! validation. The lock is `parking_lot`, so a panicking writer does not
//! poison the store.

use std::sync::Arc;

use parking_lot::RwLock;

use vinfo_core::{SchemaError, VehicleDataItem};

/// Source of schema generations.
pub trait SchemaProvider: Send + Sync {
    /// The current generation. The returned slice never changes.
    fn snapshot(&self) -> Arc<[VehicleDataItem]>;
}

impl SchemaProvider for Arc<[VehicleDataItem]> {
    fn snapshot(&self) -> Arc<[VehicleDataItem]> {
        Arc::clone(self)
    }
}

impl<T: SchemaProvider + ?Sized> SchemaProvider for &T {
    fn snapshot(&self) -> Arc<[VehicleDataItem]> {
        (**self).snapshot()
    }
}

#[derive(Debug)]
struct Generation {
    items: Arc<[VehicleDataItem]>,
    number: u64,
}

/// Thread-safe, cloneable holder of the current schema generation.
///
/// Clones share the same underlying generation.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    current: Arc<RwLock<Generation>>,
}

impl SchemaStore {
    /// Create a store holding an empty generation (number 0).
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Generation {
                items: Arc::from(Vec::new()),
                number: 0,
            })),
        }
    }

    /// Create a store seeded with a checked generation (number 1).
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in `items`.
    pub fn with_items(items: Vec<VehicleDataItem>) -> Result<Self, SchemaError> {
        let store = Self::new();
        store.replace(items)?;
        Ok(store)
    }

    /// Number of the current generation. Increments on every replace.
    pub fn generation(&self) -> u64 {
        self.current.read().number
    }

    /// Number of root items in the current generation.
    pub fn len(&self) -> usize {
        self.current.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Swap in a new generation.
    ///
    /// Every root item is checked before the swap; on failure the current
    /// generation stays in place. Snapshots taken earlier keep seeing the
    /// old items.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in `items`.
    pub fn replace(&self, items: Vec<VehicleDataItem>) -> Result<u64, SchemaError> {
        for item in &items {
            item.check()?;
        }
        let items: Arc<[VehicleDataItem]> = Arc::from(items);
        let mut guard = self.current.write();
        guard.items = items;
        guard.number += 1;
        tracing::info!(
            generation = guard.number,
            items = guard.items.len(),
            "installed vehicle data schema generation"
        );
        Ok(guard.number)
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaProvider for SchemaStore {
    fn snapshot(&self) -> Arc<[VehicleDataItem]> {
        Arc::clone(&self.current.read().items)
    }
}
