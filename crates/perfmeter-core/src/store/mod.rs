//! Lazily populated metric stores.
//!
//! Each store maps a metric name to a shared cell. The map's shard locks
//! guard insertion only; every cell carries its own lock for value updates,
//! so creating one metric never blocks readers of another.

mod counter;
mod gauge;
mod histogram;

use std::sync::Arc;

use dashmap::DashMap;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{Histogram, HistogramSnapshot, BUCKET_BOUNDS};

/// `name -> cell` map. Entries live for the lifetime of the store.
pub struct Store<M> {
    map: DashMap<String, Arc<M>>,
}

impl<M> Default for Store<M> {
    fn default() -> Self {
        Self { map: DashMap::new() }
    }
}

impl<M: Default> Store<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cell for `name`, creating it on first use.
    /// The second element is `true` when this call created the cell.
    pub fn get_or_create(&self, name: &str) -> (Arc<M>, bool) {
        if let Some(cell) = self.map.get(name) {
            return (Arc::clone(cell.value()), false);
        }

        let mut created = false;
        let cell = self
            .map
            .entry(name.to_string())
            .or_insert_with(|| {
                created = true;
                Arc::new(M::default())
            });
        (Arc::clone(cell.value()), created)
    }
}

impl<M> Store<M> {
    /// Lookup without inserting.
    pub fn get(&self, name: &str) -> Option<Arc<M>> {
        self.map.get(name).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Names currently present, sorted for deterministic output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }
}
