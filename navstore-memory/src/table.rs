// Copyright 2026 navstore Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use navstore_common::{
    code::{EntryId, Key, Value},
    event::Event,
    strict_assert,
};
use ordered_hash_map::OrderedHashMap;

use crate::store::EntryStore;

/// Committed entry stores, bounded by recency.
///
/// The insertion order of the inner map is the recency order: the front is the least recently touched entry.
/// Touching an entry (creating or committing it) removes and re-inserts it at the back, and eviction pops the front.
pub struct DurableTable<I, K, V> {
    entries: OrderedHashMap<I, EntryStore<K, V>>,
    capacity: usize,
}

impl<I, K, V> DurableTable<I, K, V>
where
    I: EntryId,
    K: Key,
    V: Value,
{
    /// Create an empty table retaining at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "durable table capacity must be positive");
        Self {
            entries: OrderedHashMap::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Get the store of `id` without touching it.
    pub fn get(&self, id: &I) -> Option<&EntryStore<K, V>> {
        self.entries.get(id)
    }

    /// Get the store of `id` mutably without touching it.
    pub fn get_mut(&mut self, id: &I) -> Option<&mut EntryStore<K, V>> {
        self.entries.get_mut(id)
    }

    /// Get the store of `id`, creating an empty one if it does not exist yet.
    ///
    /// Creation touches the entry and may evict older ones into `garbages`.
    pub fn get_or_create(&mut self, id: &I, garbages: &mut Vec<(Event, I)>) -> &mut EntryStore<K, V> {
        if self.entries.get(id).is_none() {
            self.entries.insert(id.clone(), EntryStore::default());
            self.evict(garbages);
        }
        match self.entries.get_mut(id) {
            Some(store) => store,
            None => unreachable!("the most recently touched entry {id:?} is never evicted"),
        }
    }

    /// Commit `store` as the durable store of `id`, marking it as the most recently touched entry.
    pub fn commit(&mut self, id: I, store: EntryStore<K, V>, garbages: &mut Vec<(Event, I)>) {
        if self.entries.remove(&id).is_some() {
            garbages.push((Event::Replace, id.clone()));
        }
        self.entries.insert(id, store);
        self.evict(garbages);
    }

    /// Drop every entry.
    pub fn clear(&mut self, garbages: &mut Vec<(Event, I)>) {
        while let Some((id, _)) = self.entries.pop_front_entry() {
            garbages.push((Event::Clear, id));
        }
        strict_assert!(self.is_empty());
    }

    /// Check if a store for `id` is retained.
    pub fn contains(&self, id: &I) -> bool {
        self.entries.get(id).is_some()
    }

    /// Retained entry identifiers, from the least to the most recently touched.
    pub fn ids(&self) -> impl Iterator<Item = &I> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Count of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entry is retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum count of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict(&mut self, garbages: &mut Vec<(Event, I)>) {
        while self.entries.len() > self.capacity {
            let Some((id, _)) = self.entries.pop_front_entry() else {
                break;
            };
            tracing::debug!(?id, "[table]: evict least recently touched entry");
            garbages.push((Event::Evict, id));
        }
        strict_assert!(self.entries.len() <= self.capacity);
    }
}
