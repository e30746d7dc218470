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

use std::{fmt::Debug, hash::Hash, sync::Arc};

use equivalent::Equivalent;
use hashbrown::HashMap;
use navstore_common::code::{Key, Value};

/// Key/value state scoped to exactly one navigation entry.
///
/// Besides the application keys, every store carries the historic flag, which records whether its entry was reached
/// by a back/forward traversal. The flag lives beside the map, so it can never collide with an application key.
///
/// Cloning a store is shallow: values are shared with the original.
pub struct EntryStore<K, V> {
    map: HashMap<K, Arc<V>>,
    historic: bool,
}

impl<K, V> Default for EntryStore<K, V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            historic: false,
        }
    }
}

impl<K, V> Clone for EntryStore<K, V>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            historic: self.historic,
        }
    }
}

impl<K, V> Debug for EntryStore<K, V>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("keys", &self.map.keys().collect::<Vec<_>>())
            .field("historic", &self.historic)
            .finish()
    }
}

impl<K, V> EntryStore<K, V>
where
    K: Key,
    V: Value,
{
    /// Get the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&Arc<V>>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map.get(key)
    }

    /// Store `value` under `key`, returning the shared value.
    pub fn insert(&mut self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.map.insert(key, value.clone());
        value
    }

    /// Remove `key` from the store, returning its value if present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Arc<V>>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map.remove(key)
    }

    /// Check if the store holds `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Iterate over the application entries of the store.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Arc<V>)> {
        self.map.iter()
    }

    /// Count of application entries, excluding the historic flag.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the store holds no application entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> EntryStore<K, V> {
    /// Whether the entry was reached by a back/forward traversal.
    pub fn is_historic(&self) -> bool {
        self.historic
    }

    pub(crate) fn set_historic(&mut self, historic: bool) {
        self.historic = historic;
    }
}
