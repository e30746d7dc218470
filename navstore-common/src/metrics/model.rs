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

use super::{BoxedCounter, BoxedGauge, RegistryOps};

/// Metrics of a navigation cache instance.
///
/// Every instance is labelled with its name, so multiple caches can share one registry.
#[derive(Debug)]
pub struct Metrics {
    /* store operations */
    /// Reads that found a value.
    pub store_hit: BoxedCounter,
    /// Reads that found nothing.
    pub store_miss: BoxedCounter,
    /// Writes.
    pub store_set: BoxedCounter,
    /// Deletes.
    pub store_delete: BoxedCounter,

    /* transition lifecycle */
    /// Transitions accepted by the hook.
    pub transition_start: BoxedCounter,
    /// Hook calls ignored because the transition was already handled.
    pub transition_duplicate: BoxedCounter,
    /// Pending stores committed into the durable table.
    pub transition_commit: BoxedCounter,
    /// Pending stores dropped without commit.
    pub transition_discard: BoxedCounter,
    /// Settlements ignored because a newer transition owns the pending slot.
    pub transition_stale: BoxedCounter,

    /* durable table */
    /// Entries evicted by the recency bound.
    pub table_evict: BoxedCounter,
    /// Entries held by the durable table.
    pub table_entries: BoxedGauge,
}

impl Metrics {
    /// Create a new metric with the given name.
    pub fn new<R>(name: &str, registry: &R) -> Self
    where
        R: RegistryOps + ?Sized,
    {
        let navstore_op_total =
            registry.register_counter_vec("navstore_op_total", "navstore navigation cache operations", &["name", "op"]);
        let navstore_entries =
            registry.register_gauge_vec("navstore_entries", "navstore durable table entries", &["name"]);

        let store_hit = navstore_op_total.counter(&[name, "hit"]);
        let store_miss = navstore_op_total.counter(&[name, "miss"]);
        let store_set = navstore_op_total.counter(&[name, "set"]);
        let store_delete = navstore_op_total.counter(&[name, "delete"]);

        let transition_start = navstore_op_total.counter(&[name, "transition"]);
        let transition_duplicate = navstore_op_total.counter(&[name, "duplicate"]);
        let transition_commit = navstore_op_total.counter(&[name, "commit"]);
        let transition_discard = navstore_op_total.counter(&[name, "discard"]);
        let transition_stale = navstore_op_total.counter(&[name, "stale"]);

        let table_evict = navstore_op_total.counter(&[name, "evict"]);
        let table_entries = navstore_entries.gauge(&[name]);

        Self {
            store_hit,
            store_miss,
            store_set,
            store_delete,
            transition_start,
            transition_duplicate,
            transition_commit,
            transition_discard,
            transition_stale,
            table_evict,
            table_entries,
        }
    }
}
