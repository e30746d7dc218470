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

#[cfg(feature = "prometheus")]
pub use navstore_common::metrics::registry::prometheus::PrometheusMetricsRegistry;
pub use navstore_common::{
    code::{EntryId, Key, Value},
    error::{Error, Result},
    event::{Event, EventListener},
    metrics::{registry::noop::NoopMetricsRegistry, Metrics, RegistryOps},
};
pub use navstore_memory::{
    DurableTable, EntryStore, History, InMemoryHistory, ManualTransition, NavigationCache, NavigationCacheBuilder,
    NavigationCacheConfig, Outcome, SettleCallback, Settler, Transition, TransitionKind, DEFAULT_CAPACITY,
};

pub use crate::settle::{spawn_settle, TransitionSequencer};
