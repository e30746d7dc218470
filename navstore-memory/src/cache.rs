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

use std::{fmt::Debug, hash::Hash, marker::PhantomData, sync::Arc};

use equivalent::Equivalent;
use navstore_common::{
    code::{EntryId, Key, Value},
    error::{Error, Result},
    event::{Event, EventListener},
    metrics::{registry::noop::NoopMetricsRegistry, BoxedRegistry, Metrics, RegistryOps},
    strict_assert,
};
use ordered_hash_map::OrderedHashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    host::{History, Outcome, Transition, TransitionKind},
    store::EntryStore,
    table::DurableTable,
};

/// Default count of navigation entries retained by the durable table.
pub const DEFAULT_CAPACITY: usize = 100;

/// Count of the most recent transition ids remembered to recognize repeated hook calls.
const HANDLED_TRANSITIONS: usize = 64;

/// Navigation cache config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCacheConfig {
    /// Maximum count of navigation entries whose state is retained.
    ///
    /// Must be positive.
    pub capacity: usize,
}

impl Default for NavigationCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Store under construction by the in-flight transition.
struct Pending<K, V> {
    generation: u64,
    kind: TransitionKind,
    store: EntryStore<K, V>,
}

struct State<I, K, V> {
    table: DurableTable<I, K, V>,
    /// Entry of the last commit, or the entry the history was on at construction.
    current: I,
    pending: Option<Pending<K, V>>,
    /// Bumped by every accepted transition. Settlements carrying an older generation are stale.
    generation: u64,
    /// Ids of the transitions accepted by the hook, oldest first.
    handled: OrderedHashMap<u64, ()>,
}

impl<I, K, V> State<I, K, V>
where
    I: EntryId,
    K: Key,
    V: Value,
{
    /// The read/write target: the pending store if a transition is in flight, the current durable store otherwise.
    fn store(&self) -> Option<&EntryStore<K, V>> {
        match &self.pending {
            Some(pending) => Some(&pending.store),
            None => self.table.get(&self.current),
        }
    }

    fn store_mut(&mut self) -> Option<&mut EntryStore<K, V>> {
        match &mut self.pending {
            Some(pending) => Some(&mut pending.store),
            None => self.table.get_mut(&self.current),
        }
    }

    /// Remember `id` as handled. Returns `false` if it already was.
    fn handle(&mut self, id: u64) -> bool {
        if self.handled.get(&id).is_some() {
            return false;
        }
        self.handled.insert(id, ());
        while self.handled.len() > HANDLED_TRANSITIONS {
            self.handled.pop_front();
        }
        true
    }

    fn store_or_create(&mut self, garbages: &mut Vec<(Event, I)>) -> &mut EntryStore<K, V> {
        match &mut self.pending {
            Some(pending) => &mut pending.store,
            None => self.table.get_or_create(&self.current, garbages),
        }
    }
}

struct Inner<K, V, H>
where
    H: History,
{
    name: String,
    state: Mutex<State<H::Id, K, V>>,
    history: H,
    metrics: Arc<Metrics>,
    event_listener: Option<Arc<dyn EventListener<Id = H::Id>>>,
}

/// Navigation-scoped state cache.
///
/// Application code reads and writes small pieces of state for "the current navigation entry". The host router
/// calls [`NavigationCache::on_transition`] at the start of every navigation attempt, so that:
///
/// - writes issued while a transition is in flight go to a pending store, isolated from every committed store;
/// - a back/forward traversal starts from a copy of the state previously committed for the revealed entry;
/// - a forward navigation starts from an empty store;
/// - the pending store becomes durable only when its transition succeeds and no newer transition replaced it.
///
/// Committed stores are kept for at most `capacity` entries, evicting the least recently touched one.
///
/// The cache is cheap to clone, clones share the same state. Construct one per application session with
/// [`NavigationCacheBuilder`].
pub struct NavigationCache<K, V, H>
where
    H: History,
{
    inner: Arc<Inner<K, V, H>>,
}

impl<K, V, H> Clone for NavigationCache<K, V, H>
where
    H: History,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, H> Debug for NavigationCache<K, V, H>
where
    K: Key,
    V: Value,
    H: History,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("NavigationCache")
            .field("name", &self.inner.name)
            .field("current", &state.current)
            .field("entries", &state.table.ids().collect::<Vec<_>>())
            .field("capacity", &state.table.capacity())
            .field("transitioning", &state.pending.is_some())
            .finish()
    }
}

impl<K, V, H> NavigationCache<K, V, H>
where
    K: Key + Clone,
    V: Value,
    H: History,
{
    /// Get the value stored under `key` for the current entry.
    #[cfg_attr(feature = "tracing", fastrace::trace(name = "navstore::memory::cache::get"))]
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let value = self.inner.state.lock().store().and_then(|store| store.get(key)).cloned();
        match value {
            Some(_) => self.inner.metrics.store_hit.increase(1),
            None => self.inner.metrics.store_miss.increase(1),
        }
        value
    }

    /// Check if `key` is stored for the current entry.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.state.lock().store().is_some_and(|store| store.contains(key))
    }

    /// Store `value` under `key` for the current entry. Returns the stored value.
    #[cfg_attr(feature = "tracing", fastrace::trace(name = "navstore::memory::cache::set"))]
    pub fn set(&self, key: K, value: V) -> Arc<V> {
        let mut garbages = vec![];
        let value = {
            let mut state = self.inner.state.lock();
            let value = state.store_or_create(&mut garbages).insert(key, value);
            self.inner.metrics.table_entries.absolute(state.table.len() as _);
            value
        };
        self.inner.metrics.store_set.increase(1);
        self.notify(garbages);
        value
    }

    /// Remove `key` from the current entry. Returns the removed value, if any.
    #[cfg_attr(feature = "tracing", fastrace::trace(name = "navstore::memory::cache::delete"))]
    pub fn delete<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let removed = self.inner.state.lock().store_mut().and_then(|store| store.remove(key));
        self.inner.metrics.store_delete.increase(1);
        removed
    }

    /// Whether the current entry was reached by a back/forward traversal.
    ///
    /// While a transition is in flight, this reports the pending store's flag, which is raised for every
    /// transition attempt and only lowered when a forward transition commits.
    pub fn is_popped_state(&self) -> bool {
        self.inner.state.lock().store().is_some_and(|store| store.is_historic())
    }

    /// Transition hook. Must be called by the host router once at the start of every navigation attempt.
    ///
    /// Calls carrying the id of a recently handled transition are ignored, so repeated calls for the same transition
    /// are harmless. Ids need not be ordered.
    #[cfg_attr(feature = "tracing", fastrace::trace(name = "navstore::memory::cache::on_transition"))]
    pub fn on_transition<T>(&self, transition: &T)
    where
        T: Transition + ?Sized,
    {
        let id = transition.id();
        let mut garbages = vec![];

        let generation = {
            let mut state = self.inner.state.lock();

            if !state.handle(id) {
                tracing::trace!(id, "[navstore]: ignore handled transition");
                self.inner.metrics.transition_duplicate.increase(1);
                return;
            }

            // A forward navigation keeps the history entry until it is confirmed, a traversal reveals its target now.
            let observed = self.inner.history.current_entry();
            let (kind, mut store) = if observed == state.current {
                (TransitionKind::Forward, EntryStore::default())
            } else {
                let store = state.table.get(&observed).cloned().unwrap_or_default();
                (TransitionKind::Traversal, store)
            };
            store.set_historic(true);

            state.generation += 1;
            let generation = state.generation;

            tracing::debug!(
                id,
                generation,
                ?kind,
                current = ?state.current,
                ?observed,
                "[navstore]: start transition"
            );

            let pending = Pending {
                generation,
                kind,
                store,
            };
            if let Some(superseded) = state.pending.replace(pending) {
                tracing::debug!(
                    generation = superseded.generation,
                    "[navstore]: discard pending store of superseded transition"
                );
                self.inner.metrics.transition_discard.increase(1);
                garbages.push((Event::Discard, state.current.clone()));
            }

            generation
        };

        self.inner.metrics.transition_start.increase(1);
        self.notify(garbages);

        // Registered outside the lock, the transition may settle synchronously.
        let this = self.clone();
        transition.on_settle(Box::new(move |outcome| this.settle(generation, outcome)));
    }

    #[cfg_attr(feature = "tracing", fastrace::trace(name = "navstore::memory::cache::settle"))]
    fn settle(&self, generation: u64, outcome: Outcome) {
        let mut garbages = vec![];

        {
            let mut state = self.inner.state.lock();

            let pending = match state.pending.take() {
                Some(pending) if pending.generation == generation => pending,
                other => {
                    state.pending = other;
                    tracing::debug!(generation, ?outcome, "[navstore]: ignore stale transition settlement");
                    self.inner.metrics.transition_stale.increase(1);
                    return;
                }
            };

            if outcome.is_success() {
                let Pending { kind, mut store, .. } = pending;
                if kind == TransitionKind::Forward {
                    store.set_historic(false);
                }

                let id = self.inner.history.current_entry();
                tracing::debug!(generation, ?kind, ?id, "[navstore]: commit pending store");
                state.table.commit(id.clone(), store, &mut garbages);
                strict_assert!(state.table.contains(&id));
                state.current = id;

                self.inner.metrics.transition_commit.increase(1);
                self.inner.metrics.table_entries.absolute(state.table.len() as _);
            } else {
                tracing::debug!(generation, ?outcome, "[navstore]: discard pending store of unsuccessful transition");
                self.inner.metrics.transition_discard.increase(1);
                garbages.push((Event::Discard, state.current.clone()));
            }
        }

        self.notify(garbages);
    }

    /// Drop every committed store and the pending store, if any.
    ///
    /// The current entry is resynchronized from the history. Recently handled transitions stay handled.
    pub fn clear(&self) {
        let mut garbages = vec![];
        {
            let mut state = self.inner.state.lock();
            state.table.clear(&mut garbages);
            if state.pending.take().is_some() {
                self.inner.metrics.transition_discard.increase(1);
                garbages.push((Event::Discard, state.current.clone()));
            }
            state.current = self.inner.history.current_entry();
            self.inner.metrics.table_entries.absolute(0);
        }
        self.notify(garbages);
    }

    /// A copy of the committed store of `id`, if retained.
    pub fn entry(&self, id: &H::Id) -> Option<EntryStore<K, V>> {
        self.inner.state.lock().table.get(id).cloned()
    }

    /// Check if a committed store of `id` is retained.
    pub fn retains(&self, id: &H::Id) -> bool {
        self.inner.state.lock().table.contains(id)
    }

    /// Entry of the last commit.
    pub fn current_entry(&self) -> H::Id {
        self.inner.state.lock().current.clone()
    }

    /// Whether a transition is in flight, i.e. a pending store is the read/write target.
    pub fn is_transitioning(&self) -> bool {
        self.inner.state.lock().pending.is_some()
    }

    /// Count of committed entries.
    pub fn len(&self) -> usize {
        self.inner.state.lock().table.len()
    }

    /// Check if no entry is committed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum count of committed entries.
    pub fn capacity(&self) -> usize {
        self.inner.state.lock().table.capacity()
    }

    /// Name of the cache, used as the metrics label.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The host history the cache reads entry identifiers from.
    pub fn history(&self) -> &H {
        &self.inner.history
    }

    fn notify(&self, garbages: Vec<(Event, H::Id)>) {
        for (event, id) in garbages {
            if event == Event::Evict {
                self.inner.metrics.table_evict.increase(1);
            }
            if let Some(listener) = self.inner.event_listener.as_ref() {
                listener.on_leave(event, &id);
            }
        }
    }
}

/// Navigation cache builder.
pub struct NavigationCacheBuilder<K, V, I> {
    name: String,
    config: NavigationCacheConfig,
    event_listener: Option<Arc<dyn EventListener<Id = I>>>,
    registry: BoxedRegistry,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, I> Debug for NavigationCacheBuilder<K, V, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationCacheBuilder")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<K, V, I> NavigationCacheBuilder<K, V, I>
where
    K: Key + Clone,
    V: Value,
    I: EntryId,
{
    /// Create a builder retaining at most `capacity` navigation entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            name: "navstore".to_string(),
            config: NavigationCacheConfig { capacity },
            event_listener: None,
            registry: Box::new(NoopMetricsRegistry),
            _marker: PhantomData,
        }
    }

    /// Set the name of the cache, used as the metrics label.
    ///
    /// Default: `navstore`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the whole config, e.g. with one loaded from a configuration file.
    pub fn with_config(mut self, config: NavigationCacheConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the event listener notified when entry stores leave the cache.
    pub fn with_event_listener(mut self, event_listener: Arc<dyn EventListener<Id = I>>) -> Self {
        self.event_listener = Some(event_listener);
        self
    }

    /// Set the metrics registry.
    ///
    /// Default: [`NoopMetricsRegistry`].
    pub fn with_metrics_registry(mut self, registry: impl RegistryOps) -> Self {
        self.registry = Box::new(registry);
        self
    }

    /// Build the navigation cache on top of the given host history.
    ///
    /// The entry the history is on at this moment becomes the current entry.
    pub fn build<H>(self, history: H) -> Result<NavigationCache<K, V, H>>
    where
        H: History<Id = I>,
    {
        if self.config.capacity == 0 {
            return Err(Error::config("capacity must be positive, given: 0"));
        }

        let metrics = Arc::new(Metrics::new(&self.name, self.registry.as_ref()));
        let current = history.current_entry();

        tracing::debug!(name = %self.name, capacity = self.config.capacity, ?current, "[navstore]: build navigation cache");

        let state = State {
            table: DurableTable::new(self.config.capacity),
            current,
            pending: None,
            generation: 0,
            handled: OrderedHashMap::with_capacity(HANDLED_TRANSITIONS + 1),
        };

        Ok(NavigationCache {
            inner: Arc::new(Inner {
                name: self.name,
                state: Mutex::new(state),
                history,
                metrics,
                event_listener: self.event_listener,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{history::InMemoryHistory, transition::ManualTransition};

    type TestCache = NavigationCache<&'static str, u64, Arc<InMemoryHistory>>;

    fn is_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn test_send_sync_static() {
        is_send_sync_static::<TestCache>();
        is_send_sync_static::<NavigationCache<String, Vec<u8>, InMemoryHistory>>();
    }

    fn cache_for_test(capacity: usize) -> (TestCache, Arc<InMemoryHistory>) {
        let history = Arc::new(InMemoryHistory::new());
        let cache = NavigationCacheBuilder::new(capacity).build(history.clone()).unwrap();
        (cache, history)
    }

    fn value(cache: &TestCache, key: &str) -> Option<u64> {
        cache.get(key).map(|v| *v)
    }

    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<(Event, u64)>>);

    impl EventListener for Recorder {
        type Id = u64;

        fn on_leave(&self, reason: Event, id: &u64) {
            self.0.lock().push((reason, *id));
        }
    }

    #[test_log::test]
    fn test_get_set_delete() {
        let (cache, history) = cache_for_test(4);
        assert_eq!(value(&cache, "k"), None);
        assert!(cache.is_empty());

        assert_eq!(*cache.set("k", 1), 1);
        assert_eq!(*cache.set("k", 2), 2);
        assert_eq!(value(&cache, "k"), Some(2));
        assert!(cache.contains("k"));
        assert!(cache.retains(&history.current_entry()));
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.delete("k").map(|v| *v), Some(2));
        assert_eq!(value(&cache, "k"), None);
        assert_eq!(cache.delete("k"), None);
        assert!(!cache.is_popped_state());
    }

    #[test_log::test]
    fn test_debug_lists_retained_entries() {
        let (cache, history) = cache_for_test(4);
        cache.set("k", 1);
        let (t, settler) = ManualTransition::new(1);
        cache.on_transition(&t);
        history.push();
        settler.settle(Outcome::Succeeded);

        assert_eq!(
            format!("{cache:?}"),
            "NavigationCache { name: \"navstore\", current: 2, entries: [1, 2], capacity: 4, transitioning: false }"
        );
    }

    #[test_log::test]
    fn test_read_only_access_creates_nothing() {
        let (cache, _) = cache_for_test(4);
        assert_eq!(value(&cache, "k"), None);
        assert_eq!(cache.delete("k"), None);
        assert!(!cache.is_popped_state());
        assert!(cache.is_empty());
    }

    #[test_log::test]
    fn test_forward_transition_commits_pending_store() {
        let (cache, history) = cache_for_test(4);
        let a = history.current_entry();
        cache.set("k", 1);

        let (t, settler) = ManualTransition::new(1);
        cache.on_transition(&t);
        assert!(cache.is_transitioning());

        // The destination starts empty, and the page being left is untouched.
        assert_eq!(value(&cache, "k"), None);
        cache.set("k", 2);
        cache.set("only-b", 3);
        assert_eq!(value(&cache, "k"), Some(2));
        assert_eq!(cache.entry(&a).and_then(|s| s.get("k").map(|v| **v)), Some(1));
        assert!(!cache.retains(&(a + 1)));

        let b = history.push();
        settler.settle(Outcome::Succeeded);

        assert!(!cache.is_transitioning());
        assert_eq!(cache.current_entry(), b);
        assert_eq!(value(&cache, "k"), Some(2));
        assert_eq!(value(&cache, "only-b"), Some(3));
        assert!(!cache.is_popped_state());
        assert_eq!(cache.entry(&a).and_then(|s| s.get("k").map(|v| **v)), Some(1));
        assert_eq!(cache.len(), 2);
    }

    #[test_log::test]
    fn test_traversal_restores_committed_state() {
        let (cache, history) = cache_for_test(4);
        let a = history.current_entry();
        cache.set("scroll", 100);

        let (t, settler) = ManualTransition::new(1);
        cache.on_transition(&t);
        cache.set("scroll", 200);
        let b = history.push();
        settler.settle(Outcome::Succeeded);
        assert_eq!(cache.current_entry(), b);

        // Native back: the history reveals `a` before the router transition starts.
        assert_eq!(history.back(), Some(a));
        let (t, settler) = ManualTransition::new(2);
        cache.on_transition(&t);
        assert_eq!(value(&cache, "scroll"), Some(100));
        assert!(cache.is_popped_state());

        // Writes during the traversal stay pending.
        cache.set("scroll", 150);
        assert_eq!(cache.entry(&a).and_then(|s| s.get("scroll").map(|v| **v)), Some(100));

        settler.settle(Outcome::Succeeded);
        assert_eq!(cache.current_entry(), a);
        assert_eq!(value(&cache, "scroll"), Some(150));
        assert!(cache.is_popped_state());

        // And forward again.
        assert_eq!(history.forward(), Some(b));
        let (t, settler) = ManualTransition::new(3);
        cache.on_transition(&t);
        settler.settle(Outcome::Succeeded);
        assert_eq!(value(&cache, "scroll"), Some(200));
        assert!(cache.is_popped_state());
    }

    #[test_log::test]
    fn test_traversal_to_unknown_entry_starts_empty() {
        let (cache, history) = cache_for_test(4);
        let b = history.push();
        let _c = history.push();
        assert_eq!(history.back(), Some(b));

        let (t, settler) = ManualTransition::new(1);
        cache.on_transition(&t);
        assert_eq!(value(&cache, "k"), None);
        assert!(cache.is_popped_state());
        settler.settle(Outcome::Succeeded);
        assert_eq!(cache.current_entry(), b);
        assert!(cache.is_popped_state());
    }

    /// The historic flag is raised as soon as any transition starts, including forward ones, and only lowered when
    /// a forward transition commits. Whether the early raise is intended is unsettled; this pins the behavior.
    #[test_log::test]
    fn test_historic_flag_raised_on_every_transition_attempt() {
        let (cache, history) = cache_for_test(4);
        assert!(!cache.is_popped_state());

        let (t, settler) = ManualTransition::new(1);
        cache.on_transition(&t);
        assert!(cache.is_popped_state());

        history.push();
        settler.settle(Outcome::Succeeded);
        assert!(!cache.is_popped_state());

        // An abandoned forward attempt leaves no trace.
        let (t, settler) = ManualTransition::new(2);
        cache.on_transition(&t);
        assert!(cache.is_popped_state());
        settler.settle(Outcome::Aborted);
        assert!(!cache.is_popped_state());
    }

    #[test_log::test]
    fn test_eviction_keeps_most_recent_entries() {
        let (cache, history) = cache_for_test(3);

        let mut ids = vec![];
        for (i, id) in (1..=4).enumerate() {
            let (t, settler) = ManualTransition::new(id);
            cache.on_transition(&t);
            cache.set("i", i as u64);
            ids.push(history.push());
            settler.settle(Outcome::Succeeded);
        }
        let [a, b, c, d] = ids[..] else { unreachable!() };

        assert_eq!(cache.len(), 3);
        assert!(!cache.retains(&a));
        for (i, id) in [b, c, d].into_iter().enumerate() {
            assert_eq!(cache.entry(&id).and_then(|s| s.get("i").map(|v| **v)), Some(i as u64 + 1));
        }

        // Traversing back to the evicted entry finds nothing.
        assert_eq!(history.go(-3), Some(a));
        let (t, settler) = ManualTransition::new(5);
        cache.on_transition(&t);
        assert_eq!(value(&cache, "i"), None);
        drop(settler);
    }

    #[test_log::test]
    fn test_commit_refreshes_recency() {
        let (cache, history) = cache_for_test(2);
        let a = history.current_entry();
        cache.set("k", 0);

        let (t, s) = ManualTransition::new(1);
        cache.on_transition(&t);
        let b = history.push();
        s.settle(Outcome::Succeeded);

        // Back to `a` touches it, so `b` is the least recently touched entry.
        history.back();
        let (t, s) = ManualTransition::new(2);
        cache.on_transition(&t);
        s.settle(Outcome::Succeeded);

        let (t, s) = ManualTransition::new(3);
        cache.on_transition(&t);
        let c = history.push();
        s.settle(Outcome::Succeeded);

        assert!(cache.retains(&a));
        assert!(!cache.retains(&b));
        assert!(cache.retains(&c));
    }

    #[test_log::test]
    fn test_superseded_transition_never_commits() {
        let (cache, history) = cache_for_test(4);
        let a = history.current_entry();

        let (t1, s1) = ManualTransition::new(1);
        cache.on_transition(&t1);
        cache.set("x", 1);

        let (t2, s2) = ManualTransition::new(2);
        cache.on_transition(&t2);
        assert_eq!(value(&cache, "x"), None);
        cache.set("x", 2);

        // The stale settlement neither commits nor clears the newer pending store.
        s1.settle(Outcome::Succeeded);
        assert!(cache.is_transitioning());
        assert_eq!(value(&cache, "x"), Some(2));
        assert!(cache.is_empty());
        assert_eq!(cache.current_entry(), a);

        let b = history.push();
        s2.settle(Outcome::Succeeded);
        assert_eq!(cache.current_entry(), b);
        let committed = cache.entry(&b).unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed.get("x").map(|v| **v), Some(2));
        assert!(!cache.retains(&a));
    }

    #[test_log::test]
    fn test_settlement_after_newer_commit_is_stale() {
        let (cache, history) = cache_for_test(4);

        let (t1, s1) = ManualTransition::new(1);
        cache.on_transition(&t1);
        let (t2, s2) = ManualTransition::new(2);
        cache.on_transition(&t2);
        cache.set("x", 2);
        let b = history.push();
        s2.settle(Outcome::Succeeded);

        cache.set("y", 3);
        s1.settle(Outcome::Succeeded);
        assert_eq!(cache.current_entry(), b);
        assert_eq!(value(&cache, "x"), Some(2));
        assert_eq!(value(&cache, "y"), Some(3));
        assert_eq!(cache.len(), 1);
    }

    #[test_log::test]
    fn test_duplicate_hook_is_noop() {
        let (cache, history) = cache_for_test(4);

        let (t, settler) = ManualTransition::new(7);
        cache.on_transition(&t);
        cache.set("x", 1);
        cache.on_transition(&t);
        cache.on_transition(&&t);
        assert_eq!(value(&cache, "x"), Some(1));

        let b = history.push();
        settler.settle(Outcome::Succeeded);
        assert_eq!(cache.current_entry(), b);
        assert_eq!(value(&cache, "x"), Some(1));
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_transitioning());

        // A late call for the settled transition changes nothing either.
        cache.on_transition(&t);
        assert!(!cache.is_transitioning());
        assert_eq!(value(&cache, "x"), Some(1));
    }

    #[test_log::test]
    fn test_transition_ids_need_not_be_ordered() {
        let (cache, history) = cache_for_test(4);

        let (t, settler) = ManualTransition::new(9);
        cache.on_transition(&t);
        cache.set("k", 9);
        let b = history.push();
        settler.settle(Outcome::Succeeded);

        // A fresh attempt with a lower id is a new transition.
        let (t, settler) = ManualTransition::new(4);
        cache.on_transition(&t);
        assert!(cache.is_transitioning());
        assert_eq!(value(&cache, "k"), None);
        cache.set("k", 4);
        let c = history.push();
        settler.settle(Outcome::Succeeded);

        assert_eq!(cache.current_entry(), c);
        assert_eq!(cache.entry(&b).and_then(|s| s.get("k").map(|v| **v)), Some(9));
        assert_eq!(cache.entry(&c).and_then(|s| s.get("k").map(|v| **v)), Some(4));

        // Id 0 is as good as any other.
        let (t, settler) = ManualTransition::new(0);
        cache.on_transition(&t);
        assert!(cache.is_transitioning());
        drop(settler);
    }

    #[test_log::test]
    fn test_handled_transitions_are_bounded() {
        let (cache, history) = cache_for_test(4);

        for id in 0..HANDLED_TRANSITIONS as u64 + 1 {
            let (t, settler) = ManualTransition::new(id);
            cache.on_transition(&t);
            settler.settle(Outcome::Aborted);
        }
        assert_eq!(cache.inner.state.lock().handled.len(), HANDLED_TRANSITIONS);

        // The most recent ids are still recognized, the oldest one has been forgotten.
        let (t, _settler) = ManualTransition::new(HANDLED_TRANSITIONS as u64);
        cache.on_transition(&t);
        assert!(!cache.is_transitioning());

        let (t, settler) = ManualTransition::new(0);
        cache.on_transition(&t);
        assert!(cache.is_transitioning());
        history.push();
        settler.settle(Outcome::Succeeded);
        assert!(!cache.is_transitioning());
    }

    #[test_log::test]
    fn test_unsuccessful_transition_discards_pending_store() {
        let (cache, history) = cache_for_test(4);
        let a = history.current_entry();
        cache.set("x", 1);

        for (id, outcome) in [(1, Outcome::Failed), (2, Outcome::Aborted)] {
            let (t, settler) = ManualTransition::new(id);
            cache.on_transition(&t);
            cache.set("x", 100);
            settler.settle(outcome);

            assert!(!cache.is_transitioning());
            assert_eq!(cache.current_entry(), a);
            assert_eq!(value(&cache, "x"), Some(1));
        }
    }

    #[test_log::test]
    fn test_already_settled_transition() {
        let (cache, history) = cache_for_test(4);
        let (t, settler) = ManualTransition::new(1);
        let b = history.push();
        settler.settle(Outcome::Succeeded);

        // A traversal-looking hook that settles synchronously on registration.
        cache.on_transition(&t);
        assert!(!cache.is_transitioning());
        assert_eq!(cache.current_entry(), b);
        assert!(cache.is_popped_state());
    }

    #[test_log::test]
    fn test_event_listener() {
        let recorder = Arc::new(Recorder::default());
        let history = Arc::new(InMemoryHistory::new());
        let cache: TestCache = NavigationCacheBuilder::<_, _, u64>::new(1)
            .with_name("test")
            .with_event_listener(recorder.clone())
            .build(history.clone())
            .unwrap();
        let a = history.current_entry();
        cache.set("k", 1);

        let (t, s) = ManualTransition::new(1);
        cache.on_transition(&t);
        let (t, s2) = ManualTransition::new(2);
        cache.on_transition(&t);
        drop(s);
        let b = history.push();
        s2.settle(Outcome::Succeeded);

        history.back();
        let (t, s) = ManualTransition::new(3);
        cache.on_transition(&t);
        s.settle(Outcome::Succeeded);

        cache.clear();

        assert_eq!(
            *recorder.0.lock(),
            vec![(Event::Discard, a), (Event::Evict, a), (Event::Evict, b), (Event::Clear, a)]
        );
    }

    #[test_log::test]
    fn test_clear() {
        let (cache, history) = cache_for_test(4);
        cache.set("k", 1);
        let (t, settler) = ManualTransition::new(1);
        cache.on_transition(&t);
        cache.set("k", 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.is_transitioning());
        assert_eq!(value(&cache, "k"), None);

        let b = history.push();
        settler.settle(Outcome::Succeeded);
        assert!(cache.is_empty());
        assert_ne!(cache.current_entry(), b);
    }

    #[test]
    fn test_builder() {
        let history = InMemoryHistory::new();
        let res = NavigationCacheBuilder::<String, u64, u64>::new(0).build(history);
        assert!(matches!(res, Err(Error::ConfigError(_))));

        let config: NavigationCacheConfig = serde_json::from_str(r#"{ "capacity": 5 }"#).unwrap();
        let cache = NavigationCacheBuilder::<String, u64, u64>::new(1)
            .with_config(config)
            .with_name("config")
            .build(InMemoryHistory::new())
            .unwrap();
        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.name(), "config");
        assert_eq!(NavigationCacheConfig::default().capacity, DEFAULT_CAPACITY);
    }
}
