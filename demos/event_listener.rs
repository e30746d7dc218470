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


use std::sync::Arc;

use navstore::{Event, EventListener, InMemoryHistory, ManualTransition, NavigationCacheBuilder, Outcome};

struct EchoEventListener;

impl EventListener for EchoEventListener {
    type Id = u64;

    fn on_leave(&self, reason: Event, id: &u64) {
        println!("State of entry {id} left the cache: {reason:?}");
    }
}

/// Output:
///
/// ```plain
/// State of entry 1 left the cache: Evict
/// State of entry 2 left the cache: Discard
/// State of entry 2 left the cache: Evict
/// State of entry 3 left the cache: Clear
/// ```
fn main() {
    let history = Arc::new(InMemoryHistory::new());
    let cache = NavigationCacheBuilder::new(1)
        .with_event_listener(Arc::new(EchoEventListener))
        .build(history.clone())
        .unwrap();

    cache.set("title", "Home".to_string());

    let (transition, settler) = ManualTransition::new(1);
    cache.on_transition(&transition);
    cache.set("title", "News".to_string());
    history.push();
    settler.settle(Outcome::Succeeded);

    let (transition, settler) = ManualTransition::new(2);
    cache.on_transition(&transition);
    settler.settle(Outcome::Aborted);

    let (transition, settler) = ManualTransition::new(3);
    cache.on_transition(&transition);
    history.push();
    settler.settle(Outcome::Succeeded);

    cache.clear();
}
