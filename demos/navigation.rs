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


//! A simulated browsing session: scroll positions survive back/forward navigation, new pages start empty.
//!
//! Run with `RUST_LOG=navstore_memory=debug` to watch the transitions.

use std::sync::Arc;

use navstore::{spawn_settle, History, InMemoryHistory, NavigationCacheBuilder, Outcome, TransitionSequencer};

#[tokio::main]
async fn main() {
    {
        use tracing_subscriber::{prelude::*, EnvFilter};

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_line_number(true))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let history = Arc::new(InMemoryHistory::new());
    let cache = NavigationCacheBuilder::new(16)
        .with_name("demo")
        .build(history.clone())
        .unwrap();
    let router = TransitionSequencer::new();

    cache.set("scroll", 480u32);
    println!("[{}] home, scroll = {:?}", history.current_entry(), cache.get("scroll"));

    // Follow a link. The route resolves after loading its data.
    let (transition, settler) = router.begin();
    cache.on_transition(&transition);
    let h = history.clone();
    spawn_settle(settler, async move {
        tokio::task::yield_now().await;
        h.push();
        Outcome::Succeeded
    })
    .await
    .unwrap();
    println!(
        "[{}] article, scroll = {:?}, popped = {}",
        history.current_entry(),
        cache.get("scroll"),
        cache.is_popped_state()
    );
    cache.set("scroll", 1200);

    // Press back.
    history.back();
    let (transition, settler) = router.begin();
    cache.on_transition(&transition);
    spawn_settle(settler, async { Outcome::Succeeded }).await.unwrap();
    println!(
        "[{}] home again, scroll = {:?}, popped = {}",
        history.current_entry(),
        cache.get("scroll"),
        cache.is_popped_state()
    );

    // Press forward, but the route guard rejects the navigation.
    history.forward();
    let (transition, settler) = router.begin();
    cache.on_transition(&transition);
    cache.set("scroll", 0);
    spawn_settle(settler, async { Outcome::Failed }).await.unwrap();
    println!(
        "rejected forward, article scroll is still {:?}",
        cache.entry(&history.current_entry()).and_then(|s| s.get("scroll").cloned())
    );

    println!("{cache:?}");
}
