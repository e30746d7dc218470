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

//! navstore - navigation-scoped state cache for single-page applications.
//!
//! Application code stashes small pieces of per-entry state (scroll positions, "last viewed" markers, ...) in a
//! [`NavigationCache`]. The host router calls [`NavigationCache::on_transition`] at the start of every navigation
//! attempt; the cache isolates writes made while the attempt is in flight, restores previously committed state when
//! the user comes back with the browser's back/forward controls, and keeps only the most recently touched entries.
//!
//! ```
//! use std::sync::Arc;
//!
//! use navstore::{InMemoryHistory, NavigationCacheBuilder, Outcome, TransitionSequencer};
//!
//! let history = Arc::new(InMemoryHistory::new());
//! let cache = NavigationCacheBuilder::<&str, u64, u64>::new(100)
//!     .build(history.clone())
//!     .unwrap();
//! let sequencer = TransitionSequencer::new();
//!
//! cache.set("scroll", 120);
//!
//! // Follow a link.
//! let (transition, settler) = sequencer.begin();
//! cache.on_transition(&transition);
//! history.push();
//! settler.settle(Outcome::Succeeded);
//! assert_eq!(cache.get("scroll"), None);
//!
//! // Press the browser's back button.
//! history.back();
//! let (transition, settler) = sequencer.begin();
//! cache.on_transition(&transition);
//! settler.settle(Outcome::Succeeded);
//! assert_eq!(cache.get("scroll").map(|v| *v), Some(120));
//! assert!(cache.is_popped_state());
//! ```

mod prelude;
mod settle;

pub use prelude::*;
