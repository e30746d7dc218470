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

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};

use navstore_memory::{ManualTransition, Outcome, Settler};
use tokio::task::JoinHandle;

/// Settle a transition with the outcome of `future`, driven by a task on the current tokio runtime.
///
/// If the future panics or the task is aborted, the settler is dropped and the transition settles as
/// [`Outcome::Aborted`].
///
/// # Panics
///
/// Panics if called outside of a tokio runtime.
pub fn spawn_settle<F>(settler: Settler, future: F) -> JoinHandle<Outcome>
where
    F: Future<Output = Outcome> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = future.await;
        tracing::trace!(?outcome, "[settle]: transition future resolved");
        settler.settle(outcome);
        outcome
    })
}

/// Hands out [`ManualTransition`]s with unique ids, for hosts whose router does not identify its navigation
/// attempts.
#[derive(Debug)]
pub struct TransitionSequencer {
    next: AtomicU64,
}

impl Default for TransitionSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionSequencer {
    /// Create a sequencer starting at 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Begin a new navigation attempt.
    pub fn begin(&self) -> (ManualTransition, Settler) {
        ManualTransition::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
