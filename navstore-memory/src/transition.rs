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

use std::{mem, sync::Arc};

use parking_lot::Mutex;

use crate::host::{Outcome, SettleCallback, Transition};

enum Slot {
    Waiting(Vec<SettleCallback>),
    Settled(Outcome),
}

/// A [`Transition`] settled explicitly through its [`Settler`].
#[derive(Clone)]
pub struct ManualTransition {
    id: u64,
    slot: Arc<Mutex<Slot>>,
}

impl std::fmt::Debug for ManualTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTransition")
            .field("id", &self.id)
            .field("outcome", &self.outcome())
            .finish()
    }
}

impl ManualTransition {
    /// Create a transition with the given attempt id and the handle that settles it.
    pub fn new(id: u64) -> (Self, Settler) {
        let slot = Arc::new(Mutex::new(Slot::Waiting(vec![])));
        let transition = Self {
            id,
            slot: slot.clone(),
        };
        let settler = Settler { slot, settled: false };
        (transition, settler)
    }

    /// The outcome, if the transition has settled.
    pub fn outcome(&self) -> Option<Outcome> {
        match &*self.slot.lock() {
            Slot::Waiting(_) => None,
            Slot::Settled(outcome) => Some(*outcome),
        }
    }
}

impl Transition for ManualTransition {
    fn id(&self) -> u64 {
        self.id
    }

    fn on_settle(&self, callback: SettleCallback) {
        let outcome = {
            let mut slot = self.slot.lock();
            match &mut *slot {
                Slot::Waiting(callbacks) => {
                    callbacks.push(callback);
                    return;
                }
                Slot::Settled(outcome) => *outcome,
            }
        };
        callback(outcome);
    }
}

/// Settles a [`ManualTransition`].
///
/// Dropping an unsettled settler settles its transition as [`Outcome::Aborted`].
#[must_use = "dropping the settler aborts the transition"]
pub struct Settler {
    slot: Arc<Mutex<Slot>>,
    settled: bool,
}

impl std::fmt::Debug for Settler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settler").field("settled", &self.settled).finish()
    }
}

impl Settler {
    /// Settle the transition, running every registered callback with `outcome`.
    pub fn settle(mut self, outcome: Outcome) {
        self.settle_inner(outcome);
    }

    fn settle_inner(&mut self, outcome: Outcome) {
        if mem::replace(&mut self.settled, true) {
            return;
        }
        let callbacks = match mem::replace(&mut *self.slot.lock(), Slot::Settled(outcome)) {
            Slot::Waiting(callbacks) => callbacks,
            Slot::Settled(_) => vec![],
        };
        // Callbacks run outside the lock, they may register more callbacks.
        for callback in callbacks {
            callback(outcome);
        }
    }
}

impl Drop for Settler {
    fn drop(&mut self) {
        self.settle_inner(Outcome::Aborted);
    }
}
