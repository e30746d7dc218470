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

//! Collaborators the navigation cache expects from its host environment.

use std::sync::Arc;

use navstore_common::code::EntryId;

/// The host's navigation history.
///
/// The identifier of a forward navigation must not be revealed until its transition is confirmed, while a
/// back/forward traversal reveals the target identifier immediately.
pub trait History: Send + Sync + 'static {
    /// Opaque identifier of a history entry.
    type Id: EntryId;

    /// Identifier of the entry the host is currently on. Must be readable synchronously at any time.
    fn current_entry(&self) -> Self::Id;
}

impl<H> History for Arc<H>
where
    H: History,
{
    type Id = H::Id;

    fn current_entry(&self) -> Self::Id {
        self.as_ref().current_entry()
    }
}

/// How a transition settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The transition completed and the destination is rendered.
    Succeeded,
    /// The transition was rejected, e.g. a model hook failed.
    Failed,
    /// The transition was abandoned or superseded before it completed.
    Aborted,
}

impl Outcome {
    /// Only succeeded transitions commit their pending store.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Callback run once when a transition settles.
pub type SettleCallback = Box<dyn FnOnce(Outcome) + Send + 'static>;

/// One attempted navigation, as seen by the navigation cache.
pub trait Transition {
    /// Token identifying the attempt. Distinct attempts carry distinct ids, in no particular order.
    ///
    /// Repeated hook calls for the same attempt carry the same id.
    fn id(&self) -> u64;

    /// Register `callback` to run once when the transition settles, whatever the outcome.
    ///
    /// The callback may run synchronously if the transition has already settled.
    fn on_settle(&self, callback: SettleCallback);
}

impl<T> Transition for &T
where
    T: Transition + ?Sized,
{
    fn id(&self) -> u64 {
        (**self).id()
    }

    fn on_settle(&self, callback: SettleCallback) {
        (**self).on_settle(callback)
    }
}

/// How the cache classified a transition when its hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// The history identifier is unchanged: an ordinary link or programmatic navigation.
    Forward,
    /// The history identifier already changed: a native back/forward traversal.
    Traversal,
}
