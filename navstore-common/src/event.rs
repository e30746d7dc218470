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

use crate::code::EntryId;

/// Event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Durable entry evicted because the table exceeded its capacity.
    Evict,
    /// Durable entry replaced by a committed pending store.
    Replace,
    /// Durable entry dropped by clearing the cache.
    Clear,
    /// Pending store dropped without being committed.
    ///
    /// Raised when its transition fails, is aborted, or is superseded by a newer transition.
    Discard,
}

/// Trait for the customized event listener.
pub trait EventListener: Send + Sync + 'static {
    /// Associated entry identifier type.
    type Id: EntryId;

    /// Called when an entry store leaves the cache with the reason.
    ///
    /// For [`Event::Discard`], `id` is the cache's current entry at the moment the pending store was dropped.
    ///
    /// The listener is called outside of the cache's internal lock, so it may call back into the cache.
    #[expect(unused_variables)]
    fn on_leave(&self, reason: Event, id: &Self::Id) {}
}
