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

//! Navigation-scoped state cache for single-page applications.
//!
//! The cache keeps small, transient UI state (scroll positions, "last viewed" markers, ...) per navigation history
//! entry, restores it when the user comes back with the browser's back/forward controls, and bounds the retained
//! state to the most recently touched entries.
//!
//! The host integrates through two collaborators: a [`History`] exposing the identifier of the current history
//! entry, and a [`Transition`] per navigation attempt that reports when it settles.

mod cache;
mod history;
mod host;
mod store;
mod table;
mod transition;

mod prelude;
pub use prelude::*;
