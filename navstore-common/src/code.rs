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

use std::{fmt::Debug, hash::Hash};

/// Key trait for the entry store.
pub trait Key: Send + Sync + 'static + Hash + Eq {}
impl<T: Send + Sync + 'static + Hash + Eq> Key for T {}

/// Value trait for the entry store.
///
/// Values are opaque to the cache and are shared by reference counting, so no `Clone` bound is required.
pub trait Value: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Value for T {}

/// Identifier of one position in the host navigation history.
///
/// The identifier is assigned by the host, never by the cache. Two different positions never share an identifier,
/// and revisiting a position yields the identifier it had before.
pub trait EntryId: Key + Clone + Debug {}
impl<T: Key + Clone + Debug> EntryId for T {}
