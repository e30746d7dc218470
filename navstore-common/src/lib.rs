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

//! Shared components and utils for navstore.

/// Allow to enable debug assertions in release profile with feature "strict_assertion".
pub mod assert;
/// Traits for the keys, values and entry identifiers stored by the navigation cache.
pub mod code;
/// Error definitions for navstore.
pub mod error;
/// Event listener definitions.
pub mod event;
/// Metrics model and registries.
pub mod metrics;
