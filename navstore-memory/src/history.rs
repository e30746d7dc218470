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

use parking_lot::RwLock;

use crate::host::History;

#[derive(Debug)]
struct Stack {
    entries: Vec<u64>,
    index: usize,
    next: u64,
}

impl Stack {
    fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// An in-memory navigation history stack, behaving like a browser tab's session history.
///
/// Every entry is identified by a `u64` that is never reused. Pushing truncates the entries ahead of the current
/// one, traversals move the cursor and reveal the target identifier immediately.
#[derive(Debug)]
pub struct InMemoryHistory {
    stack: RwLock<Stack>,
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistory {
    /// Create a history holding a single initial entry.
    pub fn new() -> Self {
        let mut stack = Stack {
            entries: vec![],
            index: 0,
            next: 1,
        };
        let id = stack.allocate();
        stack.entries.push(id);
        Self {
            stack: RwLock::new(stack),
        }
    }

    /// Push a new entry after the current one, dropping the entries ahead. Returns the new identifier.
    pub fn push(&self) -> u64 {
        let mut stack = self.stack.write();
        let id = stack.allocate();
        let len = stack.index + 1;
        stack.entries.truncate(len);
        stack.entries.push(id);
        stack.index += 1;
        id
    }

    /// Replace the current entry with a new one. Returns the new identifier.
    pub fn replace(&self) -> u64 {
        let mut stack = self.stack.write();
        let id = stack.allocate();
        let index = stack.index;
        stack.entries[index] = id;
        id
    }

    /// Move one entry back. Returns the revealed identifier, or `None` on the first entry.
    pub fn back(&self) -> Option<u64> {
        self.go(-1)
    }

    /// Move one entry forward. Returns the revealed identifier, or `None` on the last entry.
    pub fn forward(&self) -> Option<u64> {
        self.go(1)
    }

    /// Move `delta` entries through the history. Returns the revealed identifier, or `None` if out of range.
    pub fn go(&self, delta: isize) -> Option<u64> {
        let mut stack = self.stack.write();
        let index = stack.index.checked_add_signed(delta)?;
        let id = *stack.entries.get(index)?;
        stack.index = index;
        Some(id)
    }

    /// Count of entries in the stack.
    pub fn len(&self) -> usize {
        self.stack.read().entries.len()
    }

    /// Always false: the history holds at least the initial entry.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl History for InMemoryHistory {
    type Id = u64;

    fn current_entry(&self) -> u64 {
        let stack = self.stack.read();
        stack.entries[stack.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_history() {
        let history = InMemoryHistory::new();
        let a = history.current_entry();
        assert_eq!(history.back(), None);

        let b = history.push();
        let c = history.push();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(history.len(), 3);

        assert_eq!(history.back(), Some(b));
        assert_eq!(history.back(), Some(a));
        assert_eq!(history.forward(), Some(b));
        assert_eq!(history.go(1), Some(c));
        assert_eq!(history.forward(), None);
        assert_eq!(history.current_entry(), c);

        // Pushing from the middle of the stack drops the entries ahead.
        assert_eq!(history.go(-2), Some(a));
        let d = history.push();
        assert_eq!(history.len(), 2);
        assert_eq!(history.forward(), None);
        assert_eq!(history.back(), Some(a));

        let e = history.replace();
        assert_ne!(e, a);
        assert_eq!(history.current_entry(), e);
        assert_eq!(history.forward(), Some(d));
    }
}
