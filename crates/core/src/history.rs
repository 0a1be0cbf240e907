// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Linear undo/redo over immutable snapshots.
//!
//! The store keeps an ordered list of snapshots and a pointer to the current
//! one. Recording a new snapshot prunes everything after the pointer, so
//! history never branches. Recording a value structurally equal to the
//! current snapshot does nothing.

use tracing::debug;

/// Default number of snapshots retained by a [`HistoryStore`].
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Bounded linear history of values of type `T`.
#[derive(Debug, Clone)]
pub struct HistoryStore<T> {
    snapshots: Vec<T>,
    pointer: usize,
    limit: usize,
}

impl<T: Clone + PartialEq> HistoryStore<T> {
    /// Creates a history holding only `initial`, retaining at most
    /// [`DEFAULT_HISTORY_LIMIT`] snapshots.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a history holding only `initial`.
    ///
    /// # Arguments
    ///
    /// * `initial` - The first snapshot
    /// * `limit` - Maximum snapshots retained; values below 1 are raised to 1
    #[must_use]
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            snapshots: vec![initial],
            pointer: 0,
            limit: limit.max(1),
        }
    }

    /// Returns the snapshot at the pointer.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.snapshots[self.pointer]
    }

    /// Records a new snapshot.
    ///
    /// # Returns
    ///
    /// `false` when `value` equals the current snapshot and nothing was
    /// recorded.
    pub fn set(&mut self, value: T) -> bool {
        if *self.current() == value {
            return false;
        }

        self.snapshots.truncate(self.pointer + 1);
        self.snapshots.push(value);
        self.pointer += 1;

        if self.snapshots.len() > self.limit {
            let excess: usize = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
            self.pointer -= excess;
        }

        true
    }

    /// Resolves `updater` against the current snapshot and records the result.
    pub fn update<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let next: T = updater(self.current());
        self.set(next)
    }

    /// Moves the pointer back one snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.pointer -= 1;
        debug!(pointer = self.pointer, len = self.snapshots.len(), "History undo");
        true
    }

    /// Moves the pointer forward one snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.pointer += 1;
        debug!(pointer = self.pointer, len = self.snapshots.len(), "History redo");
        true
    }

    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    #[must_use]
    pub const fn can_redo(&self) -> bool {
        self.pointer + 1 < self.snapshots.len()
    }

    /// Replaces the whole history with a single snapshot.
    pub fn reset(&mut self, value: T) {
        self.snapshots.clear();
        self.snapshots.push(value);
        self.pointer = 0;
    }

    /// Number of snapshots currently retained.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// A history always holds at least one snapshot.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// All retained snapshots, oldest first.
    #[must_use]
    pub fn snapshots(&self) -> &[T] {
        &self.snapshots
    }
}
