// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Tunables for a [`crate::Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Maximum number of sample snapshots kept for undo.
    pub history_limit: usize,
}

impl WorkspaceConfig {
    #[must_use]
    pub const fn new(history_limit: usize) -> Self {
        Self { history_limit }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
