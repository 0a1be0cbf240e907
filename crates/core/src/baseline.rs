// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use alluvia_domain::{EconomicParams, Project, ProjectData, ProjectSettings};

/// The form-edited sections of a project, excluding samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Sections {
    pub project: Project,
    pub total_block_area: f64,
    pub economic_params: EconomicParams,
    pub settings: ProjectSettings,
}

impl Sections {
    /// Copies the sections out of a full payload.
    #[must_use]
    pub fn from_data(data: &ProjectData) -> Self {
        Self {
            project: data.project.clone(),
            total_block_area: data.total_block_area,
            economic_params: data.economic_params.clone(),
            settings: data.settings.clone(),
        }
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::from_data(&ProjectData::default())
    }
}

/// Tracks whether the live sections have been touched since the last
/// successful save.
///
/// The tracker never compares values. Every wrapped setter marks the state
/// dirty, even when it writes the value already present.
#[derive(Debug, Clone)]
pub struct DirtyTracker {
    baseline: Sections,
    dirty: bool,
}

impl DirtyTracker {
    /// Creates a clean tracker with `baseline` as the persisted state.
    #[must_use]
    pub const fn new(baseline: Sections) -> Self {
        Self {
            baseline,
            dirty: false,
        }
    }

    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The last state known to be persisted.
    #[must_use]
    pub const fn baseline(&self) -> &Sections {
        &self.baseline
    }

    /// Copies the live values into the baseline and clears the dirty flag.
    pub fn update_baseline(&mut self, live: &Sections) {
        self.baseline = live.clone();
        self.dirty = false;
    }

    /// Overwrites the live values with the baseline and clears the dirty flag.
    pub fn discard(&mut self, live: &mut Sections) {
        *live = self.baseline.clone();
        self.dirty = false;
    }
}
