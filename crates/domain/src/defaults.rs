// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hard-coded starting values for a new project.

use crate::types::{
    EconomicParams, Project, ProjectData, ProjectSettings, Sample, UnitSystem,
};
use time::OffsetDateTime;

/// Total block area of a new project.
pub const DEFAULT_TOTAL_BLOCK_AREA: f64 = 10_000.0;

/// Project name used for the project created on first start.
pub const FIRST_RUN_PROJECT_NAME: &str = "Default Project";

impl Default for Project {
    /// A new project dated today (UTC).
    fn default() -> Self {
        Self {
            user_name: String::from("Admin"),
            block_id: String::from("B1"),
            project_name: String::from("New Project"),
            project_description: String::new(),
            date: OffsetDateTime::now_utc().date(),
            swell_factor_sterile: 1.25,
            swell_factor_gravel: 1.15,
            dilution_factor: 10.0,
        }
    }
}

impl Default for EconomicParams {
    fn default() -> Self {
        Self {
            diamond_price: 450.0,
            sterile_removal_cost: 5.5,
            gravel_transport_cost: 1.2,
            processing_cost: 15.0,
            transport_distance: 10.0,
            recovery_rate: 95.0,
        }
    }
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            default_currency: String::from("USD"),
            unit_system: UnitSystem::Metric,
        }
    }
}

/// The two example samples every new project starts with.
#[must_use]
pub fn default_samples() -> Vec<Sample> {
    vec![
        Sample {
            id: 1,
            line: String::from("L1"),
            pit: String::from("P1"),
            sterile_depth: 1.5,
            gravel_depth: 0.8,
            area: 10.0,
            stones: 5.0,
            carats: 2.5,
        },
        Sample {
            id: 2,
            line: String::from("L1"),
            pit: String::from("P2"),
            sterile_depth: 1.8,
            gravel_depth: 0.9,
            area: 10.0,
            stones: 8.0,
            carats: 4.1,
        },
    ]
}

impl Default for ProjectData {
    fn default() -> Self {
        Self {
            project: Project::default(),
            total_block_area: DEFAULT_TOTAL_BLOCK_AREA,
            samples: default_samples(),
            economic_params: EconomicParams::default(),
            settings: ProjectSettings::default(),
        }
    }
}
