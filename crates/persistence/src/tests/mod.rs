// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

mod error_mapping_tests;

use alluvia_domain::{Project, ProjectData};

pub fn create_test_data(name: &str) -> ProjectData {
    ProjectData {
        project: Project {
            project_name: name.to_string(),
            ..Project::default()
        },
        ..ProjectData::default()
    }
}
