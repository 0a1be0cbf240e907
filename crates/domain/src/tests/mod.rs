// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]


use crate::{Project, Sample};
use time::macros::date;

/// Asserts two floats agree to a relative tolerance.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    let tolerance: f64 = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

pub fn create_test_project() -> Project {
    Project {
        user_name: String::from("Admin"),
        block_id: String::from("B1"),
        project_name: String::from("Cuango North"),
        project_description: String::new(),
        date: date!(2026 - 01 - 15),
        swell_factor_sterile: 1.25,
        swell_factor_gravel: 1.15,
        dilution_factor: 10.0,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn create_test_sample(
    id: u64,
    sterile_depth: f64,
    gravel_depth: f64,
    area: f64,
    stones: f64,
    carats: f64,
) -> Sample {
    Sample {
        id,
        line: String::from("L1"),
        pit: format!("P{id}"),
        sterile_depth,
        gravel_depth,
        area,
        stones,
        carats,
    }
}

/// The two pits of the reference block.
pub fn create_reference_samples() -> Vec<Sample> {
    vec![
        create_test_sample(1, 1.5, 0.8, 10.0, 5.0, 2.5),
        create_test_sample(2, 1.8, 0.9, 10.0, 8.0, 4.1),
    ]
}
