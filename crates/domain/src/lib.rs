// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod defaults;
mod error;
mod financials;
mod reserves;
mod statistics;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use defaults::{DEFAULT_TOTAL_BLOCK_AREA, FIRST_RUN_PROJECT_NAME, default_samples};
pub use error::DomainError;
pub use financials::{FinancialResult, calculate_financials};
pub use reserves::{
    CalculatedReserves, InSituReserves, ProspectingSummary, SwelledReserves, calculate_reserves,
};
pub use statistics::{
    BoxStats, CurvePoint, DEFAULT_HISTOGRAM_BINS, GradeStatistics, HistogramBin, grade_box_stats,
    grade_histogram, grade_statistics, grade_tonnage_curve, sample_grades,
};
pub use types::{
    EconomicParams, FieldValue, Project, ProjectData, ProjectId, ProjectListItem, ProjectSettings,
    Sample, SampleDraft, SampleField, SampleId, UnitSystem,
};
pub use validation::{
    SampleErrors, ValidationErrors, clear_field_error, validate_project, validate_sample,
    validate_samples,
};
