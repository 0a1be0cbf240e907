// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Project, Sample, SampleField, SampleId};
use std::collections::BTreeMap;

/// Field-level error messages for one sample.
pub type SampleErrors = BTreeMap<SampleField, String>;

/// Sparse map of sample errors. A sample without an entry has no errors.
pub type ValidationErrors = BTreeMap<SampleId, SampleErrors>;

const REQUIRED_LINE: &str = "Line is required";
const REQUIRED_PIT: &str = "Pit is required";
const NEGATIVE: &str = "Cannot be negative";
const NOT_POSITIVE: &str = "Must be positive";

/// NaN is treated as negative.
fn is_negative(value: f64) -> bool {
    value.is_nan() || value < 0.0
}

/// Checks one sample against every field rule.
///
/// Rules are independent, so a sample can fail several at once:
/// - line and pit labels must not be blank after trimming
/// - depths, stone count and carats must not be negative
/// - area must be strictly positive
///
/// # Returns
///
/// An empty map when the sample is valid.
#[must_use]
pub fn validate_sample(sample: &Sample) -> SampleErrors {
    let mut errors: SampleErrors = SampleErrors::new();

    if sample.line.trim().is_empty() {
        errors.insert(SampleField::Line, String::from(REQUIRED_LINE));
    }
    if sample.pit.trim().is_empty() {
        errors.insert(SampleField::Pit, String::from(REQUIRED_PIT));
    }
    if is_negative(sample.sterile_depth) {
        errors.insert(SampleField::SterileDepth, String::from(NEGATIVE));
    }
    if is_negative(sample.gravel_depth) {
        errors.insert(SampleField::GravelDepth, String::from(NEGATIVE));
    }
    // Zero area is invalid, unlike the other measurements.
    if sample.area.is_nan() || sample.area <= 0.0 {
        errors.insert(SampleField::Area, String::from(NOT_POSITIVE));
    }
    if is_negative(sample.stones) {
        errors.insert(SampleField::Stones, String::from(NEGATIVE));
    }
    if is_negative(sample.carats) {
        errors.insert(SampleField::Carats, String::from(NEGATIVE));
    }

    errors
}

/// Validates a sample collection.
///
/// This function is pure and synchronous. An empty result means every
/// sample passed.
#[must_use]
pub fn validate_samples(samples: &[Sample]) -> ValidationErrors {
    samples
        .iter()
        .filter_map(|sample| {
            let errors: SampleErrors = validate_sample(sample);
            (!errors.is_empty()).then_some((sample.id, errors))
        })
        .collect()
}

/// Removes a single field error, dropping the sample entry once it is empty.
///
/// # Returns
///
/// `true` if an error was removed.
pub fn clear_field_error(
    errors: &mut ValidationErrors,
    sample_id: SampleId,
    field: SampleField,
) -> bool {
    let Some(sample_errors) = errors.get_mut(&sample_id) else {
        return false;
    };
    let removed: bool = sample_errors.remove(&field).is_some();
    if sample_errors.is_empty() {
        errors.remove(&sample_id);
    }
    removed
}

/// Checks the project's swell and dilution factors.
///
/// # Errors
///
/// Returns `DomainError::NegativeFactor` naming the first factor that is
/// negative or NaN.
pub fn validate_project(project: &Project) -> Result<(), DomainError> {
    let factors: [(&'static str, f64); 3] = [
        ("swellFactorSterile", project.swell_factor_sterile),
        ("swellFactorGravel", project.swell_factor_gravel),
        ("dilutionFactor", project.dilution_factor),
    ];
    factors
        .into_iter()
        .find(|(_, value)| is_negative(*value))
        .map_or(Ok(()), |(name, _)| Err(DomainError::NegativeFactor(name)))
}
