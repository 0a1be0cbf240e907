// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Distribution of per-sample grades.
//!
//! A sample's grade is its carats divided by its own gravel volume
//! (area × gravel depth). These functions feed the histogram, grade-tonnage
//! and box-plot views and, like the reserve calculations, hold no state.

use crate::types::Sample;
use serde::{Deserialize, Serialize};

/// Number of histogram bins used by [`grade_statistics`].
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Volumes at or below this are treated as empty.
const MIN_SAMPLE_VOLUME: f64 = 0.000_001;

/// Spreads narrower than this collapse into a single bin.
const MIN_GRADE_SPREAD: f64 = 0.0001;

/// One bar of the grade histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// One point of the cumulative grade curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub grade: f64,
    /// Share of samples at or below this grade, in percent.
    pub cumulative_percent: f64,
}

/// Five-number summary of the grades.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Everything the statistics view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStatistics {
    pub grades: Vec<f64>,
    pub histogram: Vec<HistogramBin>,
    pub grade_tonnage: Vec<CurvePoint>,
    pub box_stats: BoxStats,
}

/// Computes each sample's grade in collection order.
///
/// Samples with no gravel volume grade as 0. Non-finite and negative grades
/// are dropped.
#[must_use]
pub fn sample_grades(samples: &[Sample]) -> Vec<f64> {
    samples
        .iter()
        .map(|sample| {
            let volume: f64 = sample.area * sample.gravel_depth;
            if volume > MIN_SAMPLE_VOLUME {
                sample.carats / volume
            } else {
                0.0
            }
        })
        .filter(|grade| grade.is_finite() && *grade >= 0.0)
        .collect()
}

fn sorted(grades: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = grades.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Buckets grades into equal-width bins between the minimum and maximum.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn grade_histogram(grades: &[f64], bins: usize) -> Vec<HistogramBin> {
    if grades.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min: f64 = grades.iter().copied().fold(f64::INFINITY, f64::min);
    let max: f64 = grades.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < MIN_GRADE_SPREAD {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: grades.len(),
        }];
    }

    let bin_size: f64 = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| {
            let start: f64 = (i as f64).mul_add(bin_size, min);
            HistogramBin {
                start,
                end: start + bin_size,
                count: 0,
            }
        })
        .collect();

    for grade in grades {
        // The maximum grade falls exactly on the upper edge; keep it in the last bin.
        let index: usize = (((grade - min) / bin_size).floor().max(0.0) as usize).min(bins - 1);
        histogram[index].count += 1;
    }

    histogram
}

/// Sorts grades ascending and pairs each with its cumulative percentage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grade_tonnage_curve(grades: &[f64]) -> Vec<CurvePoint> {
    let sorted: Vec<f64> = sorted(grades);
    let total: f64 = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, grade)| CurvePoint {
            grade: *grade,
            cumulative_percent: (i + 1) as f64 / total * 100.0,
        })
        .collect()
}

/// Computes min, quartiles and max using floor-index quantiles.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn grade_box_stats(grades: &[f64]) -> BoxStats {
    let sorted: Vec<f64> = sorted(grades);
    let (Some(min), Some(max)) = (sorted.first(), sorted.last()) else {
        return BoxStats::default();
    };
    let quantile = |p: f64| -> f64 {
        let index: usize = (sorted.len() as f64 * p).floor() as usize;
        sorted.get(index).copied().unwrap_or(0.0)
    };

    BoxStats {
        min: *min,
        q1: quantile(0.25),
        median: quantile(0.5),
        q3: quantile(0.75),
        max: *max,
    }
}

/// Computes the full grade statistics bundle for a sample collection.
#[must_use]
pub fn grade_statistics(samples: &[Sample]) -> GradeStatistics {
    let grades: Vec<f64> = sample_grades(samples);
    GradeStatistics {
        histogram: grade_histogram(&grades, DEFAULT_HISTOGRAM_BINS),
        grade_tonnage: grade_tonnage_curve(&grades),
        box_stats: grade_box_stats(&grades),
        grades,
    }
}
