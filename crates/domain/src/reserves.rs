// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reserve estimation from field samples.
//!
//! Every figure here is a pure function of the sample collection, the total
//! block area and the project's swell and dilution factors. Nothing is cached:
//! callers recompute whenever they need a fresh view.
//!
//! Every ratio is guarded so that a zero (or negative) denominator yields 0
//! rather than `NaN` or infinity.

use crate::types::{Project, Sample};
use serde::{Deserialize, Serialize};

/// Totals and ratios taken directly from the samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectingSummary {
    /// Sum of sampled areas.
    pub total_pit_area: f64,
    /// Arithmetic mean of sterile depths.
    pub avg_sterile_depth: f64,
    /// Arithmetic mean of gravel depths.
    pub avg_gravel_depth: f64,
    pub total_stones: f64,
    pub total_carats: f64,
    /// Stones per unit of sampled area.
    pub stones_per_sqm: f64,
    /// Carats per stone.
    pub avg_stone_size: f64,
}

/// Reserves projected onto the whole block before mining losses and gains.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InSituReserves {
    pub sterile_volume: f64,
    pub gravel_volume: f64,
    pub estimated_carats: f64,
    pub carats_per_sqm: f64,
    /// In-situ grade.
    pub carats_per_cbm: f64,
    pub estimated_stones: f64,
}

/// Reserves after applying swell and dilution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwelledReserves {
    pub swelled_sterile_volume: f64,
    pub swelled_gravel_volume: f64,
    /// Diluted grade delivered to the plant.
    pub avg_grade: f64,
    /// Sterile volume moved per gravel volume processed.
    pub strip_ratio: f64,
}

/// All derived reserve figures for one project state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedReserves {
    pub prospecting_data: ProspectingSummary,
    pub in_situ_reserves: InSituReserves,
    pub swelled_and_diluted_reserves: SwelledReserves,
}

/// Divides, resolving a non-positive denominator to 0.
pub(crate) fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Computes the reserve estimate for a block.
///
/// # Arguments
///
/// * `samples` - The sample collection
/// * `total_block_area` - The area the sample averages are projected onto
/// * `project` - Supplies the swell and dilution factors
///
/// # Returns
///
/// All-zero reserves when `samples` is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calculate_reserves(
    samples: &[Sample],
    total_block_area: f64,
    project: &Project,
) -> CalculatedReserves {
    if samples.is_empty() {
        return CalculatedReserves::default();
    }

    let sample_count: f64 = samples.len() as f64;
    let total_pit_area: f64 = samples.iter().map(|s| s.area).sum();
    let total_sterile_depth: f64 = samples.iter().map(|s| s.sterile_depth).sum();
    let total_gravel_depth: f64 = samples.iter().map(|s| s.gravel_depth).sum();
    let total_stones: f64 = samples.iter().map(|s| s.stones).sum();
    let total_carats: f64 = samples.iter().map(|s| s.carats).sum();

    let avg_sterile_depth: f64 = total_sterile_depth / sample_count;
    let avg_gravel_depth: f64 = total_gravel_depth / sample_count;

    // In-situ
    let sterile_volume: f64 = avg_sterile_depth * total_block_area;
    let gravel_volume: f64 = avg_gravel_depth * total_block_area;
    let estimated_carats: f64 = guarded_ratio(total_carats * total_block_area, total_pit_area);
    let estimated_stones: f64 = guarded_ratio(total_stones * total_block_area, total_pit_area);

    // Dilution is an additive thickness term expressed in hundredths of a depth unit.
    let dilution_thickness: f64 = project.dilution_factor / 100.0;
    let swelled_sterile_volume: f64 = sterile_volume * project.swell_factor_sterile;
    let swelled_gravel_volume: f64 =
        (dilution_thickness + avg_gravel_depth) * project.swell_factor_gravel * total_block_area;

    CalculatedReserves {
        prospecting_data: ProspectingSummary {
            total_pit_area,
            avg_sterile_depth,
            avg_gravel_depth,
            total_stones,
            total_carats,
            stones_per_sqm: guarded_ratio(total_stones, total_pit_area),
            avg_stone_size: guarded_ratio(total_carats, total_stones),
        },
        in_situ_reserves: InSituReserves {
            sterile_volume,
            gravel_volume,
            estimated_carats,
            carats_per_sqm: guarded_ratio(estimated_carats, total_block_area),
            carats_per_cbm: guarded_ratio(estimated_carats, gravel_volume),
            estimated_stones,
        },
        swelled_and_diluted_reserves: SwelledReserves {
            swelled_sterile_volume,
            swelled_gravel_volume,
            avg_grade: guarded_ratio(estimated_carats, swelled_gravel_volume),
            strip_ratio: guarded_ratio(swelled_sterile_volume, swelled_gravel_volume),
        },
    }
}
