// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::reserves::CalculatedReserves;
use crate::types::EconomicParams;
use serde::{Deserialize, Serialize};

/// Economic outcome of mining the block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialResult {
    pub recovered_carats: f64,
    pub estimated_revenue: f64,
    pub total_cost: f64,
    pub estimated_profit: f64,
    /// True only for a strictly positive profit.
    pub is_viable: bool,
}

/// Computes revenue, cost and profit from a reserve estimate.
///
/// Revenue uses the in-situ carat estimate scaled by the recovery rate.
/// Costs use the swelled volumes: sterile removal, gravel haulage over the
/// transport distance, and gravel processing.
#[must_use]
pub fn calculate_financials(
    reserves: &CalculatedReserves,
    params: &EconomicParams,
) -> FinancialResult {
    let swelled = &reserves.swelled_and_diluted_reserves;

    let recovered_carats: f64 =
        reserves.in_situ_reserves.estimated_carats * (params.recovery_rate / 100.0);
    let estimated_revenue: f64 = recovered_carats * params.diamond_price;

    let removal_cost: f64 = swelled.swelled_sterile_volume * params.sterile_removal_cost;
    let transport_cost: f64 =
        swelled.swelled_gravel_volume * params.gravel_transport_cost * params.transport_distance;
    let processing_cost: f64 = swelled.swelled_gravel_volume * params.processing_cost;
    let total_cost: f64 = removal_cost + transport_cost + processing_cost;

    let estimated_profit: f64 = estimated_revenue - total_cost;

    FinancialResult {
        recovered_carats,
        estimated_revenue,
        total_cost,
        estimated_profit,
        is_viable: estimated_profit > 0.0,
    }
}
