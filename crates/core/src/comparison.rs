// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use alluvia_domain::{
    CalculatedReserves, FinancialResult, ProjectData, ProjectId, ProjectListItem,
    calculate_financials, calculate_reserves,
};
use serde::Serialize;

/// Derived figures for one stored project, side by side with the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectComparison {
    pub id: ProjectId,
    pub name: String,
    pub reserves: CalculatedReserves,
    pub financials: FinancialResult,
}

impl ProjectComparison {
    /// Recomputes reserves and financials from a stored payload.
    #[must_use]
    pub fn from_stored(item: ProjectListItem, data: &ProjectData) -> Self {
        let reserves: CalculatedReserves =
            calculate_reserves(&data.samples, data.total_block_area, &data.project);
        let financials: FinancialResult = calculate_financials(&reserves, &data.economic_params);
        Self {
            id: item.id,
            name: item.name,
            reserves,
            financials,
        }
    }
}
