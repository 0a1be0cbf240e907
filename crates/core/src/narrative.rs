// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use alluvia_domain::{CalculatedReserves, FinancialResult, ProjectData};
use async_trait::async_trait;
use serde::Serialize;

/// Everything a narrative generator is given about a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub data: ProjectData,
    pub reserves: CalculatedReserves,
    pub financials: FinancialResult,
}

/// Failure reported by a narrative generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrativeError {
    #[error("Narrative service unavailable: {0}")]
    Unavailable(String),
    #[error("Narrative generation failed: {0}")]
    Failed(String),
}

/// Produces free-text prose about a project.
///
/// The response is opaque; the workspace never parses it.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &ReportRequest) -> Result<String, NarrativeError>;
}
