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

mod baseline;
mod comparison;
mod config;
mod editing;
mod error;
mod gateway;
mod history;
mod narrative;
mod workspace;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use baseline::{DirtyTracker, Sections};
pub use comparison::ProjectComparison;
pub use config::WorkspaceConfig;
pub use editing::{BulkEdit, BulkOperation};
pub use error::WorkspaceError;
pub use gateway::{GatewayError, ProjectGateway};
pub use history::{DEFAULT_HISTORY_LIMIT, HistoryStore};
pub use narrative::{NarrativeError, NarrativeGenerator, ReportRequest};
pub use workspace::{ActiveProject, Workspace};
