// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use alluvia_domain::{ProjectData, ProjectId, ProjectListItem};
use async_trait::async_trait;

/// Failure reported by a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The store could not be reached or the operation did not complete.
    #[error("Persistence unavailable: {0}")]
    Unavailable(String),
    /// Stored data could not be decoded.
    #[error("Stored project data is corrupt: {0}")]
    Corrupt(String),
    /// The store refused the operation.
    #[error("Persistence rejected the operation: {0}")]
    Rejected(String),
}

/// Key-addressed asynchronous store for the project index and payloads.
///
/// Implementations are treated as atomic per key. The workspace is the only
/// caller and never issues two calls at once.
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// Lists the project index in creation order.
    async fn list_projects(&self) -> Result<Vec<ProjectListItem>, GatewayError>;

    /// Fetches the payload stored under `id`, if any.
    async fn get_project_data(&self, id: &ProjectId)
    -> Result<Option<ProjectData>, GatewayError>;

    /// Upserts the payload under `id`.
    ///
    /// The index entry's name must be rewritten from
    /// `data.project.project_name`.
    async fn save_project_data(
        &self,
        id: &ProjectId,
        data: &ProjectData,
    ) -> Result<ProjectData, GatewayError>;

    /// Stores `data` under a newly generated identifier and appends it to the
    /// index.
    async fn create_project(&self, data: &ProjectData) -> Result<ProjectListItem, GatewayError>;

    /// Removes the payload and index entry for `id`.
    async fn delete_project(&self, id: &ProjectId) -> Result<(), GatewayError>;

    /// Returns the project that was active when the last session ended.
    async fn last_active_project(&self) -> Result<Option<ProjectId>, GatewayError>;

    /// Records `id` as the active project for later sessions.
    async fn remember_active_project(&self, id: &ProjectId) -> Result<(), GatewayError>;
}
