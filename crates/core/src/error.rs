// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::gateway::GatewayError;
use crate::narrative::NarrativeError;
use alluvia_domain::{DomainError, ProjectId, SampleId};

/// Errors returned by workspace operations.
///
/// Validation failures are not errors; they are reported through the
/// workspace's validation error map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceError {
    /// The persistence gateway failed. Live state is unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    Domain(#[from] DomainError),
    /// No payload is stored under the identifier.
    #[error("Project '{0}' not found")]
    ProjectNotFound(ProjectId),
    /// The live sample collection has no sample with the identifier.
    #[error("Sample {0} not found")]
    SampleNotFound(SampleId),
    /// A sample collection used the same identifier twice.
    #[error("Sample id {0} is used more than once")]
    DuplicateSampleId(SampleId),
    #[error(transparent)]
    Narrative(#[from] NarrativeError),
}
