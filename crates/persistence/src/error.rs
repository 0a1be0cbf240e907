// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use alluvia::GatewayError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A write violated a table constraint.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation
                | diesel::result::DatabaseErrorKind::NotNullViolation
                | diesel::result::DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<PersistenceError> for GatewayError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::SerializationError(_) => Self::Corrupt(err.to_string()),
            PersistenceError::ConstraintViolation(_) => Self::Rejected(err.to_string()),
            PersistenceError::DatabaseError(_)
            | PersistenceError::DatabaseConnectionFailed(_)
            | PersistenceError::MigrationFailed(_)
            | PersistenceError::QueryFailed(_)
            | PersistenceError::InitializationError(_) => Self::Unavailable(err.to_string()),
        }
    }
}
