// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for alluvia projects.
//!
//! This crate implements the workspace's [`ProjectGateway`] on top of Diesel
//! and an embedded migration set.
//!
//! ## Storage Layout
//!
//! - `projects`: one row per project: the string identifier, the index
//!   name and the full JSON payload. Index order is insertion order.
//! - `session_state`: small key/value table holding the active project
//!   between sessions.
//!
//! The index name is always rewritten from the payload's project name, so the
//! two can never drift apart.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated shared in-memory databases
//! - File-backed databases are only exercised by the server at runtime

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
#![allow(clippy::multiple_crate_versions)]

use alluvia::{GatewayError, ProjectGateway};
use alluvia_domain::{ProjectData, ProjectId, ProjectListItem};
use async_trait::async_trait;
use diesel::{Connection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::{debug, info};

mod backend;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Session state key holding the active project identifier.
const ACTIVE_PROJECT_KEY: &str = "active_project";

/// Prefix of generated project identifiers.
const PROJECT_ID_PREFIX: &str = "proj_";

/// Project store backed by a single `SQLite` connection.
///
/// The connection sits behind an async mutex so the store can be shared with
/// the workspace across tasks. Every operation holds the lock for its full
/// duration.
pub struct SqliteProjectStore {
    conn: Mutex<SqliteConnection>,
}

impl SqliteProjectStore {
    /// Creates a store over a fresh in-memory database.
    ///
    /// Each call receives a unique shared in-memory database, so stores never
    /// see each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:alluvia_mem_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::open_project_database(&shared_memory_url)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates a store over a file-based database, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::open_project_database(path_str)?;
        backend::configure_file_database(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lists the project index in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_projects(&self) -> Result<Vec<ProjectListItem>, PersistenceError> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<queries::ProjectIndexRow> = queries::list_projects(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(|row| ProjectListItem {
                id: ProjectId::new(row.project_id),
                name: row.name,
            })
            .collect())
    }

    /// Retrieves and decodes a project payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored JSON cannot be
    /// decoded.
    pub async fn get_project_data(
        &self,
        id: &ProjectId,
    ) -> Result<Option<ProjectData>, PersistenceError> {
        let mut conn = self.conn.lock().await;
        let Some(payload) = queries::get_project_payload(&mut conn, id.value())? else {
            debug!(project_id = %id, "No stored payload");
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Stores a payload under `id`, creating the row if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub async fn save_project_data(
        &self,
        id: &ProjectId,
        data: &ProjectData,
    ) -> Result<ProjectData, PersistenceError> {
        let payload: String = serde_json::to_string(data)?;
        let now: String = timestamp()?;
        let mut conn = self.conn.lock().await;
        mutations::upsert_project(
            &mut conn,
            id.value(),
            &data.project.project_name,
            &payload,
            &now,
        )?;
        Ok(data.clone())
    }

    /// Stores a payload under a newly generated identifier.
    ///
    /// Identifiers are `proj_<unix millis>`, bumped until unused.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub async fn create_project(
        &self,
        data: &ProjectData,
    ) -> Result<ProjectListItem, PersistenceError> {
        let payload: String = serde_json::to_string(data)?;
        let now: String = timestamp()?;
        let mut millis: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let name: &str = &data.project.project_name;

        let mut conn = self.conn.lock().await;
        let project_id: String = conn.immediate_transaction(|conn| {
            let mut candidate: String = format!("{PROJECT_ID_PREFIX}{millis}");
            while queries::project_exists(conn, &candidate)? {
                millis += 1;
                candidate = format!("{PROJECT_ID_PREFIX}{millis}");
            }
            mutations::insert_project(conn, &candidate, name, &payload, &now)?;
            Ok::<String, PersistenceError>(candidate)
        })?;

        info!(project_id = %project_id, name, "Created project");
        Ok(ProjectListItem {
            id: ProjectId::new(project_id),
            name: name.to_string(),
        })
    }

    /// Removes a project. Removing an unknown project is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_project(&self, id: &ProjectId) -> Result<(), PersistenceError> {
        let mut conn = self.conn.lock().await;
        mutations::delete_project(&mut conn, id.value())?;
        Ok(())
    }

    /// Returns the project recorded as active, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn last_active_project(&self) -> Result<Option<ProjectId>, PersistenceError> {
        let mut conn = self.conn.lock().await;
        Ok(queries::get_session_value(&mut conn, ACTIVE_PROJECT_KEY)?.map(ProjectId::new))
    }

    /// Records `id` as the active project.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn remember_active_project(&self, id: &ProjectId) -> Result<(), PersistenceError> {
        let mut conn = self.conn.lock().await;
        mutations::set_session_value(&mut conn, ACTIVE_PROJECT_KEY, id.value())
    }
}

/// Formats the current UTC time for the timestamp columns.
fn timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

#[async_trait]
impl ProjectGateway for SqliteProjectStore {
    async fn list_projects(&self) -> Result<Vec<ProjectListItem>, GatewayError> {
        Ok(Self::list_projects(self).await?)
    }

    async fn get_project_data(
        &self,
        id: &ProjectId,
    ) -> Result<Option<ProjectData>, GatewayError> {
        Ok(Self::get_project_data(self, id).await?)
    }

    async fn save_project_data(
        &self,
        id: &ProjectId,
        data: &ProjectData,
    ) -> Result<ProjectData, GatewayError> {
        Ok(Self::save_project_data(self, id, data).await?)
    }

    async fn create_project(&self, data: &ProjectData) -> Result<ProjectListItem, GatewayError> {
        Ok(Self::create_project(self, data).await?)
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), GatewayError> {
        Ok(Self::delete_project(self, id).await?)
    }

    async fn last_active_project(&self) -> Result<Option<ProjectId>, GatewayError> {
        Ok(Self::last_active_project(self).await?)
    }

    async fn remember_active_project(&self, id: &ProjectId) -> Result<(), GatewayError> {
        Ok(Self::remember_active_project(self, id).await?)
    }
}
