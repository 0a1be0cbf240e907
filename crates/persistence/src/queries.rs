// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project index and session queries.

use diesel::SqliteConnection;
use diesel::dsl::exists;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{projects, session_state};
use crate::error::PersistenceError;

/// Diesel Queryable struct for index rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = projects)]
pub struct ProjectIndexRow {
    pub project_id: String,
    pub name: String,
}

/// Lists the project index in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_projects(conn: &mut SqliteConnection) -> Result<Vec<ProjectIndexRow>, PersistenceError> {
    let rows: Vec<ProjectIndexRow> = projects::table
        .order(projects::project_seq.asc())
        .select(ProjectIndexRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), "Listed projects");
    Ok(rows)
}

/// Retrieves the raw JSON payload of a project.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the project is not found.
pub fn get_project_payload(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<Option<String>, PersistenceError> {
    Ok(projects::table
        .filter(projects::project_id.eq(project_id))
        .select(projects::payload_json)
        .first::<String>(conn)
        .optional()?)
}

/// Checks whether a project identifier is in use.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn project_exists(conn: &mut SqliteConnection, project_id: &str) -> Result<bool, PersistenceError> {
    Ok(diesel::select(exists(
        projects::table.filter(projects::project_id.eq(project_id)),
    ))
    .get_result(conn)?)
}

/// Retrieves a session state value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_session_value(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    Ok(session_state::table
        .filter(session_state::state_key.eq(key))
        .select(session_state::state_value)
        .first::<String>(conn)
        .optional()?)
}
