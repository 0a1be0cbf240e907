// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project and session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::diesel_schema::{projects, session_state};
use crate::error::PersistenceError;

/// Inserts a new project row.
///
/// # Errors
///
/// Returns an error if the identifier is already taken or the insert fails.
pub fn insert_project(
    conn: &mut SqliteConnection,
    project_id: &str,
    name: &str,
    payload_json: &str,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(projects::table)
        .values((
            projects::project_id.eq(project_id),
            projects::name.eq(name),
            projects::payload_json.eq(payload_json),
            projects::created_at.eq(now),
            projects::updated_at.eq(now),
        ))
        .execute(conn)?;
    info!(project_id, name, "Inserted project");
    Ok(())
}

/// Inserts or overwrites a project row.
///
/// The index name is always rewritten along with the payload.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_project(
    conn: &mut SqliteConnection,
    project_id: &str,
    name: &str,
    payload_json: &str,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(projects::table)
        .values((
            projects::project_id.eq(project_id),
            projects::name.eq(name),
            projects::payload_json.eq(payload_json),
            projects::created_at.eq(now),
            projects::updated_at.eq(now),
        ))
        .on_conflict(projects::project_id)
        .do_update()
        .set((
            projects::name.eq(name),
            projects::payload_json.eq(payload_json),
            projects::updated_at.eq(now),
        ))
        .execute(conn)?;
    debug!(project_id, name, "Upserted project");
    Ok(())
}

/// Deletes a project row.
///
/// # Returns
///
/// The number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_project(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<usize, PersistenceError> {
    let deleted: usize =
        diesel::delete(projects::table.filter(projects::project_id.eq(project_id)))
            .execute(conn)?;
    info!(project_id, deleted, "Deleted project");
    Ok(deleted)
}

/// Writes a session state value, replacing any previous value.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn set_session_value(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), PersistenceError> {
    diesel::replace_into(session_state::table)
        .values((
            session_state::state_key.eq(key),
            session_state::state_value.eq(value),
        ))
        .execute(conn)?;
    debug!(key, value, "Stored session value");
    Ok(())
}
