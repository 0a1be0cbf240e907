// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening the project database.
//!
//! Reads and writes live in `queries` and `mutations`; this module only gets
//! a connection to the current schema.

use diesel::connection::SimpleConnection;
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Write-ahead logging, plus a wait of up to five seconds on a locked file
/// instead of failing at once.
const FILE_DATABASE_PRAGMAS: &str = "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;";

/// Opens `database_url` and applies any pending project migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
pub fn open_project_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();

    info!(database_url, applied, "Opened project database");
    Ok(conn)
}

/// Tunes a file-backed database for a long-running server.
///
/// # Errors
///
/// Returns an error if a PRAGMA statement fails.
pub fn configure_file_database(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    conn.batch_execute(FILE_DATABASE_PRAGMAS)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    debug!("Enabled WAL journal for project database");
    Ok(())
}
