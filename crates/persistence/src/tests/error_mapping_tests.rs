// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::PersistenceError;
use alluvia::GatewayError;

#[test]
fn test_decode_failures_become_corrupt() {
    let err: PersistenceError = serde_json::from_str::<u32>("x").unwrap_err().into();
    assert!(matches!(GatewayError::from(err), GatewayError::Corrupt(_)));
}

#[test]
fn test_constraint_violations_become_rejected() {
    let err: PersistenceError = PersistenceError::ConstraintViolation(String::from("unique"));
    assert_eq!(
        GatewayError::from(err),
        GatewayError::Rejected(String::from("Constraint violation: unique"))
    );
}

#[test]
fn test_database_failures_become_unavailable() {
    for err in [
        PersistenceError::DatabaseError(String::from("locked")),
        PersistenceError::DatabaseConnectionFailed(String::from("no file")),
        PersistenceError::MigrationFailed(String::from("bad schema")),
    ] {
        assert!(matches!(GatewayError::from(err), GatewayError::Unavailable(_)));
    }
}

#[test]
fn test_not_found_is_a_database_error() {
    let err: PersistenceError = diesel::result::Error::NotFound.into();
    assert!(matches!(err, PersistenceError::DatabaseError(_)));
}
