//! Error types for the contacts service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rusqlite::ErrorCode;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Wire Messages ==
pub const BAD_REQUEST_MESSAGE: &str = "Bad request";
pub const NOT_FOUND_MESSAGE: &str = "Not found";
pub const CONFLICT_MESSAGE: &str = "Unique constraint failed";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

// == Contact Error Enum ==
/// Unified error type for the contacts service.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Malformed, missing or mistyped payload
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No matching contact
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// Write would violate a uniqueness constraint
    #[error("Unique constraint failed: {0}")]
    Conflict(String),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContactError {
    /// Returns true for errors caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ContactError::BadRequest(_) | ContactError::NotFound(_) | ContactError::Conflict(_)
        )
    }
}

// == SQLite Classification ==
impl From<rusqlite::Error> for ContactError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, detail)
                if failure.code == ErrorCode::ConstraintViolation
                    && (failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY) =>
            {
                ContactError::Conflict(
                    detail
                        .clone()
                        .unwrap_or_else(|| "unique constraint".to_string()),
                )
            }
            _ => ContactError::Database(err),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ContactError::BadRequest(_) => (StatusCode::BAD_REQUEST, BAD_REQUEST_MESSAGE),
            ContactError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ContactError::Conflict(_) => (StatusCode::CONFLICT, CONFLICT_MESSAGE),
            ContactError::Database(_) | ContactError::Internal(_) => {
                error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the contacts service.
pub type Result<T> = std::result::Result<T, ContactError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ContactError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ContactError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ContactError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ContactError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL UNIQUE);")
            .unwrap();
        conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap();
        let err: ContactError = conn
            .execute("INSERT INTO t (name) VALUES ('a')", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, ContactError::Conflict(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_other_sqlite_errors_stay_internal() {
        let conn = Connection::open_in_memory().unwrap();
        let err: ContactError = conn
            .execute("INSERT INTO missing_table (x) VALUES (1)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, ContactError::Database(_)));
        assert!(!err.is_client_error());
    }
}
