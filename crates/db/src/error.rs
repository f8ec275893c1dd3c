//! Translation of sqlx errors into the versioning error taxonomy.

use trail_core::error::CoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a sqlx error as a [`CoreError`].
///
/// - Unique constraint violations map to `ConstraintViolation` carrying the
///   constraint name.
/// - Everything else maps to `Storage`.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return CoreError::ConstraintViolation(constraint.to_string());
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}
