//! Diesel and pool error mapping for the user repository.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::{UniqueConstraint, UserPersistenceError};

use super::pool::PoolError;

/// Constraint guarding `users.email`.
pub(crate) const EMAIL_CONSTRAINT: &str = "users_email_key";
/// Constraint guarding `users.handle`.
pub(crate) const HANDLE_CONSTRAINT: &str = "users_handle_key";

/// Map pool failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Name the unique constraint behind a violation.
///
/// PostgreSQL reports the constraint name separately; older servers and some
/// proxies only embed it in the message, so that is checked as a fallback.
fn classify_unique_violation(info: &dyn DatabaseErrorInformation) -> UniqueConstraint {
    let source = info
        .constraint_name()
        .unwrap_or_else(|| info.message())
        .to_ascii_lowercase();

    if source.contains(EMAIL_CONSTRAINT) {
        UniqueConstraint::Email
    } else if source.contains(HANDLE_CONSTRAINT) {
        UniqueConstraint::Handle
    } else {
        warn!(
            constraint_name = ?info.constraint_name(),
            message = info.message(),
            "unrecognised unique violation"
        );
        UniqueConstraint::Unknown
    }
}

/// Map Diesel errors to user repository errors.
pub(crate) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::unique_violation(classify_unique_violation(info.as_ref()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}
