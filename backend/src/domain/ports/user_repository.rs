//! Port abstraction for the user record store and its errors.
//!
//! The store owns both uniqueness invariants. Adapters must enforce `email`
//! and `handle` uniqueness atomically with the insert and report a lost race
//! as [`UserPersistenceError::UniqueViolation`], never as a generic failure.
use std::fmt;

use async_trait::async_trait;

use crate::domain::{Handle, NewUser, User, UserSearchQuery};

use super::define_port_error;

/// Unique constraint named by a store rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueConstraint {
    /// `users.email` uniqueness.
    Email,
    /// `users.handle` uniqueness.
    Handle,
    /// The store did not say which constraint fired.
    Unknown,
}

impl fmt::Display for UniqueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Email => "email",
            Self::Handle => "handle",
            Self::Unknown => "unknown",
        })
    }
}

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The insert lost against an existing row on a unique column.
        UniqueViolation { constraint: UniqueConstraint } =>
            "user repository unique constraint violated: {constraint}",
    }
}

/// Record store gateway for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user in its own transaction and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::UniqueViolation`] when the email or
    /// handle is already present. Nothing is persisted in that case.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Point lookup used by the handle resolver.
    async fn handle_exists(&self, handle: &Handle) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by handle.
    async fn find_by_handle(&self, handle: &Handle) -> Result<Option<User>, UserPersistenceError>;

    /// Hard-delete a user by handle. Returns `false` when no row matched.
    async fn delete_by_handle(&self, handle: &Handle) -> Result<bool, UserPersistenceError>;

    /// Return the requested page of users matching the predicate, in
    /// insertion order.
    async fn search(&self, query: &UserSearchQuery) -> Result<Vec<User>, UserPersistenceError>;
}
