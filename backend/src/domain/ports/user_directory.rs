//! Driving ports for the user directory.
//!
//! Inbound adapters register, fetch, delete and search users through these
//! traits without importing persistence concerns. Every failure is reported
//! as a domain [`Error`] whose code the adapter translates into its own
//! protocol.

use async_trait::async_trait;

use crate::domain::{Error, Handle, User, UserRegistration, UserSearchQuery};

/// Mutating use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryCommand: Send + Sync {
    /// Register a user, assigning a unique handle.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the email is already registered.
    async fn register(&self, registration: UserRegistration) -> Result<User, Error>;

    /// Delete the user owning `handle`.
    ///
    /// # Errors
    ///
    /// Returns not-found when no user owns the handle.
    async fn delete(&self, handle: &Handle) -> Result<(), Error>;
}

/// Read-only use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryQuery: Send + Sync {
    /// Fetch the user owning `handle`.
    ///
    /// # Errors
    ///
    /// Returns not-found when no user owns the handle.
    async fn get(&self, handle: &Handle) -> Result<User, Error>;

    /// Run a filtered, paginated search.
    async fn search(&self, query: UserSearchQuery) -> Result<Vec<User>, Error>;
}
