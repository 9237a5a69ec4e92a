//! User directory domain service.
//!
//! Registration derives a handle base, probes the store for the first free
//! candidate and inserts. A concurrent registration can claim the candidate
//! between the probe and the insert; the store rejects the loser on the
//! `handle` constraint and the service re-probes, at most
//! [`HANDLE_CONFLICT_RETRIES`] extra times. No handle state is cached in
//! process, so several instances may share one store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    UniqueConstraint, UserDirectoryCommand, UserDirectoryQuery, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, Handle, HandleBase, HandleResolutionError, User, UserRegistration, UserSearchQuery,
    resolve_unique_handle,
};

/// Extra resolve-and-insert rounds after a lost handle race.
pub const HANDLE_CONFLICT_RETRIES: usize = 5;

/// Not-found error for a handle, including handles that are not well formed.
pub(crate) fn user_not_found(handle: &str) -> Error {
    Error::not_found("user not found").with_details(json!({
        "handle": handle,
        "code": "user_not_found",
    }))
}

/// Service implementing the user directory driving ports.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    repository: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserDirectoryService<R>
where
    R: UserRepository,
{
    fn duplicate_email() -> Error {
        Error::conflict("email already exists").with_details(json!({
            "field": "email",
            "code": "duplicate_email",
        }))
    }

    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::UniqueViolation { .. } => Self::duplicate_email(),
        }
    }

    async fn resolve_handle(&self, base: &HandleBase) -> Result<Handle, Error> {
        let repository = &self.repository;
        resolve_unique_handle(base, |candidate| async move {
            repository.handle_exists(&candidate).await
        })
        .await
        .map_err(|err| match err {
            HandleResolutionError::Probe(source) => Self::map_persistence_error(source),
            HandleResolutionError::SuffixExhausted { base: exhausted } => {
                warn!(base = %exhausted, "handle suffixes exhausted");
                Error::internal(format!("no free handle for base {exhausted}"))
            }
        })
    }
}

#[async_trait]
impl<R> UserDirectoryCommand for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: UserRegistration) -> Result<User, Error> {
        let base = registration.handle_base().clone();

        for attempt in 0..=HANDLE_CONFLICT_RETRIES {
            let handle = self.resolve_handle(&base).await?;
            let new_user = registration.clone().with_handle(handle);
            match self.repository.create(&new_user).await {
                Ok(user) => {
                    info!(handle = %user.handle(), attempt, "registered user");
                    return Ok(user);
                }
                Err(UserPersistenceError::UniqueViolation {
                    constraint: UniqueConstraint::Handle,
                }) => {
                    debug!(
                        handle = %new_user.handle,
                        attempt,
                        "handle claimed concurrently; probing again"
                    );
                }
                Err(UserPersistenceError::UniqueViolation { constraint }) => {
                    debug!(%constraint, "registration rejected by unique constraint");
                    return Err(Self::duplicate_email());
                }
                Err(err) => return Err(Self::map_persistence_error(err)),
            }
        }

        warn!(%base, retries = HANDLE_CONFLICT_RETRIES, "handle races exhausted retries");
        Err(Self::duplicate_email())
    }

    async fn delete(&self, handle: &Handle) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete_by_handle(handle)
            .await
            .map_err(Self::map_persistence_error)?;
        if deleted {
            info!(%handle, "deleted user");
            Ok(())
        } else {
            Err(user_not_found(handle.as_ref()))
        }
    }
}

#[async_trait]
impl<R> UserDirectoryQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn get(&self, handle: &Handle) -> Result<User, Error> {
        self.repository
            .find_by_handle(handle)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| user_not_found(handle.as_ref()))
    }

    async fn search(&self, query: UserSearchQuery) -> Result<Vec<User>, Error> {
        self.repository
            .search(&query)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
