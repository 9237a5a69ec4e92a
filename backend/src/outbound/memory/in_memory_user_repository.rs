//! In-memory user repository with the same constraint semantics as the
//! PostgreSQL adapter.
//!
//! Uniqueness is checked under the write lock, so concurrent inserts within
//! one process race exactly like transactions against a unique index: one
//! wins, the others see [`UserPersistenceError::UniqueViolation`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UniqueConstraint, UserPersistenceError, UserRepository};
use crate::domain::{Handle, NewUser, User, UserId, UserSearchQuery};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: Vec<User>,
}

/// Volatile user store kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut table = self.table.write().await;
        if table
            .rows
            .iter()
            .any(|row| row.email() == &user.registration.email)
        {
            return Err(UserPersistenceError::unique_violation(
                UniqueConstraint::Email,
            ));
        }
        if table.rows.iter().any(|row| row.handle() == &user.handle) {
            return Err(UserPersistenceError::unique_violation(
                UniqueConstraint::Handle,
            ));
        }

        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        table.last_id = id;
        let stored = User::new(UserId::new(id), user.clone());
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn handle_exists(&self, handle: &Handle) -> Result<bool, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|row| row.handle() == handle))
    }

    async fn find_by_handle(&self, handle: &Handle) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.handle() == handle).cloned())
    }

    async fn delete_by_handle(&self, handle: &Handle) -> Result<bool, UserPersistenceError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|row| row.handle() != handle);
        Ok(table.rows.len() < before)
    }

    async fn search(&self, query: &UserSearchQuery) -> Result<Vec<User>, UserPersistenceError> {
        let table = self.table.read().await;
        let matching = table
            .rows
            .iter()
            .filter(|row| query.predicate.matches(row));
        Ok(query.page.window(matching).cloned().collect())
    }
}
