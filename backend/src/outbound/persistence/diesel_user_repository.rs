//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Uniqueness of `email` and `handle` is enforced by the table's constraints;
//! this adapter only classifies the resulting violations. It keeps no state
//! beyond the pool, so any number of service instances can share one
//! database.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Handle, NewUser, User, UserId, UserRegistration, UserSearchQuery};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use super::user_search_statement::search_statement;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild a domain user from a stored row.
///
/// Rows written by this adapter always validate; a failure means the table
/// was modified out of band.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        first_name,
        last_name,
        birth_date,
        email,
        phone,
        handle,
    } = row;

    let registration =
        UserRegistration::try_from_parts(&first_name, &last_name, birth_date, &email, &phone)
            .map_err(|err| {
                UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
            })?;
    let handle = Handle::new(handle).map_err(|err| {
        UserPersistenceError::query(format!("stored user {id} has invalid handle: {err}"))
    })?;
    Ok(User::new(UserId::new(id), registration.with_handle(handle)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow::from(user);

        let row: UserRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(id = row.id, handle = %row.handle, "inserted user row");
        row_to_user(row)
    }

    async fn handle_exists(&self, handle: &Handle) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            users::table.filter(users::handle.eq(handle.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_handle(&self, handle: &Handle) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::handle.eq(handle.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn delete_by_handle(&self, handle: &Handle) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::handle.eq(handle.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn search(&self, query: &UserSearchQuery) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = search_statement(query)
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}
