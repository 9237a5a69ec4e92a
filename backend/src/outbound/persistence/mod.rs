//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements [`UserRepository`](crate::domain::ports::UserRepository) on top
//! of `diesel-async` with a `bb8` pool.
//!
//! # Architecture
//!
//! - **Thin adapter**: the repository translates between Diesel rows and
//!   domain types. Handle resolution and retry policy live in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Constraint-backed uniqueness**: `users_email_key` and
//!   `users_handle_key` are the only arbiters of uniqueness; violations are
//!   reported with the constraint that fired.
//!
//! # Example
//!
//! ```ignore
//! use user_directory::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod user_search_statement;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
