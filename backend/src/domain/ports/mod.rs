//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_directory;
mod user_repository;

#[cfg(test)]
pub use user_directory::{MockUserDirectoryCommand, MockUserDirectoryQuery};
pub use user_directory::{UserDirectoryCommand, UserDirectoryQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UniqueConstraint, UserPersistenceError, UserRepository};
