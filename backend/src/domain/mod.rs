//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed user directory model and the use-cases
//! over it, independent of transport and storage. Inbound adapters drive the
//! domain through the ports in [`ports`]; outbound adapters implement
//! [`ports::UserRepository`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport agnostic error payload.
//! - User (alias to `user::User`): persisted user record.
//! - Handle / HandleBase: public identifier and its derivation.
//! - resolve_unique_handle: sequential probing against the store.
//! - UserSearchPredicate: folded multi-field substring search.
//! - UserDirectoryService: the driving port implementation.

pub mod error;
pub mod handle;
pub mod handle_resolution;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;
pub mod user_search;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::handle::{
    HANDLE_BASE_MAX, HANDLE_FALLBACK_BASE, HANDLE_MAX, Handle, HandleBase, HandleValidationError,
};
pub use self::handle_resolution::{
    FIRST_HANDLE_SUFFIX, HandleResolutionError, resolve_unique_handle,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NameField, NewUser, PersonName, PhoneNumber, User, UserId, UserRegistration,
    UserValidationError,
};
pub use self::user_directory_service::{HANDLE_CONFLICT_RETRIES, UserDirectoryService};
pub(crate) use self::user_directory_service::user_not_found;
pub use self::user_search::{
    SearchClause, SearchTerm, UserField, UserSearchFilter, UserSearchPredicate, UserSearchQuery,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use user_directory::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("user not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
