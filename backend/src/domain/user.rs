//! User record model and the normalising value types it is built from.
//!
//! Every value type trims its input on construction, so adapters may pass raw
//! request strings straight through. Email addresses are additionally folded to
//! lowercase, which makes the store's uniqueness constraint case-insensitive.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::{Handle, HandleBase};

/// Minimum length of a first or last name after trimming.
pub const NAME_MIN: usize = 1;
/// Maximum length of a first or last name after trimming.
pub const NAME_MAX: usize = 100;
/// Maximum length of an email address after trimming.
pub const EMAIL_MAX: usize = 255;
/// Minimum length of a phone number after trimming.
pub const PHONE_MIN: usize = 3;
/// Maximum length of a phone number after trimming.
pub const PHONE_MAX: usize = 50;

/// Name fields validated by [`PersonName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    FirstName,
    LastName,
}

impl NameField {
    /// Wire name of the field, as used in request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
        }
    }

    fn code_prefix(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
        }
    }
}

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("{} must not be empty", .field.as_str())]
    EmptyName { field: NameField },
    #[error("{} must be at most {max} characters", .field.as_str())]
    NameTooLong { field: NameField, max: usize },
    #[error("email must be a valid address")]
    InvalidEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("phone must be at least {min} characters")]
    PhoneTooShort { min: usize },
    #[error("phone must be at most {max} characters")]
    PhoneTooLong { max: usize },
}

impl UserValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName { field } | Self::NameTooLong { field, .. } => field.as_str(),
            Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::PhoneTooShort { .. } | Self::PhoneTooLong { .. } => "phone",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> String {
        match self {
            Self::EmptyName { field } => format!("empty_{}", field.code_prefix()),
            Self::NameTooLong { field, .. } => format!("{}_too_long", field.code_prefix()),
            Self::InvalidEmail => "invalid_email".to_owned(),
            Self::EmailTooLong { .. } => "email_too_long".to_owned(),
            Self::PhoneTooShort { .. } => "phone_too_short".to_owned(),
            Self::PhoneTooLong { .. } => "phone_too_long".to_owned(),
        }
    }
}

/// Store-assigned surrogate key. Never exposed outside the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a key assigned by the record store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw key value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed first or last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Trim and validate a name for the given field.
    pub fn new(field: NameField, raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(UserValidationError::EmptyName { field });
        }
        if length > NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                field,
                max: NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only: one `@`, no whitespace, a dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Trimmed, lowercased email address.
///
/// # Examples
/// ```
/// use user_directory::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ann.Lee@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ann.lee@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Trimmed free-text phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Trim and validate a phone number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < PHONE_MIN {
            return Err(UserValidationError::PhoneTooShort { min: PHONE_MIN });
        }
        if length > PHONE_MAX {
            return Err(UserValidationError::PhoneTooLong { max: PHONE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validated registration payload, before a handle has been assigned.
///
/// The handle base is derived from the names as submitted, so leading
/// whitespace in the first name drops the initial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistration {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub birth_date: NaiveDate,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    handle_base: HandleBase,
}

impl UserRegistration {
    /// Validate every field from raw strings.
    ///
    /// The first failing field is reported.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
        email: &str,
        phone: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            first_name: PersonName::new(NameField::FirstName, first_name)?,
            last_name: PersonName::new(NameField::LastName, last_name)?,
            birth_date,
            email: EmailAddress::new(email)?,
            phone: PhoneNumber::new(phone)?,
            handle_base: HandleBase::derive(first_name, last_name),
        })
    }

    /// Handle base derived from the untrimmed names.
    pub fn handle_base(&self) -> &HandleBase {
        &self.handle_base
    }

    /// Pair the registration with a resolved handle, ready for insertion.
    pub fn with_handle(self, handle: Handle) -> NewUser {
        NewUser {
            registration: self,
            handle,
        }
    }
}

/// Row to insert: a registration plus the handle the resolver picked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub registration: UserRegistration,
    pub handle: Handle,
}

/// Persisted user record.
///
/// ## Invariants
/// - `email` and `handle` are unique across the store.
/// - `id` and `handle` never change after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: PersonName,
    last_name: PersonName,
    birth_date: NaiveDate,
    email: EmailAddress,
    phone: PhoneNumber,
    handle: Handle,
}

impl User {
    /// Assemble a persisted record from its store-assigned key and insert payload.
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            registration,
            handle,
        } = new_user;
        let UserRegistration {
            first_name,
            last_name,
            birth_date,
            email,
            phone,
            ..
        } = registration;
        Self {
            id,
            first_name,
            last_name,
            birth_date,
            email,
            phone,
            handle,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}
