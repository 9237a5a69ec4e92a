//! Public user handles and their derivation from names.
//!
//! A handle is the first character of the first name followed by the whole
//! last name, lowercased, with everything outside `[a-z0-9]` removed. When
//! nothing survives the filter the fixed base `user` is used instead.
//! Derivation never guarantees uniqueness; see
//! [`resolve_unique_handle`](crate::domain::resolve_unique_handle).

use std::fmt;

/// Base substituted when a name yields no ASCII letters or digits.
pub const HANDLE_FALLBACK_BASE: &str = "user";
/// Longest base kept after filtering; longer bases are truncated.
pub const HANDLE_BASE_MAX: usize = 100;
/// Longest handle accepted anywhere (the width of the persisted column).
pub const HANDLE_MAX: usize = 150;

/// Errors raised when parsing a handle from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleValidationError {
    #[error("handle must not be empty")]
    Empty,
    #[error("handle must be at most {max} characters")]
    TooLong { max: usize },
    #[error("handle may only contain lowercase ASCII letters and digits")]
    InvalidCharacters,
}

fn is_handle_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit()
}

/// Unique public identifier of a user.
///
/// # Examples
/// ```
/// use user_directory::domain::Handle;
///
/// assert!(Handle::new("alee2").is_ok());
/// assert!(Handle::new("ALee").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    /// Validate a handle received from outside the process.
    pub fn new(raw: impl Into<String>) -> Result<Self, HandleValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(HandleValidationError::Empty);
        }
        if raw.len() > HANDLE_MAX {
            return Err(HandleValidationError::TooLong { max: HANDLE_MAX });
        }
        if !raw.chars().all(is_handle_char) {
            return Err(HandleValidationError::InvalidCharacters);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

/// Un-suffixed handle candidate derived from a name.
///
/// ## Invariants
/// - Non-empty, only `[a-z0-9]`, at most [`HANDLE_BASE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleBase(String);

impl HandleBase {
    /// Derive the base for a first/last name pair. Pure and deterministic.
    ///
    /// The initial is the first character of `first_name` exactly as given,
    /// whitespace included.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::HandleBase;
    ///
    /// assert_eq!(HandleBase::derive("Ann", "Lee").as_ref(), "alee");
    /// assert_eq!(HandleBase::derive("Zoë", "O'Brien-Smith").as_ref(), "zobriensmith");
    /// assert_eq!(HandleBase::derive("???", "日本語").as_ref(), "user");
    /// ```
    pub fn derive(first_name: &str, last_name: &str) -> Self {
        let initial = first_name.chars().next();
        let raw: String = initial.into_iter().chain(last_name.chars()).collect();
        let base: String = raw
            .to_lowercase()
            .chars()
            .filter(|ch| is_handle_char(*ch))
            .take(HANDLE_BASE_MAX)
            .collect();

        if base.is_empty() {
            Self(HANDLE_FALLBACK_BASE.to_owned())
        } else {
            Self(base)
        }
    }

    /// The base itself, used as the first probe.
    pub fn unsuffixed(&self) -> Handle {
        Handle(self.0.clone())
    }

    /// The base followed by a decimal suffix.
    pub fn with_suffix(&self, suffix: u64) -> Handle {
        Handle(format!("{}{suffix}", self.0))
    }
}

impl AsRef<str> for HandleBase {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HandleBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    //! Derivation and handle parsing coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ann", "Lee", "alee")]
    #[case("Alice", "Lee", "alee")]
    #[case("  ann ", "  LEE  ", "lee")]
    #[case(" Ann", "Lee", "lee")]
    #[case("Mary Jane", "Van der Berg", "mvanderberg")]
    #[case("Zoë", "O'Brien-Smith", "zobriensmith")]
    #[case("Émile", "Zola", "zola")]
    #[case("R2", "D2", "rd2")]
    #[case("42", "7", "47")]
    #[case("", "Lee", "lee")]
    #[case("Ann", "", "a")]
    fn derives_expected_base(#[case] first: &str, #[case] last: &str, #[case] expected: &str) {
        assert_eq!(HandleBase::derive(first, last).as_ref(), expected);
    }

    #[rstest]
    #[case("", "")]
    #[case("   ", "\t")]
    #[case("???", "!!!")]
    #[case("日本", "日本語")]
    #[case("Ñ", "—")]
    fn falls_back_when_nothing_survives(#[case] first: &str, #[case] last: &str) {
        assert_eq!(HandleBase::derive(first, last).as_ref(), HANDLE_FALLBACK_BASE);
    }

    #[rstest]
    #[case("Ann", "Lee")]
    #[case("Ünal", "Öz-Çelik")]
    #[case("x", "y z 1 2 3 !@#")]
    fn derivation_is_deterministic_and_ascii_alphanumeric(#[case] first: &str, #[case] last: &str) {
        let once = HandleBase::derive(first, last);
        let twice = HandleBase::derive(first, last);
        assert_eq!(once, twice);
        assert!(!once.as_ref().is_empty());
        assert!(once.as_ref().chars().all(is_handle_char));
    }

    #[rstest]
    fn long_names_are_truncated_to_base_limit() {
        let last = "b".repeat(HANDLE_BASE_MAX * 2);
        let base = HandleBase::derive("Ann", &last);
        assert_eq!(base.as_ref().len(), HANDLE_BASE_MAX);
        assert!(base.as_ref().starts_with("ab"));
    }

    #[rstest]
    fn suffixed_candidates_append_decimal_digits() {
        let base = HandleBase::derive("Ann", "Lee");
        assert_eq!(base.unsuffixed().as_ref(), "alee");
        assert_eq!(base.with_suffix(2).as_ref(), "alee2");
        assert_eq!(base.with_suffix(u64::MAX).as_ref().len(), 4 + 20);
    }

    #[rstest]
    fn longest_candidate_is_a_valid_handle() {
        let base = HandleBase::derive("A", &"z".repeat(500));
        let candidate = base.with_suffix(u64::MAX);
        assert!(Handle::new(String::from(candidate)).is_ok());
    }

    #[rstest]
    #[case("", HandleValidationError::Empty)]
    #[case("Alee", HandleValidationError::InvalidCharacters)]
    #[case("a-lee", HandleValidationError::InvalidCharacters)]
    #[case("alée", HandleValidationError::InvalidCharacters)]
    fn rejects_malformed_handles(#[case] raw: &str, #[case] expected: HandleValidationError) {
        assert_eq!(Handle::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_handles() {
        let err = Handle::new("a".repeat(HANDLE_MAX + 1)).expect_err("too long");
        assert_eq!(err, HandleValidationError::TooLong { max: HANDLE_MAX });
    }
}
