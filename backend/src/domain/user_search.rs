//! Multi-field substring search over the user directory.
//!
//! A [`UserSearchFilter`] enumerates every recognised filter key. Building a
//! [`UserSearchPredicate`] drops blank filters and folds the rest into a flat
//! conjunction of clauses: one clause per per-field filter plus, when `q` is
//! present, a single clause matching any field. Persistence adapters translate
//! clauses into their own query language; [`UserSearchPredicate::matches`] is
//! the reference evaluation used by in-process stores.

use pagination::PageRequest;

use crate::domain::User;

/// Searchable user fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    FirstName,
    LastName,
    Email,
    Phone,
    Handle,
}

impl UserField {
    /// Every searchable field, in the order `q` checks them.
    pub const ALL: [UserField; 5] = [
        UserField::FirstName,
        UserField::LastName,
        UserField::Email,
        UserField::Phone,
        UserField::Handle,
    ];

    /// Field value of `user` as stored.
    pub fn value_of(self, user: &User) -> &str {
        match self {
            Self::FirstName => user.first_name().as_ref(),
            Self::LastName => user.last_name().as_ref(),
            Self::Email => user.email().as_ref(),
            Self::Phone => user.phone().as_ref(),
            Self::Handle => user.handle().as_ref(),
        }
    }
}

/// Non-blank, trimmed search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` when the text is blank after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Case-insensitive substring test.
    pub fn is_contained_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw filter configuration as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearchFilter {
    pub q: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub handle: Option<String>,
}

/// One conjunct of a search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchClause {
    /// Matches when any field contains the term.
    AnyField(SearchTerm),
    /// Matches when the given field contains the term.
    Field(UserField, SearchTerm),
}

impl SearchClause {
    /// Evaluate the clause against a user.
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::AnyField(term) => UserField::ALL
                .iter()
                .any(|field| term.is_contained_in(field.value_of(user))),
            Self::Field(field, term) => term.is_contained_in(field.value_of(user)),
        }
    }
}

/// Conjunction of search clauses. Empty matches every user.
///
/// # Examples
/// ```
/// use user_directory::domain::{SearchClause, UserField, UserSearchFilter, UserSearchPredicate};
///
/// let filter = UserSearchFilter {
///     q: Some("lee".into()),
///     first_name: Some("  ".into()),
///     email: Some("example".into()),
///     ..UserSearchFilter::default()
/// };
/// let predicate = UserSearchPredicate::build(&filter);
/// assert_eq!(predicate.clauses().len(), 2);
/// assert!(matches!(predicate.clauses()[0], SearchClause::Field(UserField::Email, _)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearchPredicate {
    clauses: Vec<SearchClause>,
}

impl UserSearchPredicate {
    /// Fold the recognised filters into a predicate.
    ///
    /// Per-field clauses come first in [`UserField::ALL`] order, followed by
    /// the free-text clause.
    pub fn build(filter: &UserSearchFilter) -> Self {
        let per_field = [
            (UserField::FirstName, &filter.first_name),
            (UserField::LastName, &filter.last_name),
            (UserField::Email, &filter.email),
            (UserField::Phone, &filter.phone),
            (UserField::Handle, &filter.handle),
        ];

        let mut clauses: Vec<SearchClause> = per_field
            .into_iter()
            .filter_map(|(field, raw)| {
                raw.as_deref()
                    .and_then(SearchTerm::parse)
                    .map(|term| SearchClause::Field(field, term))
            })
            .collect();

        if let Some(term) = filter.q.as_deref().and_then(SearchTerm::parse) {
            clauses.push(SearchClause::AnyField(term));
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[SearchClause] {
        &self.clauses
    }

    /// True when no filter narrows the result.
    pub fn is_unfiltered(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate every clause against a user.
    pub fn matches(&self, user: &User) -> bool {
        self.clauses.iter().all(|clause| clause.matches(user))
    }
}

/// Predicate plus the page window to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearchQuery {
    pub predicate: UserSearchPredicate,
    pub page: PageRequest,
}

impl UserSearchQuery {
    pub fn new(filter: &UserSearchFilter, page: PageRequest) -> Self {
        Self {
            predicate: UserSearchPredicate::build(filter),
            page,
        }
    }
}
