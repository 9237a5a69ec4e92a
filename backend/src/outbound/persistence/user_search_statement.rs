//! Translation of [`UserSearchQuery`] into a boxed Diesel statement.
//!
//! Each clause becomes one `ILIKE '%term%'` test (or an `OR` group for the
//! any-field clause); clauses are combined with `AND`. LIKE metacharacters in
//! the term are escaped so filters always match literal substrings.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::{SearchClause, SearchTerm, UserField, UserSearchQuery};

use super::schema::users;

type UserPredicate = Box<dyn BoxableExpression<users::table, Pg, SqlType = Bool>>;

/// Wrap `term` as a `%...%` pattern with `\`, `%` and `_` escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn field_contains(field: UserField, pattern: String) -> UserPredicate {
    match field {
        UserField::FirstName => Box::new(users::first_name.ilike(pattern)),
        UserField::LastName => Box::new(users::last_name.ilike(pattern)),
        UserField::Email => Box::new(users::email.ilike(pattern)),
        UserField::Phone => Box::new(users::phone.ilike(pattern)),
        UserField::Handle => Box::new(users::handle.ilike(pattern)),
    }
}

fn any_field_contains(term: &SearchTerm) -> UserPredicate {
    let pattern = contains_pattern(term.as_ref());
    Box::new(
        users::first_name
            .ilike(pattern.clone())
            .or(users::last_name.ilike(pattern.clone()))
            .or(users::email.ilike(pattern.clone()))
            .or(users::phone.ilike(pattern.clone()))
            .or(users::handle.ilike(pattern)),
    )
}

fn clause_predicate(clause: &SearchClause) -> UserPredicate {
    match clause {
        SearchClause::AnyField(term) => any_field_contains(term),
        SearchClause::Field(field, term) => field_contains(*field, contains_pattern(term.as_ref())),
    }
}

/// Filtered, ordered and paginated statement over the users table.
pub(crate) fn search_statement(query: &UserSearchQuery) -> users::BoxedQuery<'static, Pg> {
    let filtered = query
        .predicate
        .clauses()
        .iter()
        .fold(users::table.into_boxed(), |statement, clause| {
            statement.filter(clause_predicate(clause))
        });

    filtered
        .order(users::id.asc())
        .limit(query.page.limit_i64())
        .offset(query.page.offset_i64())
}
