//! Internal Diesel row structs for the users table.
//!
//! These types never leave the persistence layer.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::NewUser;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub handle: String,
}

/// Insertable struct borrowing from a domain [`NewUser`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: NaiveDate,
    pub email: &'a str,
    pub phone: &'a str,
    pub handle: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        let registration = &user.registration;
        Self {
            first_name: registration.first_name.as_ref(),
            last_name: registration.last_name.as_ref(),
            birth_date: registration.birth_date,
            email: registration.email.as_ref(),
            phone: registration.phone.as_ref(),
            handle: user.handle.as_ref(),
        }
    }
}
