//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When the
//! migrations change, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// Registered users.
    ///
    /// `email` and `handle` carry the unique constraints `users_email_key`
    /// and `users_handle_key`.
    users (id) {
        /// Surrogate key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Trimmed first name (max 100 characters).
        first_name -> Varchar,
        /// Trimmed last name (max 100 characters).
        last_name -> Varchar,
        /// Calendar birth date.
        birth_date -> Date,
        /// Lowercased email address (max 255 characters).
        email -> Varchar,
        /// Free-text phone number (max 50 characters).
        phone -> Varchar,
        /// Public handle, `[a-z0-9]` only (max 150 characters).
        handle -> Varchar,
    }
}
