//! Diesel table definitions for the directory schema.
//!
//! These definitions must match `migrations/` exactly. They are shared by the
//! PostgreSQL and SQLite backends, so only types both support appear here.

diesel::table! {
    /// Directory entries keyed by phone number.
    contacts (phone) {
        /// Primary key, at most 30 characters.
        phone -> Varchar,
        /// Display name, at most 100 characters.
        name -> Varchar,
    }
}
