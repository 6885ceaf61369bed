//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{Contact, ContactValidationError};

use super::schema::contacts;

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg, diesel::sqlite::Sqlite))]
pub(crate) struct ContactRow {
    pub phone: String,
    pub name: String,
}

impl TryFrom<ContactRow> for Contact {
    type Error = ContactValidationError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Contact::try_from_strings(row.phone, row.name)
    }
}

/// Insertable struct for creating new contact records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub phone: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a Contact> for NewContactRow<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            phone: contact.phone().as_ref(),
            name: contact.name().as_ref(),
        }
    }
}
