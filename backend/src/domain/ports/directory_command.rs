//! Driving port for the password-gated add and remove forms.

use async_trait::async_trait;

use crate::domain::{Contact, Error};

/// Fields submitted by the add form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddContactRequest {
    pub admin_pass: String,
    pub phone: String,
    pub name: String,
}

/// Fields submitted by the remove form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveContactRequest {
    pub admin_pass: String,
    pub phone: String,
}

/// Domain use-case port for mutating the directory.
///
/// Both operations check the admin password before touching the store.
#[async_trait]
pub trait DirectoryCommand: Send + Sync {
    /// Add a contact and return it as stored.
    async fn add_contact(&self, request: AddContactRequest) -> Result<Contact, Error>;

    /// Remove a contact and return what was removed.
    async fn remove_contact(&self, request: RemoveContactRequest) -> Result<Contact, Error>;
}
