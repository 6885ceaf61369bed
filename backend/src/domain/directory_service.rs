//! Contact directory domain service.
//!
//! Implements both driving ports on top of a [`ContactRepository`]. The admin
//! secret is injected at construction; nothing here reads process state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    AddContactRequest, ContactRepository, ContactRepositoryError, DirectoryCommand,
    DirectoryListing, DirectoryQuery, RemoveContactRequest, SearchRequest, SearchType,
};
use crate::domain::{AdminSecret, Contact, ContactValidationError, Error, PhoneNumber, authorize};

const ADD_FIELDS_REQUIRED: &str = "Phone and name are required!";
const REMOVE_FIELD_REQUIRED: &str = "Phone is required!";

/// Map repository failures to domain errors, prefixing store failures with
/// the operation that failed.
fn map_repository_error(error: ContactRepositoryError, operation: &str) -> Error {
    match error {
        ContactRepositoryError::DuplicateKey { phone } => Error::duplicate_key(&phone),
        ContactRepositoryError::NotFound { phone } => Error::not_found(&phone),
        ContactRepositoryError::Connection { message } => {
            error!(%message, operation, "contact store unavailable");
            Error::store_unavailable(format!("{operation} failed: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            error!(%message, operation, "contact store operation failed");
            Error::store_failure(format!("{operation} failed: {message}"))
        }
    }
}

fn map_validation_error(error: &ContactValidationError) -> Error {
    Error::invalid_field(capitalise(&error.to_string()))
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Directory service implementing the query and command driving ports.
pub struct ContactDirectoryService<R: ?Sized> {
    contacts: Arc<R>,
    admin_secret: AdminSecret,
}

impl<R: ?Sized> Clone for ContactDirectoryService<R> {
    fn clone(&self) -> Self {
        Self {
            contacts: Arc::clone(&self.contacts),
            admin_secret: self.admin_secret.clone(),
        }
    }
}

impl<R: ?Sized> ContactDirectoryService<R> {
    /// Create a service over `contacts`, gated by `admin_secret`.
    pub fn new(contacts: Arc<R>, admin_secret: AdminSecret) -> Self {
        Self {
            contacts,
            admin_secret,
        }
    }

    fn check_admin(&self, submitted: &str, action: &'static str) -> Result<(), Error> {
        if authorize(&self.admin_secret, submitted) {
            Ok(())
        } else {
            warn!(action, "admin password rejected");
            Err(Error::wrong_password())
        }
    }
}

impl<R> ContactDirectoryService<R>
where
    R: ContactRepository + ?Sized,
{
    async fn total_count(&self) -> Result<u64, Error> {
        self.contacts
            .count()
            .await
            .map_err(|err| map_repository_error(err, "Count"))
    }

    async fn matching(&self, request: &SearchRequest) -> Result<Vec<Contact>, Error> {
        if request.query.is_empty() {
            return Ok(Vec::new());
        }
        match request.search_type {
            SearchType::Phone => {
                // A key that cannot be stored cannot match anything.
                let Ok(phone) = PhoneNumber::new(&request.query) else {
                    return Ok(Vec::new());
                };
                self.contacts
                    .find_by_phone(&phone)
                    .await
                    .map(|found| found.into_iter().collect())
                    .map_err(|err| map_repository_error(err, "Search"))
            }
            SearchType::Name => self
                .contacts
                .search_by_name(&request.query)
                .await
                .map_err(|err| map_repository_error(err, "Search")),
        }
    }
}

#[async_trait]
impl<R> DirectoryQuery for ContactDirectoryService<R>
where
    R: ContactRepository + ?Sized,
{
    async fn list_contacts(&self) -> Result<DirectoryListing, Error> {
        let contacts = self
            .contacts
            .list_all()
            .await
            .map_err(|err| map_repository_error(err, "Listing"))?;
        let total_count = self.total_count().await?;
        Ok(DirectoryListing {
            contacts,
            total_count,
        })
    }

    async fn search_contacts(&self, request: &SearchRequest) -> Result<DirectoryListing, Error> {
        let contacts = self.matching(request).await?;
        let total_count = self.total_count().await?;
        Ok(DirectoryListing {
            contacts,
            total_count,
        })
    }
}

#[async_trait]
impl<R> DirectoryCommand for ContactDirectoryService<R>
where
    R: ContactRepository + ?Sized,
{
    async fn add_contact(&self, request: AddContactRequest) -> Result<Contact, Error> {
        self.check_admin(&request.admin_pass, "add")?;

        if request.phone.trim().is_empty() || request.name.trim().is_empty() {
            return Err(Error::missing_field(ADD_FIELDS_REQUIRED));
        }
        let contact = Contact::try_from_strings(&request.phone, &request.name)
            .map_err(|err| map_validation_error(&err))?;

        self.contacts
            .insert(&contact)
            .await
            .map_err(|err| map_repository_error(err, "Add"))?;

        info!(phone = %contact.phone(), name = %contact.name(), "contact added");
        Ok(contact)
    }

    async fn remove_contact(&self, request: RemoveContactRequest) -> Result<Contact, Error> {
        self.check_admin(&request.admin_pass, "remove")?;

        if request.phone.trim().is_empty() {
            return Err(Error::missing_field(REMOVE_FIELD_REQUIRED));
        }
        let phone = match PhoneNumber::new(&request.phone) {
            Ok(phone) => phone,
            // No stored contact can carry a key this long.
            Err(ContactValidationError::PhoneTooLong { .. }) => {
                return Err(Error::not_found(request.phone.trim()));
            }
            Err(err) => return Err(map_validation_error(&err)),
        };

        let removed = self
            .contacts
            .delete(&phone)
            .await
            .map_err(|err| map_repository_error(err, "Delete"))?;

        info!(phone = %removed.phone(), name = %removed.name(), "contact removed");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
