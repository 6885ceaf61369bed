//! Port abstraction for contact persistence adapters and their errors.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Contact, PhoneNumber};

/// Persistence errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactRepositoryError {
    /// A contact with this phone is already stored.
    #[error("contact {phone} already exists")]
    DuplicateKey { phone: String },
    /// No contact is stored under this phone.
    #[error("contact {phone} does not exist")]
    NotFound { phone: String },
    /// Repository connection could not be established.
    #[error("contact repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query { message: String },
}

impl ContactRepositoryError {
    /// Create a duplicate key error for `phone`.
    pub fn duplicate_key(phone: impl Into<String>) -> Self {
        Self::DuplicateKey {
            phone: phone.into(),
        }
    }

    /// Create a not found error for `phone`.
    pub fn not_found(phone: impl Into<String>) -> Self {
        Self::NotFound {
            phone: phone.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Single-table store of contacts keyed by phone.
///
/// Listing and search results are ordered alphabetically by name. Mutations
/// are atomic: a failed call leaves the store as it was.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Exact-key lookup.
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Case-insensitive substring match against contact names.
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Every stored contact.
    async fn list_all(&self) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Total number of stored contacts.
    async fn count(&self) -> Result<u64, ContactRepositoryError>;

    /// Store a new contact, failing with `DuplicateKey` if the phone exists.
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// Remove and return the contact stored under `phone`, failing with
    /// `NotFound` if there is none.
    async fn delete(&self, phone: &PhoneNumber) -> Result<Contact, ContactRepositoryError>;
}

/// Process-local repository used by handler tests and database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    contacts: Mutex<BTreeMap<PhoneNumber, Contact>>,
}

impl InMemoryContactRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `contacts`.
    ///
    /// Later entries replace earlier ones that share a phone.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let map = contacts
            .into_iter()
            .map(|contact| (contact.phone().clone(), contact))
            .collect();
        Self {
            contacts: Mutex::new(map),
        }
    }

    fn with_map<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<PhoneNumber, Contact>) -> Result<T, ContactRepositoryError>,
    ) -> Result<T, ContactRepositoryError> {
        let mut guard = self
            .contacts
            .lock()
            .map_err(|_| ContactRepositoryError::query("in-memory contact store poisoned"))?;
        f(&mut guard)
    }
}

fn sorted_by_name<'a>(contacts: impl Iterator<Item = &'a Contact>) -> Vec<Contact> {
    let mut sorted: Vec<Contact> = contacts.cloned().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.phone().cmp(b.phone())));
    sorted
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        self.with_map(|map| Ok(map.get(phone).cloned()))
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Contact>, ContactRepositoryError> {
        let needle = fragment.to_lowercase();
        self.with_map(|map| {
            Ok(sorted_by_name(map.values().filter(|contact| {
                contact.name().as_ref().to_lowercase().contains(&needle)
            })))
        })
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        self.with_map(|map| Ok(sorted_by_name(map.values())))
    }

    async fn count(&self) -> Result<u64, ContactRepositoryError> {
        self.with_map(|map| Ok(map.len() as u64))
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        self.with_map(|map| {
            if map.contains_key(contact.phone()) {
                return Err(ContactRepositoryError::duplicate_key(contact.phone().as_ref()));
            }
            map.insert(contact.phone().clone(), contact.clone());
            Ok(())
        })
    }

    async fn delete(&self, phone: &PhoneNumber) -> Result<Contact, ContactRepositoryError> {
        self.with_map(|map| {
            map.remove(phone)
                .ok_or_else(|| ContactRepositoryError::not_found(phone.as_ref()))
        })
    }
}
