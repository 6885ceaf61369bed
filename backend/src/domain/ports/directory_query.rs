//! Driving port for the public listing and search page.
//!
//! The HTTP adapter calls this port to read the directory without importing
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Contact, Error};

/// Field a search is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    /// Case-insensitive substring match on the name.
    #[default]
    Name,
    /// Exact match on the phone number.
    Phone,
}

impl SearchType {
    /// Interpret a submitted `search_type` form value.
    ///
    /// Only `phone` selects phone lookup; anything else searches by name.
    pub fn from_form_value(value: &str) -> Self {
        if value == "phone" {
            Self::Phone
        } else {
            Self::Name
        }
    }

    /// Form value that selects this search type.
    pub fn as_form_value(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
        }
    }
}

/// Search submitted from the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub search_type: SearchType,
}

impl SearchRequest {
    /// Build a request, trimming the query text.
    pub fn new(query: impl AsRef<str>, search_type: SearchType) -> Self {
        Self {
            query: query.as_ref().trim().to_owned(),
            search_type,
        }
    }
}

/// Contacts to show plus the size of the whole directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub contacts: Vec<Contact>,
    pub total_count: u64,
}

/// Domain use-case port for reading the directory.
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Every contact ordered by name.
    async fn list_contacts(&self) -> Result<DirectoryListing, Error>;

    /// Contacts matching `request`; an empty query matches nothing.
    async fn search_contacts(&self, request: &SearchRequest) -> Result<DirectoryListing, Error>;
}
