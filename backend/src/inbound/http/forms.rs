//! URL-encoded form payloads accepted by the directory pages.
//!
//! Every field defaults to empty so a partially filled form reaches the
//! domain, which reports the missing field itself.

use serde::Deserialize;

use crate::domain::ports::{AddContactRequest, RemoveContactRequest, SearchRequest, SearchType};

/// Search form posted to `/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub query: String,
    pub search_type: String,
}

impl From<SearchForm> for SearchRequest {
    fn from(form: SearchForm) -> Self {
        SearchRequest::new(form.query, SearchType::from_form_value(&form.search_type))
    }
}

/// Add form posted to `/add`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddContactForm {
    pub admin_pass: String,
    pub phone: String,
    pub name: String,
}

impl From<AddContactForm> for AddContactRequest {
    fn from(form: AddContactForm) -> Self {
        Self {
            admin_pass: form.admin_pass,
            phone: form.phone,
            name: form.name,
        }
    }
}

/// Remove form posted to `/remove`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemoveContactForm {
    pub admin_pass: String,
    pub phone: String,
}

impl From<RemoveContactForm> for RemoveContactRequest {
    fn from(form: RemoveContactForm) -> Self {
        Self {
            admin_pass: form.admin_pass,
            phone: form.phone,
        }
    }
}
