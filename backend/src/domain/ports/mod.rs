//! Domain ports and supporting types for the hexagonal boundary.

mod contact_repository;
mod directory_command;
mod directory_query;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{
    ContactRepository, ContactRepositoryError, InMemoryContactRepository,
};
pub use directory_command::{AddContactRequest, DirectoryCommand, RemoveContactRequest};
pub use directory_query::{DirectoryListing, DirectoryQuery, SearchRequest, SearchType};
