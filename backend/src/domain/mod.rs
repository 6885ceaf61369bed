//! Domain primitives, ports and the directory service.
//!
//! Purpose: Define the contact entity, the admin gate and the use-case
//! service that the HTTP adapter drives. Nothing in this module knows about
//! actix, Diesel or environment variables.
//!
//! Public surface:
//! - Contact, PhoneNumber, ContactName — the directory entry and its fields.
//! - AdminSecret, authorize — the shared-secret check for mutations.
//! - ContactDirectoryService — implements `DirectoryQuery` and
//!   `DirectoryCommand` over a `ContactRepository`.
//! - Error, ErrorCode — transport-agnostic failures surfaced to adapters.

pub mod admin_gate;
pub mod contact;
pub mod directory_service;
pub mod error;
pub mod ports;

pub use self::admin_gate::{AdminSecret, authorize};
pub use self::contact::{
    Contact, ContactName, ContactValidationError, NAME_MAX, PHONE_MAX, PhoneNumber,
};
pub use self::directory_service::ContactDirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use contact_directory::domain::{DirectoryResult, Error};
///
/// fn check() -> DirectoryResult<()> {
///     Err(Error::wrong_password())
/// }
/// assert!(check().is_err());
/// ```
pub type DirectoryResult<T> = Result<T, Error>;
