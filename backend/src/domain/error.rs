//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each code to a
//! status and renders the message inline on the form that produced it.

use std::fmt;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The submitted admin password does not match the configured secret.
    WrongPassword,
    /// A required form field was empty.
    MissingField,
    /// A form field was present but failed validation.
    InvalidField,
    /// A contact with the submitted phone already exists.
    DuplicateKey,
    /// No contact exists for the submitted phone.
    NotFound,
    /// The store could not be reached.
    StoreUnavailable,
    /// The store rejected or failed the operation.
    StoreFailure,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use contact_directory::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("555-0100");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "No contact with phone 555-0100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    /// Panics when `message` is blank; constructors in this module only pass
    /// non-empty literals.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown next to the form.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The admin password was rejected.
    pub fn wrong_password() -> Self {
        Self::new(ErrorCode::WrongPassword, "Wrong admin password!")
    }

    /// Convenience constructor for [`ErrorCode::MissingField`].
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingField, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidField`].
    pub fn invalid_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidField, message)
    }

    /// A contact with `phone` already exists.
    pub fn duplicate_key(phone: &str) -> Self {
        Self::new(ErrorCode::DuplicateKey, format!("Phone {phone} already exists!"))
    }

    /// No contact exists for `phone`.
    pub fn not_found(phone: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("No contact with phone {phone}"))
    }

    /// Convenience constructor for [`ErrorCode::StoreUnavailable`].
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreFailure`].
    pub fn store_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreFailure, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
