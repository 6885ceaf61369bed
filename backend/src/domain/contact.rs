//! Contact data model.

use std::fmt;

/// Maximum number of characters stored for a phone number.
pub const PHONE_MAX: usize = 30;
/// Maximum number of characters stored for a contact name.
pub const NAME_MAX: usize = 100;

/// Validation errors returned by the contact constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyPhone,
    PhoneTooLong { max: usize },
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPhone => write!(f, "phone must not be empty"),
            Self::PhoneTooLong { max } => write!(f, "phone must be at most {max} characters"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// Phone number acting as the contact's primary key.
///
/// The format is not validated; surrounding whitespace is trimmed so that
/// lookups and inserts agree on the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`].
    pub fn new(phone: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = phone.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContactValidationError::EmptyPhone);
        }
        if trimmed.chars().count() > PHONE_MAX {
            return Err(ContactValidationError::PhoneTooLong { max: PHONE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Human readable contact name, the primary search field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactName(String);

impl ContactName {
    /// Validate and construct a [`ContactName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(ContactValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ContactName> for String {
    fn from(value: ContactName) -> Self {
        value.0
    }
}

/// A directory entry.
///
/// ## Invariants
/// - `phone` is unique across the store and never empty.
/// - `name` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    phone: PhoneNumber,
    name: ContactName,
}

impl Contact {
    /// Build a new [`Contact`] from validated components.
    pub fn new(phone: PhoneNumber, name: ContactName) -> Self {
        Self { phone, name }
    }

    /// Fallible constructor enforcing phone and name invariants.
    ///
    /// Prefer [`Contact::new`] when components are already validated.
    pub fn try_from_strings(
        phone: impl AsRef<str>,
        name: impl AsRef<str>,
    ) -> Result<Self, ContactValidationError> {
        let phone = PhoneNumber::new(phone)?;
        let name = ContactName::new(name)?;
        Ok(Self::new(phone, name))
    }

    /// Primary key.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Display name.
    pub fn name(&self) -> &ContactName {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn phone_is_trimmed() {
        let phone = PhoneNumber::new("  555-0100 ").expect("valid phone");
        assert_eq!(phone.as_ref(), "555-0100");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_phone_is_rejected(#[case] raw: &str) {
        assert_eq!(PhoneNumber::new(raw), Err(ContactValidationError::EmptyPhone));
    }

    #[rstest]
    fn overlong_phone_is_rejected() {
        let raw = "9".repeat(PHONE_MAX + 1);
        assert_eq!(
            PhoneNumber::new(raw),
            Err(ContactValidationError::PhoneTooLong { max: PHONE_MAX })
        );
    }

    #[rstest]
    fn phone_at_limit_is_accepted() {
        assert!(PhoneNumber::new("9".repeat(PHONE_MAX)).is_ok());
    }

    #[rstest]
    #[case("", ContactValidationError::EmptyName)]
    #[case("\t", ContactValidationError::EmptyName)]
    fn blank_name_is_rejected(#[case] raw: &str, #[case] expected: ContactValidationError) {
        assert_eq!(ContactName::new(raw), Err(expected));
    }

    #[rstest]
    fn name_length_counts_characters_not_bytes() {
        let raw = "é".repeat(NAME_MAX);
        assert!(ContactName::new(raw).is_ok());
    }

    #[rstest]
    fn try_from_strings_reports_first_invalid_field() {
        let err = Contact::try_from_strings(" ", "").expect_err("both fields are blank");
        assert_eq!(err, ContactValidationError::EmptyPhone);
    }

    #[rstest]
    fn try_from_strings_builds_contact() {
        let contact = Contact::try_from_strings("123", " Bob ").expect("valid contact");
        assert_eq!(contact.phone().as_ref(), "123");
        assert_eq!(contact.name().as_ref(), "Bob");
    }
}
