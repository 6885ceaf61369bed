//! Shared-secret gate protecting directory mutations.
//!
//! There are no sessions or tokens: every add/remove request carries the
//! password and is checked against the configured secret on its own.

use std::fmt;

use zeroize::Zeroizing;

/// Configured admin password.
///
/// The value is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct AdminSecret(Zeroizing<String>);

impl AdminSecret {
    /// Wrap a configured secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(<redacted>)")
    }
}

/// Return whether `submitted` matches the configured secret.
///
/// # Examples
/// ```
/// use contact_directory::domain::{AdminSecret, authorize};
///
/// let secret = AdminSecret::new("hunter2");
/// assert!(authorize(&secret, "hunter2"));
/// assert!(!authorize(&secret, "hunter3"));
/// ```
pub fn authorize(configured: &AdminSecret, submitted: &str) -> bool {
    configured.expose() == submitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("s3cret", true)]
    #[case("S3CRET", false)]
    #[case(" s3cret", false)]
    #[case("", false)]
    fn authorize_requires_exact_match(#[case] submitted: &str, #[case] expected: bool) {
        let secret = AdminSecret::new("s3cret");
        assert_eq!(authorize(&secret, submitted), expected);
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let secret = AdminSecret::new("s3cret");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("s3cret"));
    }
}
