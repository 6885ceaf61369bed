//! Environment-driven application configuration.
//!
//! Everything the process needs from its environment is read once, here, and
//! handed to the persistence layer and the directory service as an explicit
//! [`AppConfig`]. Debug builds tolerate missing or malformed values with a
//! warning; release builds refuse to start.

use tracing::warn;

use crate::domain::AdminSecret;

/// Environment variable naming the database to connect to.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the shared admin password.
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";
/// Environment variable for the bind host.
pub const HOST_ENV: &str = "HOST";
/// Environment variable for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Database used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://directory.db";
/// Admin password used by debug builds when `ADMIN_PASSWORD` is unset.
pub const FALLBACK_ADMIN_PASSWORD: &str = "fallback-secret-for-local-testing";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const PORT_EXPECTED: &str = "an integer in 1..=65535";

/// Environment abstraction for configuration lookups.
///
/// This trait allows testing with mock environments without unsafe env var
/// mutations.
pub trait ConfigEnv {
    /// Fetch a string value by name.
    fn string(&self, name: &str) -> Option<String>;
}

/// Environment access backed by the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultConfigEnv;

impl DefaultConfigEnv {
    /// Create a new environment reader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConfigEnv for DefaultConfigEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require explicit, valid settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contact_directory::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings the process runs with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Raw database URL; see `outbound::persistence::DatabaseUrl`.
    pub database_url: String,
    /// Secret guarding add and remove.
    pub admin_secret: AdminSecret,
    /// Host or IP address to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the real process environment using the
    /// current build mode.
    ///
    /// # Errors
    ///
    /// See [`app_config_from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        app_config_from_env(&DefaultConfigEnv, BuildMode::from_debug_assertions())
    }

    /// `(host, port)` pair accepted by `HttpServer::bind`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Build application settings from environment variables and build mode.
///
/// # Errors
///
/// Release builds fail when `ADMIN_PASSWORD` is unset or `PORT` is invalid.
///
/// # Examples
///
/// ```rust
/// use contact_directory::config::{BuildMode, ConfigEnv, app_config_from_env};
///
/// struct Vars;
///
/// impl ConfigEnv for Vars {
///     fn string(&self, name: &str) -> Option<String> {
///         match name {
///             "ADMIN_PASSWORD" => Some("hunter2".to_owned()),
///             "PORT" => Some("9000".to_owned()),
///             _ => None,
///         }
///     }
/// }
///
/// let config = app_config_from_env(&Vars, BuildMode::Release).expect("valid config");
/// assert_eq!(config.database_url, "sqlite://directory.db");
/// assert_eq!(config.bind_addr(), ("0.0.0.0", 9000));
/// ```
pub fn app_config_from_env<E: ConfigEnv>(
    env: &E,
    mode: BuildMode,
) -> Result<AppConfig, ConfigError> {
    let database_url =
        non_blank(env, DATABASE_URL_ENV).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
    let admin_secret = admin_secret_from_env(env, mode)?;
    let host = non_blank(env, HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_owned());
    let port = port_from_env(env, mode)?;

    Ok(AppConfig {
        database_url,
        admin_secret,
        host,
        port,
    })
}

fn non_blank<E: ConfigEnv>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn admin_secret_from_env<E: ConfigEnv>(
    env: &E,
    mode: BuildMode,
) -> Result<AdminSecret, ConfigError> {
    // Blank means unset; otherwise the value is used verbatim.
    match env
        .string(ADMIN_PASSWORD_ENV)
        .filter(|value| !value.trim().is_empty())
    {
        Some(secret) => Ok(AdminSecret::new(secret)),
        None => debug_warn_or_error(
            mode,
            AdminSecret::new(FALLBACK_ADMIN_PASSWORD),
            ConfigError::MissingEnv {
                name: ADMIN_PASSWORD_ENV,
            },
            || warn!("ADMIN_PASSWORD not set; using the insecure development fallback"),
        ),
    }
}

fn port_from_env<E: ConfigEnv>(env: &E, mode: BuildMode) -> Result<u16, ConfigError> {
    let Some(value) = non_blank(env, PORT_ENV) else {
        return Ok(DEFAULT_PORT);
    };
    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => {
            let value_clone = value.clone();
            debug_warn_or_error(
                mode,
                DEFAULT_PORT,
                ConfigError::InvalidEnv {
                    name: PORT_ENV,
                    value: value_clone,
                    expected: PORT_EXPECTED,
                },
                || warn!(value = %value, "invalid PORT; defaulting to {DEFAULT_PORT}"),
            )
        }
    }
}

fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: ConfigError,
    warn_fn: F,
) -> Result<T, ConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for build-mode dependent configuration loading.
    use std::collections::HashMap;

    use mockable::{Env as MockableEnv, MockEnv};
    use rstest::rstest;

    use super::*;
    use crate::domain::authorize;

    struct TestEnv {
        inner: MockEnv,
    }

    impl ConfigEnv for TestEnv {
        fn string(&self, name: &str) -> Option<String> {
            MockableEnv::string(&self.inner, name)
        }
    }

    fn mock_env(vars: &[(&str, &str)]) -> TestEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        let mut inner = MockEnv::new();
        inner
            .expect_string()
            .returning(move |name| vars.get(name).cloned());
        TestEnv { inner }
    }

    #[rstest]
    #[case(BuildMode::Debug)]
    #[case(BuildMode::Release)]
    fn defaults_apply_when_unset(#[case] mode: BuildMode) {
        let env = mock_env(&[(ADMIN_PASSWORD_ENV, "s3cret")]);
        let config = app_config_from_env(&env, mode).expect("config loads");

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr(), ("0.0.0.0", 8080));
        assert!(authorize(&config.admin_secret, "s3cret"));
    }

    #[rstest]
    fn explicit_values_are_used() {
        let env = mock_env(&[
            (DATABASE_URL_ENV, "postgres://localhost/contacts"),
            (ADMIN_PASSWORD_ENV, "s3cret"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
        ]);
        let config = app_config_from_env(&env, BuildMode::Release).expect("config loads");

        assert_eq!(config.database_url, "postgres://localhost/contacts");
        assert_eq!(config.bind_addr(), ("127.0.0.1", 3000));
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(ADMIN_PASSWORD_ENV, "   ")])]
    fn debug_falls_back_to_development_password(#[case] vars: &[(&str, &str)]) {
        let config = app_config_from_env(&mock_env(vars), BuildMode::Debug).expect("config loads");
        assert!(authorize(&config.admin_secret, FALLBACK_ADMIN_PASSWORD));
    }

    #[rstest]
    fn admin_password_keeps_surrounding_whitespace() {
        let env = mock_env(&[(ADMIN_PASSWORD_ENV, "  pass phrase ")]);
        let config = app_config_from_env(&env, BuildMode::Release).expect("config loads");

        assert!(authorize(&config.admin_secret, "  pass phrase "));
        assert!(!authorize(&config.admin_secret, "pass phrase"));
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(ADMIN_PASSWORD_ENV, "")])]
    fn release_requires_admin_password(#[case] vars: &[(&str, &str)]) {
        let err = app_config_from_env(&mock_env(vars), BuildMode::Release)
            .expect_err("release must reject missing password");
        assert_eq!(
            err,
            ConfigError::MissingEnv {
                name: ADMIN_PASSWORD_ENV
            }
        );
    }

    #[rstest]
    #[case("not-a-port")]
    #[case("0")]
    #[case("70000")]
    fn invalid_port_defaults_in_debug(#[case] port: &str) {
        let env = mock_env(&[(ADMIN_PASSWORD_ENV, "s3cret"), (PORT_ENV, port)]);
        let config = app_config_from_env(&env, BuildMode::Debug).expect("config loads");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[rstest]
    fn invalid_port_fails_in_release() {
        let env = mock_env(&[(ADMIN_PASSWORD_ENV, "s3cret"), (PORT_ENV, "http")]);
        let err = app_config_from_env(&env, BuildMode::Release)
            .expect_err("release must reject invalid port");
        assert!(matches!(err, ConfigError::InvalidEnv { name: PORT_ENV, .. }));
        assert!(err.to_string().contains("'http'"));
    }
}
