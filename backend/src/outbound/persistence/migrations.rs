//! Embedded schema migrations.
//!
//! Diesel's migration harness is synchronous, so migrations run on a blocking
//! thread with a dedicated connection before the async pool serves traffic.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::{Backend, DatabaseUrl};

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while bringing the schema up to date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not open the dedicated migration connection.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

impl MigrationError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an apply error with the given message.
    pub fn apply(message: impl Into<String>) -> Self {
        Self::Apply {
            message: message.into(),
        }
    }
}

fn apply_pending<C>(conn: &mut C) -> Result<usize, MigrationError>
where
    C: MigrationHarness<C::Backend> + Connection,
{
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| applied.len())
        .map_err(|err| MigrationError::apply(err.to_string()))
}

fn migrate_blocking(url: &DatabaseUrl) -> Result<usize, MigrationError> {
    let target = url.connection_target();
    match url.backend() {
        Backend::Postgres => {
            let mut conn = PgConnection::establish(target)
                .map_err(|err| MigrationError::connection(err.to_string()))?;
            apply_pending(&mut conn)
        }
        Backend::Sqlite => {
            let mut conn = SqliteConnection::establish(target)
                .map_err(|err| MigrationError::connection(err.to_string()))?;
            apply_pending(&mut conn)
        }
    }
}

/// Apply any pending migrations to the database at `url`.
///
/// Idempotent: running against an up-to-date schema applies nothing.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_migrations(url: &DatabaseUrl) -> Result<(), MigrationError> {
    let owned = url.clone();
    let applied = tokio::task::spawn_blocking(move || migrate_blocking(&owned))
        .await
        .map_err(|err| MigrationError::apply(format!("migration task failed: {err}")))??;
    info!(backend = %url.backend(), applied, "database schema up to date");
    Ok(())
}
