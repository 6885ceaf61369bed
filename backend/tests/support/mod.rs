//! Shared fixtures for integration tests backed by a throwaway SQLite file.

use contact_directory::outbound::persistence::{
    DatabaseUrl, DbPool, PoolConfig, run_migrations,
};
use tempfile::TempDir;

/// Migrated SQLite database living in a temporary directory.
///
/// The directory is removed when the value is dropped, so keep it alive for
/// as long as the pool is in use.
pub struct SqliteDatabase {
    _dir: TempDir,
    pub pool: DbPool,
}

/// Create a fresh database file, apply migrations and open a pool on it.
pub async fn sqlite_database() -> Result<SqliteDatabase, String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("contacts.db");
    let raw_url = format!("sqlite://{}", path.display());

    run_migrations(&DatabaseUrl::parse(&raw_url))
        .await
        .map_err(|err| err.to_string())?;
    let pool = DbPool::new(PoolConfig::new(&raw_url))
        .await
        .map_err(|err| err.to_string())?;

    Ok(SqliteDatabase { _dir: dir, pool })
}
