//! HTTP server configuration object.

use contact_directory::config::AppConfig;
use contact_directory::domain::AdminSecret;
use contact_directory::outbound::persistence::DbPool;

/// Everything `create_server` needs, resolved before the listener binds.
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) admin_secret: AdminSecret,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Combine loaded application settings with a ready connection pool.
    #[must_use]
    pub fn new(app: &AppConfig, db_pool: DbPool) -> Self {
        Self {
            host: app.host.clone(),
            port: app.port,
            admin_secret: app.admin_secret.clone(),
            db_pool,
        }
    }

    /// `(host, port)` the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
