//! Contact directory entry-point: loads configuration, prepares the database
//! and serves the directory pages.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use contact_directory::config::AppConfig;
use contact_directory::inbound::http::health::HealthState;
use contact_directory::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = AppConfig::from_env().wrap_err("load configuration")?;
    let pool_config = PoolConfig::new(&config.database_url);
    run_migrations(pool_config.database_url())
        .await
        .wrap_err("apply database migrations")?;
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(&config, pool))
        .wrap_err("start HTTP server")?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("HTTP server failed")
}
