//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use contact_directory::Trace;
use contact_directory::domain::ContactDirectoryService;
use contact_directory::inbound::http::configure;
use contact_directory::inbound::http::health::HealthState;
use contact_directory::inbound::http::state::HttpState;
use contact_directory::outbound::persistence::DieselContactRepository;

fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = Arc::new(DieselContactRepository::new(config.db_pool.clone()));
    let service = ContactDirectoryService::new(repository, config.admin_secret.clone());
    web::Data::new(HttpState::from_service(service))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
}

/// Construct an Actix HTTP server serving the directory.
///
/// Marks `health_state` ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();
    let (host, port) = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind((host, port))?
    .run();

    info!(host, port, backend = %config.db_pool.backend(), "contact directory listening");
    health_state.mark_ready();
    Ok(server)
}
