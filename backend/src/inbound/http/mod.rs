//! HTTP inbound adapter serving the directory pages and health probes.

pub mod directory;
pub mod error;
pub mod forms;
pub mod health;
pub mod state;
pub mod views;

use actix_web::web;

/// Register the directory pages and health probes.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use contact_directory::domain::ports::InMemoryContactRepository;
/// use contact_directory::domain::{AdminSecret, ContactDirectoryService};
/// use contact_directory::inbound::http::{self, health::HealthState, state::HttpState};
///
/// let state = HttpState::from_service(ContactDirectoryService::new(
///     Arc::new(InMemoryContactRepository::new()),
///     AdminSecret::new("hunter2"),
/// ));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(directory::list_contacts)
        .service(directory::search_contacts)
        .service(directory::add_form)
        .service(directory::add_contact)
        .service(directory::remove_form)
        .service(directory::remove_contact)
        .service(health::ready)
        .service(health::live);
}
