//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DirectoryCommand, DirectoryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub query: Arc<dyn DirectoryQuery>,
    pub command: Arc<dyn DirectoryCommand>,
}

impl HttpState {
    /// Construct state from separate port implementations.
    pub fn new(query: Arc<dyn DirectoryQuery>, command: Arc<dyn DirectoryCommand>) -> Self {
        Self { query, command }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use contact_directory::domain::ports::InMemoryContactRepository;
    /// use contact_directory::domain::{AdminSecret, ContactDirectoryService};
    /// use contact_directory::inbound::http::state::HttpState;
    ///
    /// let service = ContactDirectoryService::new(
    ///     Arc::new(InMemoryContactRepository::new()),
    ///     AdminSecret::new("hunter2"),
    /// );
    /// let _state = HttpState::from_service(service);
    /// ```
    pub fn from_service<S>(service: S) -> Self
    where
        S: DirectoryQuery + DirectoryCommand + 'static,
    {
        let shared = Arc::new(service);
        Self {
            query: Arc::clone(&shared) as Arc<dyn DirectoryQuery>,
            command: shared,
        }
    }
}
