//! Diesel persistence adapters for PostgreSQL and SQLite.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **One query, two backends**: a pooled connection is either PostgreSQL or
//!   SQLite; queries are expanded for both via `with_connection!`.
//! - **Strongly typed errors**: All database errors are mapped to
//!   `ContactRepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use contact_directory::outbound::persistence::{
//!     DbPool, DieselContactRepository, PoolConfig, run_migrations,
//! };
//!
//! let config = PoolConfig::new("sqlite://directory.db");
//! run_migrations(config.database_url()).await?;
//! let repo = DieselContactRepository::new(DbPool::new(config).await?);
//! ```

mod diesel_contact_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{Backend, DatabaseUrl, DbPool, PoolConfig, PoolError};
