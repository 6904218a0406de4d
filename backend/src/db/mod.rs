//! Database module for student storage.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (handlers receive Arc<dyn StudentRepository>)│
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼──────────────┐   ┌───────────▼────────────┐
//! │ LocalRepository  │   │ PostgresRepository     │
//! │ (in-memory Vec)  │   │ (Diesel + r2d2)        │
//! └──────────────────┘   └────────────────────────┘
//! ```
//!
//! The module includes:
//! - `repository`: Trait definition and error types
//! - `repositories::local`: In-memory implementation
//! - `repositories::postgres`: Postgres implementation (`postgres-repo` feature)
//! - `factory`: Factory for creating repository instances
//! - `config`: Postgres connection settings

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod config;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use config::PostgresConfig;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, PoolStats, RepositoryError, RepositoryResult, StudentRepository,
};
