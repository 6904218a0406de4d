//! HTTP server module for the student backend.
//!
//! This module provides an axum-based HTTP server that exposes the student
//! store as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Auth Gate (auth.rs, /students subtree only)              │
//! │  - HTTP Basic credential check against the allow-list     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Body decoding, JSON / plain-text responses             │
//! │  - Error to status mapping                                │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod serve;
pub mod state;

pub use auth::Credentials;
pub use router::create_router;
pub use serve::{serve_with_shutdown, shutdown_signal, ServeError};
pub use state::AppState;
