//! Application state for the HTTP server.

use std::sync::Arc;

use super::auth::Credentials;
use crate::db::repository::StudentRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for student storage
    pub repository: Arc<dyn StudentRepository>,
    /// Username/password pairs accepted by the auth gate
    pub credentials: Arc<Credentials>,
}

impl AppState {
    /// Create a new application state with the given repository and
    /// credential allow-list.
    pub fn new(repository: Arc<dyn StudentRepository>, credentials: Credentials) -> Self {
        Self {
            repository,
            credentials: Arc::new(credentials),
        }
    }
}
