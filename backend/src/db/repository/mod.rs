//! Repository trait for abstracting student storage.
//!
//! This trait defines the full capability set of a student store, allowing
//! the in-memory and Postgres implementations to be swapped via dependency
//! injection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Student;

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Connection pool statistics for pooled backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
}

/// Storage operations over student records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; a single instance is shared by all
/// in-flight requests. Each operation is atomic with respect to the others.
///
/// # Error Handling
/// Operations addressing a single record return [`RepositoryError::NotFound`]
/// when no record carries the given identifier. Any other error means the
/// backing medium rejected the operation and the store is unchanged.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Pool statistics, for backends that hold a connection pool.
    fn pool_stats(&self) -> Option<PoolStats> {
        None
    }

    /// List every stored student in store order. An empty store yields an
    /// empty vector.
    async fn list_students(&self) -> RepositoryResult<Vec<Student>>;

    /// Persist a new student and return the stored record.
    ///
    /// The identifier is taken from the record as given; no identifier is
    /// generated.
    async fn create_student(&self, student: Student) -> RepositoryResult<Student>;

    /// Fetch a single student by identifier.
    async fn get_student(&self, id: &str) -> RepositoryResult<Student>;

    /// Replace every field of the student addressed by `id`.
    ///
    /// `id` stays authoritative: the stored record keeps it even when
    /// `student.id` differs.
    async fn update_student(&self, id: &str, student: Student) -> RepositoryResult<Student>;

    /// Remove the student addressed by `id`, preserving the order of the rest.
    async fn delete_student(&self, id: &str) -> RepositoryResult<()>;
}
