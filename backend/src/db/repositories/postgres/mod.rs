//! Postgres repository implementation using Diesel.
//!
//! Students are stored in a single `students` table keyed by the textual
//! identifier, so duplicate identifiers are rejected by the primary-key
//! constraint and surface as a query error.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Pool statistics reported through `GET /health`
//! - Automatic migration execution
//!
//! Consistency between concurrent requests is left to Postgres; each
//! operation is a single statement, so no application-level locking or
//! retrying is done.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tracing::{debug, info};

use crate::db::config::PostgresConfig;
use crate::db::repository::{
    ErrorContext, PoolStats, RepositoryError, RepositoryResult, StudentRepository,
};
use crate::models::Student;

mod models;
mod schema;

use models::*;
use schema::students;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// This blocks while the pool opens its first connections; call it from
    /// a blocking context.
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }
        info!(max_pool_size = config.max_pool_size, "Postgres repository ready");

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        debug!(count = applied.len(), "applied pending migrations");

        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                RepositoryError::from(e).with_operation(operation)
            })?;

            total_queries.fetch_add(1, Ordering::Relaxed);
            f(&mut conn).map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                e.with_operation(operation)
            })
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl StudentRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }

    fn pool_stats(&self) -> Option<PoolStats> {
        Some(self.get_pool_stats())
    }

    async fn list_students(&self) -> RepositoryResult<Vec<Student>> {
        self.with_conn("list_students", |conn| {
            let rows = students::table
                .select(StudentRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Student::from).collect())
        })
        .await
    }

    async fn create_student(&self, student: Student) -> RepositoryResult<Student> {
        let new_row = NewStudentRow::from(student);
        self.with_conn("create_student", move |conn| {
            let row = diesel::insert_into(students::table)
                .values(&new_row)
                .returning(StudentRow::as_returning())
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).for_student(&new_row.id))?;
            Ok(Student::from(row))
        })
        .await
    }

    async fn get_student(&self, id: &str) -> RepositoryResult<Student> {
        let id = id.to_string();
        self.with_conn("get_student", move |conn| {
            students::table
                .find(id.as_str())
                .select(StudentRow::as_select())
                .first(conn)
                .optional()?
                .map(Student::from)
                .ok_or_else(|| RepositoryError::student_not_found("get_student", &id))
        })
        .await
    }

    async fn update_student(&self, id: &str, student: Student) -> RepositoryResult<Student> {
        let id = id.to_string();
        let changes = StudentChangeset::from(student);
        self.with_conn("update_student", move |conn| {
            diesel::update(students::table.find(id.as_str()))
                .set(&changes)
                .returning(StudentRow::as_returning())
                .get_result(conn)
                .optional()?
                .map(Student::from)
                .ok_or_else(|| RepositoryError::student_not_found("update_student", &id))
        })
        .await
    }

    async fn delete_student(&self, id: &str) -> RepositoryResult<()> {
        let id = id.to_string();
        self.with_conn("delete_student", move |conn| {
            let deleted = diesel::delete(students::table.find(id.as_str())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::student_not_found("delete_student", &id));
            }
            Ok(())
        })
        .await
    }
}
