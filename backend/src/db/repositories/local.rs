//! In-memory local repository implementation.
//!
//! Students live in a `Vec` kept in insertion order behind a single lock.
//! Every operation, including the scan-then-mutate sequences of update and
//! delete, runs inside one critical section, so concurrent requests observe
//! a sequentially consistent store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::db::repository::{RepositoryError, RepositoryResult, StudentRepository};
use crate::models::Student;

/// In-memory local repository.
///
/// Cloning yields another handle to the same underlying collection, which is
/// how tests keep a view of the store after handing it to the router.
///
/// Identifier uniqueness is not enforced: creating a duplicate id appends a
/// second record, and lookups act on the first match.
///
/// # Example
/// ```
/// use student_server::db::repositories::LocalRepository;
/// use student_server::models::Student;
///
/// let repo = LocalRepository::with_students(vec![Student::new("1", "Al Mamun", 20, "A")]);
/// assert_eq!(repo.student_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    students: Vec<Student>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            students: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with `students`, in order.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        let repo = Self::new();
        repo.data.write().students.extend(students);
        repo
    }

    /// Set the health status for testing storage failures.
    ///
    /// While unhealthy every operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.data.write().students.clear();
    }

    /// Get the number of students stored.
    pub fn student_count(&self) -> usize {
        self.data.read().students.len()
    }

    /// Snapshot of the stored students, in store order.
    pub fn snapshot(&self) -> Vec<Student> {
        self.data.read().students.clone()
    }

    fn check_health(data: &LocalData) -> RepositoryResult<()> {
        if !data.is_healthy {
            return Err(RepositoryError::connection("Store is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_students(&self) -> RepositoryResult<Vec<Student>> {
        let data = self.data.read();
        Self::check_health(&data).map_err(|e| e.with_operation("list_students"))?;
        Ok(data.students.clone())
    }

    async fn create_student(&self, student: Student) -> RepositoryResult<Student> {
        let mut data = self.data.write();
        Self::check_health(&data).map_err(|e| e.with_operation("create_student"))?;
        debug!(id = %student.id, "storing student in memory");
        data.students.push(student.clone());
        Ok(student)
    }

    async fn get_student(&self, id: &str) -> RepositoryResult<Student> {
        let data = self.data.read();
        Self::check_health(&data).map_err(|e| e.with_operation("get_student"))?;
        data.students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::student_not_found("get_student", id))
    }

    async fn update_student(&self, id: &str, student: Student) -> RepositoryResult<Student> {
        let mut data = self.data.write();
        Self::check_health(&data).map_err(|e| e.with_operation("update_student"))?;
        let slot = data
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RepositoryError::student_not_found("update_student", id))?;
        *slot = student.with_id(id);
        Ok(slot.clone())
    }

    async fn delete_student(&self, id: &str) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::check_health(&data).map_err(|e| e.with_operation("delete_student"))?;
        let index = data
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RepositoryError::student_not_found("delete_student", id))?;
        data.students.remove(index);
        Ok(())
    }
}
