//! Data Transfer Objects for the HTTP API.
//!
//! Create and read use [`Student`] directly; only update and health need a
//! shape of their own.

use serde::{Deserialize, Serialize};

use crate::db::PoolStats;
use crate::models::student::deserialize_optional_student_id;
use crate::models::Student;

/// Request body for `PUT /students/{id}`.
///
/// Every field except `id` is required; the identifier in the path wins over
/// any identifier in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    #[serde(
        default,
        alias = "ID",
        deserialize_with = "deserialize_optional_student_id"
    )]
    pub id: Option<String>,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Age")]
    pub age: i32,
    #[serde(alias = "Grade")]
    pub grade: String,
}

impl UpdateStudentRequest {
    /// Build the replacement record addressed by `id`.
    pub fn into_student(self, id: &str) -> Student {
        Student::new(id, self.name, self.age, self.grade)
    }
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    /// Present only for pooled backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolStats>,
}
