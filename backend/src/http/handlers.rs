//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one route, calls the repository held in
//! [`AppState`], and answers with JSON for reads and newline-terminated plain
//! text for writes and errors.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, info};

use super::dto::{HealthResponse, UpdateStudentRequest};
use super::error::{
    plain_text, AppError, RepositoryResultExt, INVALID_INPUT, INVALID_REQUEST_BODY,
};
use super::state::AppState;
use crate::models::Student;

/// Result type for handlers.
pub type HandlerResult<T> = Result<T, AppError>;

pub const WELCOME_MESSAGE: &str = "Welcome to the Student API!";
pub const STUDENT_ADDED: &str = "Student added successfully";
pub const STUDENT_UPDATED: &str = "Student updated successfully";
pub const STUDENT_DELETED: &str = "Student deleted successfully";

/// How strictly a body decode failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyErrors {
    /// Every failure is "Invalid input".
    Uniform,
    /// Malformed JSON is "Invalid request body"; well-formed JSON of the
    /// wrong shape is "Invalid input".
    Distinguish,
}

fn decode_body<T: DeserializeOwned>(body: &[u8], errors: BodyErrors) -> HandlerResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting request body");
        match (errors, e.classify()) {
            (BodyErrors::Distinguish, Category::Syntax | Category::Eof) => {
                AppError::BadRequest(INVALID_REQUEST_BODY)
            }
            _ => AppError::BadRequest(INVALID_INPUT),
        }
    })
}

// =============================================================================
// Public
// =============================================================================

/// GET /
///
/// Welcome message. Not behind the auth gate.
pub async fn welcome() -> String {
    plain_text(WELCOME_MESSAGE)
}

/// GET /health
///
/// Reports whether the backing store is reachable, plus pool statistics
/// when the store has a connection pool.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        database,
        pool: state.repository.pool_stats(),
    })
}

// =============================================================================
// Student CRUD
// =============================================================================

/// GET /students
///
/// All students as a JSON array, in store order. An empty store yields `[]`.
pub async fn list_students(State(state): State<AppState>) -> HandlerResult<Json<Vec<Student>>> {
    let students = state
        .repository
        .list_students()
        .await
        .or_fail_with("Failed to fetch students")?;
    debug!(count = students.len(), "listed students");
    Ok(Json(students))
}

/// POST /students
///
/// Store the student in the body as given, including its identifier.
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> HandlerResult<(StatusCode, String)> {
    let student: Student = decode_body(&body, BodyErrors::Uniform)?;
    let stored = state
        .repository
        .create_student(student)
        .await
        .or_fail_with("Failed to add student")?;
    info!(id = %stored.id, "student added");

    Ok((StatusCode::CREATED, plain_text(STUDENT_ADDED)))
}

/// GET /students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Json<Student>> {
    let student = state
        .repository
        .get_student(&id)
        .await
        .or_fail_with("Failed to fetch student")?;
    Ok(Json(student))
}

/// PUT /students/{id}
///
/// Replace every field of the addressed student. The body is decoded before
/// the store is consulted, so a bad body is a 400 even for unknown ids.
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> HandlerResult<String> {
    let request: UpdateStudentRequest = decode_body(&body, BodyErrors::Distinguish)?;
    if let Some(body_id) = request.id.as_deref().filter(|body_id| *body_id != id) {
        debug!(%id, %body_id, "ignoring identifier in update body");
    }

    state
        .repository
        .update_student(&id, request.into_student(&id))
        .await
        .or_fail_with("Failed to update student")?;
    info!(%id, "student updated");

    Ok(plain_text(STUDENT_UPDATED))
}

/// DELETE /students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<String> {
    state
        .repository
        .delete_student(&id)
        .await
        .or_fail_with("Failed to delete student")?;
    info!(%id, "student deleted");

    Ok(plain_text(STUDENT_DELETED))
}
