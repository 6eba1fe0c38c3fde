//! Student endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use schoolctl_core::models::{MessageResponse, Student, StudentInput};

use crate::db::repos::StudentRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;

/// GET /students - all students by last name
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = StudentRepo::new(&state.pool).list().await?;
    Ok(Json(students))
}

/// GET /students/{id}
async fn get_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Student>, ApiError> {
    let student = StudentRepo::new(&state.pool).get(id).await?;
    Ok(Json(student))
}

/// POST /students - enrollment date defaults to today
async fn create_student(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<StudentInput>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let new = input.validate()?;
    let student = StudentRepo::new(&state.pool).create(&new).await?;
    tracing::info!(student_id = student.id, "student created");

    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /students/{id} - full replacement, same rules as create
async fn update_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    let new = input.validate()?;
    let student = StudentRepo::new(&state.pool).update(id, &new).await?;
    Ok(Json(student))
}

/// DELETE /students/{id} - grades and attendance go with it
async fn delete_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    StudentRepo::new(&state.pool).delete(id).await?;
    tracing::info!(student_id = id, "student deleted");
    Ok(Json(MessageResponse::new("student deleted")))
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}
