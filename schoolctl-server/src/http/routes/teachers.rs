//! Teacher endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use schoolctl_core::models::{MessageResponse, Teacher, TeacherInput};

use crate::db::repos::TeacherRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;

async fn list_teachers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Teacher>>, ApiError> {
    Ok(Json(TeacherRepo::new(&state.pool).list().await?))
}

async fn get_teacher(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Teacher>, ApiError> {
    Ok(Json(TeacherRepo::new(&state.pool).get(id).await?))
}

async fn create_teacher(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<TeacherInput>,
) -> Result<(StatusCode, Json<Teacher>), ApiError> {
    let new = input.validate()?;
    let teacher = TeacherRepo::new(&state.pool).create(&new).await?;
    tracing::info!(teacher_id = teacher.id, "teacher created");

    Ok((StatusCode::CREATED, Json(teacher)))
}

async fn update_teacher(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<TeacherInput>,
) -> Result<Json<Teacher>, ApiError> {
    let new = input.validate()?;
    Ok(Json(TeacherRepo::new(&state.pool).update(id, &new).await?))
}

/// DELETE /teachers/{id} - courses they taught are kept, unassigned
async fn delete_teacher(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    TeacherRepo::new(&state.pool).delete(id).await?;
    tracing::info!(teacher_id = id, "teacher deleted");
    Ok(Json(MessageResponse::new("teacher deleted")))
}

/// Teacher routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}
