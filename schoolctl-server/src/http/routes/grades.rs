//! Grade endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use schoolctl_core::models::{Grade, GradeInput, GradeListing, MessageResponse};

use crate::db::repos::GradeRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;

/// GET /grades - newest first, with student and course names
async fn list_grades(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GradeListing>>, ApiError> {
    Ok(Json(GradeRepo::new(&state.pool).list().await?))
}

async fn get_grade(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Grade>, ApiError> {
    Ok(Json(GradeRepo::new(&state.pool).get(id).await?))
}

async fn create_grade(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<GradeInput>,
) -> Result<(StatusCode, Json<Grade>), ApiError> {
    let new = input.validate()?;
    let grade = GradeRepo::new(&state.pool).create(&new).await?;
    tracing::info!(
        grade_id = grade.id,
        student_id = grade.student_id,
        course_id = grade.course_id,
        "grade recorded"
    );

    Ok((StatusCode::CREATED, Json(grade)))
}

async fn update_grade(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<GradeInput>,
) -> Result<Json<Grade>, ApiError> {
    let new = input.validate()?;
    Ok(Json(GradeRepo::new(&state.pool).update(id, &new).await?))
}

async fn delete_grade(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    GradeRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::new("grade deleted")))
}

/// Grade routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/grades", get(list_grades).post(create_grade))
        .route(
            "/grades/{id}",
            get(get_grade).put(update_grade).delete(delete_grade),
        )
}
