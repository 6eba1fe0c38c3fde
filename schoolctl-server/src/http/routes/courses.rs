//! Course endpoints
//!
//! Listings carry the assigned teacher's display name; single reads and
//! writes return the bare course row.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use schoolctl_core::models::{Course, CourseInput, CourseListing, MessageResponse};

use crate::db::repos::CourseRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;

/// GET /courses
async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CourseListing>>, ApiError> {
    let courses = CourseRepo::new(&state.pool).list().await?;
    Ok(Json(courses))
}

/// GET /courses/{id}
async fn get_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Course>, ApiError> {
    let course = CourseRepo::new(&state.pool).get(id).await?;
    Ok(Json(course))
}

/// POST /courses - unknown teacher_id is a 400
async fn create_course(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<CourseInput>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    let new = input.validate()?;
    let course = CourseRepo::new(&state.pool).create(&new).await?;
    tracing::info!(course_id = course.id, teacher_id = ?course.teacher_id, "course created");

    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /courses/{id}
async fn update_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<CourseInput>,
) -> Result<Json<Course>, ApiError> {
    let new = input.validate()?;
    let course = CourseRepo::new(&state.pool).update(id, &new).await?;
    Ok(Json(course))
}

/// DELETE /courses/{id} - grades and attendance go with it
async fn delete_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    CourseRepo::new(&state.pool).delete(id).await?;
    tracing::info!(course_id = id, "course deleted");
    Ok(Json(MessageResponse::new("course deleted")))
}

/// Course routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}
