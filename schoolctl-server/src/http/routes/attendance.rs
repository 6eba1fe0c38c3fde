//! Attendance endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use schoolctl_core::models::{Attendance, AttendanceInput, AttendanceListing, MessageResponse};

use crate::db::repos::AttendanceRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;

/// GET /attendance - newest first, with student and course names
async fn list_attendance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AttendanceListing>>, ApiError> {
    Ok(Json(AttendanceRepo::new(&state.pool).list().await?))
}

/// GET /attendance/{id}
async fn get_attendance(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Attendance>, ApiError> {
    Ok(Json(AttendanceRepo::new(&state.pool).get(id).await?))
}

/// POST /attendance - status defaults to Present
async fn create_attendance(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<AttendanceInput>,
) -> Result<(StatusCode, Json<Attendance>), ApiError> {
    let new = input.validate()?;
    let record = AttendanceRepo::new(&state.pool).create(&new).await?;
    tracing::info!(
        attendance_id = record.id,
        status = %record.status,
        "attendance recorded"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /attendance/{id}
async fn update_attendance(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<AttendanceInput>,
) -> Result<Json<Attendance>, ApiError> {
    let new = input.validate()?;
    Ok(Json(AttendanceRepo::new(&state.pool).update(id, &new).await?))
}

/// DELETE /attendance/{id}
async fn delete_attendance(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    AttendanceRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::new("attendance deleted")))
}

/// Attendance routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/attendance", get(list_attendance).post(create_attendance))
        .route(
            "/attendance/{id}",
            get(get_attendance)
                .put(update_attendance)
                .delete(delete_attendance),
        )
}
