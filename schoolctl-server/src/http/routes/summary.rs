//! Dashboard summary endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use schoolctl_core::models::DashboardSummary;

use crate::db::repos::SummaryRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /summary - totals, per-course averages and the last seven attendance days
async fn summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let snapshot = SummaryRepo::new(&state.pool).snapshot().await?;
    Ok(Json(snapshot))
}

/// Summary route
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/summary", get(summary))
}
