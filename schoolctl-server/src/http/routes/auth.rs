//! Login, current profile and password change

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};

use schoolctl_core::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, UserProfile,
};

use crate::auth;
use crate::http::error::ApiError;
use crate::http::extractors::{AuthUser, ValidJson};
use crate::http::server::AppState;

/// POST /auth/login - exchange credentials for a token
async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (email, password) = req.validate()?;
    let response = auth::login(&state.pool, &state.tokens, &email, password).await?;
    Ok(Json(response))
}

/// GET /auth/me - profile of the token holder
async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = auth::profile(&state.pool, &claims).await?;
    Ok(Json(profile))
}

/// PUT /auth/password
async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidJson(req): ValidJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (current, new) = req.validate()?;
    auth::change_password(&state.pool, &claims, current, new).await?;
    Ok(Json(MessageResponse::new("password updated")))
}

/// Routes reachable without a token
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}

/// Routes behind the token gate
pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/password", put(change_password))
}
