//! Registration and login HTTP handlers

use crate::{
    auth::AuthContext,
    error::AppError,
    middleware::AppState,
    models::{LoginRequest, RegisterRequest, UserResponse},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new account
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let user = state.auth_service.register(&req.username, &req.password).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log in with username and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(&req.username, &req.password).await?;

    Ok(Json(response))
}

/// Echo the authenticated caller's identity
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .auth_service
        .find_user(auth_context.user_id)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    Ok(Json(UserResponse::from(user)))
}
