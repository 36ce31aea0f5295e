//! Note CRUD HTTP handlers
//!
//! Every handler receives the authenticated caller via [`AuthContext`];
//! the note service enforces that only the owner sees a given note.

use crate::{auth::AuthContext, error::AppError, middleware::AppState, models::NoteRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Create a note
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<NoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let note = state
        .note_service
        .create(auth_context.user_id, &req.title, &req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// List the caller's notes
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let notes = state.note_service.list(auth_context.user_id).await?;

    Ok(Json(notes))
}

/// Fetch a single note
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let note = state.note_service.get(auth_context.user_id, id).await?;

    Ok(Json(note))
}

/// Update a note's title and content
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<NoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let note = state
        .note_service
        .update(auth_context.user_id, id, &req.title, &req.content)
        .await?;

    Ok(Json(note))
}

/// Delete a note
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.note_service.delete(auth_context.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
