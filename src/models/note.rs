//! Note domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A note owned by exactly one user; `user_id` is set at creation and
/// never changes.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New note record handed to the store; the store assigns the ID
#[derive(Debug, Clone)]
pub struct NewNote {
    pub user_id: i64,
    pub title: String,
    pub content: String,
}

/// Create/update note request
#[derive(Debug, Deserialize, Validate)]
pub struct NoteRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[serde(default)]
    pub content: String,
}
