//! Note service with per-user ownership enforcement

use crate::{
    error::{AppError, Result},
    models::{NewNote, Note},
    repository::NoteStore,
};
use std::sync::Arc;

/// Ownership guard
///
/// A missing note and a note owned by someone else produce the same
/// error kind, so probing arbitrary IDs reveals nothing about which
/// notes exist.
pub fn require_owner(found: Option<Note>, user_id: i64) -> Result<Note> {
    match found {
        Some(note) if note.user_id == user_id => Ok(note),
        _ => Err(AppError::NotFoundOrDenied),
    }
}

pub struct NoteService {
    notes: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteStore>) -> Self {
        Self { notes }
    }

    /// Create a note owned by the caller
    pub async fn create(&self, user_id: i64, title: &str, content: &str) -> Result<Note> {
        let note = self
            .notes
            .create(NewNote {
                user_id,
                title: title.to_string(),
                content: content.to_string(),
            })
            .await?;

        tracing::debug!(note_id = note.id, user_id, "Note created");

        Ok(note)
    }

    /// Fetch a note the caller owns
    pub async fn get(&self, user_id: i64, id: i64) -> Result<Note> {
        let found = self.notes.find_by_id(id).await?;
        require_owner(found, user_id)
    }

    /// List the caller's notes
    pub async fn list(&self, user_id: i64) -> Result<Vec<Note>> {
        self.notes.find_by_user(user_id).await
    }

    /// Update title and content of a note the caller owns
    pub async fn update(&self, user_id: i64, id: i64, title: &str, content: &str) -> Result<Note> {
        let found = self.notes.find_by_id(id).await?;
        let mut note = require_owner(found, user_id)?;

        note.title = title.to_string();
        note.content = content.to_string();

        self.notes.update(&note).await
    }

    /// Delete a note the caller owns
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let found = self.notes.find_by_id(id).await?;
        let note = require_owner(found, user_id)?;

        self.notes.delete(note.id).await?;

        tracing::debug!(note_id = id, user_id, "Note deleted");

        Ok(())
    }
}
