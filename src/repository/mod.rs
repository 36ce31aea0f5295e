//! Data access layer
//!
//! Services depend on the [`UserStore`] and [`NoteStore`] traits rather
//! than a concrete database, so isolated instances (and tests) can plug
//! in their own backing store. The Postgres implementations live in
//! [`user_repo`] and [`note_repo`].

pub mod note_repo;
pub mod user_repo;

pub use note_repo::PgNoteStore;
pub use user_repo::PgUserStore;

use crate::{
    error::Result,
    models::{NewNote, NewUser, Note, User},
};
use async_trait::async_trait;

/// Credential store consumed by the auth service
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Persist a new user, assigning its ID
    ///
    /// Must enforce username uniqueness atomically and surface a
    /// duplicate as [`crate::error::AppError::UsernameTaken`]; the
    /// service-level existence check is an optimization, not the guard.
    async fn create(&self, user: NewUser) -> Result<User>;
}

/// Note store consumed by the note service
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a new note, assigning its ID
    async fn create(&self, note: NewNote) -> Result<Note>;

    /// Look up a note by ID, regardless of owner
    async fn find_by_id(&self, id: i64) -> Result<Option<Note>>;

    /// List all notes owned by a user
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Note>>;

    /// Persist updated title/content for an existing note
    async fn update(&self, note: &Note) -> Result<Note>;

    /// Delete a note by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;
}
