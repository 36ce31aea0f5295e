//! Postgres-backed note store

use crate::{
    error::Result,
    models::{NewNote, Note},
    repository::NoteStore,
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgNoteStore {
    db: PgPool,
}

impl PgNoteStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn create(&self, note: NewNote) -> Result<Note> {
        let created = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(note.user_id)
        .bind(&note.title)
        .bind(&note.content)
        .fetch_one(&self.db)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, user_id, title, content, created_at, updated_at
             FROM notes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(note)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, user_id, title, content, created_at, updated_at
             FROM notes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(notes)
    }

    async fn update(&self, note: &Note) -> Result<Note> {
        let updated = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $1, content = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.id)
        .fetch_one(&self.db)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
