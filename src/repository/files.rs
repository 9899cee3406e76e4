//! Archived files repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::file_record::{CreateFileRecord, FileRecord, StoredFile, UpdateFileRecord},
};

#[derive(Clone)]
pub struct FilesRepository {
    pool: Pool<Postgres>,
}

impl FilesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all files, newest first
    pub async fn list(&self) -> AppResult<Vec<FileRecord>> {
        let rows = sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File {} not found", id)))
    }

    /// Register an externally hosted file
    pub async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        let row = sqlx::query_as::<_, FileRecord>(
            r#"
            INSERT INTO files (name, category, notes, url, mime_type, size_bytes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category.unwrap_or_default())
        .bind(&data.notes)
        .bind(&data.url)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Record a file that was written to local storage
    pub async fn create_stored(&self, data: &StoredFile) -> AppResult<FileRecord> {
        let row = sqlx::query_as::<_, FileRecord>(
            r#"
            INSERT INTO files (name, category, notes, url, mime_type, size_bytes, storage_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category)
        .bind(&data.notes)
        .bind(&data.url)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(&data.storage_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateFileRecord) -> AppResult<FileRecord> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        if data.name.is_some() { sets.push(format!("name = ${}", idx)); idx += 1; }
        if data.category.is_some() { sets.push(format!("category = ${}", idx)); idx += 1; }
        if data.notes.is_some() { sets.push(format!("notes = ${}", idx)); idx += 1; }

        let query = format!("UPDATE files SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, FileRecord>(&query).bind(now);
        if let Some(ref name) = data.name { builder = builder.bind(name); }
        if let Some(category) = data.category { builder = builder.bind(category); }
        if let Some(ref notes) = data.notes { builder = builder.bind(notes); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File {} not found", id)))
    }

    /// Delete a file record, returning its storage key if it was uploaded here
    pub async fn delete(&self, id: i32) -> AppResult<Option<String>> {
        let row: Option<Option<String>> = sqlx::query_scalar(
            "DELETE FROM files WHERE id = $1 RETURNING storage_key"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(format!("File {} not found", id)))
    }
}
