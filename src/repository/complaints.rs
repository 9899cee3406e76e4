//! Complaints repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::complaint::{Complaint, CreateComplaint, UpdateComplaint},
};

#[derive(Clone)]
pub struct ComplaintsRepository {
    pool: Pool<Postgres>,
}

impl ComplaintsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all complaints, newest first
    pub async fn list(&self) -> AppResult<Vec<Complaint>> {
        let rows = sqlx::query_as::<_, Complaint>(
            "SELECT * FROM complaints ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Complaint> {
        sqlx::query_as::<_, Complaint>("SELECT * FROM complaints WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))
    }

    /// File a new complaint. Status always starts at `Baru`.
    pub async fn create(&self, data: &CreateComplaint) -> AppResult<Complaint> {
        let row = sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints (title, description, reporter, location, status, documentation_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.reporter)
        .bind(&data.location)
        .bind(crate::models::enums::ComplaintStatus::default())
        .bind(&data.documentation_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateComplaint) -> AppResult<Complaint> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.title, "title");
        add_field!(data.description, "description");
        add_field!(data.reporter, "reporter");
        add_field!(data.location, "location");
        add_field!(data.status, "status");
        add_field!(data.documentation_url, "documentation_url");

        let query = format!("UPDATE complaints SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Complaint>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.description);
        bind_field!(data.reporter);
        bind_field!(data.location);
        bind_field!(data.status);
        bind_field!(data.documentation_url);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Complaint {} not found", id)));
        }
        Ok(())
    }
}
