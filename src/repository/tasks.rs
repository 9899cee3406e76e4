//! Tasks repository

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        parse_date,
        task::{CreateTask, Task, UpdateTask},
    },
};

#[derive(Clone)]
pub struct TasksRepository {
    pool: Pool<Postgres>,
}

impl TasksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all tasks, earliest due date first (undated last), newest first on ties
    pub async fn list(&self) -> AppResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks ORDER BY due_date ASC NULLS LAST, created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Task> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))
    }

    pub async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        let due_date: Option<NaiveDate> = data
            .due_date
            .as_deref()
            .map(|s| parse_date("due_date", s))
            .transpose()?;

        let row = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, responsible_person, priority, status, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.responsible_person)
        .bind(data.priority.unwrap_or_default())
        .bind(data.status.unwrap_or_default())
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateTask) -> AppResult<Task> {
        let due_date: Option<NaiveDate> = data
            .due_date
            .as_deref()
            .map(|s| parse_date("due_date", s))
            .transpose()?;

        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(data.title, "title");
        add_f!(data.description, "description");
        add_f!(data.responsible_person, "responsible_person");
        add_f!(data.priority, "priority");
        add_f!(data.status, "status");
        add_f!(due_date, "due_date");

        let query = format!("UPDATE tasks SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Task>(&query).bind(now);
        if let Some(ref v) = data.title { builder = builder.bind(v); }
        if let Some(ref v) = data.description { builder = builder.bind(v); }
        if let Some(ref v) = data.responsible_person { builder = builder.bind(v); }
        if let Some(v) = data.priority { builder = builder.bind(v); }
        if let Some(v) = data.status { builder = builder.bind(v); }
        if let Some(d) = due_date { builder = builder.bind(d); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task {} not found", id)));
        }
        Ok(())
    }
}
