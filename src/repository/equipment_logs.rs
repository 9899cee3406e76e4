//! Equipment logs repository
//!
//! Every read joins the equipment name so the list never needs a second lookup.

use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{map_write_error, AppError, AppResult},
    models::{
        equipment_log::{CreateEquipmentLog, EquipmentLog, UpdateEquipmentLog},
        parse_date, parse_time,
    },
};

const SELECT_JOINED: &str = r#"
    SELECT l.id, l.log_date, l.log_time, l.equipment_id, e.name AS equipment_name,
           l.activity, l.notes, l.documentation_url, l.responsible_person,
           l.created_at, l.updated_at
    FROM equipment_logs l
    LEFT JOIN equipment e ON e.id = l.equipment_id
"#;

#[derive(Clone)]
pub struct EquipmentLogsRepository {
    pool: Pool<Postgres>,
}

impl EquipmentLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all logs, most recent first
    pub async fn list(&self) -> AppResult<Vec<EquipmentLog>> {
        let query = format!("{} ORDER BY l.log_date DESC, l.log_time DESC, l.id DESC", SELECT_JOINED);
        let rows = sqlx::query_as::<_, EquipmentLog>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Get a log entry by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentLog> {
        let query = format!("{} WHERE l.id = $1", SELECT_JOINED);
        sqlx::query_as::<_, EquipmentLog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment log {} not found", id)))
    }

    /// Create a log entry
    pub async fn create(&self, data: &CreateEquipmentLog) -> AppResult<EquipmentLog> {
        let log_date = parse_date("log_date", &data.log_date)?;
        let log_time = parse_time("log_time", &data.log_time)?;

        let row = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO equipment_logs (
                log_date, log_time, equipment_id, activity,
                notes, documentation_url, responsible_person
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(log_date)
        .bind(log_time)
        .bind(data.equipment_id)
        .bind(&data.activity)
        .bind(&data.notes)
        .bind(&data.documentation_url)
        .bind(&data.responsible_person)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Equipment log"))?;

        self.get_by_id(row).await
    }

    /// Update the provided fields of a log entry
    pub async fn update(&self, id: i32, data: &UpdateEquipmentLog) -> AppResult<EquipmentLog> {
        let log_date: Option<NaiveDate> = data
            .log_date
            .as_deref()
            .map(|s| parse_date("log_date", s))
            .transpose()?;
        let log_time: Option<NaiveTime> = data
            .log_time
            .as_deref()
            .map(|s| parse_time("log_time", s))
            .transpose()?;

        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_f!(log_date, "log_date");
        add_f!(log_time, "log_time");
        add_f!(data.equipment_id, "equipment_id");
        add_f!(data.activity, "activity");
        add_f!(data.notes, "notes");
        add_f!(data.documentation_url, "documentation_url");
        add_f!(data.responsible_person, "responsible_person");

        let query = format!(
            "UPDATE equipment_logs SET {} WHERE id = ${} RETURNING id",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_scalar::<_, i32>(&query).bind(now);
        if let Some(d) = log_date { builder = builder.bind(d); }
        if let Some(t) = log_time { builder = builder.bind(t); }
        if let Some(eq) = data.equipment_id { builder = builder.bind(eq); }
        if let Some(ref v) = data.activity { builder = builder.bind(v); }
        if let Some(ref v) = data.notes { builder = builder.bind(v); }
        if let Some(ref v) = data.documentation_url { builder = builder.bind(v); }
        if let Some(ref v) = data.responsible_person { builder = builder.bind(v); }

        let updated = builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Equipment log"))?
            .ok_or_else(|| AppError::NotFound(format!("Equipment log {} not found", id)))?;

        self.get_by_id(updated).await
    }

    /// Delete a log entry
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment log {} not found", id)));
        }
        Ok(())
    }
}
