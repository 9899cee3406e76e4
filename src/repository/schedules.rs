//! Schedules repository

use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        parse_date, parse_time,
        schedule::{CreateSchedule, Schedule, UpdateSchedule},
    },
};

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all scheduled activities in chronological order
    pub async fn list(&self) -> AppResult<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules ORDER BY schedule_date ASC, schedule_time ASC NULLS FIRST, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    pub async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        let date = parse_date("schedule_date", &data.schedule_date)?;
        let time: Option<NaiveTime> = data
            .schedule_time
            .as_deref()
            .map(|s| parse_time("schedule_time", s))
            .transpose()?;

        let row = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (activity, schedule_date, schedule_time, location, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.activity)
        .bind(date)
        .bind(time)
        .bind(&data.location)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateSchedule) -> AppResult<Schedule> {
        let date: Option<NaiveDate> = data
            .schedule_date
            .as_deref()
            .map(|s| parse_date("schedule_date", s))
            .transpose()?;
        let time: Option<NaiveTime> = data
            .schedule_time
            .as_deref()
            .map(|s| parse_time("schedule_time", s))
            .transpose()?;

        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        if data.activity.is_some() { sets.push(format!("activity = ${}", idx)); idx += 1; }
        if date.is_some() { sets.push(format!("schedule_date = ${}", idx)); idx += 1; }
        if time.is_some() { sets.push(format!("schedule_time = ${}", idx)); idx += 1; }
        if data.location.is_some() { sets.push(format!("location = ${}", idx)); idx += 1; }
        if data.notes.is_some() { sets.push(format!("notes = ${}", idx)); idx += 1; }

        let query = format!("UPDATE schedules SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Schedule>(&query).bind(now);
        if let Some(ref activity) = data.activity { builder = builder.bind(activity); }
        if let Some(d) = date { builder = builder.bind(d); }
        if let Some(t) = time { builder = builder.bind(t); }
        if let Some(ref location) = data.location { builder = builder.bind(location); }
        if let Some(ref notes) = data.notes { builder = builder.bind(notes); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Schedule {} not found", id)));
        }
        Ok(())
    }
}
