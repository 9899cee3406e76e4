//! Task assignment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{TaskPriority, TaskStatus};
use crate::filter::Searchable;

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub responsible_person: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create task request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Responsible person is required"))]
    pub responsible_person: String,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    /// Due date (YYYY-MM-DD)
    pub due_date: Option<String>,
}

/// Update task request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub responsible_person: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<String>,
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.responsible_person.as_str()]
    }

    fn selector_value(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}
