//! Activity schedule model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::filter::Searchable;

/// A scheduled activity (maintenance window, inspection, drill, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: i32,
    pub activity: String,
    pub schedule_date: NaiveDate,
    pub schedule_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create schedule request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSchedule {
    #[validate(length(min = 1, message = "Activity is required"))]
    pub activity: String,
    /// Date (YYYY-MM-DD)
    pub schedule_date: String,
    /// Time (HH:MM)
    pub schedule_time: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Update schedule request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSchedule {
    #[validate(length(min = 1, message = "Activity cannot be empty"))]
    pub activity: Option<String>,
    pub schedule_date: Option<String>,
    pub schedule_time: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Searchable for Schedule {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.activity.as_str()];
        fields.extend(self.location.as_deref());
        fields
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.schedule_date)
    }
}
