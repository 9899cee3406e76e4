//! Equipment maintenance log model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::filter::Searchable;

/// Maintenance log entry, joined with the name of the equipment it refers to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentLog {
    pub id: i32,
    pub log_date: NaiveDate,
    pub log_time: NaiveTime,
    pub equipment_id: i32,
    /// Joined from `equipment.name`
    pub equipment_name: Option<String>,
    /// What was done (inspection, repair, calibration, ...)
    pub activity: String,
    pub notes: Option<String>,
    /// Link to photos or reports
    pub documentation_url: Option<String>,
    pub responsible_person: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create log request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEquipmentLog {
    /// Date (YYYY-MM-DD)
    pub log_date: String,
    /// Time (HH:MM)
    pub log_time: String,
    pub equipment_id: i32,
    #[validate(length(min = 1, message = "Activity is required"))]
    pub activity: String,
    pub notes: Option<String>,
    #[validate(url(message = "Invalid documentation link"))]
    pub documentation_url: Option<String>,
    #[validate(length(min = 1, message = "Responsible person is required"))]
    pub responsible_person: String,
}

/// Update log request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipmentLog {
    pub log_date: Option<String>,
    pub log_time: Option<String>,
    pub equipment_id: Option<i32>,
    #[validate(length(min = 1, message = "Activity cannot be empty"))]
    pub activity: Option<String>,
    pub notes: Option<String>,
    #[validate(url(message = "Invalid documentation link"))]
    pub documentation_url: Option<String>,
    pub responsible_person: Option<String>,
}

impl Searchable for EquipmentLog {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.activity.as_str(), self.responsible_person.as_str()];
        fields.extend(self.equipment_name.as_deref());
        fields
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.log_date)
    }
}
