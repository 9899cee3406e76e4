//! Complaint model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ComplaintStatus;
use crate::filter::Searchable;

/// Complaint reported against the unit's equipment or service
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Complaint {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Who reported the problem
    pub reporter: String,
    pub location: Option<String>,
    pub status: ComplaintStatus,
    pub documentation_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create complaint request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateComplaint {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Reporter is required"))]
    pub reporter: String,
    pub location: Option<String>,
    #[validate(url(message = "Invalid documentation link"))]
    pub documentation_url: Option<String>,
}

/// Update complaint request (also used for status-only changes)
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateComplaint {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub reporter: Option<String>,
    pub location: Option<String>,
    pub status: Option<ComplaintStatus>,
    #[validate(url(message = "Invalid documentation link"))]
    pub documentation_url: Option<String>,
}

impl UpdateComplaint {
    pub fn status(status: ComplaintStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Searchable for Complaint {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.reporter.as_str()];
        fields.extend(self.location.as_deref());
        fields
    }

    fn selector_value(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.created_at.date_naive())
    }
}
