//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::OperabilityStatus;
use crate::filter::Searchable;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Equipment name
    pub name: String,
    /// Free-text type (e.g. "ILS", "VOR", "X-Ray")
    pub equipment_type: String,
    pub brand: Option<String>,
    /// Calibration / operating certificate number
    pub certificate_number: Option<String>,
    pub install_year: Option<i32>,
    /// Physical condition, 0-100
    pub condition_percent: Option<i32>,
    pub status: OperabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Type is required"))]
    pub equipment_type: String,
    pub brand: Option<String>,
    pub certificate_number: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "Install year out of range"))]
    pub install_year: Option<i32>,
    #[validate(range(min = 0, max = 100, message = "Condition must be between 0 and 100"))]
    pub condition_percent: Option<i32>,
    pub status: Option<OperabilityStatus>,
}

/// Update equipment request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub equipment_type: Option<String>,
    pub brand: Option<String>,
    pub certificate_number: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "Install year out of range"))]
    pub install_year: Option<i32>,
    #[validate(range(min = 0, max = 100, message = "Condition must be between 0 and 100"))]
    pub condition_percent: Option<i32>,
    pub status: Option<OperabilityStatus>,
}

impl Searchable for Equipment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.equipment_type.as_str()];
        fields.extend(self.brand.as_deref());
        fields.extend(self.certificate_number.as_deref());
        fields
    }

    fn selector_value(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
