//! Archived file model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::FileCategory;
use crate::filter::Searchable;

/// Archived document (manual, certificate, report, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FileRecord {
    pub id: i32,
    /// Display name
    pub name: String,
    pub category: FileCategory,
    pub notes: Option<String>,
    /// Public download URL
    pub url: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
    /// Name of the stored object when the file was uploaded through this server
    pub storage_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Register a file that is already hosted elsewhere
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFileRecord {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category: Option<FileCategory>,
    pub notes: Option<String>,
    #[validate(url(message = "Invalid file URL"))]
    pub url: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
}

/// Update file metadata request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFileRecord {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub category: Option<FileCategory>,
    pub notes: Option<String>,
}

/// Metadata of a stored upload, ready to be inserted
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub name: String,
    pub category: FileCategory,
    pub notes: Option<String>,
    pub url: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    pub storage_key: String,
}

impl Searchable for FileRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.notes.as_deref());
        fields
    }

    fn selector_value(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.created_at.date_naive())
    }
}
