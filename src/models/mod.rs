//! Data models for Elban

pub mod account;
pub mod complaint;
pub mod enums;
pub mod equipment;
pub mod equipment_log;
pub mod file_record;
pub mod schedule;
pub mod task;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use account::{Account, UserClaims};
pub use complaint::Complaint;
pub use enums::{
    AccountRole, ApprovalStatus, ComplaintStatus, FileCategory, OperabilityStatus, TaskPriority,
    TaskStatus,
};
pub use equipment::Equipment;
pub use equipment_log::EquipmentLog;
pub use file_record::FileRecord;
pub use schedule::Schedule;
pub use task::Task;

/// Parse a `YYYY-MM-DD` date coming from a form field
pub(crate) fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use YYYY-MM-DD)", field)))
}

/// Parse a `HH:MM` (or `HH:MM:SS`) time coming from a form field
pub(crate) fn parse_time(field: &str, value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM)", field)))
}
