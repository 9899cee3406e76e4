//! Statistics service

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{ApprovalStatus, ComplaintStatus, TaskStatus},
    repository::Repository,
    summary::{equipment_summary, grouped_breakdown, status_breakdown, EquipmentSummary, StatusCount},
};

/// Dashboard figures
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Statistics {
    pub equipment: EquipmentSummary,
    pub tasks: Vec<StatusCount>,
    pub complaints: Vec<StatusCount>,
    pub accounts: Vec<StatusCount>,
    pub equipment_logs: usize,
    pub schedules: usize,
    pub files: usize,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn overview(&self) -> AppResult<Statistics> {
        let (equipment, tasks, complaints, accounts, logs, schedules, files) = tokio::try_join!(
            self.repository.equipment.list(),
            self.repository.tasks.list(),
            self.repository.complaints.list(),
            self.repository.accounts.count_by_status(),
            self.repository.equipment_logs.count(),
            self.repository.schedules.count(),
            self.repository.files.count(),
        )?;

        Ok(Statistics {
            equipment: equipment_summary(&equipment),
            tasks: status_breakdown(&tasks, TaskStatus::ALL, |t| t.status),
            complaints: status_breakdown(&complaints, ComplaintStatus::ALL, |c| c.status),
            accounts: grouped_breakdown(ApprovalStatus::ALL, &accounts),
            equipment_logs: logs.max(0) as usize,
            schedules: schedules.max(0) as usize,
            files: files.max(0) as usize,
        })
    }
}
