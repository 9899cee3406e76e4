//! Business logic services

pub mod accounts;
pub mod auth;
pub mod complaints;
pub mod equipment;
pub mod equipment_logs;
pub mod files;
pub mod schedules;
pub mod session;
pub mod stats;
pub mod tasks;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, StorageConfig},
    guard::RoleGuard,
    repository::Repository,
    session::AccountDirectory,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub session: session::SessionService,
    pub equipment: equipment::EquipmentService,
    pub equipment_logs: equipment_logs::EquipmentLogsService,
    pub tasks: tasks::TasksService,
    pub schedules: schedules::SchedulesService,
    pub files: files::FilesService,
    pub accounts: accounts::AccountsService,
    pub complaints: complaints::ComplaintsService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        storage_config: StorageConfig,
        guard: Arc<RoleGuard>,
    ) -> Self {
        let directory: Arc<dyn AccountDirectory> = Arc::new(repository.accounts.clone());

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            session: session::SessionService::new(directory, guard),
            equipment: equipment::EquipmentService::new(repository.clone()),
            equipment_logs: equipment_logs::EquipmentLogsService::new(repository.clone()),
            tasks: tasks::TasksService::new(repository.clone()),
            schedules: schedules::SchedulesService::new(repository.clone()),
            files: files::FilesService::new(repository.clone(), storage_config),
            accounts: accounts::AccountsService::new(repository.clone()),
            complaints: complaints::ComplaintsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping_database(&self) -> Result<(), sqlx::Error> {
        self.repository.ping().await
    }
}
