//! Repository layer for database operations
//!
//! Every `list` query returns the whole table in a fixed, total order.

pub mod accounts;
pub mod complaints;
pub mod equipment;
pub mod equipment_logs;
pub mod files;
pub mod schedules;
pub mod tasks;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub equipment_logs: equipment_logs::EquipmentLogsRepository,
    pub tasks: tasks::TasksRepository,
    pub schedules: schedules::SchedulesRepository,
    pub files: files::FilesRepository,
    pub accounts: accounts::AccountsRepository,
    pub complaints: complaints::ComplaintsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            equipment_logs: equipment_logs::EquipmentLogsRepository::new(pool.clone()),
            tasks: tasks::TasksRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            files: files::FilesRepository::new(pool.clone()),
            accounts: accounts::AccountsRepository::new(pool.clone()),
            complaints: complaints::ComplaintsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
