//! Schedule service

use validator::Validate;

use crate::{
    error::AppResult,
    models::schedule::{CreateSchedule, Schedule, UpdateSchedule},
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Schedule>> {
        self.repository.schedules.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Schedule> {
        self.repository.schedules.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        data.validate()?;
        let created = self.repository.schedules.create(data).await?;
        tracing::info!(id = created.id, "Schedule created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, data: &UpdateSchedule) -> AppResult<Schedule> {
        data.validate()?;
        self.repository.schedules.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.schedules.delete(id).await?;
        tracing::info!(id, "Schedule deleted");
        Ok(())
    }
}
