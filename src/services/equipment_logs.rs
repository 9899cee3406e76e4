//! Equipment log service

use validator::Validate;

use crate::{
    error::AppResult,
    models::equipment_log::{CreateEquipmentLog, EquipmentLog, UpdateEquipmentLog},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentLogsService {
    repository: Repository,
}

impl EquipmentLogsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentLog>> {
        self.repository.equipment_logs.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentLog> {
        self.repository.equipment_logs.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipmentLog) -> AppResult<EquipmentLog> {
        data.validate()?;
        let created = self.repository.equipment_logs.create(data).await?;
        tracing::info!(id = created.id, "Equipment log created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipmentLog) -> AppResult<EquipmentLog> {
        data.validate()?;
        self.repository.equipment_logs.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment_logs.delete(id).await?;
        tracing::info!(id, "Equipment log deleted");
        Ok(())
    }
}
