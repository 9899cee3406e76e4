//! Complaint service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        complaint::{Complaint, CreateComplaint, UpdateComplaint},
        enums::ComplaintStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ComplaintsService {
    repository: Repository,
}

impl ComplaintsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Complaint>> {
        self.repository.complaints.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Complaint> {
        self.repository.complaints.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateComplaint) -> AppResult<Complaint> {
        data.validate()?;
        let created = self.repository.complaints.create(data).await?;
        tracing::info!(id = created.id, "Complaint created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, data: &UpdateComplaint) -> AppResult<Complaint> {
        data.validate()?;
        self.repository.complaints.update(id, data).await
    }

    /// Move a complaint through its workflow (Baru, Diproses, Selesai)
    pub async fn set_status(&self, id: i32, status: ComplaintStatus) -> AppResult<Complaint> {
        let updated = self.repository.complaints.update(id, &UpdateComplaint::status(status)).await?;
        tracing::info!(id, status = %status, "Complaint status changed");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.complaints.delete(id).await?;
        tracing::info!(id, "Complaint deleted");
        Ok(())
    }
}
