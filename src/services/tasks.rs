//! Task service

use validator::Validate;

use crate::{
    error::AppResult,
    models::task::{CreateTask, Task, UpdateTask},
    repository::Repository,
};

#[derive(Clone)]
pub struct TasksService {
    repository: Repository,
}

impl TasksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Task>> {
        self.repository.tasks.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Task> {
        self.repository.tasks.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        data.validate()?;
        let created = self.repository.tasks.create(data).await?;
        tracing::info!(id = created.id, "Task created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, data: &UpdateTask) -> AppResult<Task> {
        data.validate()?;
        self.repository.tasks.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.tasks.delete(id).await?;
        tracing::info!(id, "Task deleted");
        Ok(())
    }
}
