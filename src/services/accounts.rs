//! Account approval service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        account::Account,
        enums::{AccountRole, ApprovalStatus},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
}

impl AccountsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Account>> {
        self.repository.accounts.list().await
    }

    pub async fn set_status(&self, id: Uuid, status: ApprovalStatus) -> AppResult<Account> {
        let account = self.repository.accounts.update_status(id, status).await?;
        tracing::info!(email = %account.email, status = %status, "Account status changed");
        Ok(account)
    }

    pub async fn set_role(&self, id: Uuid, role: AccountRole) -> AppResult<Account> {
        let account = self.repository.accounts.update_role(id, role).await?;
        tracing::info!(email = %account.email, role = %role, "Account role changed");
        Ok(account)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.accounts.delete(id).await?;
        tracing::info!(%id, "Account deleted");
        Ok(())
    }
}
