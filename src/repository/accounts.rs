//! Accounts repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{map_write_error, AppError, AppResult},
    models::{
        account::{Account, RegisterAccount},
        enums::{AccountRole, ApprovalStatus},
    },
    session::AccountDirectory,
};

#[derive(Clone)]
pub struct AccountsRepository {
    pool: Pool<Postgres>,
}

impl AccountsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all accounts, newest registrations first
    pub async fn list(&self) -> AppResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts ORDER BY created_at DESC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Number of accounts per approval status (statuses without accounts are absent)
    pub async fn count_by_status(&self) -> AppResult<Vec<(ApprovalStatus, i64)>> {
        let rows = sqlx::query_as::<_, (ApprovalStatus, i64)>(
            "SELECT status, COUNT(*) FROM accounts GROUP BY status"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Account> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", id)))
    }

    /// Case-insensitive lookup by email
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Insert a pending `USER` account
    pub async fn register(&self, data: &RegisterAccount, password_hash: &str) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, email, employee_id, name, work_unit, role, status, password_hash)
            VALUES ($1, LOWER($2), $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.email)
        .bind(&data.employee_id)
        .bind(&data.name)
        .bind(&data.work_unit)
        .bind(AccountRole::User)
        .bind(ApprovalStatus::Pending)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Account"))
    }

    pub async fn update_status(&self, id: Uuid, status: ApprovalStatus) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *"
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", id)))
    }

    pub async fn update_role(&self, id: Uuid, role: AccountRole) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET role = $1, updated_at = $2 WHERE id = $3 RETURNING *"
        )
        .bind(role)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Account {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountDirectory for AccountsRepository {
    async fn role_by_email(&self, email: &str) -> AppResult<Option<String>> {
        let role: Option<String> = sqlx::query_scalar(
            "SELECT role FROM accounts WHERE LOWER(email) = LOWER($1)"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }
}
