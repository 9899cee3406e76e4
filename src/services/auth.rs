//! Registration and sign-in

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        account::{Account, RegisterAccount, UserClaims},
        enums::ApprovalStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create a pending account. An administrator approves it later.
    pub async fn register(&self, data: &RegisterAccount) -> AppResult<Account> {
        data.validate()?;

        if self.repository.accounts.get_by_email(&data.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let hash = hash_password(&data.password)?;
        let account = self.repository.accounts.register(data, &hash).await?;
        tracing::info!(email = %account.email, "Account registered, awaiting approval");
        Ok(account)
    }

    /// Check credentials and issue a JWT for an approved account
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, Account)> {
        let account = self
            .repository
            .accounts
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(&account.password_hash, password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        match account.status {
            ApprovalStatus::Approved => {}
            ApprovalStatus::Pending => {
                return Err(AppError::Authentication("Account is awaiting approval".to_string()));
            }
            ApprovalStatus::Rejected => {
                return Err(AppError::Authentication("Account registration was rejected".to_string()));
            }
        }

        let token = UserClaims::for_account(&account, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(email = %account.email, "Signed in");
        Ok((token, account))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("rahasia123").unwrap();
        assert!(verify_password(&hash, "rahasia123").unwrap());
        assert!(!verify_password(&hash, "salah").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(verify_password("plain", "x"), Err(AppError::Internal(_))));
    }
}
