//! Account model, registration requests and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{AccountRole, ApprovalStatus};
use crate::filter::Searchable;

/// Staff account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    /// Employee identification number (NIP)
    pub employee_id: Option<String>,
    pub name: String,
    pub work_unit: Option<String>,
    pub role: AccountRole,
    pub status: ApprovalStatus,
    /// Hashed password (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-registration request. New accounts wait for approval.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterAccount {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub employee_id: Option<String>,
    pub work_unit: Option<String>,
}

/// Approve or reject an account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAccountStatus {
    pub status: ApprovalStatus,
}

/// Change the role of an account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAccountRole {
    pub role: AccountRole,
}

/// Field-level account change issued from the approval page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountPatch {
    Status(UpdateAccountStatus),
    Role(UpdateAccountRole),
}

impl Searchable for Account {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.employee_id.as_deref());
        fields
    }

    fn selector_value(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// JWT Claims for authenticated identities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Account id
    pub sub: String,
    pub email: String,
    /// Identity-provider metadata; a `role` here is only a fallback for
    /// identities without an account row
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Build claims for an approved account. The role is not copied into the
    /// metadata: it is read from the account table on every request, so a
    /// deleted or demoted account loses its privileges immediately.
    pub fn for_account(account: &Account, expiration_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        let mut metadata = Map::new();
        metadata.insert("name".to_string(), Value::String(account.name.clone()));

        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            metadata,
            exp: now + (expiration_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
