//! Session resolution: who is signed in and which role they hold
//!
//! The role comes from the account table (matched by email) and falls back to
//! the role carried in the identity metadata. Lookup failures never sign the
//! user out; they degrade to an empty role, which the guard treats as the
//! lowest privilege.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{error::AppResult, guard::normalize_role};

/// Authenticated identity as reported by the identity provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identity {
    pub subject: String,
    pub email: Option<String>,
    pub metadata: Map<String, Value>,
}

impl Identity {
    /// Role-like value carried in the metadata: the `role` key first, then the
    /// first string value whose key mentions "role"
    pub fn metadata_role(&self) -> Option<&str> {
        if let Some(role) = self.metadata.get("role").and_then(Value::as_str) {
            return Some(role);
        }
        self.metadata
            .iter()
            .filter(|(key, _)| key.to_lowercase().contains("role"))
            .find_map(|(_, value)| value.as_str())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current identity, or `None` when nobody is signed in
    async fn current_identity(&self) -> AppResult<Option<Identity>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Stored role of the account registered under `email`
    async fn role_by_email(&self, email: &str) -> AppResult<Option<String>>;
}

#[async_trait]
impl<T: AccountDirectory + ?Sized> AccountDirectory for std::sync::Arc<T> {
    async fn role_by_email(&self, email: &str) -> AppResult<Option<String>> {
        (**self).role_by_email(email).await
    }
}

/// A resolved session. `role` is normalized and empty when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub email: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// No identity; the caller sends the visitor to the entry page
    Unauthenticated,
    Resolved(Session),
}

pub struct SessionResolver<I, D> {
    identity: I,
    directory: D,
}

impl<I: IdentityProvider, D: AccountDirectory> SessionResolver<I, D> {
    pub fn new(identity: I, directory: D) -> Self {
        Self { identity, directory }
    }

    pub async fn resolve(&self) -> SessionOutcome {
        let identity = match self.identity.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => return SessionOutcome::Unauthenticated,
            Err(e) => {
                tracing::warn!("Failed to read current identity: {}", e);
                return SessionOutcome::Unauthenticated;
            }
        };

        let role = resolve_role(&identity, &self.directory).await;
        tracing::debug!(subject = %identity.subject, role = %role, "Session resolved");

        SessionOutcome::Resolved(Session {
            email: identity.email,
            role,
        })
    }
}

/// Look up the normalized role of an identity
pub async fn resolve_role<D: AccountDirectory + ?Sized>(identity: &Identity, directory: &D) -> String {
    let Some(email) = identity.email.as_deref() else {
        return identity.metadata_role().map(normalize_role).unwrap_or_default();
    };

    match directory.role_by_email(email).await {
        Ok(Some(role)) => normalize_role(&role),
        Ok(None) => identity.metadata_role().map(normalize_role).unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Role lookup failed for {}: {}", email, e);
            String::new()
        }
    }
}
