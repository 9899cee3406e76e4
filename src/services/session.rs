//! Server-side session resolution for bearer identities

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    guard::{GuardDecision, RoleGuard},
    models::account::UserClaims,
    session::{AccountDirectory, Identity, IdentityProvider, Session, SessionOutcome, SessionResolver},
};

impl From<&UserClaims> for Identity {
    fn from(claims: &UserClaims) -> Self {
        Identity {
            subject: claims.sub.clone(),
            email: Some(claims.email.clone()).filter(|e| !e.is_empty()),
            metadata: claims.metadata.clone(),
        }
    }
}

/// Identity carried by a verified token (or by nothing at all)
struct TokenIdentity(Option<Identity>);

#[async_trait]
impl IdentityProvider for TokenIdentity {
    async fn current_identity(&self) -> AppResult<Option<Identity>> {
        Ok(self.0.clone())
    }
}

/// Body of `GET /auth/session`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    pub email: Option<String>,
    /// Normalized role, empty when it could not be resolved
    pub role: String,
    pub privileged: bool,
    pub landing_route: String,
}

#[derive(Clone)]
pub struct SessionService {
    directory: Arc<dyn AccountDirectory>,
    guard: Arc<RoleGuard>,
}

impl SessionService {
    pub fn new(directory: Arc<dyn AccountDirectory>, guard: Arc<RoleGuard>) -> Self {
        Self { directory, guard }
    }

    pub async fn resolve(&self, claims: Option<&UserClaims>) -> SessionOutcome {
        let identity = TokenIdentity(claims.map(Identity::from));
        SessionResolver::new(identity, self.directory.clone())
            .resolve()
            .await
    }

    pub fn describe(&self, session: &Session) -> SessionInfo {
        SessionInfo {
            email: session.email.clone(),
            role: session.role.clone(),
            privileged: self.guard.is_privileged(&session.role),
            landing_route: self.guard.landing_route().to_string(),
        }
    }

    pub fn evaluate(&self, session: &Session, path: &str) -> GuardDecision {
        self.guard.evaluate(&session.role, path)
    }
}
