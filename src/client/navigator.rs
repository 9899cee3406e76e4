//! Route guarding on the client side

use crate::{
    guard::{GuardDecision, RoleGuard},
    routes,
    session::{Session, SessionOutcome},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Resolution has not completed; guarding is deferred
    #[default]
    Pending,
    Unauthenticated,
    Resolved(Session),
}

/// What the page should do after a route change or session update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allowed,
    /// Replace the current route with this one
    Redirect(String),
    /// The session is still resolving; render nothing guarded yet
    Deferred,
    /// Nobody is signed in; go to the entry page
    Unauthenticated(String),
}

#[derive(Debug, Clone)]
pub struct Navigator {
    guard: RoleGuard,
    session: SessionState,
    route: String,
}

impl Navigator {
    pub fn new(guard: RoleGuard, initial_route: impl Into<String>) -> Self {
        Self {
            guard,
            session: SessionState::Pending,
            route: initial_route.into(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_route(&self) -> &str {
        &self.route
    }

    /// Record the result of session resolution and re-check the current route
    pub fn session_resolved(&mut self, outcome: SessionOutcome) -> Navigation {
        self.session = match outcome {
            SessionOutcome::Unauthenticated => SessionState::Unauthenticated,
            SessionOutcome::Resolved(session) => SessionState::Resolved(session),
        };
        self.check()
    }

    /// Move to `path` and check it against the guard
    pub fn navigate(&mut self, path: impl Into<String>) -> Navigation {
        self.route = path.into();
        self.check()
    }

    fn check(&mut self) -> Navigation {
        match &self.session {
            SessionState::Pending => Navigation::Deferred,
            SessionState::Unauthenticated => {
                if is_public(&self.route) {
                    Navigation::Allowed
                } else {
                    self.route = routes::ENTRY.to_string();
                    Navigation::Unauthenticated(routes::ENTRY.to_string())
                }
            }
            SessionState::Resolved(session) => match self.guard.evaluate(&session.role, &self.route) {
                GuardDecision::Allow => Navigation::Allowed,
                GuardDecision::Redirect(to) => {
                    tracing::debug!(role = %session.role, from = %self.route, %to, "Redirecting");
                    self.route = to.clone();
                    Navigation::Redirect(to)
                }
            },
        }
    }
}

fn is_public(path: &str) -> bool {
    path == routes::ENTRY || path == routes::REGISTER
}
