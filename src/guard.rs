//! Role-based route protection
//!
//! A resolved role either confers access to every admin route or confines the
//! account to the landing route.

use serde::Deserialize;

use crate::config::GuardConfig;

/// How a role is compared against the privileged tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The role contains a token anywhere ("SUPER_ADMIN" qualifies for "ADMIN")
    #[default]
    Contains,
    /// The role equals a token
    Exact,
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Uppercase the role and replace spaces with underscores ("teknisi elban" -> "TEKNISI_ELBAN")
pub fn normalize_role(raw: &str) -> String {
    raw.to_uppercase().replace(' ', "_")
}

#[derive(Debug, Clone)]
pub struct RoleGuard {
    privileged: Vec<String>,
    landing_route: String,
    mode: MatchMode,
}

impl RoleGuard {
    pub fn new<I, S>(privileged: I, landing_route: impl Into<String>, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let privileged = privileged
            .into_iter()
            .map(|t| normalize_role(t.as_ref().trim()))
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            privileged,
            landing_route: landing_route.into(),
            mode,
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(&config.privileged_roles, config.landing_route.clone(), config.match_mode)
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    /// Whether a normalized role grants access beyond the landing route.
    /// An empty role (resolution failed) is never privileged.
    pub fn is_privileged(&self, role: &str) -> bool {
        if role.is_empty() {
            return false;
        }
        match self.mode {
            MatchMode::Contains => self.privileged.iter().any(|t| role.contains(t.as_str())),
            MatchMode::Exact => self.privileged.iter().any(|t| role == t.as_str()),
        }
    }

    pub fn evaluate(&self, role: &str, path: &str) -> GuardDecision {
        if self.is_privileged(role) || path.starts_with(&self.landing_route) {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(self.landing_route.clone())
        }
    }
}

impl Default for RoleGuard {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &[&str] = &[
        "/peralatan",
        "/log-peralatan",
        "/tugas",
        "/jadwal",
        "/arsip",
        "/persetujuan-akun",
        "/statistik",
    ];

    #[test]
    fn test_unresolved_role_redirected_to_landing() {
        let guard = RoleGuard::default();
        assert_eq!(
            guard.evaluate("", "/peralatan"),
            GuardDecision::Redirect("/pengaduan".to_string())
        );
    }

    #[test]
    fn test_admin_never_redirected() {
        let guard = RoleGuard::default();
        assert_eq!(guard.evaluate("ADMIN", "/peralatan"), GuardDecision::Allow);
        for path in ROUTES {
            assert_eq!(guard.evaluate("ADMIN", path), GuardDecision::Allow);
            assert_eq!(guard.evaluate("TEKNISI_ELBAN", path), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_unprivileged_roles_confined_to_landing() {
        let guard = RoleGuard::default();
        for role in ["USER", "TEKNISI", "GUEST", "ADM1N", "admin"] {
            for path in ROUTES {
                assert_eq!(
                    guard.evaluate(role, path),
                    GuardDecision::Redirect("/pengaduan".to_string()),
                    "role {role} on {path}"
                );
            }
            assert_eq!(guard.evaluate(role, "/pengaduan"), GuardDecision::Allow);
            assert_eq!(guard.evaluate(role, "/pengaduan/12"), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_contains_mode_matches_anywhere() {
        let guard = RoleGuard::default();
        assert!(guard.is_privileged("SUPER_ADMIN"));
        assert!(guard.is_privileged("ADMINISTRATOR_DENIED"));
        assert!(!guard.is_privileged(""));
    }

    #[test]
    fn test_exact_mode() {
        let guard = RoleGuard::new(["ADMIN", "TEKNISI_ELBAN"], "/pengaduan", MatchMode::Exact);
        assert!(guard.is_privileged("ADMIN"));
        assert!(!guard.is_privileged("ADMINISTRATOR_DENIED"));
        assert_eq!(
            guard.evaluate("SUPER_ADMIN", "/tugas"),
            GuardDecision::Redirect("/pengaduan".to_string())
        );
    }

    #[test]
    fn test_blank_tokens_ignored() {
        let guard = RoleGuard::new(["", "  "], "/pengaduan", MatchMode::Contains);
        assert!(!guard.is_privileged("USER"));
    }

    #[test]
    fn test_normalize_role() {
        assert_eq!(normalize_role("teknisi elban"), "TEKNISI_ELBAN");
        assert_eq!(normalize_role("Admin"), "ADMIN");
        assert_eq!(normalize_role(""), "");
    }
}
