//! API handlers for Elban REST endpoints
//!
//! Entity routes sit behind [`role_guard`]; authentication, health and the
//! stored files are public.

pub mod accounts;
pub mod auth;
pub mod complaints;
pub mod equipment;
pub mod equipment_logs;
pub mod files;
pub mod health;
pub mod openapi;
pub mod schedules;
pub mod stats;
pub mod tasks;

use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::{
    error::{AppError, AppResult},
    guard::GuardDecision,
    models::account::UserClaims,
    routes,
    session::{Session, SessionOutcome},
    AppState,
};

/// Session of the caller, placed in the request extensions by [`role_guard`]
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Session);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::Authentication("Not signed in".to_string()))
    }
}

/// Decode the bearer token of a request
pub(crate) fn bearer_claims(headers: &HeaderMap, secret: &str) -> AppResult<UserClaims> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

    UserClaims::from_token(token, secret).map_err(|e| AppError::Authentication(e.to_string()))
}

/// Resolve the caller's session and apply the role guard to the requested path.
///
/// Unprivileged roles may only reach the landing route; anything else is
/// answered with `403` and the route to go to instead.
pub async fn role_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_claims(request.headers(), &state.config.auth.jwt_secret)?;

    let session = match state.services.session.resolve(Some(&claims)).await {
        SessionOutcome::Resolved(session) => session,
        SessionOutcome::Unauthenticated => {
            return Err(AppError::Authentication("Not signed in".to_string()));
        }
    };

    let path = request.uri().path().to_string();
    match state.services.session.evaluate(&session, &path) {
        GuardDecision::Allow => {
            request.extensions_mut().insert(session);
            Ok(next.run(request).await)
        }
        GuardDecision::Redirect(redirect) => {
            tracing::debug!(role = %session.role, %path, %redirect, "Route denied");
            Err(AppError::RouteDenied { redirect })
        }
    }
}

/// Entity routes, all behind the role guard
fn guarded_routes(state: AppState) -> Router<AppState> {
    let max_upload = state.services.files.max_upload_bytes();

    Router::new()
        // Equipment
        .route(routes::EQUIPMENT, get(equipment::list_equipment).post(equipment::create_equipment))
        .route(
            "/peralatan/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        // Equipment logs
        .route(
            routes::EQUIPMENT_LOGS,
            get(equipment_logs::list_logs).post(equipment_logs::create_log),
        )
        .route(
            "/log-peralatan/:id",
            put(equipment_logs::update_log).delete(equipment_logs::delete_log),
        )
        // Tasks
        .route(routes::TASKS, get(tasks::list_tasks).post(tasks::create_task))
        .route("/tugas/:id", put(tasks::update_task).delete(tasks::delete_task))
        // Schedules
        .route(routes::SCHEDULES, get(schedules::list_schedules).post(schedules::create_schedule))
        .route(
            "/jadwal/:id",
            put(schedules::update_schedule).delete(schedules::delete_schedule),
        )
        // File archive
        .route(routes::FILES, get(files::list_files).post(files::create_file))
        .route(
            "/arsip/upload",
            post(files::upload_file).layer(DefaultBodyLimit::max(max_upload + 64 * 1024)),
        )
        .route("/arsip/:id", put(files::update_file).delete(files::delete_file))
        // Account approval
        .route(routes::ACCOUNTS, get(accounts::list_accounts))
        .route("/persetujuan-akun/:id", axum::routing::delete(accounts::delete_account))
        .route("/persetujuan-akun/:id/status", put(accounts::update_status))
        .route("/persetujuan-akun/:id/role", put(accounts::update_role))
        // Complaints (landing route)
        .route(
            routes::COMPLAINTS,
            get(complaints::list_complaints).post(complaints::create_complaint),
        )
        .route(
            "/pengaduan/:id",
            put(complaints::update_complaint).delete(complaints::delete_complaint),
        )
        .route("/pengaduan/:id/status", put(complaints::update_complaint_status))
        // Statistics
        .route(routes::STATISTICS, get(stats::get_stats))
        .route_layer(middleware::from_fn_with_state(state, role_guard))
}

/// Build the application router (without transport layers)
pub fn router(state: AppState) -> Router {
    let upload_dir = state.config.storage.upload_dir.clone();

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route(routes::REGISTER, post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::session))
        .merge(guarded_routes(state.clone()))
        .with_state(state);

    Router::new()
        .nest(routes::API_PREFIX, api_v1)
        .nest_service("/files", ServeDir::new(upload_dir))
        .merge(openapi::create_openapi_router())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        Extension,
    };
    use serde_json::{Map, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        error::ErrorResponse,
        guard::RoleGuard,
        repository::Repository,
        services::{session::SessionService, Services},
        session::MockAccountDirectory,
    };

    fn state(stored_role: Option<&'static str>) -> AppState {
        let config = AppConfig::default();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .unwrap();
        let guard = Arc::new(RoleGuard::from_config(&config.guard));

        let mut services = Services::new(
            Repository::new(pool),
            config.auth.clone(),
            config.storage.clone(),
            guard.clone(),
        );
        let mut directory = MockAccountDirectory::new();
        directory
            .expect_role_by_email()
            .returning(move |_| Ok(stored_role.map(str::to_string)));
        services.session = SessionService::new(Arc::new(directory), guard);

        AppState {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }

    fn token(state: &AppState, metadata_role: &str) -> String {
        let mut metadata = Map::new();
        metadata.insert("role".to_string(), Value::String(metadata_role.to_string()));
        let now = chrono::Utc::now().timestamp();
        UserClaims {
            sub: "7".to_string(),
            email: "petugas@elban.test".to_string(),
            metadata,
            exp: now + 3600,
            iat: now,
        }
        .create_token(&state.config.auth.jwt_secret)
        .unwrap()
    }

    fn request(path: &str, bearer: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(path);
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn echo_role(Extension(session): Extension<Session>) -> String {
        session.role
    }

    /// Guard over stub handlers, so no database is touched
    fn stub_router(state: AppState) -> Router {
        Router::new()
            .route("/peralatan", get(echo_role))
            .route("/pengaduan", get(echo_role))
            .route_layer(middleware::from_fn_with_state(state.clone(), role_guard))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = router(state(None));
        let response = app.oneshot(request("/api/v1/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = router(state(None));
        let response = app.oneshot(request("/api/v1/peralatan", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_role_gets_redirect_to_landing() {
        let state = state(Some("USER"));
        let bearer = token(&state, "USER");
        let app = router(state);

        let response = app
            .oneshot(request("/api/v1/peralatan", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.redirect.as_deref(), Some("/pengaduan"));
    }

    #[tokio::test]
    async fn test_user_role_reaches_landing() {
        let state = state(Some("USER"));
        let bearer = token(&state, "USER");

        let response = stub_router(state)
            .oneshot(request("/pengaduan", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guard_sees_path_inside_api_prefix() {
        let state = state(Some("USER"));
        let bearer = token(&state, "USER");
        let app = Router::new().nest(routes::API_PREFIX, stub_router(state));

        let response = app
            .clone()
            .oneshot(request("/api/v1/pengaduan", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"USER");

        let response = app
            .oneshot(request("/api/v1/peralatan", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_stored_role_overrides_token_metadata() {
        let state = state(Some("teknisi elban"));
        let bearer = token(&state, "USER");

        let response = stub_router(state)
            .oneshot(request("/peralatan", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"TEKNISI_ELBAN");
    }

    #[tokio::test]
    async fn test_metadata_role_used_without_account_row() {
        let state = state(None);
        let bearer = token(&state, "admin");

        let response = stub_router(state)
            .oneshot(request("/peralatan", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
