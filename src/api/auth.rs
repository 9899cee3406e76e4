//! Authentication endpoints

use axum::{extract::State, http::{HeaderMap, StatusCode}, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::account::{Account, RegisterAccount},
    services::session::SessionInfo,
    session::SessionOutcome,
    AppState,
};

use super::bearer_claims;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub account: Account,
}

/// Self-registration. The account starts as `pending` with role `USER`.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterAccount,
    responses(
        (status = 201, description = "Account created, awaiting approval", body = Account),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(data): Json<RegisterAccount>,
) -> AppResult<(StatusCode, Json<Account>)> {
    let account = state.services.auth.register(&data).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Bad credentials or account not approved", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, account) = state
        .services
        .auth
        .authenticate(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        account,
    }))
}

/// Resolve the session of the bearer identity
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Resolved session", body = SessionInfo),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse)
    )
)]
pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<SessionInfo>> {
    let claims = bearer_claims(&headers, &state.config.auth.jwt_secret)?;

    match state.services.session.resolve(Some(&claims)).await {
        SessionOutcome::Resolved(session) => Ok(Json(state.services.session.describe(&session))),
        SessionOutcome::Unauthenticated => Err(AppError::Authentication("Not signed in".to_string())),
    }
}
