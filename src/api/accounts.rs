//! Account approval endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    filter::{retain_matching, FilterQuery},
    models::account::{Account, UpdateAccountRole, UpdateAccountStatus},
    AppState,
};

use super::AuthenticatedUser;

/// List accounts, newest registrations first
#[utoipa::path(
    get,
    path = "/persetujuan-akun",
    tag = "accounts",
    security(("bearer_auth" = [])),
    params(FilterQuery),
    responses(
        (status = 200, description = "Accounts", body = Vec<Account>)
    )
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<Account>>> {
    let criteria = query.to_criteria()?;
    let rows = state.services.accounts.list().await?;
    Ok(Json(retain_matching(rows, &criteria)))
}

/// Approve or reject an account
#[utoipa::path(
    put,
    path = "/persetujuan-akun/{id}/status",
    tag = "accounts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Account ID")),
    request_body = UpdateAccountStatus,
    responses(
        (status = 200, description = "Status changed", body = Account)
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAccountStatus>,
) -> AppResult<Json<Account>> {
    let account = state.services.accounts.set_status(id, body.status).await?;
    tracing::info!(by = ?session.email, account = %account.email, "approval decision recorded");
    Ok(Json(account))
}

/// Change the role of an account
#[utoipa::path(
    put,
    path = "/persetujuan-akun/{id}/role",
    tag = "accounts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Account ID")),
    request_body = UpdateAccountRole,
    responses(
        (status = 200, description = "Role changed", body = Account)
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAccountRole>,
) -> AppResult<Json<Account>> {
    let account = state.services.accounts.set_role(id, body.role).await?;
    Ok(Json(account))
}

#[utoipa::path(
    delete,
    path = "/persetujuan-akun/{id}",
    tag = "accounts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.accounts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
