//! Equipment inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    filter::{retain_matching, FilterQuery},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    AppState,
};

use super::AuthenticatedUser;

/// List equipment ordered by name, optionally filtered
#[utoipa::path(
    get,
    path = "/peralatan",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(FilterQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>),
        (status = 403, description = "Route not permitted", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let criteria = query.to_criteria()?;
    let rows = state.services.equipment.list().await?;
    Ok(Json(retain_matching(rows, &criteria)))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/peralatan/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Register a piece of equipment
#[utoipa::path(
    post,
    path = "/peralatan",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment)
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(&data).await?;
    tracing::debug!(by = ?session.email, id = equipment.id, "create equipment");
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment fields
#[utoipa::path(
    put,
    path = "/peralatan/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment)
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment together with its logs
#[utoipa::path(
    delete,
    path = "/peralatan/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted")
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    tracing::debug!(by = ?session.email, id, "delete equipment");
    Ok(StatusCode::NO_CONTENT)
}
