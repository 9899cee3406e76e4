//! Equipment maintenance log endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    filter::{retain_matching, FilterQuery},
    models::equipment_log::{CreateEquipmentLog, EquipmentLog, UpdateEquipmentLog},
    AppState,
};

/// List log entries, most recent first, each with its equipment name
#[utoipa::path(
    get,
    path = "/log-peralatan",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    params(FilterQuery),
    responses(
        (status = 200, description = "Log entries", body = Vec<EquipmentLog>)
    )
)]
pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<EquipmentLog>>> {
    let criteria = query.to_criteria()?;
    let rows = state.services.equipment_logs.list().await?;
    Ok(Json(retain_matching(rows, &criteria)))
}

#[utoipa::path(
    post,
    path = "/log-peralatan",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    request_body = CreateEquipmentLog,
    responses(
        (status = 201, description = "Log entry created", body = EquipmentLog),
        (status = 400, description = "Unknown equipment or bad date", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_log(
    State(state): State<AppState>,
    Json(data): Json<CreateEquipmentLog>,
) -> AppResult<(StatusCode, Json<EquipmentLog>)> {
    let log = state.services.equipment_logs.create(&data).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[utoipa::path(
    put,
    path = "/log-peralatan/{id}",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log entry ID")),
    request_body = UpdateEquipmentLog,
    responses(
        (status = 200, description = "Log entry updated", body = EquipmentLog)
    )
)]
pub async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipmentLog>,
) -> AppResult<Json<EquipmentLog>> {
    let log = state.services.equipment_logs.update(id, &data).await?;
    Ok(Json(log))
}

#[utoipa::path(
    delete,
    path = "/log-peralatan/{id}",
    tag = "equipment-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log entry ID")),
    responses(
        (status = 204, description = "Log entry deleted")
    )
)]
pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment_logs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
