//! Activity schedule endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    filter::{retain_matching, FilterQuery},
    models::schedule::{CreateSchedule, Schedule, UpdateSchedule},
    AppState,
};

/// List scheduled activities in chronological order
#[utoipa::path(
    get,
    path = "/jadwal",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(FilterQuery),
    responses(
        (status = 200, description = "Schedules", body = Vec<Schedule>)
    )
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<Schedule>>> {
    let criteria = query.to_criteria()?;
    let rows = state.services.schedules.list().await?;
    Ok(Json(retain_matching(rows, &criteria)))
}

#[utoipa::path(
    post,
    path = "/jadwal",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = Schedule)
    )
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    let schedule = state.services.schedules.create(&data).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[utoipa::path(
    put,
    path = "/jadwal/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule)
    )
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSchedule>,
) -> AppResult<Json<Schedule>> {
    let schedule = state.services.schedules.update(id, &data).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/jadwal/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted")
    )
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
