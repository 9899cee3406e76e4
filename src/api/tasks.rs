//! Task assignment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    filter::{retain_matching, FilterQuery},
    models::task::{CreateTask, Task, UpdateTask},
    AppState,
};

/// List tasks by due date
#[utoipa::path(
    get,
    path = "/tugas",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(FilterQuery),
    responses(
        (status = 200, description = "Tasks", body = Vec<Task>)
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let criteria = query.to_criteria()?;
    let rows = state.services.tasks.list().await?;
    Ok(Json(retain_matching(rows, &criteria)))
}

#[utoipa::path(
    post,
    path = "/tugas",
    tag = "tasks",
    security(("bearer_auth" = [])),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = Task)
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    Json(data): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = state.services.tasks.create(&data).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    put,
    path = "/tugas/{id}",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = Task)
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let task = state.services.tasks.update(id, &data).await?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/tugas/{id}",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted")
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
