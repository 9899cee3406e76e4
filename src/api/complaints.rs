//! Complaint endpoints. This is the landing route, open to every signed-in role.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    filter::{retain_matching, FilterQuery},
    models::{
        complaint::{Complaint, CreateComplaint, UpdateComplaint},
        enums::ComplaintStatus,
    },
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ComplaintStatusRequest {
    pub status: ComplaintStatus,
}

/// List complaints, newest first
#[utoipa::path(
    get,
    path = "/pengaduan",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(FilterQuery),
    responses(
        (status = 200, description = "Complaints", body = Vec<Complaint>)
    )
)]
pub async fn list_complaints(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<Complaint>>> {
    let criteria = query.to_criteria()?;
    let rows = state.services.complaints.list().await?;
    Ok(Json(retain_matching(rows, &criteria)))
}

/// File a complaint
#[utoipa::path(
    post,
    path = "/pengaduan",
    tag = "complaints",
    security(("bearer_auth" = [])),
    request_body = CreateComplaint,
    responses(
        (status = 201, description = "Complaint filed", body = Complaint)
    )
)]
pub async fn create_complaint(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateComplaint>,
) -> AppResult<(StatusCode, Json<Complaint>)> {
    let complaint = state.services.complaints.create(&data).await?;
    tracing::debug!(by = ?session.email, id = complaint.id, "complaint filed");
    Ok((StatusCode::CREATED, Json(complaint)))
}

#[utoipa::path(
    put,
    path = "/pengaduan/{id}",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Complaint ID")),
    request_body = UpdateComplaint,
    responses(
        (status = 200, description = "Complaint updated", body = Complaint)
    )
)]
pub async fn update_complaint(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateComplaint>,
) -> AppResult<Json<Complaint>> {
    let complaint = state.services.complaints.update(id, &data).await?;
    Ok(Json(complaint))
}

/// Change only the status of a complaint
#[utoipa::path(
    put,
    path = "/pengaduan/{id}/status",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Complaint ID")),
    request_body = ComplaintStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = Complaint)
    )
)]
pub async fn update_complaint_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ComplaintStatusRequest>,
) -> AppResult<Json<Complaint>> {
    let complaint = state.services.complaints.set_status(id, body.status).await?;
    Ok(Json(complaint))
}

#[utoipa::path(
    delete,
    path = "/pengaduan/{id}",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Complaint ID")),
    responses(
        (status = 204, description = "Complaint deleted")
    )
)]
pub async fn delete_complaint(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.complaints.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
