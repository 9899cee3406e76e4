//! File archive endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    filter::{retain_matching, FilterQuery},
    models::{
        enums::FileCategory,
        file_record::{CreateFileRecord, FileRecord, UpdateFileRecord},
    },
    services::files::Upload,
    AppState,
};

/// Multipart form accepted by the upload endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// The file itself
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Display name (defaults to the file name)
    pub name: Option<String>,
    pub category: Option<FileCategory>,
    pub notes: Option<String>,
}

/// List archived files, newest first
#[utoipa::path(
    get,
    path = "/arsip",
    tag = "files",
    security(("bearer_auth" = [])),
    params(FilterQuery),
    responses(
        (status = 200, description = "Files", body = Vec<FileRecord>)
    )
)]
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<FileRecord>>> {
    let criteria = query.to_criteria()?;
    let rows = state.services.files.list().await?;
    Ok(Json(retain_matching(rows, &criteria)))
}

/// Register a file hosted elsewhere
#[utoipa::path(
    post,
    path = "/arsip",
    tag = "files",
    security(("bearer_auth" = [])),
    request_body = CreateFileRecord,
    responses(
        (status = 201, description = "File registered", body = FileRecord)
    )
)]
pub async fn create_file(
    State(state): State<AppState>,
    Json(data): Json<CreateFileRecord>,
) -> AppResult<(StatusCode, Json<FileRecord>)> {
    let file = state.services.files.create(&data).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// Upload a file into the archive
#[utoipa::path(
    post,
    path = "/arsip/upload",
    tag = "files",
    security(("bearer_auth" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = FileRecord),
        (status = 400, description = "Missing, empty or oversized file", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<FileRecord>)> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut name = None;
    let mut category = FileCategory::default();
    let mut notes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            "name" | "category" | "notes" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field {}: {}", field_name, e)))?;
                match field_name.as_str() {
                    "name" => name = Some(value),
                    "category" => category = value.parse().map_err(AppError::Validation)?,
                    _ => notes = Some(value).filter(|n| !n.is_empty()),
                }
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing file field".to_string()))?;

    let record = state
        .services
        .files
        .upload(Upload {
            file_name,
            content_type,
            bytes,
            name,
            category,
            notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Update file metadata
#[utoipa::path(
    put,
    path = "/arsip/{id}",
    tag = "files",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "File ID")),
    request_body = UpdateFileRecord,
    responses(
        (status = 200, description = "File updated", body = FileRecord)
    )
)]
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateFileRecord>,
) -> AppResult<Json<FileRecord>> {
    let file = state.services.files.update(id, &data).await?;
    Ok(Json(file))
}

/// Delete a file record and its stored upload
#[utoipa::path(
    delete,
    path = "/arsip/{id}",
    tag = "files",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "File ID")),
    responses(
        (status = 204, description = "File deleted")
    )
)]
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.files.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
