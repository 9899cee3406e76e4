//! Statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::Statistics, AppState};

/// Dashboard figures derived from every table
#[utoipa::path(
    get,
    path = "/statistik",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Statistics", body = Statistics)
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<Statistics>> {
    let stats = state.services.stats.overview().await?;
    Ok(Json(stats))
}
