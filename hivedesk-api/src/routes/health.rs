/// Health check endpoint
///
/// `GET /health` is a public liveness probe that also pings the database.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{app::AppState, error::ApiResult};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the server responds
    pub status: &'static str,

    /// Server version
    pub version: &'static str,
}

/// Returns 200 when the server and its database are reachable
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    hivedesk_shared::db::pool::health_check(&state.db).await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
