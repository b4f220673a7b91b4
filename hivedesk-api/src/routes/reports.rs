/// HR performance reporting endpoints
///
/// Read-only views composed by the report aggregator.
///
/// # Endpoints
///
/// - `GET /:name/:role/reports/overview` - Company-wide statistics (HR only)
/// - `GET /:name/:role/reports/employee/:employee_id` - One employee's
///   statistics (HR only)

use axum::{
    extract::{Path, State},
    Json,
};
use hivedesk_shared::{
    auth::{authorization::authorize, middleware::CurrentUser},
    models::user::{Role, User},
    reports::{EmployeeStats, OverallStats},
};
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Returns company-wide onboarding statistics (HR only)
pub async fn overview(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<OverallStats>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    let stats = OverallStats::load(&state.db).await?;
    Ok(Json(stats))
}

/// Returns one employee's onboarding statistics (HR only)
pub async fn employee_report(
    State(state): State<AppState>,
    Path((name, role, employee_id)): Path<(String, String, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<EmployeeStats>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    User::find_employee(&state.db, employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let stats = EmployeeStats::load(&state.db, employee_id).await?;
    Ok(Json(stats))
}
