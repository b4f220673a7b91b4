/// Dashboard endpoint
///
/// `GET /:name/:role/dashboard` returns a role-dependent summary. HR sees
/// company-wide counts; an employee sees their own task numbers.

use axum::{
    extract::{Path, State},
    Json,
};
use hivedesk_shared::{
    auth::{authorization::authorize, middleware::CurrentUser},
    models::{
        assignment::{AssignmentStatus, TaskAssignment},
        document::Document,
        user::{Role, User},
    },
    reports::EmployeeStats,
};
use serde::Serialize;

use crate::{app::AppState, error::ApiResult};

/// HR dashboard body
#[derive(Debug, Serialize)]
pub struct HrDashboard {
    /// Always "hr"
    pub role: &'static str,

    /// Employee accounts
    pub total_employees: i64,

    /// Assignments still pending across the company
    pub pending_tasks: i64,

    /// Documents awaiting review
    pub pending_documents: i64,
}

/// Employee dashboard body
#[derive(Debug, Serialize)]
pub struct EmployeeDashboard {
    /// Always "employee"
    pub role: &'static str,

    /// The employee's assignments
    pub total_tasks: i64,

    /// Completed assignments
    pub completed_tasks: i64,

    /// Pending assignments
    pub pending_tasks: i64,

    /// completed / total * 100, 0 with no assignments
    pub completion_rate: f64,
}

/// One of the two dashboard shapes
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DashboardResponse {
    /// Company-wide view
    Hr(HrDashboard),

    /// Personal view
    Employee(EmployeeDashboard),
}

/// Returns the dashboard for the target identity
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<DashboardResponse>> {
    authorize(&user, &name, &role, None)?;

    let response = match user.role {
        Role::Hr => DashboardResponse::Hr(HrDashboard {
            role: "hr",
            total_employees: User::count_employees(&state.db).await?,
            pending_tasks: TaskAssignment::count_by_status(&state.db, AssignmentStatus::Pending)
                .await?,
            pending_documents: Document::count_pending(&state.db).await?,
        }),
        Role::Employee => {
            let stats = EmployeeStats::load(&state.db, user.id).await?;
            DashboardResponse::Employee(EmployeeDashboard {
                role: "employee",
                total_tasks: stats.total_tasks,
                completed_tasks: stats.completed_tasks,
                pending_tasks: stats.pending_tasks,
                completion_rate: stats.task_completion_rate,
            })
        }
    };

    Ok(Json(response))
}
