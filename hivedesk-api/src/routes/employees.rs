/// HR employee management endpoints
///
/// # Endpoints
///
/// - `GET /:name/:role/employees` - Paginated employees with task stats
/// - `GET /:name/:role/manage/:employee_id` - One employee with their work
/// - `PUT /:name/:role/manage/:employee_id` - Update an employee
/// - `DELETE /:name/:role/manage/:employee_id` - Delete an employee and
///   everything they own
///
/// All of these carry the HR gate in addition to the path-identity check.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use hivedesk_shared::{
    auth::{authorization::authorize, middleware::CurrentUser},
    models::{
        assignment::TaskAssignment,
        document::Document,
        user::{Role, UpdateUser, User},
    },
    reports::EmployeeStats,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    pagination::{PageParams, Paginated},
    routes::MessageResponse,
};

/// One employee row in the HR listing, with task stats attached
#[derive(Debug, Serialize)]
pub struct EmployeeSummary {
    /// Employee ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Active flag
    pub is_active: bool,

    /// The employee's assignments
    pub total_tasks: i64,

    /// Completed assignments
    pub completed_tasks: i64,

    /// completed / total * 100, 0 with no assignments
    pub completion_rate: f64,
}

/// Employee detail for the manage view
#[derive(Debug, Serialize)]
pub struct EmployeeDetail {
    /// The employee account
    pub employee: User,

    /// All of the employee's assignments
    pub tasks: Vec<TaskAssignment>,

    /// All of the employee's documents
    pub documents: Vec<Document>,
}

/// Update payload for an employee
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    /// New display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New active flag
    pub is_active: Option<bool>,
}

/// Lists employees with per-employee task statistics (HR only)
pub async fn list_employees(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    Query(params): Query<PageParams>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Paginated<EmployeeSummary>>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    let total = User::count_employees(&state.db).await?;
    let employees = User::list_employees(&state.db, params.limit(), params.offset()).await?;

    let mut items = Vec::with_capacity(employees.len());
    for employee in employees {
        let stats = EmployeeStats::load(&state.db, employee.id).await?;
        items.push(EmployeeSummary {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            is_active: employee.is_active,
            total_tasks: stats.total_tasks,
            completed_tasks: stats.completed_tasks,
            completion_rate: stats.task_completion_rate,
        });
    }

    Ok(Json(Paginated::new(items, total, &params)))
}

/// Returns one employee with their assignments and documents (HR only)
pub async fn manage_employee(
    State(state): State<AppState>,
    Path((name, role, employee_id)): Path<(String, String, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<EmployeeDetail>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    let employee = User::find_employee(&state.db, employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let tasks = TaskAssignment::list_by_employee(&state.db, employee.id).await?;
    let documents = Document::list_all_by_employee(&state.db, employee.id).await?;

    Ok(Json(EmployeeDetail {
        employee,
        tasks,
        documents,
    }))
}

/// Updates an employee account (HR only)
pub async fn update_employee(
    State(state): State<AppState>,
    Path((name, role, employee_id)): Path<(String, String, Uuid)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateEmployeeRequest>,
) -> ApiResult<Json<User>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    req.validate()?;

    // Resolve first so an unknown or non-employee id reads as NotFound
    // rather than a silent no-op update.
    User::find_employee(&state.db, employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let updated = User::update(
        &state.db,
        employee_id,
        UpdateUser {
            name: req.name,
            email: req.email,
            is_active: req.is_active,
            ..Default::default()
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    Ok(Json(updated))
}

/// Deletes an employee and everything they own (HR only)
///
/// The employee's task assignments, documents, and training progress are
/// removed with the account, in one transaction.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path((name, role, employee_id)): Path<(String, String, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<MessageResponse>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    User::find_employee(&state.db, employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    User::delete(&state.db, employee_id).await?;

    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
