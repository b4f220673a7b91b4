/// Task catalog, assignment, and completion endpoints
///
/// # Endpoints
///
/// - `GET /:name/:role/tasks` - HR: the catalog; employee: own assignments
/// - `POST /:name/:role/tasks` - Create a catalog task (HR only)
/// - `DELETE /:name/:role/tasks/:task_id` - Delete a task and its assignments (HR only)
/// - `POST /:name/:role/assign-task` - Assign a task to an employee (HR only)
/// - `POST /:name/:role/tasks/complete` - Mark one's own assignment completed

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use hivedesk_shared::{
    auth::{authorization::authorize, middleware::CurrentUser},
    models::{
        assignment::{CreateAssignment, TaskAssignment},
        document::DocumentType,
        task::{CreateTask, Task},
        user::{Role, User},
    },
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    pagination::{PageParams, Paginated},
    routes::MessageResponse,
};

/// Create-task payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Short title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Longer description
    #[serde(default)]
    pub description: String,

    /// Free-form task category
    #[validate(length(min = 1, max = 50, message = "Task type must be 1-50 characters"))]
    pub task_type: String,

    /// Instructional content
    #[serde(default)]
    pub content: String,

    /// Document type the task requires, as a wire string
    pub required_document_type: Option<String>,
}

/// Assign-task payload
#[derive(Debug, Deserialize)]
pub struct AssignTaskRequest {
    /// Employee receiving the task
    pub employee_id: Uuid,

    /// Catalog task to assign
    pub task_id: Uuid,
}

/// Complete-task payload
#[derive(Debug, Deserialize)]
pub struct CompleteTaskRequest {
    /// The assignment to mark completed
    pub assignment_id: Uuid,
}

/// Lists tasks for the target identity
///
/// HR sees the raw catalog; an employee sees their own assignments joined
/// with the task fields. Both are paginated with an independent total.
pub async fn list_tasks(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    Query(params): Query<PageParams>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Response> {
    authorize(&user, &name, &role, None)?;

    let response = match user.role {
        Role::Hr => {
            let total = Task::count(&state.db).await?;
            let items = Task::list(&state.db, params.limit(), params.offset()).await?;
            Json(Paginated::new(items, total, &params)).into_response()
        }
        Role::Employee => {
            let total = TaskAssignment::count_by_employee(&state.db, user.id).await?;
            let items = TaskAssignment::list_with_task_by_employee(
                &state.db,
                user.id,
                params.limit(),
                params.offset(),
            )
            .await?;
            Json(Paginated::new(items, total, &params)).into_response()
        }
    };

    Ok(response)
}

/// Creates a catalog task (HR only)
pub async fn create_task(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    req.validate()?;

    let required_document_type = match req.required_document_type.as_deref() {
        Some(raw) => Some(
            DocumentType::parse(raw)
                .ok_or_else(|| ApiError::validation("required_document_type", "Invalid document type"))?,
        ),
        None => None,
    };

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            task_type: req.task_type,
            content: req.content,
            required_document_type,
            created_by: Some(user.id),
        },
    )
    .await?;

    Ok(Json(task))
}

/// Deletes a catalog task and all assignments referencing it (HR only)
pub async fn delete_task(
    State(state): State<AppState>,
    Path((name, role, task_id)): Path<(String, String, Uuid)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<MessageResponse>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    let deleted = Task::delete(&state.db, task_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

/// Assigns a task to an employee (HR only)
///
/// The referenced task and employee must exist (and the employee id must
/// actually be an employee account). A duplicate (task, employee) pair is a
/// conflict, enforced by the storage layer's unique constraint so two
/// concurrent requests cannot both succeed.
pub async fn assign_task(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<AssignTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    Task::find_by_id(&state.db, req.task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    User::find_employee(&state.db, req.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    TaskAssignment::assign(
        &state.db,
        CreateAssignment {
            task_id: req.task_id,
            employee_id: req.employee_id,
            assigned_by: user.id,
        },
    )
    .await?;

    Ok(Json(MessageResponse::new("Task assigned successfully")))
}

/// Marks one of the caller's own assignments completed
///
/// Ownership is checked against the assignment row itself, independent of
/// the path-identity check; an assignment owned by someone else reads as
/// not found.
pub async fn complete_task(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CompleteTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    authorize(&user, &name, &role, None)?;

    TaskAssignment::complete(&state.db, req.assignment_id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task assignment not found".to_string()))?;

    Ok(Json(MessageResponse::new("Task marked as completed")))
}
