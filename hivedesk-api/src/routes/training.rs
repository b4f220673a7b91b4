/// Training endpoints
///
/// # Endpoints
///
/// - `GET /:name/:role/training` - Active modules; an employee's view joins
///   their own progress, HR sees the raw catalog
/// - `POST /:name/:role/training` - Create a module (HR only)
/// - `POST /:name/:role/training/progress` - Upsert one's own progress

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use hivedesk_shared::{
    auth::{authorization::authorize, middleware::CurrentUser},
    models::{
        training_module::{CreateTrainingModule, TrainingModule},
        training_progress::{TrainingProgress, TrainingStatus},
        user::Role,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    pagination::{PageParams, Paginated},
};

/// Create-module payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateModuleRequest {
    /// Short title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Longer description
    #[serde(default)]
    pub description: String,

    /// Course content
    #[serde(default)]
    pub content: String,

    /// Expected duration in minutes
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_minutes: i32,

    /// Mandatory flag
    #[serde(default)]
    pub is_mandatory: bool,
}

/// Progress upsert payload
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    /// Module being progressed
    pub module_id: Uuid,

    /// New percentage; values outside [0, 100] are rejected, not clamped
    #[validate(range(min = 0, max = 100, message = "Percentage must be between 0 and 100"))]
    pub progress_percentage: i32,
}

/// Progress columns in the employee training listing
#[derive(Debug, Serialize)]
pub struct ProgressView {
    /// Completion state ("pending" when the module was never started)
    pub status: &'static str,

    /// Percentage (0 when never started)
    pub progress_percentage: i32,

    /// When the employee started, if they did
    pub started_at: Option<DateTime<Utc>>,

    /// When the employee last completed, if they did
    pub completed_at: Option<DateTime<Utc>>,
}

/// One module in the employee training listing
#[derive(Debug, Serialize)]
pub struct ModuleWithProgress {
    /// Module ID
    pub id: Uuid,

    /// Module title
    pub title: String,

    /// Module description
    pub description: String,

    /// Expected duration in minutes
    pub duration_minutes: i32,

    /// Mandatory flag
    pub is_mandatory: bool,

    /// The employee's own progress
    pub progress: ProgressView,
}

/// Lists active training modules for the target identity
///
/// An employee gets each active module joined with their own progress; a
/// module they never started reports pending at 0% with no timestamps. HR
/// gets the raw catalog entries.
pub async fn list_training(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    Query(params): Query<PageParams>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Response> {
    authorize(&user, &name, &role, None)?;

    let total = TrainingModule::count_active(&state.db).await?;

    let response = match user.role {
        Role::Employee => {
            let rows = TrainingProgress::list_modules_with_progress(
                &state.db,
                user.id,
                params.limit(),
                params.offset(),
            )
            .await?;

            let items: Vec<ModuleWithProgress> = rows
                .into_iter()
                .map(|row| ModuleWithProgress {
                    id: row.id,
                    title: row.title,
                    description: row.description,
                    duration_minutes: row.duration_minutes,
                    is_mandatory: row.is_mandatory,
                    progress: ProgressView {
                        status: row.status.unwrap_or(TrainingStatus::Pending).as_str(),
                        progress_percentage: row.progress_percentage.unwrap_or(0),
                        started_at: row.started_at,
                        completed_at: row.completed_at,
                    },
                })
                .collect();

            Json(Paginated::new(items, total, &params)).into_response()
        }
        Role::Hr => {
            let items =
                TrainingModule::list_active(&state.db, params.limit(), params.offset()).await?;
            Json(Paginated::new(items, total, &params)).into_response()
        }
    };

    Ok(response)
}

/// Creates a training module (HR only)
pub async fn create_module(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateModuleRequest>,
) -> ApiResult<Json<TrainingModule>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    req.validate()?;

    let module = TrainingModule::create(
        &state.db,
        CreateTrainingModule {
            title: req.title,
            description: req.description,
            content: req.content,
            duration_minutes: req.duration_minutes,
            is_mandatory: req.is_mandatory,
        },
    )
    .await?;

    Ok(Json(module))
}

/// Upserts the caller's progress on a module (employees only)
///
/// Out-of-range percentages are a validation error. The write is a single
/// atomic upsert: reaching 100 marks the record completed and stamps
/// `completed_at`; dropping below 100 afterwards flips the status back to
/// pending while the old `completed_at` stays in place.
pub async fn update_progress(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateProgressRequest>,
) -> ApiResult<Json<TrainingProgress>> {
    authorize(&user, &name, &role, Some(Role::Employee))?;

    req.validate()?;

    TrainingModule::find_by_id(&state.db, req.module_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Training module not found".to_string()))?;

    let progress =
        TrainingProgress::upsert(&state.db, user.id, req.module_id, req.progress_percentage)
            .await?;

    Ok(Json(progress))
}
