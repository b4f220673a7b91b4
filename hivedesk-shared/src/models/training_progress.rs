/// Per-employee training progress
///
/// One progress record per (employee, module) pair, enforced by a unique
/// constraint. Writes go through a single atomic upsert: status is derived
/// from the percentage on every write, so a record that reached `completed`
/// at 100% flips back to `pending` if a later write drops the percentage,
/// while `completed_at` keeps the timestamp of the last completion. That
/// asymmetry is intentional product behavior, not an oversight.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE training_status AS ENUM ('pending', 'completed');
///
/// CREATE TABLE training_progress (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     employee_id UUID NOT NULL REFERENCES users(id),
///     module_id UUID NOT NULL REFERENCES training_modules(id),
///     progress_percentage INTEGER NOT NULL DEFAULT 0
///         CHECK (progress_percentage BETWEEN 0 AND 100),
///     status training_status NOT NULL DEFAULT 'pending',
///     started_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     completed_at TIMESTAMPTZ,
///     UNIQUE (employee_id, module_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Training completion state, derived from the percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "training_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TrainingStatus {
    /// Below 100%
    Pending,

    /// At 100%
    Completed,
}

impl TrainingStatus {
    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStatus::Pending => "pending",
            TrainingStatus::Completed => "completed",
        }
    }

    /// Derives the status a given percentage maps to
    pub fn from_percentage(percentage: i32) -> Self {
        if percentage >= 100 {
            TrainingStatus::Completed
        } else {
            TrainingStatus::Pending
        }
    }
}

/// One employee's progress against one module
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrainingProgress {
    /// Unique record ID
    pub id: Uuid,

    /// Owning employee
    pub employee_id: Uuid,

    /// Referenced training module
    pub module_id: Uuid,

    /// Progress in [0, 100]
    pub progress_percentage: i32,

    /// Derived completion state
    pub status: TrainingStatus,

    /// When the employee first touched the module
    pub started_at: DateTime<Utc>,

    /// When the employee last reached 100%; survives later regressions
    pub completed_at: Option<DateTime<Utc>>,
}

/// An active module joined with one employee's progress, for the
/// employee-facing training listing. Progress columns are null when the
/// employee has not started the module.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ModuleProgressRow {
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

    /// Progress state, if a record exists
    pub status: Option<TrainingStatus>,

    /// Percentage, if a record exists
    pub progress_percentage: Option<i32>,

    /// When the employee started, if they did
    pub started_at: Option<DateTime<Utc>>,

    /// When the employee last completed, if they did
    pub completed_at: Option<DateTime<Utc>>,
}

impl TrainingProgress {
    /// Creates or overwrites an employee's progress on a module
    ///
    /// A single INSERT .. ON CONFLICT keeps the read-modify-write atomic.
    /// On every write the status is recomputed from the percentage; a write
    /// at or above 100 refreshes `completed_at`, a write below 100 leaves
    /// the previous `completed_at` untouched. `started_at` is set once, at
    /// the first write.
    ///
    /// The caller validates the percentage range; values outside [0, 100]
    /// would also trip the table CHECK constraint.
    pub async fn upsert(
        pool: &PgPool,
        employee_id: Uuid,
        module_id: Uuid,
        percentage: i32,
    ) -> Result<Self, sqlx::Error> {
        let progress = sqlx::query_as::<_, TrainingProgress>(
            r#"
            INSERT INTO training_progress (employee_id, module_id, progress_percentage, status, completed_at)
            VALUES ($1, $2, $3,
                    CASE WHEN $3 >= 100 THEN 'completed'::training_status
                         ELSE 'pending'::training_status END,
                    CASE WHEN $3 >= 100 THEN NOW() END)
            ON CONFLICT (employee_id, module_id) DO UPDATE
            SET progress_percentage = EXCLUDED.progress_percentage,
                status = EXCLUDED.status,
                completed_at = CASE WHEN EXCLUDED.progress_percentage >= 100 THEN NOW()
                                    ELSE training_progress.completed_at END
            RETURNING id, employee_id, module_id, progress_percentage, status, started_at, completed_at
            "#,
        )
        .bind(employee_id)
        .bind(module_id)
        .bind(percentage)
        .fetch_one(pool)
        .await?;

        Ok(progress)
    }

    /// Finds one employee's progress on one module
    pub async fn find(
        pool: &PgPool,
        employee_id: Uuid,
        module_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let progress = sqlx::query_as::<_, TrainingProgress>(
            r#"
            SELECT id, employee_id, module_id, progress_percentage, status, started_at, completed_at
            FROM training_progress
            WHERE employee_id = $1 AND module_id = $2
            "#,
        )
        .bind(employee_id)
        .bind(module_id)
        .fetch_optional(pool)
        .await?;

        Ok(progress)
    }

    /// Lists active modules joined with one employee's own progress,
    /// paginated
    ///
    /// Modules the employee has not started come back with null progress
    /// columns; callers report those as pending at 0%.
    pub async fn list_modules_with_progress(
        pool: &PgPool,
        employee_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ModuleProgressRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ModuleProgressRow>(
            r#"
            SELECT m.id, m.title, m.description, m.duration_minutes, m.is_mandatory,
                   p.status, p.progress_percentage, p.started_at, p.completed_at
            FROM training_modules m
            LEFT JOIN training_progress p
                   ON p.module_id = m.id AND p.employee_id = $1
            WHERE m.is_active
            ORDER BY m.created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(employee_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Counts all progress records
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM training_progress")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts all completed progress records
    pub async fn count_completed(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM training_progress WHERE status = 'completed'")
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Counts one employee's progress records
    pub async fn count_by_employee(pool: &PgPool, employee_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM training_progress WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Counts one employee's completed progress records
    pub async fn count_completed_by_employee(
        pool: &PgPool,
        employee_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM training_progress WHERE employee_id = $1 AND status = 'completed'",
        )
        .bind(employee_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
