/// Onboarding task catalog
///
/// Tasks are authored by HR and exist independently of any employee; linking
/// a task to an employee is the job of `models::assignment`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     task_type VARCHAR(50) NOT NULL,
///     content TEXT NOT NULL DEFAULT '',
///     required_document_type document_type,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_by UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::document::DocumentType;

/// Catalog entry for an onboarding task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short title shown in listings
    pub title: String,

    /// Longer human description
    pub description: String,

    /// Free-form task category (e.g. "paperwork", "setup")
    pub task_type: String,

    /// Instructional content shown to the employee
    pub content: String,

    /// Document type the employee must upload to finish this task, if any
    pub required_document_type: Option<DocumentType>,

    /// Whether the task is available for assignment
    pub is_active: bool,

    /// HR user who authored the task (null if that account was deleted)
    pub created_by: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Free-form task category
    pub task_type: String,

    /// Instructional content
    pub content: String,

    /// Required document type, if the task needs an upload
    pub required_document_type: Option<DocumentType>,

    /// Authoring HR user
    pub created_by: Option<Uuid>,
}

impl Task {
    /// Creates a new active task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, task_type, content, required_document_type, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, task_type, content, required_document_type,
                      is_active, created_by, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.task_type)
        .bind(data.content)
        .bind(data.required_document_type)
        .bind(data.created_by)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, task_type, content, required_document_type,
                   is_active, created_by, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks with pagination, oldest first
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, task_type, content, required_document_type,
                   is_active, created_by, created_at, updated_at
            FROM tasks
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Counts all tasks
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Deletes a task and every assignment that references it
    ///
    /// Assignments are removed first, in the same transaction, so the task
    /// row never disappears while assignments still point at it.
    ///
    /// Returns true if the task existed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM task_assignments WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
