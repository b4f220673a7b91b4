/// Training module catalog
///
/// Modules are HR-authored catalog entries; per-employee state lives in
/// `models::training_progress`. Listings only ever show active modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Catalog entry for a training module
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrainingModule {
    /// Unique module ID
    pub id: Uuid,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Course content
    pub content: String,

    /// Expected duration in minutes
    pub duration_minutes: i32,

    /// Whether every employee must complete this module
    pub is_mandatory: bool,

    /// Whether the module is visible to employees
    pub is_active: bool,

    /// When the module was created
    pub created_at: DateTime<Utc>,

    /// When the module was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new training module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainingModule {
    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Course content
    pub content: String,

    /// Expected duration in minutes
    pub duration_minutes: i32,

    /// Mandatory flag
    pub is_mandatory: bool,
}

impl TrainingModule {
    /// Creates a new active module
    pub async fn create(pool: &PgPool, data: CreateTrainingModule) -> Result<Self, sqlx::Error> {
        let module = sqlx::query_as::<_, TrainingModule>(
            r#"
            INSERT INTO training_modules (title, description, content, duration_minutes, is_mandatory)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, content, duration_minutes, is_mandatory,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.content)
        .bind(data.duration_minutes)
        .bind(data.is_mandatory)
        .fetch_one(pool)
        .await?;

        Ok(module)
    }

    /// Finds a module by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let module = sqlx::query_as::<_, TrainingModule>(
            r#"
            SELECT id, title, description, content, duration_minutes, is_mandatory,
                   is_active, created_at, updated_at
            FROM training_modules
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(module)
    }

    /// Lists active modules with pagination, oldest first
    pub async fn list_active(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let modules = sqlx::query_as::<_, TrainingModule>(
            r#"
            SELECT id, title, description, content, duration_minutes, is_mandatory,
                   is_active, created_at, updated_at
            FROM training_modules
            WHERE is_active
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(modules)
    }

    /// Counts active modules
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM training_modules WHERE is_active")
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
