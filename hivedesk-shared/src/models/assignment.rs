/// Task assignments linking catalog tasks to employees
///
/// An assignment is the unit of onboarding work an employee actually sees.
/// Its lifecycle is a one-way `pending -> completed` transition: HR assigns,
/// the owning employee completes, and nothing moves an assignment back to
/// pending.
///
/// # State Machine
///
/// ```text
/// pending → completed
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TYPE assignment_status AS ENUM ('pending', 'completed');
///
/// CREATE TABLE task_assignments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     task_id UUID NOT NULL REFERENCES tasks(id),
///     employee_id UUID NOT NULL REFERENCES users(id),
///     assigned_by UUID REFERENCES users(id) ON DELETE SET NULL,
///     status assignment_status NOT NULL DEFAULT 'pending',
///     assigned_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     completed_at TIMESTAMPTZ,
///     UNIQUE (task_id, employee_id)
/// );
/// ```
///
/// The UNIQUE pair constraint is what rejects a duplicate assignment: the
/// insert and the existence check are a single statement, so two concurrent
/// assign requests cannot both succeed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Assignment completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Assigned, not yet completed
    Pending,

    /// Marked complete by the owning employee
    Completed,
}

impl AssignmentStatus {
    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Completed => "completed",
        }
    }
}

/// A task assigned to one employee
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskAssignment {
    /// Unique assignment ID
    pub id: Uuid,

    /// Referenced catalog task
    pub task_id: Uuid,

    /// Employee the task was assigned to
    pub employee_id: Uuid,

    /// HR user who made the assignment (null if that account was deleted)
    pub assigned_by: Option<Uuid>,

    /// Completion state
    pub status: AssignmentStatus,

    /// When the assignment was created
    pub assigned_at: DateTime<Utc>,

    /// When the assignment was completed (null while pending)
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a new assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignment {
    /// Catalog task to assign
    pub task_id: Uuid,

    /// Employee receiving the assignment
    pub employee_id: Uuid,

    /// HR user making the assignment
    pub assigned_by: Uuid,
}

/// An assignment joined with the catalog fields of its task, for the
/// employee-facing task listing
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssignmentWithTask {
    /// Assignment ID (what `complete` takes)
    pub assignment_id: Uuid,

    /// Catalog task ID
    pub task_id: Uuid,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Task category
    pub task_type: String,

    /// Instructional content
    pub content: String,

    /// Completion state of this employee's assignment
    pub status: AssignmentStatus,

    /// When the task was assigned
    pub assigned_at: DateTime<Utc>,

    /// When it was completed, if it was
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskAssignment {
    /// Assigns a task to an employee
    ///
    /// # Errors
    ///
    /// A second assignment of the same (task, employee) pair violates the
    /// unique constraint; callers surface that as a conflict. Foreign-key
    /// failures mean the task or employee row vanished between validation
    /// and insert.
    pub async fn assign(pool: &PgPool, data: CreateAssignment) -> Result<Self, sqlx::Error> {
        let assignment = sqlx::query_as::<_, TaskAssignment>(
            r#"
            INSERT INTO task_assignments (task_id, employee_id, assigned_by)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, employee_id, assigned_by, status, assigned_at, completed_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.employee_id)
        .bind(data.assigned_by)
        .fetch_one(pool)
        .await?;

        Ok(assignment)
    }

    /// Marks an assignment completed on behalf of an employee
    ///
    /// The ownership check is part of the UPDATE itself: a row is only
    /// touched when it both exists and belongs to `employee_id`, so a caller
    /// completing someone else's assignment gets `None`, indistinguishable
    /// from a missing assignment.
    ///
    /// Completing an already-completed assignment re-stamps `completed_at`;
    /// there is deliberately no status guard here.
    pub async fn complete(
        pool: &PgPool,
        id: Uuid,
        employee_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let assignment = sqlx::query_as::<_, TaskAssignment>(
            r#"
            UPDATE task_assignments
            SET status = 'completed',
                completed_at = NOW()
            WHERE id = $1 AND employee_id = $2
            RETURNING id, task_id, employee_id, assigned_by, status, assigned_at, completed_at
            "#,
        )
        .bind(id)
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }

    /// Finds an assignment by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let assignment = sqlx::query_as::<_, TaskAssignment>(
            r#"
            SELECT id, task_id, employee_id, assigned_by, status, assigned_at, completed_at
            FROM task_assignments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }

    /// Lists an employee's assignments, oldest first
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let assignments = sqlx::query_as::<_, TaskAssignment>(
            r#"
            SELECT id, task_id, employee_id, assigned_by, status, assigned_at, completed_at
            FROM task_assignments
            WHERE employee_id = $1
            ORDER BY assigned_at ASC
            "#,
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await?;

        Ok(assignments)
    }

    /// Lists an employee's assignments joined with task catalog fields,
    /// paginated
    pub async fn list_with_task_by_employee(
        pool: &PgPool,
        employee_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AssignmentWithTask>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AssignmentWithTask>(
            r#"
            SELECT a.id AS assignment_id, t.id AS task_id, t.title, t.description,
                   t.task_type, t.content, a.status, a.assigned_at, a.completed_at
            FROM task_assignments a
            JOIN tasks t ON t.id = a.task_id
            WHERE a.employee_id = $1
            ORDER BY a.assigned_at ASC
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

    /// Counts an employee's assignments
    pub async fn count_by_employee(pool: &PgPool, employee_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM task_assignments WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Counts an employee's assignments in a given state
    pub async fn count_by_employee_and_status(
        pool: &PgPool,
        employee_id: Uuid,
        status: AssignmentStatus,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM task_assignments WHERE employee_id = $1 AND status = $2",
        )
        .bind(employee_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Counts all assignments
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM task_assignments")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts all assignments in a given state
    pub async fn count_by_status(
        pool: &PgPool,
        status: AssignmentStatus,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM task_assignments WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Fetches (assigned_at, completed_at) pairs for an employee's completed
    /// assignments, for the average-completion-time report
    pub async fn completed_timestamps(
        pool: &PgPool,
        employee_id: Uuid,
    ) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>, sqlx::Error> {
        let rows: Vec<(DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT assigned_at, completed_at
            FROM task_assignments
            WHERE employee_id = $1 AND status = 'completed' AND completed_at IS NOT NULL
            "#,
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_status_as_str() {
        assert_eq!(AssignmentStatus::Pending.as_str(), "pending");
        assert_eq!(AssignmentStatus::Completed.as_str(), "completed");
    }
}
