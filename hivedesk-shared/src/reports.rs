/// Read-only performance aggregation
///
/// Composes counts and ratios over assignments, documents, and training
/// progress. Nothing here mutates state; every rate is defined as 0 (not an
/// error) when its denominator collection is empty.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    assignment::{AssignmentStatus, TaskAssignment},
    document::Document,
    training_module::TrainingModule,
    training_progress::TrainingProgress,
    user::User,
};

/// Company-wide onboarding statistics
#[derive(Debug, Clone, Serialize)]
pub struct OverallStats {
    /// Employee accounts, active or not
    pub total_employees: i64,

    /// Employee accounts with the active flag set
    pub active_employees: i64,

    /// All task assignments
    pub total_assignments: i64,

    /// Completed task assignments
    pub completed_assignments: i64,

    /// completed / total * 100, 0 when there are no assignments
    pub task_completion_rate: f64,

    /// Active training modules in the catalog
    pub active_training_modules: i64,

    /// All training progress records
    pub total_training_records: i64,

    /// Completed training progress records
    pub completed_training_records: i64,

    /// Completed ratio over all progress records (not employees × modules)
    pub training_completion_rate: f64,

    /// Documents still awaiting HR review
    pub pending_documents: i64,
}

impl OverallStats {
    /// Loads company-wide statistics
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let total_employees = User::count_employees(pool).await?;
        let active_employees = User::count_active_employees(pool).await?;

        let total_assignments = TaskAssignment::count_all(pool).await?;
        let completed_assignments =
            TaskAssignment::count_by_status(pool, AssignmentStatus::Completed).await?;

        let active_training_modules = TrainingModule::count_active(pool).await?;
        let total_training_records = TrainingProgress::count_all(pool).await?;
        let completed_training_records = TrainingProgress::count_completed(pool).await?;

        let pending_documents = Document::count_pending(pool).await?;

        Ok(Self {
            total_employees,
            active_employees,
            total_assignments,
            completed_assignments,
            task_completion_rate: completion_rate(completed_assignments, total_assignments),
            active_training_modules,
            total_training_records,
            completed_training_records,
            training_completion_rate: completion_rate(
                completed_training_records,
                total_training_records,
            ),
            pending_documents,
        })
    }
}

/// Per-employee onboarding statistics
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeStats {
    /// All assignments for this employee
    pub total_tasks: i64,

    /// Completed assignments
    pub completed_tasks: i64,

    /// Pending assignments
    pub pending_tasks: i64,

    /// completed / total * 100, 0 when the employee has no assignments
    pub task_completion_rate: f64,

    /// Mean completion time in whole days over completed assignments;
    /// absent when none are completed
    pub avg_task_completion_days: Option<f64>,

    /// All training records for this employee
    pub total_training: i64,

    /// Completed training records
    pub completed_training: i64,

    /// completed / total * 100, 0 when the employee has no records
    pub training_completion_rate: f64,
}

impl EmployeeStats {
    /// Loads statistics for one employee
    pub async fn load(pool: &PgPool, employee_id: Uuid) -> Result<Self, sqlx::Error> {
        let total_tasks = TaskAssignment::count_by_employee(pool, employee_id).await?;
        let completed_tasks = TaskAssignment::count_by_employee_and_status(
            pool,
            employee_id,
            AssignmentStatus::Completed,
        )
        .await?;
        let pending_tasks = TaskAssignment::count_by_employee_and_status(
            pool,
            employee_id,
            AssignmentStatus::Pending,
        )
        .await?;

        let timestamps = TaskAssignment::completed_timestamps(pool, employee_id).await?;

        let total_training = TrainingProgress::count_by_employee(pool, employee_id).await?;
        let completed_training =
            TrainingProgress::count_completed_by_employee(pool, employee_id).await?;

        Ok(Self {
            total_tasks,
            completed_tasks,
            pending_tasks,
            task_completion_rate: completion_rate(completed_tasks, total_tasks),
            avg_task_completion_days: average_completion_days(&timestamps),
            total_training,
            completed_training,
            training_completion_rate: completion_rate(completed_training, total_training),
        })
    }
}

/// completed / total * 100, with an empty denominator defined as 0
pub fn completion_rate(completed: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

/// Mean completion time in whole days
///
/// Each pair contributes its day-truncated difference (a 36-hour turnaround
/// counts as 1 day, not 2); the mean is taken over those whole-day values.
/// Returns `None` for an empty slice.
pub fn average_completion_days(pairs: &[(DateTime<Utc>, DateTime<Utc>)]) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }

    let total_days: i64 = pairs
        .iter()
        .map(|(assigned, completed)| (*completed - *assigned).num_days())
        .sum();

    Some(total_days as f64 / pairs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_completion_rate_zero_denominator() {
        assert_eq!(completion_rate(0, 0), 0.0);
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(completion_rate(1, 2), 50.0);
        assert_eq!(completion_rate(3, 3), 100.0);
        assert_eq!(completion_rate(0, 5), 0.0);
    }

    #[test]
    fn test_average_completion_days_empty() {
        assert_eq!(average_completion_days(&[]), None);
    }

    #[test]
    fn test_average_completion_days_truncates() {
        let start = Utc::now();
        // 36 hours truncates to 1 day, not 2
        let pairs = vec![(start, start + Duration::hours(36))];
        assert_eq!(average_completion_days(&pairs), Some(1.0));
    }

    #[test]
    fn test_average_completion_days_mean() {
        let start = Utc::now();
        let pairs = vec![
            (start, start + Duration::days(1)),
            (start, start + Duration::days(4)),
        ];
        assert_eq!(average_completion_days(&pairs), Some(2.5));
    }

    #[test]
    fn test_average_completion_days_sub_day_is_zero() {
        let start = Utc::now();
        let pairs = vec![(start, start + Duration::hours(5))];
        assert_eq!(average_completion_days(&pairs), Some(0.0));
    }
}
