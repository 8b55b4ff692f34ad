//! Per-project task statistics.

use serde::Serialize;

use crate::task::TaskStatus;

/// Status label counted into `pending_tasks`.
///
/// `pending` is not a [`TaskStatus`] value, so no task written through this
/// service ever carries it and the count reads zero. The field is kept on the
/// wire because clients render it.
pub const LEGACY_PENDING_STATUS: &str = "pending";

/// Aggregate task counts for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub in_progress_tasks: i64,
    pub pending_tasks: i64,
    /// Percentage of tasks completed, rounded to the nearest integer.
    pub progress: i64,
}

impl ProjectStats {
    /// Build stats from `(status label, count)` pairs as grouped by the store.
    pub fn from_status_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut stats = ProjectStats::default();
        for (status, count) in counts {
            let status = status.as_ref();
            stats.total_tasks += count;
            if status == TaskStatus::Completed.as_str() {
                stats.completed_tasks += count;
            } else if status == TaskStatus::InProgress.as_str() {
                stats.in_progress_tasks += count;
            } else if status == LEGACY_PENDING_STATUS {
                stats.pending_tasks += count;
            }
        }
        stats.progress = progress_percent(stats.completed_tasks, stats.total_tasks);
        stats
    }
}

/// `round(completed / total * 100)`, or `0` for a project with no tasks.
pub fn progress_percent(completed: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_has_zero_progress() {
        let stats = ProjectStats::from_status_counts(Vec::<(&str, i64)>::new());
        assert_eq!(stats, ProjectStats::default());
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn progress_rounds_to_nearest() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 2), 50);
        assert_eq!(progress_percent(1, 8), 13); // 12.5 rounds up
        assert_eq!(progress_percent(3, 3), 100);
    }

    #[test]
    fn progress_matches_formula_for_small_counts() {
        for total in 1..=40_i64 {
            for completed in 0..=total {
                let expected = (completed as f64 * 100.0 / total as f64).round() as i64;
                assert_eq!(progress_percent(completed, total), expected);
            }
        }
    }

    #[test]
    fn counts_are_bucketed_by_status() {
        let stats = ProjectStats::from_status_counts([
            ("new", 2),
            ("in-progress", 3),
            ("blocked", 1),
            ("completed", 4),
        ]);
        assert_eq!(stats.total_tasks, 10);
        assert_eq!(stats.completed_tasks, 4);
        assert_eq!(stats.in_progress_tasks, 3);
        assert_eq!(stats.pending_tasks, 0);
        assert_eq!(stats.progress, 40);
    }

    #[test]
    fn legacy_pending_label_is_counted() {
        let stats = ProjectStats::from_status_counts([("pending".to_string(), 2), ("completed".to_string(), 2)]);
        assert_eq!(stats.pending_tasks, 2);
        assert_eq!(stats.progress, 50);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ProjectStats::from_status_counts([("completed", 1)])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalTasks": 1,
                "completedTasks": 1,
                "inProgressTasks": 0,
                "pendingTasks": 0,
                "progress": 100
            })
        );
    }
}
