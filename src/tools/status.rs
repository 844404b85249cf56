/// Tools for reading streak statistics and service health
///
/// This module implements the habit_status and tracker_health tools.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::domain::StreakSnapshot;
use crate::storage::CheckStorage;
use crate::tools::{resolve_habit_id, today, ToolError};

/// Parameters for checking habit status
#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    /// Habit to inspect; defaults to the bootstrap habit
    pub habit_id: Option<String>,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habit_id: String,
    pub name: String,
    pub current: u32,
    pub longest: u32,
    pub last: Option<String>,
    pub message: String,
}

/// Response from the health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub habits: u64,
    pub checks: u64,
    pub time: String,
}

/// Get the streak snapshot for a habit
pub fn get_habit_status<S: CheckStorage>(
    storage: &S,
    params: StatusParams,
) -> Result<StatusResponse, ToolError> {
    let habit_id = resolve_habit_id(params.habit_id)?;
    let habit = storage.get_habit(habit_id)?;

    let dates = storage.list_checks(habit_id, None, None)?;
    let snapshot = StreakSnapshot::from_dates(&dates, today());

    let message = format!(
        "{}: current streak {} day{}, longest {} day{}{}",
        habit.name,
        snapshot.current,
        if snapshot.current == 1 { "" } else { "s" },
        snapshot.longest,
        if snapshot.longest == 1 { "" } else { "s" },
        match snapshot.last {
            Some(last) => format!(", last check {}", last),
            None => ", no checks yet".to_string(),
        }
    );

    Ok(StatusResponse {
        habit_id: habit_id.to_string(),
        name: habit.name,
        current: snapshot.current,
        longest: snapshot.longest,
        last: snapshot.last.map(|d| d.to_string()),
        message,
    })
}

/// Report ledger totals and the server time
pub fn tracker_health<S: CheckStorage>(storage: &S) -> Result<HealthResponse, ToolError> {
    let counts = storage.counts()?;

    Ok(HealthResponse {
        ok: true,
        habits: counts.habits,
        checks: counts.checks,
        time: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::domain::HabitId;
    use crate::storage::{SqliteStorage, StorageError};
    use tempfile::tempdir;

    fn open_storage() -> (tempfile::TempDir, SqliteStorage) {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("test.db")).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_status_of_fresh_default_habit() {
        let (_dir, storage) = open_storage();

        let status = get_habit_status(&storage, StatusParams::default()).unwrap();

        assert_eq!(status.habit_id, HabitId::DEFAULT.to_string());
        assert_eq!(status.current, 0);
        assert_eq!(status.longest, 0);
        assert_eq!(status.last, None);
    }

    #[test]
    fn test_status_after_consecutive_marks() {
        let (_dir, storage) = open_storage();
        let today = today();

        for offset in 0..3 {
            storage
                .add_check(HabitId::DEFAULT, today - Duration::days(offset))
                .unwrap();
        }

        let status = get_habit_status(&storage, StatusParams::default()).unwrap();
        assert_eq!(status.current, 3);
        assert_eq!(status.longest, 3);
        assert_eq!(status.last, Some(today.to_string()));
    }

    #[test]
    fn test_status_of_unknown_habit_is_not_found() {
        let (_dir, storage) = open_storage();

        let result = get_habit_status(
            &storage,
            StatusParams {
                habit_id: Some("999".to_string()),
            },
        );

        assert!(matches!(
            result,
            Err(ToolError::Storage(StorageError::HabitNotFound { .. }))
        ));
    }

    #[test]
    fn test_health_reports_counts() {
        let (_dir, storage) = open_storage();
        storage.add_check(HabitId::DEFAULT, today()).unwrap();

        let health = tracker_health(&storage).unwrap();
        assert!(health.ok);
        assert_eq!(health.habits, 1);
        assert_eq!(health.checks, 1);
    }
}
