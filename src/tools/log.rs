/// Tools for marking and undoing daily checks
///
/// This module implements the check_mark and check_unmark tools. Both
/// default to the bootstrap habit and to today, so the single-habit client
/// can call them with no arguments at all. Both are idempotent: marking a
/// day twice or undoing an unmarked day changes nothing and is not an
/// error.

use serde::{Deserialize, Serialize};
use crate::domain::StreakSnapshot;
use crate::storage::CheckStorage;
use crate::tools::{resolve_date, resolve_habit_id, today, ToolError};

/// Parameters for marking a check
#[derive(Debug, Default, Deserialize)]
pub struct MarkCheckParams {
    /// Habit to mark; defaults to the bootstrap habit
    pub habit_id: Option<String>,
    /// Day to mark (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

/// Response from marking a check
#[derive(Debug, Serialize)]
pub struct MarkCheckResponse {
    pub habit_id: String,
    pub date: String,
    pub current_streak: u32,
    pub last_check: Option<String>,
    pub message: String,
}

/// Parameters for undoing a check
#[derive(Debug, Default, Deserialize)]
pub struct UnmarkCheckParams {
    pub habit_id: Option<String>,
    pub date: Option<String>,
}

/// Response from undoing a check, with the fully recomputed snapshot
#[derive(Debug, Serialize)]
pub struct UnmarkCheckResponse {
    pub habit_id: String,
    pub date: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_check: Option<String>,
    pub message: String,
}

/// Record a check, then re-derive the current streak and last check date
pub fn mark_check<S: CheckStorage>(
    storage: &S,
    params: MarkCheckParams,
) -> Result<MarkCheckResponse, ToolError> {
    let habit_id = resolve_habit_id(params.habit_id)?;
    let date = resolve_date(params.date)?;

    storage.add_check(habit_id, date)?;

    let dates = storage.list_checks(habit_id, None, None)?;
    let snapshot = StreakSnapshot::from_dates(&dates, today());

    Ok(MarkCheckResponse {
        habit_id: habit_id.to_string(),
        date: date.to_string(),
        current_streak: snapshot.current,
        last_check: snapshot.last.map(|d| d.to_string()),
        message: format!(
            "Marked {} for habit {}. Current streak: {} day{}",
            date,
            habit_id,
            snapshot.current,
            if snapshot.current == 1 { "" } else { "s" }
        ),
    })
}

/// Remove a check, then recompute the full snapshot
pub fn unmark_check<S: CheckStorage>(
    storage: &S,
    params: UnmarkCheckParams,
) -> Result<UnmarkCheckResponse, ToolError> {
    let habit_id = resolve_habit_id(params.habit_id)?;
    let date = resolve_date(params.date)?;

    storage.remove_check(habit_id, date)?;

    let dates = storage.list_checks(habit_id, None, None)?;
    let snapshot = StreakSnapshot::from_dates(&dates, today());

    Ok(UnmarkCheckResponse {
        habit_id: habit_id.to_string(),
        date: date.to_string(),
        current_streak: snapshot.current,
        longest_streak: snapshot.longest,
        last_check: snapshot.last.map(|d| d.to_string()),
        message: format!("Unmarked {} for habit {}", date, habit_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HabitId;
    use crate::storage::SqliteStorage;
    use tempfile::tempdir;

    fn open_storage() -> (tempfile::TempDir, SqliteStorage) {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("test.db")).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_mark_defaults_to_default_habit_and_today() {
        let (_dir, storage) = open_storage();

        let response = mark_check(&storage, MarkCheckParams::default()).unwrap();

        assert_eq!(response.habit_id, HabitId::DEFAULT.to_string());
        assert_eq!(response.date, today().to_string());
        assert_eq!(response.current_streak, 1);
        assert_eq!(response.last_check, Some(today().to_string()));
    }

    #[test]
    fn test_mark_twice_is_idempotent() {
        let (_dir, storage) = open_storage();

        mark_check(&storage, MarkCheckParams::default()).unwrap();
        let second = mark_check(&storage, MarkCheckParams::default()).unwrap();

        assert_eq!(second.current_streak, 1);
        let dates = storage.list_checks(HabitId::DEFAULT, None, None).unwrap();
        assert_eq!(dates.len(), 1);
    }

    #[test]
    fn test_mark_then_unmark_round_trip() {
        let (_dir, storage) = open_storage();

        mark_check(&storage, MarkCheckParams::default()).unwrap();
        let response = unmark_check(&storage, UnmarkCheckParams::default()).unwrap();

        assert_eq!(response.current_streak, 0);
        assert_eq!(response.longest_streak, 0);
        assert_eq!(response.last_check, None);
        let dates = storage.list_checks(HabitId::DEFAULT, None, None).unwrap();
        assert!(dates.is_empty());
    }

    #[test]
    fn test_unmark_without_mark_is_noop() {
        let (_dir, storage) = open_storage();

        let response = unmark_check(&storage, UnmarkCheckParams::default()).unwrap();
        assert_eq!(response.current_streak, 0);
    }

    #[test]
    fn test_mark_explicit_date() {
        let (_dir, storage) = open_storage();

        let response = mark_check(
            &storage,
            MarkCheckParams {
                habit_id: None,
                date: Some("2024-06-01".to_string()),
            },
        )
        .unwrap();

        assert_eq!(response.date, "2024-06-01");
        assert_eq!(response.last_check, Some("2024-06-01".to_string()));
    }

    #[test]
    fn test_mark_rejects_malformed_date() {
        let (_dir, storage) = open_storage();

        let result = mark_check(
            &storage,
            MarkCheckParams {
                habit_id: None,
                date: Some("June 1st".to_string()),
            },
        );

        assert!(matches!(result, Err(ToolError::Domain(_))));
    }

    #[test]
    fn test_mark_on_unknown_habit_is_noop() {
        let (_dir, storage) = open_storage();

        let response = mark_check(
            &storage,
            MarkCheckParams {
                habit_id: Some("999".to_string()),
                date: None,
            },
        )
        .unwrap();

        assert_eq!(response.current_streak, 0);
        assert_eq!(response.last_check, None);
    }
}
