/// Basic unit tests to verify core functionality
use streaker::*;
use chrono::{Duration, NaiveDate};
use tempfile::tempdir;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_snapshot_of_empty_history() {
        let snapshot = StreakSnapshot::from_dates(&[], d("2024-06-01"));

        assert_eq!(snapshot.current, 0);
        assert_eq!(snapshot.longest, 0);
        assert_eq!(snapshot.last, None);
    }

    #[test]
    fn test_snapshot_of_contiguous_run() {
        let today = d("2024-06-05");
        let dates: Vec<NaiveDate> = (0..5).rev().map(|o| today - Duration::days(o)).collect();

        let snapshot = StreakSnapshot::from_dates(&dates, today);
        assert_eq!(snapshot.current, 5);
        assert_eq!(snapshot.longest, 5);
        assert_eq!(snapshot.last, Some(today));
    }

    #[test]
    fn test_default_habit_id() {
        assert_eq!(HabitId::DEFAULT.to_string(), "1");
    }

    #[test]
    fn test_parse_check_date_wire_format() {
        assert!(parse_check_date("2024-06-01").is_ok());
        assert!(parse_check_date("2024/06/01").is_err());
    }

    #[tokio::test]
    async fn test_server_creation() {
        let dir = tempdir().expect("Failed to create temp dir");
        let server = StreakTrackerServer::new(dir.path().join("streaker.db")).await;
        assert!(server.is_ok());
    }

    #[test]
    fn test_storage_creation() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = SqliteStorage::new(dir.path().join("streaker.db"));
        assert!(storage.is_ok());
    }

    #[test]
    fn test_storage_seeds_default_habit() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = SqliteStorage::new(dir.path().join("streaker.db")).unwrap();

        let habit = storage.get_habit(HabitId::DEFAULT).unwrap();
        assert_eq!(habit.name, DEFAULT_HABIT_NAME);
    }
}
