/// Integration tests exercising the full tracker workflow through the
/// tool handlers, the way an MCP client would drive it.
use streaker::*;
use chrono::{Duration, Utc};
use tempfile::tempdir;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn open_storage() -> (tempfile::TempDir, SqliteStorage) {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = SqliteStorage::new(dir.path().join("streaker.db"))
            .expect("Failed to create storage");
        (dir, storage)
    }

    #[tokio::test]
    async fn test_server_basic_workflow() {
        let dir = tempdir().expect("Failed to create temp dir");
        let server = StreakTrackerServer::new(dir.path().join("streaker.db"))
            .await
            .expect("Failed to create server");

        // The default habit is available without any setup step
        let status = get_habit_status(server.storage(), StatusParams::default()).unwrap();
        assert_eq!(status.current, 0);

        // Mark today, status reflects it immediately
        mark_check(server.storage(), MarkCheckParams::default()).unwrap();
        let status = get_habit_status(server.storage(), StatusParams::default()).unwrap();
        assert_eq!(status.current, 1);
        assert_eq!(status.last, Some(Utc::now().date_naive().to_string()));

        // Undo today, back to zero
        unmark_check(server.storage(), UnmarkCheckParams::default()).unwrap();
        let status = get_habit_status(server.storage(), StatusParams::default()).unwrap();
        assert_eq!(status.current, 0);
        assert_eq!(status.last, None);
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("streaker.db");

        {
            let server = StreakTrackerServer::new(db_path.clone())
                .await
                .expect("Failed to create first server");
            mark_check(server.storage(), MarkCheckParams::default()).unwrap();
        }

        // A second server over the same file sees the recorded check
        let server2 = StreakTrackerServer::new(db_path)
            .await
            .expect("Failed to create second server");
        let status = get_habit_status(server2.storage(), StatusParams::default()).unwrap();
        assert_eq!(status.current, 1);
    }

    #[test]
    fn test_multi_habit_lifecycle() {
        let (_dir, storage) = open_storage();
        let today = Utc::now().date_naive();

        let created = create_habit(
            &storage,
            CreateHabitParams {
                name: "Stretch".to_string(),
                color: Some("#ff8800".to_string()),
            },
        )
        .unwrap();

        // Build a 3-day streak with a gap further back
        for offset in [5, 2, 1, 0] {
            mark_check(
                &storage,
                MarkCheckParams {
                    habit_id: Some(created.habit_id.clone()),
                    date: Some((today - Duration::days(offset)).to_string()),
                },
            )
            .unwrap();
        }

        let status = get_habit_status(
            &storage,
            StatusParams {
                habit_id: Some(created.habit_id.clone()),
            },
        )
        .unwrap();
        assert_eq!(status.current, 3);
        assert_eq!(status.longest, 3);
        assert_eq!(status.last, Some(today.to_string()));

        // The default habit is unaffected
        let default_status = get_habit_status(&storage, StatusParams::default()).unwrap();
        assert_eq!(default_status.current, 0);

        // Rename, then delete; deletion removes the check history too
        update_habit(
            &storage,
            UpdateHabitParams {
                habit_id: created.habit_id.clone(),
                name: Some("Morning Stretch".to_string()),
                color: None,
            },
        )
        .unwrap();

        delete_habit(
            &storage,
            DeleteHabitParams {
                habit_id: created.habit_id.clone(),
            },
        )
        .unwrap();

        let habit_id = HabitId::from_string(&created.habit_id).unwrap();
        assert!(storage.get_habit(habit_id).is_err());
        assert!(storage.list_checks(habit_id, None, None).unwrap().is_empty());
    }

    #[test]
    fn test_list_reflects_marks() {
        let (_dir, storage) = open_storage();

        mark_check(&storage, MarkCheckParams::default()).unwrap();
        let listing = list_habits(&storage).unwrap();

        assert_eq!(listing.total, 1);
        assert_eq!(listing.habits[0].current_streak, 1);
    }

    #[test]
    fn test_health_counts_grow_with_usage() {
        let (_dir, storage) = open_storage();
        let before = tracker_health(&storage).unwrap();

        create_habit(
            &storage,
            CreateHabitParams {
                name: "Read".to_string(),
                color: None,
            },
        )
        .unwrap();
        mark_check(&storage, MarkCheckParams::default()).unwrap();

        let after = tracker_health(&storage).unwrap();
        assert_eq!(after.habits, before.habits + 1);
        assert_eq!(after.checks, before.checks + 1);
        assert!(after.ok);
    }

    #[test]
    fn test_storage_interface() {
        let (_dir, storage) = open_storage();

        // Storage implements the CheckStorage trait object-safely
        let _: &dyn CheckStorage = &storage;
    }
}
