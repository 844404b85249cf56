/// Tool for listing all habits with their streak snapshots
///
/// This module implements the habit_list tool.

use serde::Serialize;
use crate::domain::StreakSnapshot;
use crate::storage::CheckStorage;
use crate::tools::{today, ToolError};

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitOverview {
    pub habit_id: String,
    pub name: String,
    pub color: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_check: Option<String>,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitOverview>,
    pub total: u32,
}

/// List all habits with freshly computed streak statistics
pub fn list_habits<S: CheckStorage>(storage: &S) -> Result<ListHabitsResponse, ToolError> {
    let today = today();
    let habits = storage.list_habits()?;

    let mut overviews = Vec::with_capacity(habits.len());
    for habit in habits {
        let dates = storage.list_checks(habit.id, None, None)?;
        let snapshot = StreakSnapshot::from_dates(&dates, today);

        overviews.push(HabitOverview {
            habit_id: habit.id.to_string(),
            name: habit.name,
            color: habit.color,
            current_streak: snapshot.current,
            longest_streak: snapshot.longest,
            last_check: snapshot.last.map(|d| d.to_string()),
        });
    }

    let total = overviews.len() as u32;
    Ok(ListHabitsResponse {
        habits: overviews,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HabitId;
    use crate::storage::SqliteStorage;
    use tempfile::tempdir;

    #[test]
    fn test_list_includes_default_habit_and_snapshots() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("test.db")).unwrap();

        storage.create_habit("Read", None).unwrap();
        storage.add_check(HabitId::DEFAULT, today()).unwrap();

        let response = list_habits(&storage).unwrap();
        assert_eq!(response.total, 2);

        let default = response
            .habits
            .iter()
            .find(|h| h.habit_id == HabitId::DEFAULT.to_string())
            .unwrap();
        assert_eq!(default.current_streak, 1);

        let read = response.habits.iter().find(|h| h.name == "Read").unwrap();
        assert_eq!(read.current_streak, 0);
        assert_eq!(read.last_check, None);
    }
}
