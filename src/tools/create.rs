/// Tool for creating new habits
///
/// This module implements the habit_create tool.

use serde::{Deserialize, Serialize};
use crate::domain::validate_name;
use crate::storage::CheckStorage;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize)]
pub struct CreateHabitParams {
    pub name: String,
    pub color: Option<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub habit_id: String,
    pub name: String,
    pub color: String,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn create_habit<S: CheckStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    validate_name(&params.name)?;

    let habit = storage.create_habit(params.name.trim(), params.color)?;

    Ok(CreateHabitResponse {
        habit_id: habit.id.to_string(),
        name: habit.name.clone(),
        color: habit.color,
        message: format!("Created habit '{}' (id {})", habit.name, habit.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use tempfile::tempdir;

    #[test]
    fn test_create_habit() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("test.db")).unwrap();

        let response = create_habit(
            &storage,
            CreateHabitParams {
                name: "Stretch".to_string(),
                color: None,
            },
        )
        .unwrap();

        assert_eq!(response.name, "Stretch");
        assert_eq!(response.color, crate::domain::DEFAULT_COLOR);
    }

    #[test]
    fn test_create_habit_rejects_empty_name() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("test.db")).unwrap();

        let result = create_habit(
            &storage,
            CreateHabitParams {
                name: "   ".to_string(),
                color: None,
            },
        );

        assert!(matches!(result, Err(ToolError::Domain(_))));
    }
}
