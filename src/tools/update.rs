/// Tools for updating and deleting existing habits
///
/// This module implements the habit_update and habit_delete tools.
/// Updates are partial: fields left out of the request keep their stored
/// values.

use serde::{Deserialize, Serialize};
use crate::domain::{validate_name, HabitPatch};
use crate::storage::CheckStorage;
use crate::tools::ToolError;

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize)]
pub struct UpdateHabitParams {
    pub habit_id: String,
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub habit_id: String,
    pub name: String,
    pub color: String,
    pub message: String,
}

/// Parameters for deleting a habit
#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    pub habit_id: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub habit_id: String,
    pub message: String,
}

/// Apply a partial update to an existing habit
pub fn update_habit<S: CheckStorage>(
    storage: &S,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    let habit_id = crate::domain::HabitId::from_string(&params.habit_id)?;

    if let Some(ref new_name) = params.name {
        validate_name(new_name)?;
    }

    let habit = storage.update_habit(
        habit_id,
        HabitPatch {
            name: params.name,
            color: params.color,
        },
    )?;

    Ok(UpdateHabitResponse {
        habit_id: habit.id.to_string(),
        name: habit.name.clone(),
        color: habit.color,
        message: format!("Updated habit '{}'", habit.name),
    })
}

/// Delete a habit and all of its checks
pub fn delete_habit<S: CheckStorage>(
    storage: &S,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = crate::domain::HabitId::from_string(&params.habit_id)?;

    storage.delete_habit(habit_id)?;

    Ok(DeleteHabitResponse {
        habit_id: habit_id.to_string(),
        message: format!("Deleted habit {} and its check history", habit_id),
    })
}
