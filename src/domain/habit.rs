/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a trackable
/// recurring activity, along with its validation rules.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, HabitId};

/// Display color used when the caller does not supply one
pub const DEFAULT_COLOR: &str = "#4fb3ff";

/// Name of the habit seeded at first initialization
pub const DEFAULT_HABIT_NAME: &str = "Daily Check";

/// A habit represents something the user wants to do every day
///
/// Each habit has a display name and color. Check records reference habits
/// by id; deleting a habit removes its checks as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier, assigned by the storage layer at creation
    pub id: HabitId,
    /// Display name (e.g., "Morning Run")
    pub name: String,
    /// Display color as a hex string
    pub color: String,
    /// When this habit was created, immutable
    pub created_at: DateTime<Utc>,
}

/// A partial update to a habit
///
/// Absent fields leave the existing value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl Habit {
    /// Create a habit from existing data (used when loading from the database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer.
    pub fn from_existing(
        id: HabitId,
        name: String,
        color: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            color,
            created_at,
        }
    }

}

/// Validate a habit name according to business rules
///
/// Names are required and must be non-empty after trimming.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidHabitName(
            "Habit name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Resolve the color for a new habit, falling back to the default
pub fn color_or_default(color: Option<String>) -> String {
    color.unwrap_or_else(|| DEFAULT_COLOR.to_string())
}
