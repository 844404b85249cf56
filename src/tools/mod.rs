/// Service-layer tools for streak tracking
///
/// This module contains the tool handlers external clients can call to
/// manage habits, mark or undo daily checks, and read streak statistics.
/// Handlers are plain functions over an explicit storage handle; the only
/// clock read happens here so the streak engine stays pure.

pub mod create;
pub mod log;
pub mod status;
pub mod list;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use log::*;
pub use status::*;
pub use list::*;
pub use update::*;

use thiserror::Error;
use chrono::{NaiveDate, Utc};
use crate::domain::{DomainError, HabitId};

/// Errors surfaced by tool handlers
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The current UTC calendar date
///
/// Day boundaries are UTC everywhere; local timezone never enters the
/// computation.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Resolve an optional habit id argument, falling back to the default habit
pub(crate) fn resolve_habit_id(habit_id: Option<String>) -> Result<HabitId, ToolError> {
    match habit_id {
        Some(s) => Ok(HabitId::from_string(&s)?),
        None => Ok(HabitId::DEFAULT),
    }
}

/// Resolve an optional YYYY-MM-DD date argument, falling back to today
pub(crate) fn resolve_date(date: Option<String>) -> Result<NaiveDate, ToolError> {
    match date {
        Some(s) => Ok(crate::domain::parse_check_date(&s)?),
        None => Ok(today()),
    }
}
