/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, StreakSnapshot) and their
/// validation rules. The streak computation lives here as well since it is
/// pure logic over domain values.

pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
