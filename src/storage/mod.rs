/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// the ledger interface for habits and their per-day check records.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use chrono::NaiveDate;
use crate::domain::{Habit, HabitId, HabitPatch};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Totals reported by the health check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerCounts {
    pub habits: u64,
    pub checks: u64,
}

/// Trait defining the check-ledger interface
///
/// This trait allows us to potentially swap out SQLite for another
/// key-sorted store while keeping the same contract:
///
/// - check mutations are idempotent and atomic (unique insert-or-noop,
///   delete-or-noop), including when the habit id does not exist;
/// - `list_checks` returns distinct dates in ascending order;
/// - deleting a habit cascades to its checks.
pub trait CheckStorage {
    /// Create a new habit, returning it with its assigned id
    fn create_habit(&self, name: &str, color: Option<String>) -> Result<Habit, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError>;

    /// Apply a partial update to an existing habit
    fn update_habit(&self, habit_id: HabitId, patch: HabitPatch) -> Result<Habit, StorageError>;

    /// Delete a habit and all of its checks
    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError>;

    /// List all habits, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Record a check for the given day; duplicate records are a no-op
    fn add_check(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError>;

    /// Remove the check for the given day; a missing record is a no-op
    fn remove_check(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError>;

    /// Ascending distinct check dates for a habit, bounded by an optional
    /// inclusive range (open-ended by default)
    fn list_checks(
        &self,
        habit_id: HabitId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<NaiveDate>, StorageError>;

    /// Habit and check totals for health reporting
    fn counts(&self) -> Result<LedgerCounts, StorageError>;
}
