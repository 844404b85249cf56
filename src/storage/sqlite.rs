/// SQLite implementation of the check-ledger interface
///
/// This module provides the concrete SQLite implementation for storing
/// habits and their check records. All idempotence guarantees live in the
/// SQL itself: duplicate checks collapse through the unique index and
/// habit deletion cascades through the foreign key.

use std::path::PathBuf;
use rusqlite::{params, Connection, Row};
use chrono::{NaiveDate, Utc};

use crate::domain::{color_or_default, Habit, HabitId, HabitPatch, DEFAULT_COLOR, DEFAULT_HABIT_NAME};
use crate::storage::{migrations, CheckStorage, LedgerCounts, StorageError};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the operations defined in the CheckStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file, runs any necessary migrations, and
    /// seeds the default habit so single-habit callers can operate without
    /// an explicit creation step.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // Cascading deletes depend on this pragma
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        let storage = Self { conn };
        storage.ensure_default_habit()?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(storage)
    }

    /// Seed the bootstrap habit with its fixed well-known id
    ///
    /// Idempotent: re-running against an existing database leaves the
    /// habit (and any renames the user applied to it) untouched.
    fn ensure_default_habit(&self) -> Result<(), StorageError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO habits (id, name, color, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                HabitId::DEFAULT.0,
                DEFAULT_HABIT_NAME,
                DEFAULT_COLOR,
                Utc::now().to_rfc3339()
            ],
        )?;

        if inserted > 0 {
            tracing::info!("Seeded default habit '{}' (id {})", DEFAULT_HABIT_NAME, HabitId::DEFAULT);
        }

        Ok(())
    }

    /// Map a habits row (id, name, color, created_at) to the domain type
    fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
        let created_at_str: String = row.get(3)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    3,
                    "Invalid datetime".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?
            .with_timezone(&chrono::Utc);

        Ok(Habit::from_existing(
            HabitId(row.get(0)?),
            row.get(1)?,
            row.get(2)?,
            created_at,
        ))
    }
}

impl CheckStorage for SqliteStorage {
    /// Create a new habit in the database
    fn create_habit(&self, name: &str, color: Option<String>) -> Result<Habit, StorageError> {
        let color = color_or_default(color);
        let created_at = Utc::now();

        self.conn.execute(
            "INSERT INTO habits (name, color, created_at) VALUES (?1, ?2, ?3)",
            params![name, color, created_at.to_rfc3339()],
        )?;

        let id = HabitId(self.conn.last_insert_rowid());
        tracing::debug!("Created habit: {} (id {})", name, id);

        Ok(Habit::from_existing(id, name.to_string(), color, created_at))
    }

    /// Get a habit by its ID
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, created_at FROM habits WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![habit_id.0], Self::habit_from_row);

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(StorageError::HabitNotFound { habit_id })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Apply a partial update: absent patch fields keep the stored values
    fn update_habit(&self, habit_id: HabitId, patch: HabitPatch) -> Result<Habit, StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET
                name = COALESCE(?2, name),
                color = COALESCE(?3, color)
             WHERE id = ?1",
            params![habit_id.0, patch.name, patch.color],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { habit_id });
        }

        tracing::debug!("Updated habit {}", habit_id);
        self.get_habit(habit_id)
    }

    /// Delete a habit; the foreign key cascades to its checks
    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![habit_id.0])?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { habit_id });
        }

        tracing::debug!("Deleted habit {} and its checks", habit_id);
        Ok(())
    }

    /// List all habits, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, created_at FROM habits ORDER BY id DESC",
        )?;

        let habit_iter = stmt.query_map([], Self::habit_from_row)?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }

        Ok(habits)
    }

    /// Record a check for the given day
    ///
    /// A single statement handles both idempotence rules: the unique index
    /// collapses duplicate dates, and the EXISTS guard turns an unknown
    /// habit id into a no-op instead of a foreign key error.
    fn add_check(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO checks (habit_id, date)
             SELECT ?1, ?2 WHERE EXISTS (SELECT 1 FROM habits WHERE id = ?1)",
            params![habit_id.0, date.to_string()],
        )?;

        if inserted > 0 {
            tracing::debug!("Recorded check for habit {} on {}", habit_id, date);
        }
        Ok(())
    }

    /// Remove the check for the given day; absent records are a no-op
    fn remove_check(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM checks WHERE habit_id = ?1 AND date = ?2",
            params![habit_id.0, date.to_string()],
        )?;

        if removed > 0 {
            tracing::debug!("Removed check for habit {} on {}", habit_id, date);
        }
        Ok(())
    }

    /// Ascending distinct check dates, optionally bounded (inclusive)
    fn list_checks(
        &self,
        habit_id: HabitId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<NaiveDate>, StorageError> {
        // Dates are stored as YYYY-MM-DD text, so lexicographic BETWEEN is
        // chronological and the sentinels bound the full representable range.
        let from = from.map(|d| d.to_string()).unwrap_or_else(|| "0000-01-01".to_string());
        let to = to.map(|d| d.to_string()).unwrap_or_else(|| "9999-12-31".to_string());

        let mut stmt = self.conn.prepare(
            "SELECT date FROM checks WHERE habit_id = ?1 AND date BETWEEN ?2 AND ?3 ORDER BY date ASC",
        )?;

        let date_iter = stmt.query_map(params![habit_id.0, from, to], |row| {
            let date_str: String = row.get(0)?;
            NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    0,
                    "Invalid date".to_string(),
                    rusqlite::types::Type::Text,
                )
            })
        })?;

        let mut dates = Vec::new();
        for date in date_iter {
            dates.push(date?);
        }

        Ok(dates)
    }

    /// Habit and check totals for health reporting
    fn counts(&self) -> Result<LedgerCounts, StorageError> {
        let habits: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM habits", [], |row| row.get(0))?;
        let checks: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM checks", [], |row| row.get(0))?;

        Ok(LedgerCounts {
            habits: habits as u64,
            checks: checks as u64,
        })
    }
}
