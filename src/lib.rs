/// Public library interface for the Streaker server
///
/// This module exports the streak tracker server and the public types
/// used by other applications or tests: the domain entities, the streak
/// engine, and the storage contract.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{CheckStorage, LedgerCounts, SqliteStorage, StorageError};
pub use tools::{
    create_habit, delete_habit, get_habit_status, list_habits, mark_check, tracker_health,
    unmark_check, update_habit, CreateHabitParams, DeleteHabitParams, MarkCheckParams,
    StatusParams, ToolError, UnmarkCheckParams, UpdateHabitParams,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Streak tracker server exposed over the MCP protocol
///
/// Holds the storage handle that all tool handlers operate on. There is no
/// process-wide storage singleton; everything flows through this struct.
pub struct StreakTrackerServer {
    storage: SqliteStorage,
}

impl StreakTrackerServer {
    /// Create a new streak tracker with the specified database path
    ///
    /// This initializes the SQLite schema if needed and seeds the default
    /// habit, so the default-habit tools work immediately.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing streak tracker with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;

        Ok(Self { storage })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        let habits = self.storage.list_habits()?;
        tracing::info!("Server starting with {} existing habit(s)", habits.len());

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }
}
