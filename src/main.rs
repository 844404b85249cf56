/// Main entry point for the Streaker server
///
/// This file sets up logging, parses command line arguments, and starts
/// the server. The server listens for JSON-RPC requests over stdin/stdout
/// following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use streaker::StreakTrackerServer;

/// Get the default database path with a fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".streaker");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("streaker");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("streaker");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".streaker");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Verify the directory is actually writable before settling on it
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                let mut db_path = potential_path.clone();
                db_path.push("streaker.db");
                return Ok(db_path);
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("streaker");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("streaker.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the Streaker server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("streaker={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting Streaker server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = StreakTrackerServer::new(db_path).await?;
    server.run().await?;

    info!("Streaker server shutdown complete");
    Ok(())
}
