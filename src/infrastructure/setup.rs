//! Project initialization
//!
//! Creates the `.roster/` directory, a commented default config file and a
//! migrated database.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::sqlite::initialize_database;
use crate::infrastructure::config::CONFIG_DIR;

/// Default configuration template content
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Roster Configuration
# Override settings by editing this file, adding .roster/local.yaml, or setting
# environment variables with the ROSTER_ prefix
#
# Example environment variables:
#   export ROSTER_SERVER__PORT=9090
#   export ROSTER_DATABASE__PATH=/custom/path/roster.db
#   export ROSTER_LOGGING__LEVEL=debug

# Database configuration
database:
  # Path to SQLite database file (project-local)
  path: ".roster/roster.db"

  # Maximum number of database connections in pool
  max_connections: 10

# Logging configuration
logging:
  # Log level: trace, debug, info, warn, error
  level: "info"

  # Log format: json, pretty
  format: "json"

  # Directory for rolling JSON log files (stdout only when unset)
  # log_dir: ".roster/logs"

  # Rotation for file output: daily, hourly, never
  rotation: "daily"

# HTTP server configuration
server:
  host: "127.0.0.1"
  port: 8080
  enable_cors: true

# Employee cache; entries live until a write evicts them unless bounded here
cache: {}
  # max_capacity: 10000
  # time_to_live_secs: 300
"#;

/// Setup paths and directories
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub database_file: PathBuf,
}

impl SetupPaths {
    /// Setup paths under `root`
    pub fn new(root: &Path) -> Self {
        let config_dir = root.join(CONFIG_DIR);
        Self {
            config_file: config_dir.join("config.yaml"),
            database_file: config_dir.join("roster.db"),
            config_dir,
        }
    }

    /// Check if the project is already initialized
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists() && self.database_file.exists()
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths) -> Result<bool> {
    if paths.config_dir.exists() {
        return Ok(false);
    }

    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")?;
    Ok(true)
}

/// Create the default configuration file
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<bool> {
    if paths.config_file.exists() && !force {
        return Ok(false);
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE).context("Failed to write config file")?;
    Ok(true)
}

/// Create the database file and apply migrations
pub async fn run_migrations(paths: &SetupPaths) -> Result<()> {
    let db_url = format!("sqlite:{}", paths.database_file.display());
    let pool = initialize_database(&db_url, None)
        .await
        .context("Failed to initialize database")?;
    pool.close().await;
    Ok(())
}
