//! Configuration file handling for the command-line tool.
//!
//! This module loads `.sql_access.json` and resolves the connection target
//! the CLI runs against. The library itself never reads files or the
//! environment; that is left to embedding applications like this one.
//!
//! Resolution priority: `--url` flag > config file (`./.sql_access.json`,
//! then `~/.sql_access.json`) > `DATABASE_URL` > `./sql_access.sqlite`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::{ConnectionTarget, DatabaseConfig};

pub const CONFIG_FILE_NAME: &str = ".sql_access.json";
pub const DEFAULT_SQLITE_PATH: &str = "./sql_access.sqlite";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,

    /// Log every statement before running it
    #[serde(default)]
    pub debug: bool,
}

/// Database configuration variants.
///
/// JSON format uses a "type" field with lowercase variant names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// SQLite database file
    Sqlite { path: PathBuf },
    /// PostgreSQL server
    Postgres(PostgresConfigFile),
}

/// PostgreSQL connection settings.
///
/// Either `connection_string` or the individual fields; the connection
/// string wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostgresConfigFile {
    #[serde(default)]
    pub connection_string: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

impl ConfigFile {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON for
    /// this structure.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;

        Ok(config)
    }

    /// Build the connection target; `debug` forces statement logging on.
    pub fn to_target(&self, debug: bool) -> Result<ConnectionTarget, Box<dyn Error>> {
        let debug = debug || self.debug;
        let target = match &self.database {
            DatabaseConfigFile::Sqlite { path } => ConnectionTarget::sqlite(path.clone(), debug),
            DatabaseConfigFile::Postgres(pg) => match &pg.connection_string {
                Some(url) => ConnectionTarget::from_url(url, debug)?,
                None => ConnectionTarget::new(
                    DatabaseConfig::Postgres {
                        host: pg.host.clone(),
                        port: pg.port,
                        database: pg.database.clone(),
                        username: pg.user.clone(),
                        password: pg.password.clone(),
                    },
                    debug,
                ),
            },
        };
        Ok(target)
    }
}

/// Config file locations, in the order they are tried.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home_dir) = home::home_dir() {
        candidates.push(home_dir.join(CONFIG_FILE_NAME));
    }
    candidates
}

/// Resolve the connection target for this invocation.
pub fn resolve_target(url: Option<&str>, debug: bool) -> Result<ConnectionTarget, Box<dyn Error>> {
    resolve_target_from(url, debug, &config_candidates())
}

/// [`resolve_target`] with explicit config file candidates.
pub fn resolve_target_from(
    url: Option<&str>,
    debug: bool,
    candidates: &[PathBuf],
) -> Result<ConnectionTarget, Box<dyn Error>> {
    if let Some(url) = url {
        return Ok(ConnectionTarget::from_url(url, debug)?);
    }

    if let Some(path) = candidates.iter().find(|p| p.is_file()) {
        return ConfigFile::load_from(path)?.to_target(debug);
    }

    if let Some(target) = ConnectionTarget::from_env()? {
        return Ok(if debug {
            ConnectionTarget::new(target.config().clone(), true)
        } else {
            target
        });
    }

    Ok(ConnectionTarget::sqlite(DEFAULT_SQLITE_PATH, debug))
}
