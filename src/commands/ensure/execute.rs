use std::error::Error;
use std::fs;

use serde::Serialize;

use super::{EnsureArgs, EnsureDatabaseCmd, EnsureTableCmd};
use crate::commands::Execute;
use crate::db::Database;

/// Result of an ensure-table or ensure-database run
#[derive(Debug, Default, Serialize)]
pub struct EnsureResult {
    pub kind: String,
    pub name: String,
    pub created: bool,
}

impl EnsureArgs {
    /// The creation statement, from `--sql` or read from `--file`.
    pub fn creation_sql(&self) -> Result<String, Box<dyn Error>> {
        match (&self.sql, &self.file) {
            (Some(sql), _) => Ok(sql.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into()),
            (None, None) => Err("Either --sql or --file is required".into()),
        }
    }
}

impl Execute for EnsureTableCmd {
    type Output = EnsureResult;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>> {
        let sql = self.args.creation_sql()?;
        let created = db.ensure_table(&self.args.name, &sql)?;
        Ok(EnsureResult {
            kind: "table".to_string(),
            name: self.args.name,
            created,
        })
    }
}

impl Execute for EnsureDatabaseCmd {
    type Output = EnsureResult;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>> {
        let sql = self.args.creation_sql()?;
        let created = db.ensure_database(&self.args.name, &sql)?;
        Ok(EnsureResult {
            kind: "database".to_string(),
            name: self.args.name,
            created,
        })
    }
}
