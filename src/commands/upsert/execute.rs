use std::error::Error;

use serde::Serialize;

use super::UpsertCmd;
use crate::cli::unzip_pairs;
use crate::commands::Execute;
use crate::db::Database;

/// Result of the upsert command execution
#[derive(Debug, Default, Serialize)]
pub struct UpsertResult {
    pub table: String,
    pub id_column: String,
    pub id: i64,
    pub columns: Vec<String>,
    pub written: bool,
}

impl Execute for UpsertCmd {
    type Output = UpsertResult;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>> {
        let (columns, values) = unzip_pairs(self.set);
        let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();

        let written = db.upsert_by(&self.table, &column_refs, &values, self.id, &self.id_column)?;

        Ok(UpsertResult {
            table: self.table,
            id_column: self.id_column,
            id: self.id,
            columns,
            written,
        })
    }
}
