use std::error::Error;

use serde::Serialize;

use super::DeleteCmd;
use crate::cli::unzip_pairs;
use crate::commands::Execute;
use crate::db::Database;

/// Result of the delete command execution
#[derive(Debug, Default, Serialize)]
pub struct DeleteResult {
    pub table: String,
    pub filters: Vec<String>,
    pub deleted: bool,
}

impl Execute for DeleteCmd {
    type Output = DeleteResult;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>> {
        let filters = self
            .filters
            .iter()
            .map(|(column, value)| format!("{}={}", column, value))
            .collect();
        let (columns, values) = unzip_pairs(self.filters);
        let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();

        let deleted = db.delete(&self.table, &column_refs, &values)?;

        Ok(DeleteResult {
            table: self.table,
            filters,
            deleted,
        })
    }
}
