use std::error::Error;

use serde::Serialize;

use super::SelectCmd;
use crate::commands::Execute;
use crate::db::{Database, ResultSet};

/// Result of the select command execution
#[derive(Debug, Default, Serialize)]
pub struct SelectResult {
    pub table: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    pub count: usize,
    pub rows: ResultSet,
}

impl Execute for SelectCmd {
    type Output = SelectResult;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>> {
        let columns: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let predicate = self.filter.predicate();

        let rows = db.select(
            &self.filter.table,
            &columns,
            predicate.as_ref(),
            Some(self.limit),
        )?;

        Ok(SelectResult {
            filters: self.filter.describe(),
            table: self.filter.table,
            count: rows.len(),
            rows,
        })
    }
}
