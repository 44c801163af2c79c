use std::error::Error;

use serde::Serialize;

use super::CountCmd;
use crate::commands::Execute;
use crate::db::Database;

/// Result of the count command execution
#[derive(Debug, Default, Serialize)]
pub struct CountResult {
    pub table: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    pub count: i64,
}

impl Execute for CountCmd {
    type Output = CountResult;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>> {
        let predicate = self.filter.predicate();
        let count = db.count(&self.filter.table, predicate.as_ref())?;

        Ok(CountResult {
            filters: self.filter.describe(),
            table: self.filter.table,
            count,
        })
    }
}
