use std::error::Error;

use serde::Serialize;

use super::MaxIdCmd;
use crate::commands::Execute;
use crate::db::Database;

/// Result of the max-id command execution
#[derive(Debug, Default, Serialize)]
pub struct MaxIdResult {
    pub table: String,
    pub column: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    pub max_id: i64,
}

impl Execute for MaxIdCmd {
    type Output = MaxIdResult;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>> {
        let predicate = self.filter.predicate();
        let max_id = db.max_id(&self.filter.table, &self.column, predicate.as_ref())?;

        Ok(MaxIdResult {
            filters: self.filter.describe(),
            table: self.filter.table,
            column: self.column,
            max_id,
        })
    }
}
