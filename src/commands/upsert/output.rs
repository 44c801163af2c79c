//! Output formatting for upsert command results.

use super::execute::UpsertResult;
use crate::output::Outputable;

impl Outputable for UpsertResult {
    fn to_table(&self) -> String {
        let target = format!("{} ({}={})", self.table, self.id_column, self.id);
        if self.written {
            format!("Upserted {}: {}", target, self.columns.join(", "))
        } else {
            format!("Nothing written to {}", target)
        }
    }
}
