//! Output formatting for delete command results.

use super::execute::DeleteResult;
use crate::output::Outputable;

impl Outputable for DeleteResult {
    fn to_table(&self) -> String {
        let verdict = if self.deleted { "Deleted rows" } else { "No rows deleted" };
        format!("{} from {} where {}", verdict, self.table, self.filters.join(" and "))
    }
}
