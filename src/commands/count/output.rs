//! Output formatting for count command results.

use super::execute::CountResult;
use crate::output::Outputable;

impl Outputable for CountResult {
    fn to_table(&self) -> String {
        if self.filters.is_empty() {
            format!("{}: {} row(s)", self.table, self.count)
        } else {
            format!(
                "{} where {}: {} row(s)",
                self.table,
                self.filters.join(" and "),
                self.count
            )
        }
    }
}
