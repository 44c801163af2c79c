//! Output formatting for select command results.

use super::execute::SelectResult;
use crate::output::{render_grid, Outputable};

impl Outputable for SelectResult {
    fn to_table(&self) -> String {
        let mut header = format!("Select: {}", self.table);
        if !self.filters.is_empty() {
            header.push_str(&format!(" where {}", self.filters.join(" and ")));
        }

        if self.rows.is_empty() {
            return format!("{}\n\nNo rows found.", header);
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        format!(
            "{}\n\n{}\n\n{} row(s)",
            header,
            render_grid(&self.rows.headers, &cells),
            self.count
        )
    }
}
