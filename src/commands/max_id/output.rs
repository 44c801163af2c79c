//! Output formatting for max-id command results.

use super::execute::MaxIdResult;
use crate::output::Outputable;

impl Outputable for MaxIdResult {
    fn to_table(&self) -> String {
        let scope = if self.filters.is_empty() {
            self.table.clone()
        } else {
            format!("{} where {}", self.table, self.filters.join(" and "))
        };
        format!("max({}) in {}: {}", self.column, scope, self.max_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn result() -> MaxIdResult {
        MaxIdResult {
            table: "orders".to_string(),
            column: "order_no".to_string(),
            filters: vec!["customer_id=7".to_string()],
            max_id: 42,
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: result,
        fixture_type: MaxIdResult,
        expected: "max(order_no) in orders where customer_id=7: 42",
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: result,
        fixture_type: MaxIdResult,
        assertions: {
            "table": "orders",
            "column": "order_no",
            "max_id": 42,
        },
    }
}
