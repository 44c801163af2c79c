//! Statement rendering for the generic CRUD operations.
//!
//! Every builder here is pure: it validates the caller's table and column
//! names, renders the canonical statement text with `?` placeholders and
//! collects the values to bind in placeholder order. Nothing is executed.
//!
//! The rendered text is part of the observable surface (it is what the
//! debug diagnostics print), so the exact spacing matters:
//!
//! | Operation | Text |
//! |-----------|------|
//! | select | `SELECT c1, c2 FROM t [WHERE w1 LIKE ? AND w2 LIKE ?] [LIMIT ?]` |
//! | update | `UPDATE t SET c1=?, c2=? WHERE id=?` |
//! | insert | `INSERT INTO t (c1, c2) VALUES (?, ?)` |
//! | delete | `DELETE FROM t WHERE c1=? AND c2=?` |
//! | count | `SELECT COUNT(*) FROM t [WHERE w1=? AND w2=?]` |
//! | max | `SELECT MAX(r) FROM t [WHERE w1=? AND w2=?]` |

use super::ident::{column_name, join_checked, select_column, table_name};
use super::{ShapeError, Value};

/// Rendered statement text plus the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Statement text with `?` rewritten to `$1, $2, ...`.
    ///
    /// Placeholders inside quoted literals or quoted identifiers are left
    /// alone.
    pub fn numbered_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + 8);
        let mut quote: Option<char> = None;
        let mut n = 0;
        for c in self.sql.chars() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == '\'' || c == '"' => quote = Some(c),
                None if c == '?' => {
                    n += 1;
                    out.push('$');
                    out.push_str(&n.to_string());
                    continue;
                }
                None => {}
            }
            out.push(c);
        }
        out
    }
}

/// Ordered `(column, value)` pairs combined with `AND`.
///
/// Built pair by pair with [`Predicate::and`], or from separate column and
/// value lists with [`Predicate::from_parts`]. The latter keeps whatever
/// lengths it is given; a mismatch is reported when a statement is rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    pub fn from_parts(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.values.is_empty()
    }

    /// Render `c1 <op> ? AND c2 <op> ?`, appending the bound values to `params`.
    fn render(&self, op: &str, params: &mut Vec<Value>) -> Result<String, ShapeError> {
        let columns: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let terms = comparisons(&columns, &self.values, op)?;
        params.extend(self.values.iter().cloned());
        Ok(terms.join(" AND "))
    }
}

/// Check that columns and values pair up one to one.
fn check_shape(columns: usize, values: usize) -> Result<(), ShapeError> {
    if columns != values {
        return Err(ShapeError::LengthMismatch { columns, values });
    }
    Ok(())
}

/// Render `col<op>?` for every column after validating names and shape.
///
/// An empty column list is reported as [`ShapeError::NoPredicate`].
fn comparisons(columns: &[&str], values: &[Value], op: &str) -> Result<Vec<String>, ShapeError> {
    check_shape(columns.len(), values.len())?;
    if columns.is_empty() {
        return Err(ShapeError::NoPredicate);
    }
    columns
        .iter()
        .map(|c| column_name(c).map(|c| format!("{}{}?", c, op)))
        .collect()
}

/// `SELECT c1, c2 FROM t [WHERE w1 LIKE ? AND ...] [LIMIT ?]`
///
/// Predicate values are matched with `LIKE`, so `%` and `_` in them act as
/// wildcards. A limit of zero means no limit.
pub fn select(
    table: &str,
    columns: &[&str],
    predicate: Option<&Predicate>,
    limit: Option<u32>,
) -> Result<Statement, ShapeError> {
    if columns.is_empty() {
        return Err(ShapeError::NoColumns);
    }
    let table = table_name(table)?;
    let list = join_checked(columns, select_column)?;

    let mut params = Vec::new();
    let mut sql = format!("SELECT {} FROM {}", list, table);
    if let Some(predicate) = predicate {
        let clause = predicate.render(" LIKE ", &mut params)?;
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    if let Some(limit) = limit.filter(|l| *l > 0) {
        sql.push_str(" LIMIT ?");
        params.push(Value::from(limit));
    }
    Ok(Statement::new(sql, params))
}

/// `UPDATE t SET c1=?, c2=? WHERE id=?`
pub fn update(
    table: &str,
    columns: &[&str],
    values: &[Value],
    id: &Value,
    id_column: &str,
) -> Result<Statement, ShapeError> {
    check_shape(columns.len(), values.len())?;
    if columns.is_empty() {
        return Err(ShapeError::NoColumns);
    }
    let table = table_name(table)?;
    let id_column = column_name(id_column)?;
    let assignments = comparisons(columns, values, "=")?;

    let mut params = values.to_vec();
    params.push(id.clone());
    Ok(Statement::new(
        format!(
            "UPDATE {} SET {} WHERE {}=?",
            table,
            assignments.join(", "),
            id_column
        ),
        params,
    ))
}

/// `INSERT INTO t (c1, c2) VALUES (?, ?)`
pub fn insert(table: &str, columns: &[&str], values: &[Value]) -> Result<Statement, ShapeError> {
    check_shape(columns.len(), values.len())?;
    if columns.is_empty() {
        return Err(ShapeError::NoColumns);
    }
    let table = table_name(table)?;
    let list = join_checked(columns, column_name)?;
    let placeholders = vec!["?"; values.len()].join(", ");
    Ok(Statement::new(
        format!("INSERT INTO {} ({}) VALUES ({})", table, list, placeholders),
        values.to_vec(),
    ))
}

/// `DELETE FROM t WHERE c1=? AND c2=?`
///
/// An empty column/value list is rejected with [`ShapeError::NoPredicate`]
/// rather than rendering a statement that would touch every row.
pub fn delete(table: &str, columns: &[&str], values: &[Value]) -> Result<Statement, ShapeError> {
    let table = table_name(table)?;
    if columns.is_empty() || values.is_empty() {
        return Err(ShapeError::NoPredicate);
    }
    let terms = comparisons(columns, values, "=")?;
    Ok(Statement::new(
        format!("DELETE FROM {} WHERE {}", table, terms.join(" AND ")),
        values.to_vec(),
    ))
}

/// `SELECT COUNT(*) FROM t [WHERE w1=? AND ...]`
pub fn count(table: &str, predicate: Option<&Predicate>) -> Result<Statement, ShapeError> {
    aggregate("COUNT(*)".to_string(), table, predicate)
}

/// `SELECT MAX(r) FROM t [WHERE w1=? AND ...]`
pub fn max(
    table: &str,
    row_column: &str,
    predicate: Option<&Predicate>,
) -> Result<Statement, ShapeError> {
    let row_column = column_name(row_column)?;
    aggregate(format!("MAX({})", row_column), table, predicate)
}

fn aggregate(
    expr: String,
    table: &str,
    predicate: Option<&Predicate>,
) -> Result<Statement, ShapeError> {
    let table = table_name(table)?;
    let mut params = Vec::new();
    let mut sql = format!("SELECT {} FROM {}", expr, table);
    if let Some(predicate) = predicate {
        let clause = predicate.render("=", &mut params)?;
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    Ok(Statement::new(sql, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vals(items: &[Value]) -> Vec<Value> {
        items.to_vec()
    }

    #[rstest]
    fn test_select_without_predicate_or_limit() {
        let stmt = select("t", &["c1", "c2"], None, None).unwrap();
        assert_eq!(stmt.sql, "SELECT c1, c2 FROM t");
        assert!(stmt.params.is_empty());
    }

    #[rstest]
    fn test_select_with_limit() {
        let stmt = select("t", &["c1", "c2"], None, Some(10)).unwrap();
        assert_eq!(stmt.sql, "SELECT c1, c2 FROM t LIMIT ?");
        assert_eq!(stmt.params, vec![Value::Int(10)]);
    }

    #[rstest]
    fn test_select_zero_limit_means_unlimited() {
        let stmt = select("t", &["c1"], None, Some(0)).unwrap();
        assert_eq!(stmt.sql, "SELECT c1 FROM t");
    }

    #[rstest]
    fn test_select_with_predicate_uses_like() {
        let predicate = Predicate::new().and("w1", "a%").and("w2", 5);
        let stmt = select("t", &["c1"], Some(&predicate), None).unwrap();
        assert_eq!(stmt.sql, "SELECT c1 FROM t WHERE w1 LIKE ? AND w2 LIKE ?");
        assert_eq!(stmt.params, vec![Value::from("a%"), Value::Int(5)]);
    }

    #[rstest]
    fn test_select_with_predicate_and_limit() {
        let predicate = Predicate::new().and("w1", "x");
        let stmt = select("t", &["c1"], Some(&predicate), Some(3)).unwrap();
        assert_eq!(stmt.sql, "SELECT c1 FROM t WHERE w1 LIKE ? LIMIT ?");
        assert_eq!(stmt.params, vec![Value::from("x"), Value::Int(3)]);
    }

    #[rstest]
    fn test_select_wildcard() {
        let stmt = select("users", &["*"], None, None).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM users");
    }

    #[rstest]
    fn test_select_requires_columns() {
        assert_eq!(select("t", &[], None, None), Err(ShapeError::NoColumns));
    }

    #[rstest]
    fn test_select_empty_predicate_is_rejected() {
        let predicate = Predicate::new();
        assert_eq!(
            select("t", &["c1"], Some(&predicate), None),
            Err(ShapeError::NoPredicate)
        );
    }

    #[rstest]
    fn test_select_mismatched_predicate_is_rejected() {
        let predicate = Predicate::from_parts(vec!["a".into(), "b".into()], vals(&[Value::Int(1)]));
        assert_eq!(
            select("t", &["c1"], Some(&predicate), None),
            Err(ShapeError::LengthMismatch { columns: 2, values: 1 })
        );
    }

    #[rstest]
    fn test_select_rejects_injected_table() {
        let err = select("t; DROP TABLE t", &["c1"], None, None).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidIdentifier { .. }));
    }

    #[rstest]
    fn test_update() {
        let stmt = update(
            "t",
            &["c1", "c2"],
            &vals(&[Value::from("a"), Value::Int(2)]),
            &Value::Int(7),
            "id",
        )
        .unwrap();
        assert_eq!(stmt.sql, "UPDATE t SET c1=?, c2=? WHERE id=?");
        assert_eq!(stmt.params, vec![Value::from("a"), Value::Int(2), Value::Int(7)]);
    }

    #[rstest]
    fn test_update_custom_id_column() {
        let stmt = update("t", &["c1"], &vals(&[Value::Null]), &Value::Int(1), "user_id").unwrap();
        assert_eq!(stmt.sql, "UPDATE t SET c1=? WHERE user_id=?");
    }

    #[rstest]
    #[case(&["a", "b"], 1)]
    #[case(&["a"], 2)]
    #[case(&[], 1)]
    fn test_update_length_mismatch(#[case] columns: &[&str], #[case] n_values: usize) {
        let values = vec![Value::Int(0); n_values];
        let err = update("t", columns, &values, &Value::Int(1), "id").unwrap_err();
        assert_eq!(
            err,
            ShapeError::LengthMismatch { columns: columns.len(), values: n_values }
        );
    }

    #[rstest]
    fn test_update_requires_columns() {
        assert_eq!(
            update("t", &[], &[], &Value::Int(1), "id"),
            Err(ShapeError::NoColumns)
        );
    }

    #[rstest]
    fn test_insert() {
        let stmt = insert("t", &["c1", "c2"], &vals(&[Value::Int(1), Value::from("x")])).unwrap();
        assert_eq!(stmt.sql, "INSERT INTO t (c1, c2) VALUES (?, ?)");
        assert_eq!(stmt.params, vec![Value::Int(1), Value::from("x")]);
    }

    #[rstest]
    fn test_delete() {
        let stmt = delete("t", &["c1", "c2"], &vals(&[Value::Int(1), Value::Int(2)])).unwrap();
        assert_eq!(stmt.sql, "DELETE FROM t WHERE c1=? AND c2=?");
        assert_eq!(stmt.params.len(), 2);
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&["c1"], 0)]
    #[case(&[], 1)]
    fn test_delete_without_predicate_is_rejected(#[case] columns: &[&str], #[case] n_values: usize) {
        let values = vec![Value::Int(0); n_values];
        assert_eq!(delete("t", columns, &values), Err(ShapeError::NoPredicate));
    }

    #[rstest]
    fn test_delete_length_mismatch() {
        let err = delete("t", &["a", "b"], &vals(&[Value::Int(1)])).unwrap_err();
        assert_eq!(err, ShapeError::LengthMismatch { columns: 2, values: 1 });
    }

    #[rstest]
    fn test_count_without_predicate() {
        let stmt = count("t", None).unwrap();
        assert_eq!(stmt.sql, "SELECT COUNT(*) FROM t");
    }

    #[rstest]
    fn test_count_with_predicate_uses_equality() {
        let predicate = Predicate::new().and("w1", 1).and("w2", "b");
        let stmt = count("t", Some(&predicate)).unwrap();
        assert_eq!(stmt.sql, "SELECT COUNT(*) FROM t WHERE w1=? AND w2=?");
        assert_eq!(stmt.params, vec![Value::Int(1), Value::from("b")]);
    }

    #[rstest]
    fn test_max() {
        assert_eq!(max("t", "r", None).unwrap().sql, "SELECT MAX(r) FROM t");
        let predicate = Predicate::new().and("w1", 1);
        assert_eq!(
            max("t", "r", Some(&predicate)).unwrap().sql,
            "SELECT MAX(r) FROM t WHERE w1=?"
        );
    }

    #[rstest]
    fn test_max_rejects_expression_column() {
        assert!(max("t", "r) FROM t; --", None).is_err());
    }

    #[rstest]
    fn test_numbered_sql() {
        let stmt = update("t", &["a", "b"], &vals(&[Value::Int(1), Value::Int(2)]), &Value::Int(3), "id")
            .unwrap();
        assert_eq!(stmt.numbered_sql(), "UPDATE t SET a=$1, b=$2 WHERE id=$3");
    }

    #[rstest]
    fn test_numbered_sql_skips_quoted_text() {
        let stmt = Statement::new("SELECT '?' FROM t WHERE a=? AND \"b?\"=?".to_string(), vec![]);
        assert_eq!(stmt.numbered_sql(), "SELECT '?' FROM t WHERE a=$1 AND \"b?\"=$2");
    }

    #[rstest]
    fn test_predicate_accessors() {
        let predicate = Predicate::new().and("a", 1);
        assert_eq!(predicate.columns(), &["a".to_string()]);
        assert_eq!(predicate.values(), &[Value::Int(1)]);
        assert!(!predicate.is_empty());
        assert!(Predicate::new().is_empty());
    }
}
