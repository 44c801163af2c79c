//! Per-call connection trait and the result set it returns.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::statement::Statement;
use super::{AccessError, ObjectKind, Value};

/// Rows returned by a select.
///
/// Column headers are kept once; each row holds its values in header order.
/// An empty result set is a valid answer and distinct from a failed query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow row `idx` as a column-name keyed view.
    pub fn row(&self, idx: usize) -> Option<Row<'_>> {
        self.rows.get(idx).map(|values| Row {
            headers: &self.headers,
            values,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            headers: &self.headers,
            values,
        })
    }

    /// First column of the first row, or `Null` when there are no rows.
    pub fn into_scalar(self) -> Value {
        self.rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or(Value::Null)
    }
}

/// One row of a [`ResultSet`], addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Value of the first column named `column`.
    ///
    /// Column names compare case-insensitively, matching how SQL folds
    /// unquoted identifiers.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .and_then(|idx| self.values.get(idx))
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.headers.iter().map(String::as_str).zip(self.values.iter())
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.columns() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Serializes as a list of column-keyed rows.
impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// A single open connection, owned by one operation for its duration.
///
/// Statements arrive in canonical `?` form; implementations translate the
/// placeholders if their driver needs something else. Dropping the
/// connection closes it.
pub trait Connection {
    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Run a statement that returns rows.
    fn query(&mut self, stmt: &Statement) -> Result<ResultSet, AccessError>;

    /// Run a statement that modifies rows, returning the affected-row count.
    fn execute(&mut self, stmt: &Statement) -> Result<u64, AccessError>;

    /// Run caller-supplied SQL exactly as given, without parameters.
    fn execute_verbatim(&mut self, sql: &str) -> Result<(), AccessError>;

    /// Statement counting catalog entries named `name` of the given kind.
    ///
    /// The statement binds `name` as its only parameter and yields a single
    /// integer.
    fn object_count(&self, kind: ObjectKind, name: &str) -> Statement;

    /// Run a statement and return its first column of its first row.
    fn scalar(&mut self, stmt: &Statement) -> Result<Value, AccessError> {
        Ok(self.query(stmt)?.into_scalar())
    }
}
