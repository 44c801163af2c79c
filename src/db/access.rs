//! The generic CRUD operations.
//!
//! Each call renders its statement, opens its own connection, runs one
//! statement (two for an upsert that falls back to insert) and drops the
//! connection before returning.
//!
//! Upsert is update-then-insert, not an atomic statement: two callers
//! upserting the same new id concurrently can both miss on the update and
//! both insert. Callers that can race must serialize those calls themselves
//! or rely on a unique constraint, in which case the loser sees a
//! [`AccessError::QueryFailed`].

use std::fmt::Display;

use tracing::warn;

use super::backend::{Connection, ResultSet};
use super::config::ConnectionTarget;
use super::connection::open;
use super::query::{execute, fetch, fetch_scalar};
use super::statement::{self, Predicate, Statement};
use super::{AccessError, ShapeError, Value};

/// Handle to one connection target.
///
/// Cheap to clone. Holds no open connection between calls.
#[derive(Debug, Clone, Default)]
pub struct Database {
    target: ConnectionTarget,
}

impl Database {
    pub fn new(target: ConnectionTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    pub(crate) fn debug(&self) -> bool {
        self.target.debug()
    }

    /// Log why `op` is returning its neutral value, when debugging.
    pub(crate) fn skipped<T>(&self, op: &'static str, reason: impl Display, neutral: T) -> T {
        if self.debug() {
            warn!(op, %reason, "operation skipped");
        }
        neutral
    }

    /// Open a connection, or `None` if the target isn't configured.
    pub(crate) fn connect(&self, op: &'static str) -> Result<Option<Box<dyn Connection>>, AccessError> {
        if !self.target.is_configured() {
            return Ok(self.skipped(op, "no connection target configured", None));
        }
        open(&self.target).map(Some)
    }

    /// Render with `build`; on a shape error log it and return `None`.
    fn render(
        &self,
        op: &'static str,
        build: impl FnOnce() -> Result<Statement, ShapeError>,
    ) -> Option<Statement> {
        match build() {
            Ok(stmt) => Some(stmt),
            Err(e) => self.skipped(op, e, None),
        }
    }

    /// Select `columns` from `table`.
    ///
    /// Predicate pairs are matched with `LIKE`, so `%` and `_` in their
    /// values are wildcards. A `limit` of `None` or `Some(0)` returns every
    /// matching row.
    ///
    /// Returns an empty set without connecting when the target is not
    /// configured, no columns are given, the predicate is empty or
    /// mismatched, or a name is not a plain identifier.
    ///
    /// # Example
    /// ```no_run
    /// use sql_access::db::{ConnectionTarget, Database, Predicate};
    ///
    /// let db = Database::new(ConnectionTarget::sqlite("./app.sqlite", false));
    /// let admins = Predicate::new().and("role", "admin%");
    /// let rows = db.select("users", &["id", "name"], Some(&admins), Some(10))?;
    /// for row in rows.iter() {
    ///     println!("{:?}", row.get("name"));
    /// }
    /// # Ok::<(), sql_access::db::AccessError>(())
    /// ```
    pub fn select(
        &self,
        table: &str,
        columns: &[&str],
        predicate: Option<&Predicate>,
        limit: Option<u32>,
    ) -> Result<ResultSet, AccessError> {
        let Some(stmt) = self.render("select", || statement::select(table, columns, predicate, limit))
        else {
            return Ok(ResultSet::default());
        };
        let Some(mut conn) = self.connect("select")? else {
            return Ok(ResultSet::default());
        };
        fetch(conn.as_mut(), &stmt, self.debug())
    }

    /// Update the row whose `id` column equals `id`, inserting it if none matched.
    ///
    /// See [`Database::upsert_by`].
    pub fn upsert(
        &self,
        table: &str,
        columns: &[&str],
        values: &[Value],
        id: i64,
    ) -> Result<bool, AccessError> {
        self.upsert_by(table, columns, values, id, "id")
    }

    /// Update the row whose `id_column` equals `id`, inserting it if none matched.
    ///
    /// The insert uses exactly `columns`/`values`; include the id column
    /// there if the table doesn't generate it. Returns `true` iff one of the
    /// two statements affected a row, and `false` without executing anything
    /// when columns and values don't pair up.
    pub fn upsert_by(
        &self,
        table: &str,
        columns: &[&str],
        values: &[Value],
        id: i64,
        id_column: &str,
    ) -> Result<bool, AccessError> {
        let id = Value::Int(id);
        let Some(update) =
            self.render("upsert", || statement::update(table, columns, values, &id, id_column))
        else {
            return Ok(false);
        };
        let Some(insert) = self.render("upsert", || statement::insert(table, columns, values))
        else {
            return Ok(false);
        };
        let Some(mut conn) = self.connect("upsert")? else {
            return Ok(false);
        };

        if execute(conn.as_mut(), &update, self.debug())? > 0 {
            return Ok(true);
        }
        Ok(execute(conn.as_mut(), &insert, self.debug())? > 0)
    }

    /// Delete rows where every `columns[i] = values[i]`.
    ///
    /// An empty or mismatched column/value list is refused: nothing is
    /// executed and `false` is returned.
    pub fn delete(&self, table: &str, columns: &[&str], values: &[Value]) -> Result<bool, AccessError> {
        let Some(stmt) = self.render("delete", || statement::delete(table, columns, values)) else {
            return Ok(false);
        };
        let Some(mut conn) = self.connect("delete")? else {
            return Ok(false);
        };
        Ok(execute(conn.as_mut(), &stmt, self.debug())? > 0)
    }

    /// Count rows of `table`, optionally those matching `predicate` exactly.
    pub fn count(&self, table: &str, predicate: Option<&Predicate>) -> Result<i64, AccessError> {
        let Some(stmt) = self.render("count", || statement::count(table, predicate)) else {
            return Ok(0);
        };
        let Some(mut conn) = self.connect("count")? else {
            return Ok(0);
        };
        let value = fetch_scalar(conn.as_mut(), &stmt, self.debug())?;
        integer("COUNT(*)", value)
    }

    /// Largest value of `row_column` in `table`, optionally among rows
    /// matching `predicate` exactly.
    ///
    /// An empty table, or a predicate matching no rows, yields `0`. A
    /// maximum that is not a whole number is [`AccessError::Conversion`].
    pub fn max_id(
        &self,
        table: &str,
        row_column: &str,
        predicate: Option<&Predicate>,
    ) -> Result<i64, AccessError> {
        let Some(stmt) = self.render("max_id", || statement::max(table, row_column, predicate))
        else {
            return Ok(0);
        };
        let Some(mut conn) = self.connect("max_id")? else {
            return Ok(0);
        };
        match fetch_scalar(conn.as_mut(), &stmt, self.debug())? {
            Value::Null => Ok(0),
            value => integer(row_column, value),
        }
    }
}

/// Read an aggregate result as an integer.
///
/// Some drivers hand back numeric aggregates as text, so numeric strings
/// are accepted too. Floats must be whole numbers within `i64` range.
fn integer(column: &str, value: Value) -> Result<i64, AccessError> {
    let whole = match &value {
        Value::Int(i) => Some(*i),
        Value::Real(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
        Value::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    whole.ok_or_else(|| AccessError::Conversion {
        column: column.to_string(),
        message: format!("expected an integer, got {} {}", value.type_name(), value),
    })
}
