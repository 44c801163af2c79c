//! Query execution utilities.
//!
//! Thin wrappers over [`Connection`] that emit the statement diagnostic
//! before running anything. With the debug flag set, every statement is
//! logged at `debug` level under the `sql_access::statement` target in its
//! canonical `?` form, followed by the bound values.

use tracing::debug;

use super::backend::{Connection, ResultSet};
use super::statement::Statement;
use super::{AccessError, Value};

pub const STATEMENT_TARGET: &str = "sql_access::statement";

fn trace_statement(conn: &dyn Connection, stmt: &Statement, debug: bool) {
    if debug {
        debug!(
            target: STATEMENT_TARGET,
            backend = conn.backend_name(),
            params = ?stmt.params,
            "{}",
            stmt.sql
        );
    }
}

/// Run a statement that returns rows.
pub fn fetch(
    conn: &mut dyn Connection,
    stmt: &Statement,
    debug: bool,
) -> Result<ResultSet, AccessError> {
    trace_statement(conn, stmt, debug);
    conn.query(stmt)
}

/// Run a statement that returns a single value.
pub fn fetch_scalar(
    conn: &mut dyn Connection,
    stmt: &Statement,
    debug: bool,
) -> Result<Value, AccessError> {
    trace_statement(conn, stmt, debug);
    conn.scalar(stmt)
}

/// Run a statement that modifies rows, returning the affected-row count.
pub fn execute(conn: &mut dyn Connection, stmt: &Statement, debug: bool) -> Result<u64, AccessError> {
    trace_statement(conn, stmt, debug);
    conn.execute(stmt)
}

/// Run caller-supplied SQL as-is.
pub fn execute_verbatim(
    conn: &mut dyn Connection,
    sql: &str,
    debug: bool,
) -> Result<(), AccessError> {
    if debug {
        debug!(target: STATEMENT_TARGET, backend = conn.backend_name(), "{}", sql);
    }
    conn.execute_verbatim(sql)
}
