//! SQLite backend.
//!
//! SQLite takes `?` placeholders natively, so canonical statements are
//! prepared as-is. Booleans are stored as integers `0`/`1`, the way SQLite
//! itself represents them.

use std::path::Path;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, ToSql};

use super::backend::{Connection, ResultSet};
use super::statement::Statement;
use super::{AccessError, ObjectKind, Value};

const BACKEND: &str = "SQLite";

/// One open SQLite database file.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, AccessError> {
        let conn = rusqlite::Connection::open(path).map_err(|e| AccessError::ConnectFailed {
            backend: BACKEND,
            message: format!("{}: {}", path.display(), e),
        })?;
        Ok(Self { conn })
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Bool(b) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(i64::from(*b))),
            Value::Int(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

fn from_value_ref(column: &str, value: ValueRef<'_>) -> Result<Value, AccessError> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(i) => Ok(Value::Int(i)),
        ValueRef::Real(f) => Ok(Value::Real(f)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| Value::Text(s.to_string()))
            .map_err(|e| AccessError::Conversion {
                column: column.to_string(),
                message: e.to_string(),
            }),
        ValueRef::Blob(bytes) => Ok(Value::Text(hex::encode(bytes))),
    }
}

impl Connection for SqliteConnection {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn query(&mut self, stmt: &Statement) -> Result<ResultSet, AccessError> {
        let mut prepared = self
            .conn
            .prepare(&stmt.sql)
            .map_err(AccessError::query_failed)?;
        let headers: Vec<String> = prepared
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = prepared
            .query(params_from_iter(stmt.params.iter()))
            .map_err(AccessError::query_failed)?;

        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(AccessError::query_failed)? {
            let values = headers
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let cell = row.get_ref(idx).map_err(AccessError::query_failed)?;
                    from_value_ref(column, cell)
                })
                .collect::<Result<Vec<_>, _>>()?;
            result.push(values);
        }

        Ok(ResultSet {
            headers,
            rows: result,
        })
    }

    fn execute(&mut self, stmt: &Statement) -> Result<u64, AccessError> {
        let changed = self
            .conn
            .execute(&stmt.sql, params_from_iter(stmt.params.iter()))
            .map_err(AccessError::query_failed)?;
        Ok(changed as u64)
    }

    fn execute_verbatim(&mut self, sql: &str) -> Result<(), AccessError> {
        self.conn
            .execute_batch(sql)
            .map_err(AccessError::query_failed)
    }

    fn object_count(&self, kind: ObjectKind, name: &str) -> Statement {
        let sql = match kind {
            // Attached databases live only as long as the connection that
            // attached them.
            ObjectKind::Database => "SELECT COUNT(*) FROM pragma_database_list WHERE name = ?",
            ObjectKind::Table => "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        };
        Statement {
            sql: sql.to_string(),
            params: vec![Value::from(name)],
        }
    }
}
