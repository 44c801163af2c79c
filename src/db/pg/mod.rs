//! PostgreSQL backend implementation.
//!
//! Uses the synchronous `postgres` client. Canonical `?` statements are
//! rewritten to `$n` placeholders, prepared, and their parameters converted
//! to the types the server inferred for each placeholder. `LIKE` operands
//! are cast to text so pattern filters also work on non-text columns.

mod conversion;

use postgres::types::ToSql;
use postgres::{Client, NoTls};

use super::backend::{Connection, ResultSet};
use super::statement::Statement;
use super::{AccessError, ObjectKind, Value};

pub use conversion::{row_values, to_param, to_params};

const BACKEND: &str = "PostgreSQL";

/// One open PostgreSQL session.
pub struct PostgresConnection {
    client: Client,
}

impl PostgresConnection {
    /// Connect to a PostgreSQL server.
    ///
    /// # Errors
    /// Returns [`AccessError::ConnectFailed`] if the server can't be reached
    /// or rejects the credentials.
    pub fn connect(
        host: &str,
        port: u16,
        database: &str,
        username: &str,
        password: Option<&str>,
    ) -> Result<Self, AccessError> {
        let mut config = postgres::Config::new();
        config.host(host).port(port).dbname(database).user(username);
        if let Some(password) = password {
            config.password(password);
        }

        let client = config.connect(NoTls).map_err(|e| AccessError::ConnectFailed {
            backend: BACKEND,
            message: format!("{}:{}/{}: {}", host, port, database, server_message(&e)),
        })?;

        Ok(Self { client })
    }

    /// Prepare `stmt` and convert its values to the inferred parameter types.
    fn prepare(
        &mut self,
        stmt: &Statement,
    ) -> Result<(postgres::Statement, Vec<Box<dyn ToSql + Sync>>), AccessError> {
        let prepared = self
            .client
            .prepare(&cast_like_operands(&stmt.numbered_sql()))
            .map_err(query_error)?;
        let params = to_params(&stmt.params, prepared.params())?;
        Ok((prepared, params))
    }
}

/// Rewrite every `col LIKE $n` as `CAST(col AS TEXT) LIKE $n`.
///
/// Statement identifiers are allow-listed, so the operand is the single
/// token before `LIKE`.
fn cast_like_operands(sql: &str) -> String {
    const LIKE: &str = " LIKE $";
    let mut out = String::with_capacity(sql.len() + 16);
    let mut rest = sql;
    while let Some(pos) = rest.find(LIKE) {
        let (head, tail) = rest.split_at(pos);
        let start = head.rfind(' ').map_or(0, |i| i + 1);
        out.push_str(&head[..start]);
        out.push_str("CAST(");
        out.push_str(&head[start..]);
        out.push_str(" AS TEXT)");
        out.push_str(LIKE);
        rest = &tail[LIKE.len()..];
    }
    out.push_str(rest);
    out
}

/// The server's message, SQLSTATE and detail; the driver's own `Display`
/// for a server error is just "db error".
fn server_message(e: &postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => {
            let mut message = format!("{} (SQLSTATE {})", db.message(), db.code().code());
            if let Some(detail) = db.detail() {
                message.push_str(": ");
                message.push_str(detail);
            }
            message
        }
        None => match std::error::Error::source(e) {
            Some(source) => format!("{}: {}", e, source),
            None => e.to_string(),
        },
    }
}

fn query_error(e: postgres::Error) -> AccessError {
    AccessError::QueryFailed {
        message: server_message(&e),
    }
}

fn as_refs(params: &[Box<dyn ToSql + Sync>]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p.as_ref()).collect()
}

impl Connection for PostgresConnection {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn query(&mut self, stmt: &Statement) -> Result<ResultSet, AccessError> {
        let (prepared, params) = self.prepare(stmt)?;
        let headers = prepared
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let rows = self
            .client
            .query(&prepared, &as_refs(&params))
            .map_err(query_error)?;

        let rows = rows
            .iter()
            .map(row_values)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultSet { headers, rows })
    }

    fn execute(&mut self, stmt: &Statement) -> Result<u64, AccessError> {
        let (prepared, params) = self.prepare(stmt)?;
        self.client
            .execute(&prepared, &as_refs(&params))
            .map_err(query_error)
    }

    fn execute_verbatim(&mut self, sql: &str) -> Result<(), AccessError> {
        // Simple-query protocol: CREATE DATABASE may not run in a prepared
        // (implicitly transactional) statement.
        self.client
            .batch_execute(sql)
            .map_err(query_error)
    }

    fn object_count(&self, kind: ObjectKind, name: &str) -> Statement {
        let sql = match kind {
            ObjectKind::Database => "SELECT COUNT(*) FROM pg_database WHERE datname = ?",
            ObjectKind::Table => {
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?"
            }
        };
        Statement {
            sql: sql.to_string(),
            params: vec![Value::from(name)],
        }
    }
}
