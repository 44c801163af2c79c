//! Database connection management.

use super::backend::Connection;
use super::config::{ConnectionTarget, DatabaseConfig};
use super::pg::PostgresConnection;
use super::sqlite::SqliteConnection;
use super::AccessError;

/// Open a new connection to `target`.
///
/// The caller owns the connection exclusively; dropping it closes it.
pub fn open(target: &ConnectionTarget) -> Result<Box<dyn Connection>, AccessError> {
    let conn = match target.config() {
        DatabaseConfig::Postgres {
            host,
            port,
            database,
            username,
            password,
        } => Box::new(PostgresConnection::connect(
            host,
            *port,
            database,
            username,
            password.as_deref(),
        )?) as Box<dyn Connection>,
        DatabaseConfig::Sqlite { path } => {
            Box::new(SqliteConnection::open(path)?) as Box<dyn Connection>
        }
    };

    Ok(conn)
}
