//! Idempotent creation of databases and tables.
//!
//! The existence check, the caller's creation SQL and the re-check all run
//! on one connection, but not in one transaction: two processes
//! bootstrapping the same name at once can both see it missing, and the
//! slower one then fails with the server's "already exists" error.

use tracing::info;

use super::access::Database;
use super::backend::Connection;
use super::query::{execute_verbatim, fetch_scalar};
use super::{AccessError, ObjectKind};

impl Database {
    /// Create database `name` by running `create_sql`, unless it already exists.
    ///
    /// Returns `Ok(true)` if the database was created, `Ok(false)` if it
    /// already existed or there was nothing to do (unconfigured target, empty
    /// SQL).
    ///
    /// # Errors
    /// [`AccessError::NotCreated`] if `create_sql` ran but the database still
    /// isn't in the catalog; any driver error as-is.
    pub fn ensure_database(&self, name: &str, create_sql: &str) -> Result<bool, AccessError> {
        self.ensure(ObjectKind::Database, name, create_sql)
    }

    /// Create table `name` by running `create_sql`, unless it already exists.
    ///
    /// Same contract as [`Database::ensure_database`].
    ///
    /// # Example
    /// ```no_run
    /// use sql_access::db::{ConnectionTarget, Database};
    ///
    /// let db = Database::new(ConnectionTarget::sqlite("./app.sqlite", false));
    /// db.ensure_table("users", "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")?;
    /// // Second call finds the table and runs nothing.
    /// assert!(!db.ensure_table("users", "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")?);
    /// # Ok::<(), sql_access::db::AccessError>(())
    /// ```
    pub fn ensure_table(&self, name: &str, create_sql: &str) -> Result<bool, AccessError> {
        self.ensure(ObjectKind::Table, name, create_sql)
    }

    fn ensure(&self, kind: ObjectKind, name: &str, create_sql: &str) -> Result<bool, AccessError> {
        let op = match kind {
            ObjectKind::Database => "ensure_database",
            ObjectKind::Table => "ensure_table",
        };
        if create_sql.trim().is_empty() {
            return Ok(self.skipped(op, "no creation SQL given", false));
        }
        let Some(mut conn) = self.connect(op)? else {
            return Ok(false);
        };

        if self.object_exists(conn.as_mut(), kind, name)? {
            return Ok(false);
        }

        execute_verbatim(conn.as_mut(), create_sql, self.debug())?;

        if !self.object_exists(conn.as_mut(), kind, name)? {
            return Err(AccessError::NotCreated {
                kind,
                name: name.to_string(),
            });
        }

        info!(kind = %kind, name, "created");
        Ok(true)
    }

    fn object_exists(
        &self,
        conn: &mut dyn Connection,
        kind: ObjectKind,
        name: &str,
    ) -> Result<bool, AccessError> {
        let stmt = conn.object_count(kind, name);
        let count = fetch_scalar(conn, &stmt, self.debug())?;
        Ok(count.as_i64_or(0) > 0)
    }
}
