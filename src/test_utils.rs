//! Shared test utilities for command execute tests.
//!
//! Every fixture database is a SQLite file in its own temporary directory,
//! removed when the returned [`TestDb`] is dropped.

use std::error::Error;

use tempfile::TempDir;

use crate::commands::Execute;
use crate::db::{open, ConnectionTarget, Database};

/// The users table every execute test starts from.
pub const USERS_SCHEMA: &str = "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, role TEXT)";

const USERS_ROWS: &str = "
    INSERT INTO users (id, name, role) VALUES (1, 'Alice', 'admin');
    INSERT INTO users (id, name, role) VALUES (2, 'Bob', 'user');
    INSERT INTO users (id, name, role) VALUES (3, 'Carol', 'admin');";

/// A database handle plus the directory holding its file.
pub struct TestDb {
    pub db: Database,
    pub dir: TempDir,
}

/// Create an empty database file.
pub fn empty_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let target = ConnectionTarget::sqlite(dir.path().join("test.sqlite"), true);
    TestDb {
        db: Database::new(target),
        dir,
    }
}

/// Create a database with a `users` table holding Alice (admin), Bob (user)
/// and Carol (admin) under ids 1 to 3.
pub fn users_db() -> TestDb {
    let test_db = empty_db();
    let mut conn = open(test_db.db.target()).expect("Failed to open test database");
    conn.execute_verbatim(&format!("{};{}", USERS_SCHEMA, USERS_ROWS))
        .expect("Failed to seed users table");
    test_db
}

/// Execute a command against a database and return the result.
pub fn execute_cmd<C: Execute>(cmd: C, db: &Database) -> Result<C::Output, Box<dyn Error>> {
    cmd.execute(db)
}
