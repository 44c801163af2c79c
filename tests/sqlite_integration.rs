//! End-to-end tests of the access layer against SQLite files.
//!
//! Each test gets its own database file in a temporary directory and goes
//! through the public API only.

use rstest::{fixture, rstest};
use tempfile::TempDir;

use sql_access::db::{AccessError, ConnectionTarget, Database, Predicate, Value};

const CREATE_USERS: &str = "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)";

struct Fixture {
    db: Database,
    _dir: TempDir,
}

#[fixture]
fn fresh() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(ConnectionTarget::sqlite(dir.path().join("it.sqlite"), true));
    Fixture { db, _dir: dir }
}

#[fixture]
fn users(fresh: Fixture) -> Fixture {
    assert!(fresh.db.ensure_table("users", CREATE_USERS).unwrap());
    fresh
}

fn names(db: &Database, predicate: Option<&Predicate>) -> Vec<String> {
    db.select("users", &["name"], predicate, None)
        .unwrap()
        .iter()
        .filter_map(|row| row.get("name").and_then(Value::as_string))
        .collect()
}

#[rstest]
fn test_users_lifecycle(users: Fixture) {
    let db = &users.db;

    assert!(db.upsert("users", &["id", "name"], &[1.into(), "Alice".into()], 1).unwrap());
    assert_eq!(db.count("users", None).unwrap(), 1);
    assert_eq!(db.max_id("users", "id", None).unwrap(), 1);

    // second upsert with the same id updates in place
    assert!(db.upsert("users", &["name"], &["Alicia".into()], 1).unwrap());
    assert_eq!(db.count("users", None).unwrap(), 1);
    assert_eq!(names(db, None), vec!["Alicia"]);

    assert!(db.upsert("users", &["id", "name"], &[2.into(), "Bob".into()], 2).unwrap());
    let like_b = Predicate::new().and("name", "B%");
    assert_eq!(names(db, Some(&like_b)), vec!["Bob"]);

    assert!(db.delete("users", &["id"], &[1.into()]).unwrap());
    assert_eq!(db.count("users", None).unwrap(), 1);
    assert_eq!(db.max_id("users", "id", None).unwrap(), 2);
}

#[rstest]
fn test_upsert_then_rename_then_delete(users: Fixture) {
    let db = &users.db;

    assert!(db.upsert("users", &["id", "name"], &[1.into(), "Alice".into()], 1).unwrap());
    assert_eq!(db.count("users", None).unwrap(), 1);

    assert!(db.upsert("users", &["name"], &["Bob".into()], 1).unwrap());
    assert_eq!(db.count("users", None).unwrap(), 1);
    let rows = db.select("users", &["id", "name"], None, None).unwrap();
    let row = rows.row(0).unwrap();
    assert_eq!(row.get("id"), Some(&Value::Int(1)));
    assert_eq!(row.get("name"), Some(&Value::from("Bob")));

    assert!(db.delete("users", &["id"], &[1.into()]).unwrap());
    assert_eq!(db.count("users", None).unwrap(), 0);
}

#[rstest]
fn test_bootstrap_twice_runs_creation_once(fresh: Fixture) {
    assert!(fresh.db.ensure_table("users", CREATE_USERS).unwrap());
    assert!(!fresh.db.ensure_table("users", CREATE_USERS).unwrap());
}

#[rstest]
fn test_max_id_empty_table_is_zero(users: Fixture) {
    assert_eq!(users.db.max_id("users", "id", None).unwrap(), 0);
}

#[rstest]
fn test_delete_without_predicate_deletes_nothing(users: Fixture) {
    users
        .db
        .upsert("users", &["id", "name"], &[1.into(), "Alice".into()], 1)
        .unwrap();
    assert!(!users.db.delete("users", &[], &[]).unwrap());
    assert_eq!(users.db.count("users", None).unwrap(), 1);
}

#[rstest]
fn test_upsert_shape_mismatch_writes_nothing(users: Fixture) {
    assert!(!users.db.upsert("users", &["id", "name"], &[1.into()], 1).unwrap());
    assert_eq!(users.db.count("users", None).unwrap(), 0);
}

#[rstest]
#[case(None, 5)]
#[case(Some(0), 5)]
#[case(Some(2), 2)]
#[case(Some(10), 5)]
fn test_select_limit(users: Fixture, #[case] limit: Option<u32>, #[case] expected: usize) {
    for id in 1..=5i64 {
        users
            .db
            .upsert("users", &["id", "name"], &[id.into(), format!("user{}", id).into()], id)
            .unwrap();
    }
    let rows = users.db.select("users", &["*"], None, limit).unwrap();
    assert_eq!(rows.len(), expected);
}

#[rstest]
fn test_values_are_bound_not_interpolated(users: Fixture) {
    let hostile = "x'); DROP TABLE users; --";
    assert!(users.db.upsert("users", &["id", "name"], &[1.into(), hostile.into()], 1).unwrap());
    let exact = Predicate::new().and("name", hostile);
    assert_eq!(users.db.count("users", Some(&exact)).unwrap(), 1);
}

#[rstest]
fn test_hostile_identifier_is_rejected(users: Fixture) {
    let rows = users.db.select("users; DROP TABLE users", &["*"], None, None).unwrap();
    assert!(rows.is_empty());
    assert!(!users.db.ensure_table("users", CREATE_USERS).unwrap());
}

#[rstest]
fn test_unconfigured_target_is_neutral() {
    let db = Database::default();
    assert!(db.select("users", &["*"], None, None).unwrap().is_empty());
    assert!(!db.upsert("users", &["name"], &["Alice".into()], 1).unwrap());
    assert!(!db.delete("users", &["id"], &[1.into()]).unwrap());
    assert_eq!(db.count("users", None).unwrap(), 0);
    assert_eq!(db.max_id("users", "id", None).unwrap(), 0);
}

#[rstest]
fn test_unreachable_database_is_fatal() {
    let db = Database::new(ConnectionTarget::sqlite("/nonexistent/dir/x.sqlite", false));
    match db.count("users", None) {
        Err(AccessError::ConnectFailed { backend, .. }) => assert_eq!(backend, "SQLite"),
        other => panic!("Expected ConnectFailed, got {:?}", other),
    }
}

#[rstest]
fn test_missing_table_is_fatal(fresh: Fixture) {
    assert!(matches!(
        fresh.db.count("users", None),
        Err(AccessError::QueryFailed { .. })
    ));
}
