//! # SQL Integration Test Suite
//!
//! End-to-end statement tests driven through `Database::execute`, covering
//! the full command set and the documented edge cases:
//!
//! 1. **DDL**: CREATE TABLE variants, DROP TABLE
//! 2. **DML**: INSERT (positional and column-list), UPDATE, DELETE
//! 3. **Queries**: SELECT projections and predicates, SHOW TABLES, DESCRIBE
//! 4. **Lifecycle**: tombstones, VACUUM
//!
//! ## Usage
//!
//! ```sh
//! cargo test --test integration_sql
//! ```

use tempfile::tempdir;

use dbmite::{Database, ResultSet};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn scratch_db() -> (tempfile::TempDir, Database) {
    let dir = tempdir().expect("failed to create temp dir");
    let db = Database::open(dir.path().join("test.dbm")).expect("failed to open database");
    (dir, db)
}

fn exec_ok(db: &mut Database, sql: &str) -> ResultSet {
    let rs = db.execute(sql);
    assert!(rs.is_ok(), "`{}` failed: {}", sql, rs.message());
    rs
}

fn rows(db: &mut Database, sql: &str) -> Vec<Vec<String>> {
    exec_ok(db, sql).rows().to_vec()
}

// ============================================================================
// SCENARIO WALKTHROUGH
// ============================================================================

/// The canonical session: create, fill, query, update, delete, vacuum.
#[test]
fn full_session_walkthrough() {
    let (_dir, mut db) = scratch_db();

    // S1: create
    let rs = exec_ok(
        &mut db,
        "CREATE TABLE users (id INT PRIMARY KEY, name TEXT NOT NULL, age INT, active BOOL);",
    );
    assert_eq!(rs.message(), "Table 'users' created (4 cols)");

    // S2: insert + projected select
    exec_ok(&mut db, "INSERT INTO users VALUES (1, 'Alice', 30, true);");
    let got = rows(&mut db, "SELECT name, age FROM users WHERE age > 25;");
    assert_eq!(got, vec![vec!["Alice", "30"]]);

    // S3: partial insert leaves NULLs behind
    exec_ok(&mut db, "INSERT INTO users (id, name) VALUES (2, 'Bob');");
    let got = rows(&mut db, "SELECT * FROM users WHERE age IS NULL;");
    assert_eq!(got, vec![vec!["2", "Bob", "NULL", "NULL"]]);

    // S4: update through a text predicate
    exec_ok(&mut db, "UPDATE users SET active=false WHERE name='Alice';");
    let got = rows(&mut db, "SELECT active FROM users WHERE id=1;");
    assert_eq!(got, vec![vec!["false"]]);

    // S5: delete + live-row accounting
    let rs = exec_ok(&mut db, "DELETE FROM users WHERE age IS NULL;");
    assert_eq!(rs.message(), "1 row(s) deleted");
    let got = rows(&mut db, "SHOW TABLES;");
    assert_eq!(got, vec![vec!["users", "4", "1"]]);

    // S6: vacuum purges the tombstone, visible counts are unchanged
    let rs = exec_ok(&mut db, "VACUUM;");
    assert_eq!(rs.message(), "VACUUM: purged 1 row(s)");
    let got = rows(&mut db, "SHOW TABLES;");
    assert_eq!(got, vec![vec!["users", "4", "1"]]);

    // S7: querying a missing table is a statement error
    let rs = db.execute("SELECT * FROM missing;");
    assert!(!rs.is_ok());
    assert_eq!(rs.message(), "Table 'missing' not found");
}

// ============================================================================
// NAME AND KEYWORD CASE-INSENSITIVITY
// ============================================================================

#[test]
fn table_and_column_names_match_any_case() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE Users (Id INT, Name TEXT)");

    exec_ok(&mut db, "INSERT INTO USERS (ID, NAME) VALUES (1, 'x')");
    let got = rows(&mut db, "SELECT id FROM users WHERE NAME = 'x'");
    assert_eq!(got, vec![vec!["1"]]);

    // The header keeps the schema's spelling, not the query's.
    let rs = exec_ok(&mut db, "SELECT id, name FROM USERS");
    let names: Vec<&str> = rs.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Id", "Name"]);
}

#[test]
fn text_predicate_comparison_ignores_case() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (s TEXT)");
    exec_ok(&mut db, "INSERT INTO t VALUES ('Hello')");

    assert_eq!(rows(&mut db, "SELECT s FROM t WHERE s = 'HELLO'").len(), 1);
    assert_eq!(rows(&mut db, "SELECT s FROM t WHERE s = 'hello'").len(), 1);
    assert_eq!(rows(&mut db, "SELECT s FROM t WHERE s = 'other'").len(), 0);
}

// ============================================================================
// PREDICATE OPERATORS
// ============================================================================

#[test]
fn angle_ne_and_bang_ne_produce_the_same_match_set() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");
    for i in 0..6 {
        exec_ok(&mut db, &format!("INSERT INTO t VALUES ({})", i));
    }

    let a = rows(&mut db, "SELECT x FROM t WHERE x != 3");
    let b = rows(&mut db, "SELECT x FROM t WHERE x <> 3");
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
}

#[test]
fn comparison_operators_on_ints() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");
    for i in 1..=5 {
        exec_ok(&mut db, &format!("INSERT INTO t VALUES ({})", i));
    }

    assert_eq!(rows(&mut db, "SELECT x FROM t WHERE x = 3").len(), 1);
    assert_eq!(rows(&mut db, "SELECT x FROM t WHERE x < 3").len(), 2);
    assert_eq!(rows(&mut db, "SELECT x FROM t WHERE x <= 3").len(), 3);
    assert_eq!(rows(&mut db, "SELECT x FROM t WHERE x > 3").len(), 2);
    assert_eq!(rows(&mut db, "SELECT x FROM t WHERE x >= 3").len(), 3);
}

#[test]
fn float_predicates_parse_scientific_notation() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (f FLOAT)");
    exec_ok(&mut db, "INSERT INTO t VALUES (1500)");
    exec_ok(&mut db, "INSERT INTO t VALUES (0.5)");

    let got = rows(&mut db, "SELECT f FROM t WHERE f > 1e3");
    assert_eq!(got, vec![vec!["1500"]]);
}

#[test]
fn bool_predicates() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (id INT, b BOOL)");
    exec_ok(&mut db, "INSERT INTO t VALUES (1, true)");
    exec_ok(&mut db, "INSERT INTO t VALUES (2, false)");

    assert_eq!(rows(&mut db, "SELECT id FROM t WHERE b = true"), vec![vec!["1"]]);
    assert_eq!(rows(&mut db, "SELECT id FROM t WHERE b = 1"), vec![vec!["1"]]);
    assert_eq!(rows(&mut db, "SELECT id FROM t WHERE b = false"), vec![vec!["2"]]);
}

#[test]
fn predicate_on_unknown_column_matches_nothing() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");
    exec_ok(&mut db, "INSERT INTO t VALUES (1)");

    let got = rows(&mut db, "SELECT x FROM t WHERE ghost = 1");
    assert!(got.is_empty());
}

// ============================================================================
// TYPE COERCION AT WRITE
// ============================================================================

#[test]
fn string_literal_into_int_column_stores_the_numeric_parse() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");
    exec_ok(&mut db, "INSERT INTO t VALUES ('42')");
    exec_ok(&mut db, "INSERT INTO t VALUES ('junk')");

    let got = rows(&mut db, "SELECT x FROM t");
    assert_eq!(got, vec![vec!["42"], vec!["0"]]);

    // The stored value is numeric: it matches a numeric predicate.
    assert_eq!(rows(&mut db, "SELECT x FROM t WHERE x = 42").len(), 1);
}

#[test]
fn long_text_is_capped_at_255_bytes() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (s TEXT)");
    let long = "y".repeat(400);
    exec_ok(&mut db, &format!("INSERT INTO t VALUES ('{}')", long));

    let got = rows(&mut db, "SELECT s FROM t");
    assert_eq!(got[0][0].len(), 255);
}

// ============================================================================
// SELECT PURITY
// ============================================================================

#[test]
fn read_only_statements_do_not_touch_the_file() {
    let (dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");
    exec_ok(&mut db, "INSERT INTO t VALUES (1)");

    let path = dir.path().join("test.dbm");
    let mtime = std::fs::metadata(&path).unwrap().modified().unwrap();
    let len = std::fs::metadata(&path).unwrap().len();

    exec_ok(&mut db, "SELECT * FROM t");
    exec_ok(&mut db, "SHOW TABLES");
    exec_ok(&mut db, "DESCRIBE t");

    let meta = std::fs::metadata(&path).unwrap();
    assert_eq!(meta.modified().unwrap(), mtime);
    assert_eq!(meta.len(), len);
}

// ============================================================================
// TOMBSTONE INVISIBILITY
// ============================================================================

#[test]
fn deleted_rows_stay_invisible_to_every_statement() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");
    for i in 0..4 {
        exec_ok(&mut db, &format!("INSERT INTO t VALUES ({})", i));
    }
    exec_ok(&mut db, "DELETE FROM t WHERE x < 2");

    // Invisible to SELECT,
    assert_eq!(rows(&mut db, "SELECT x FROM t"), vec![vec!["2"], vec!["3"]]);
    // to UPDATE,
    let rs = exec_ok(&mut db, "UPDATE t SET x = 9");
    assert_eq!(rs.message(), "2 row(s) updated");
    // and to DELETE itself.
    let rs = exec_ok(&mut db, "DELETE FROM t WHERE x = 9");
    assert_eq!(rs.message(), "2 row(s) deleted");
}

// ============================================================================
// RESULT SHAPE
// ============================================================================

#[test]
fn mutations_have_no_payload_and_queries_do() {
    let (_dir, mut db) = scratch_db();
    let rs = exec_ok(&mut db, "CREATE TABLE t (x INT)");
    assert!(!rs.has_payload());

    let rs = exec_ok(&mut db, "INSERT INTO t VALUES (1)");
    assert!(!rs.has_payload());
    assert_eq!(rs.affected(), 1);

    let rs = exec_ok(&mut db, "SELECT * FROM t");
    assert!(rs.has_payload());
    assert_eq!(rs.columns().len(), 1);
    assert_eq!(rs.message(), "1 row(s) returned");
}

#[test]
fn zero_match_select_is_still_ok() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");

    let rs = exec_ok(&mut db, "SELECT * FROM t WHERE x = 1");
    assert!(rs.has_payload());
    assert!(rs.rows().is_empty());
    assert_eq!(rs.message(), "0 row(s) returned");
}

#[test]
fn update_and_delete_report_zero_matches_as_success() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE t (x INT)");

    let rs = exec_ok(&mut db, "UPDATE t SET x = 1 WHERE x = 5");
    assert_eq!(rs.message(), "0 row(s) updated");

    let rs = exec_ok(&mut db, "DELETE FROM t WHERE x = 5");
    assert_eq!(rs.message(), "0 row(s) deleted");
}

// ============================================================================
// MULTI-TABLE BEHAVIOR
// ============================================================================

#[test]
fn vacuum_sweeps_every_table() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE a (x INT)");
    exec_ok(&mut db, "CREATE TABLE b (x INT)");
    exec_ok(&mut db, "INSERT INTO a VALUES (1)");
    exec_ok(&mut db, "INSERT INTO b VALUES (1)");
    exec_ok(&mut db, "INSERT INTO b VALUES (2)");
    exec_ok(&mut db, "DELETE FROM a");
    exec_ok(&mut db, "DELETE FROM b WHERE x = 1");

    let rs = exec_ok(&mut db, "VACUUM");
    assert_eq!(rs.message(), "VACUUM: purged 2 row(s)");
}

#[test]
fn show_tables_lists_in_creation_order() {
    let (_dir, mut db) = scratch_db();
    exec_ok(&mut db, "CREATE TABLE zeta (x INT)");
    exec_ok(&mut db, "CREATE TABLE alpha (x INT)");

    let got = rows(&mut db, "SHOW TABLES");
    assert_eq!(got, vec![vec!["zeta", "1", "0"], vec!["alpha", "1", "0"]]);
}
