//! # dbmite - Single-File Embedded SQL Database
//!
//! dbmite keeps an entire relational database, schema and rows alike, in one
//! binary `.dbm` file. It accepts a small SQL dialect, holds every table in
//! memory, and rewrites the file after each successful mutation, so the file
//! on disk always reflects the last completed statement.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dbmite::Database;
//!
//! let mut db = Database::open("./inventory.dbm")?;
//!
//! db.execute("CREATE TABLE parts (id INT PRIMARY KEY, name TEXT NOT NULL, qty INT)");
//! db.execute("INSERT INTO parts VALUES (1, 'bolt', 400)");
//!
//! let res = db.execute("SELECT name, qty FROM parts WHERE qty > 100");
//! for row in res.rows() {
//!     println!("{} x{}", row[0], row[1]);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      Public API (Database)           │
//! ├─────────────────────────────────────┤
//! │  Dispatcher + Statement Handlers     │
//! ├──────────────────┬──────────────────┤
//! │  WHERE Predicate │  Lexical Helpers  │
//! ├──────────────────┴──────────────────┤
//! │     Tables / Rows / Tombstones       │
//! ├─────────────────────────────────────┤
//! │  File Format (header + row codec)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! Single-threaded and synchronous: `execute` takes `&mut self`, returns a
//! [`ResultSet`] when the statement is done, and never panics across the
//! API boundary. Statement errors come back as `ok = false` results; only
//! open/save I/O failures surface as `eyre` errors.
//!
//! ## File Layout
//!
//! One flat little-endian file, fully rewritten on every mutation:
//!
//! ```text
//! FileHeader (128 B: magic, version, table count, db name, created-at)
//! per table:
//!   TableHeader (80 B) + ColumnRecord × ncols (72 B each)
//!   row records (variable: tombstone flag + tagged, length-prefixed cells)
//! ```
//!
//! Deleted rows stay in the file as tombstones until `VACUUM` compacts
//! them out.
//!
//! ## Module Overview
//!
//! - [`types`]: `DataType`, `Value`, column metadata
//! - [`schema`]: in-memory tables and rows
//! - [`storage`]: binary headers, row codec, load/save
//! - [`sql`]: lexical helpers and the WHERE predicate
//! - [`database`]: the `Database` facade and statement handlers
//! - [`cli`]: interactive shell and ASCII table printer

pub mod cli;
pub mod database;
pub mod schema;
pub mod sql;
pub mod storage;
pub mod types;

pub use database::{Database, ResultColumn, ResultSet};
pub use types::{Column, DataType, Value};
