//! # Database Facade
//!
//! The [`Database`] struct ties everything together: it owns the tables,
//! knows its file path, and routes SQL text to the statement handlers.
//!
//! ## Execution Pipeline
//!
//! ```text
//! input string
//!     │  trim, strip trailing ';', trim, cap at 4096 bytes
//!     ▼
//! leading keyword (case-insensitive)
//!     │
//!     ├── CREATE TABLE / DROP TABLE ──────▶ ddl
//!     ├── INSERT / UPDATE / DELETE / VACUUM ▶ dml
//!     ├── SELECT / SHOW TABLES / DESCRIBE ─▶ query
//!     └── anything else ──────────────────▶ "Unknown command"
//!     │
//!     ▼
//! mutation? → synchronous full-file save before returning
//! ```
//!
//! ## Error Surface
//!
//! Handlers raise `eyre` errors internally; `execute` converts them into
//! `ok = false` result sets, so no statement-level failure escapes as a
//! Rust error. Only `open`, `save`, and `close` return `Result`.
//!
//! ## Concurrency
//!
//! None, deliberately. `execute` takes `&mut self`, every statement runs to
//! completion before returning, and persistence is totally ordered: when a
//! mutating call returns, the file reflects all completed mutations.

mod ddl;
mod dml;
mod query;
mod result;

pub use result::{ResultColumn, ResultSet};

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use eyre::Result;

use crate::schema::Table;
use crate::sql::util::{starts_with_ci, truncate_bytes};
use crate::storage;

/// Statements longer than this are truncated before parsing.
pub const MAX_STATEMENT_LEN: usize = 4096;

/// An open single-file database.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    name: String,
    created: String,
    tables: Vec<Table>,
}

impl Database {
    /// Opens a database file, or bootstraps an empty database when the
    /// path does not exist yet. A present file with a bad magic or version
    /// is rejected, not re-initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(loaded) = storage::load(&path)? {
            return Ok(Self {
                path,
                name: loaded.name,
                created: loaded.created,
                tables: loaded.tables,
            });
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            path,
            name,
            created: current_timestamp(),
            tables: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Index of the named table, matched case-insensitively.
    fn find_table(&self, name: &str) -> Option<usize> {
        self.tables
            .iter()
            .position(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Runs one statement and returns its result. Statement errors come
    /// back as `ok = false` results; this method itself never fails.
    pub fn execute(&mut self, input: &str) -> ResultSet {
        match self.dispatch(input) {
            Ok(rs) => rs,
            Err(e) => ResultSet::error(format!("{:#}", e)),
        }
    }

    fn dispatch(&mut self, input: &str) -> Result<ResultSet> {
        let sql = truncate_bytes(input, MAX_STATEMENT_LEN).trim();
        let sql = sql.strip_suffix(';').unwrap_or(sql).trim();

        if sql.is_empty() {
            return Ok(ResultSet::command("Empty", 0));
        }

        let (result, mutating) = if starts_with_ci(sql, "CREATE TABLE") {
            (ddl::create_table(self, &sql[12..])?, true)
        } else if starts_with_ci(sql, "DROP TABLE") {
            (ddl::drop_table(self, &sql[10..])?, true)
        } else if starts_with_ci(sql, "INSERT INTO") {
            (dml::insert(self, &sql[11..])?, true)
        } else if starts_with_ci(sql, "SELECT") {
            (query::select(self, &sql[6..])?, false)
        } else if starts_with_ci(sql, "UPDATE") {
            (dml::update(self, &sql[6..])?, true)
        } else if starts_with_ci(sql, "DELETE FROM") {
            (dml::delete(self, &sql[11..])?, true)
        } else if starts_with_ci(sql, "SHOW TABLES") {
            (query::show_tables(self), false)
        } else if starts_with_ci(sql, "DESCRIBE") {
            (query::describe(self, &sql[8..])?, false)
        } else if starts_with_ci(sql, "DESC ") {
            (query::describe(self, &sql[5..])?, false)
        } else if starts_with_ci(sql, "VACUUM") {
            (dml::vacuum(self), true)
        } else {
            eyre::bail!("Unknown command");
        };

        if mutating {
            self.save()?;
        }

        Ok(result)
    }

    /// Rewrites the database file in full.
    pub fn save(&self) -> Result<()> {
        storage::save(&self.path, &self.name, &self.created, &self.tables)
    }

    /// Saves and consumes the handle.
    pub fn close(self) -> Result<()> {
        self.save()
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Best-effort final save; every mutation already saved itself.
        let _ = self.save();
    }
}

/// `YYYY-MM-DD HH:MM:SS`, from the system clock.
fn current_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let days = (secs / 86_400) as i32;
    let tod = secs % 86_400;
    let (year, month, day) = civil_from_days(days);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year,
        month,
        day,
        tod / 3600,
        (tod % 3600) / 60,
        tod % 60
    )
}

/// Gregorian date from days since 1970-01-01.
fn civil_from_days(days_since_epoch: i32) -> (i32, u32, u32) {
    let a = days_since_epoch + 719_528 + 32_044;
    let b = (4 * a + 3) / 146_097;
    let c = a - (146_097 * b) / 4;
    let d = (4 * c + 3) / 1_461;
    let e = c - (1_461 * d) / 4;
    let m = (5 * e + 2) / 153;

    let day = (e - (153 * m + 2) / 5 + 1) as u32;
    let month = (m + 3 - 12 * (m / 10)) as u32;
    let year = 100 * b + d - 4_800 + m / 10;

    (year, month, day)
}
