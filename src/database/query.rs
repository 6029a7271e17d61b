//! # Query Handlers
//!
//! SELECT, SHOW TABLES, and DESCRIBE: the read-only statements. None of
//! them touches a table or the file; the dispatcher skips the save for
//! this whole group.

use eyre::{bail, Result};
use smallvec::SmallVec;

use crate::schema::MAX_COLUMNS;
use crate::sql::predicate::parse_condition;
use crate::sql::util::{find_ci, take_name};
use crate::types::DataType;

use super::{Database, ResultColumn, ResultSet};

/// `SELECT <cols>|* FROM <table> [WHERE <cond>]`
pub(super) fn select(db: &Database, rest: &str) -> Result<ResultSet> {
    let rest = rest.trim_start();
    let Some(fidx) = find_ci(rest, "FROM") else {
        bail!("Missing FROM");
    };
    let projection = rest[..fidx].trim();

    let after = rest[fidx + 4..].trim_start();
    let (tname, after_name) = take_name(after);
    let Some(ti) = db.find_table(tname) else {
        bail!("Table '{}' not found", tname);
    };
    let table = &db.tables[ti];

    let cond = find_ci(after_name, "WHERE")
        .and_then(|i| parse_condition(after_name[i + 5..].trim()));

    let mut proj: SmallVec<[usize; MAX_COLUMNS]> = SmallVec::new();
    if projection == "*" {
        proj.extend(0..table.columns().len());
    } else {
        for piece in projection.split(',') {
            if proj.len() >= MAX_COLUMNS {
                break;
            }
            let cname = piece.trim();
            if cname.is_empty() {
                continue;
            }
            let Some(ci) = table.column_index(cname) else {
                bail!("Column '{}' not found", cname);
            };
            proj.push(ci);
        }
    }

    let header = proj
        .iter()
        .map(|&ci| {
            let col = &table.columns()[ci];
            ResultColumn::new(col.name(), col.data_type())
        })
        .collect();

    let mut rs = ResultSet::query(header);
    for row in table.rows() {
        if row.deleted {
            continue;
        }
        if let Some(c) = &cond {
            if !c.matches(table, row) {
                continue;
            }
        }
        rs.push_row(proj.iter().map(|&ci| row.values[ci].format()).collect());
    }

    let n = rs.rows().len();
    rs.finish(format!("{} row(s) returned", n), n);
    Ok(rs)
}

/// `SHOW TABLES`. One row per table with its column and live-row counts.
pub(super) fn show_tables(db: &Database) -> ResultSet {
    let mut rs = ResultSet::query(vec![
        ResultColumn::new("Table", DataType::Text),
        ResultColumn::new("Columns", DataType::Int),
        ResultColumn::new("Rows", DataType::Int),
    ]);

    for table in &db.tables {
        rs.push_row(vec![
            table.name().to_string(),
            table.columns().len().to_string(),
            table.live_row_count().to_string(),
        ]);
    }

    let n = rs.rows().len();
    rs.finish(format!("{} table(s)", n), n);
    rs
}

/// `DESCRIBE <table>` / `DESC <table>`. The schema, one row per column.
pub(super) fn describe(db: &Database, rest: &str) -> Result<ResultSet> {
    let name = rest.trim();
    let Some(ti) = db.find_table(name) else {
        bail!("Table '{}' not found", name);
    };
    let table = &db.tables[ti];

    let mut rs = ResultSet::query(vec![
        ResultColumn::new("Column", DataType::Text),
        ResultColumn::new("Type", DataType::Text),
        ResultColumn::new("Nullable", DataType::Text),
        ResultColumn::new("PK", DataType::Text),
    ]);

    for col in table.columns() {
        rs.push_row(vec![
            col.name().to_string(),
            col.data_type().name().to_string(),
            if col.is_nullable() { "YES" } else { "NO" }.to_string(),
            if col.is_primary_key() { "YES" } else { "NO" }.to_string(),
        ]);
    }

    rs.finish(
        format!("Table '{}': {} column(s)", table.name(), table.columns().len()),
        0,
    );
    Ok(rs)
}
