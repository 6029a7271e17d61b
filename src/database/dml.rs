//! # DML Handlers
//!
//! INSERT, UPDATE, DELETE, and VACUUM. DELETE only sets the tombstone flag;
//! the slot stays in the row buffer (and in the file) until VACUUM compacts
//! it away. UPDATE silently skips assignments whose target column does not
//! exist.

use eyre::{bail, ensure, Result};
use smallvec::SmallVec;

use crate::schema::{Row, MAX_COLUMNS};
use crate::sql::predicate::{parse_condition, Condition};
use crate::sql::util::{find_ci, is_quoted, split_commas, starts_with_ci, take_name, unquote};
use crate::types::{DataType, Value};

use super::{Database, ResultSet};

/// `INSERT INTO <table> [( <cols> )] VALUES ( <values> )`
pub(super) fn insert(db: &mut Database, rest: &str) -> Result<ResultSet> {
    let rest = rest.trim_start();
    let (tname, after) = take_name(rest);
    let Some(ti) = db.find_table(tname) else {
        bail!("Table '{}' not found", tname);
    };

    let table = &db.tables[ti];
    let ncols = table.columns().len();
    let mut after = after.trim_start();

    // Explicit column list, or positional over the full schema.
    let mut order: SmallVec<[usize; MAX_COLUMNS]> = SmallVec::new();
    if let Some(body) = after.strip_prefix('(') {
        let Some(close) = body.find(')') else {
            bail!("Missing ')'");
        };
        for piece in body[..close].split(',') {
            if order.len() >= MAX_COLUMNS {
                break;
            }
            let cname = piece.trim();
            if cname.is_empty() {
                continue;
            }
            let Some(ci) = table.column_index(cname) else {
                bail!("Column '{}' not found", cname);
            };
            order.push(ci);
        }
        after = body[close + 1..].trim_start();
    } else {
        order.extend(0..ncols);
    }

    let Some(vidx) = find_ci(after, "VALUES") else {
        bail!("Missing VALUES");
    };
    let after_values = after[vidx + 6..].trim_start();
    let Some(body) = after_values.strip_prefix('(') else {
        bail!("Expected '('");
    };
    let Some(close) = body.rfind(')') else {
        bail!("Missing ')'");
    };

    let mut pieces = split_commas(&body[..close]);
    if pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }

    // Unlisted columns stay NULL; surplus values are ignored.
    let mut row = Row::null_row(ncols);
    for (&slot, raw) in order.iter().zip(pieces.iter()) {
        let ty = table.columns()[slot].data_type();
        row.values[slot] = parse_literal(raw.trim(), ty);
    }

    db.tables[ti].push_row(row);
    Ok(ResultSet::command("1 row inserted", 1))
}

/// `UPDATE <table> SET <col>=<value>[, ...] [WHERE <cond>]`
pub(super) fn update(db: &mut Database, rest: &str) -> Result<ResultSet> {
    let rest = rest.trim_start();
    let (tname, after) = take_name(rest);
    let Some(ti) = db.find_table(tname) else {
        bail!("Table '{}' not found", tname);
    };

    let after = after.trim_start();
    ensure!(starts_with_ci(after, "SET"), "Expected SET");
    let after = after[3..].trim_start();

    let (set_clause, cond) = split_where(after);

    let mut assignments: Vec<(&str, &str)> = Vec::new();
    for piece in split_commas(set_clause) {
        if assignments.len() >= MAX_COLUMNS {
            break;
        }
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let Some(eq) = piece.find('=') else {
            bail!("Bad SET");
        };
        assignments.push((piece[..eq].trim(), piece[eq + 1..].trim()));
    }

    let table = &mut db.tables[ti];
    let mut updated = 0;
    for i in 0..table.rows().len() {
        {
            let row = &table.rows()[i];
            if row.deleted {
                continue;
            }
            if let Some(c) = &cond {
                if !c.matches(table, row) {
                    continue;
                }
            }
        }
        for &(col, raw) in &assignments {
            // Unknown target column: skipped, not an error.
            let Some(ci) = table.column_index(col) else {
                continue;
            };
            let ty = table.columns()[ci].data_type();
            table.rows_mut()[i].values[ci] = parse_literal(raw, ty);
        }
        updated += 1;
    }

    Ok(ResultSet::command(
        format!("{} row(s) updated", updated),
        updated,
    ))
}

/// `DELETE FROM <table> [WHERE <cond>]`. Tombstones, never removes.
pub(super) fn delete(db: &mut Database, rest: &str) -> Result<ResultSet> {
    let rest = rest.trim_start();
    let (tname, after) = take_name(rest);
    let Some(ti) = db.find_table(tname) else {
        bail!("Table '{}' not found", tname);
    };

    let (_, cond) = split_where(after.trim_start());

    let table = &mut db.tables[ti];
    let mut deleted = 0;
    for i in 0..table.rows().len() {
        let row = &table.rows()[i];
        if row.deleted {
            continue;
        }
        if let Some(c) = &cond {
            if !c.matches(table, row) {
                continue;
            }
        }
        table.rows_mut()[i].deleted = true;
        deleted += 1;
    }

    Ok(ResultSet::command(
        format!("{} row(s) deleted", deleted),
        deleted,
    ))
}

/// `VACUUM`. Compacts every table; `next_id` counters survive.
pub(super) fn vacuum(db: &mut Database) -> ResultSet {
    let purged: usize = db.tables.iter_mut().map(|t| t.compact()).sum();
    ResultSet::command(format!("VACUUM: purged {} row(s)", purged), purged)
}

/// Splits a clause tail at its WHERE keyword and parses the condition.
/// An unparseable condition filters nothing.
fn split_where(input: &str) -> (&str, Option<Condition>) {
    match find_ci(input, "WHERE") {
        Some(i) => (
            input[..i].trim_end(),
            parse_condition(input[i + 5..].trim()),
        ),
        None => (input, None),
    }
}

/// An unquoted `NULL` assigns null; everything else goes through the value
/// codec against the column type.
fn parse_literal(token: &str, ty: DataType) -> Value {
    if !is_quoted(token) && token.eq_ignore_ascii_case("NULL") {
        Value::Null
    } else {
        Value::parse(unquote(token), ty)
    }
}
