//! # DDL Handlers
//!
//! CREATE TABLE and DROP TABLE. The column-definition grammar is forgiving:
//! the first two whitespace tokens of each fragment are the column name and
//! type, and `PRIMARY KEY` / `NOT NULL` are detected anywhere in the
//! fragment, in either order.

use eyre::{bail, ensure, Result};

use crate::schema::{Table, MAX_COLUMNS, MAX_TABLES};
use crate::sql::util::{find_ci, take_name, truncate_bytes};
use crate::types::{Column, DataType, MAX_NAME_LEN};

use super::{Database, ResultSet};

/// `CREATE TABLE <name> ( <col> <TYPE> [PRIMARY KEY] [NOT NULL], ... )`
pub(super) fn create_table(db: &mut Database, rest: &str) -> Result<ResultSet> {
    ensure!(db.tables.len() < MAX_TABLES, "Max tables reached");

    let rest = rest.trim_start();
    let (name, after) = take_name(rest);
    let name = truncate_bytes(name, MAX_NAME_LEN);
    ensure!(!name.is_empty(), "Expected table name");

    let after = after.trim_start();
    let Some(body) = after.strip_prefix('(') else {
        bail!("Expected '('");
    };
    ensure!(db.find_table(name).is_none(), "Table '{}' exists", name);

    let Some(close) = body.rfind(')') else {
        bail!("Missing ')'");
    };

    let mut columns: Vec<Column> = Vec::new();
    for fragment in body[..close].split(',') {
        if columns.len() >= MAX_COLUMNS {
            break;
        }
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        let primary_key = find_ci(fragment, "PRIMARY KEY").is_some();
        let not_null = find_ci(fragment, "NOT NULL").is_some();

        let mut tokens = fragment.split_whitespace();
        let col_name = truncate_bytes(tokens.next().unwrap_or(""), MAX_NAME_LEN);
        let type_token = tokens.next().unwrap_or("");
        let Some(data_type) = DataType::parse(type_token) else {
            bail!("Unknown type '{}'", type_token);
        };
        ensure!(
            !columns.iter().any(|c| c.name().eq_ignore_ascii_case(col_name)),
            "Duplicate column '{}'",
            col_name
        );

        columns.push(Column::new(col_name, data_type, !not_null, primary_key));
    }
    ensure!(!columns.is_empty(), "No columns defined");

    let ncols = columns.len();
    db.tables.push(Table::new(name, columns));

    Ok(ResultSet::command(
        format!("Table '{}' created ({} cols)", name, ncols),
        0,
    ))
}

/// `DROP TABLE <name>`. Remaining tables keep their order.
pub(super) fn drop_table(db: &mut Database, rest: &str) -> Result<ResultSet> {
    let name = rest.trim();
    let Some(idx) = db.find_table(name) else {
        bail!("Table '{}' not found", name);
    };

    db.tables.remove(idx);
    Ok(ResultSet::command(format!("Table '{}' dropped", name), 0))
}
