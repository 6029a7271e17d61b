//! # Persistence
//!
//! Loading and saving the whole database as one flat file. There is no
//! journal and no delta append: every mutating statement rewrites the file
//! from scratch, synchronously, before its result is returned. The file is
//! therefore exactly as current as the last completed statement; a crash
//! in the middle of a save is not defended against.
//!
//! ## Load Protocol
//!
//! - Missing file: not an error; the caller bootstraps a fresh database.
//! - Header with wrong magic or version: the open fails (`FORMAT`).
//! - Truncated table data: the damaged tail is dropped and loading stops
//!   cleanly with everything decoded up to that point.

pub mod headers;
pub mod row_codec;

use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};
use zerocopy::IntoBytes;

use crate::schema::Table;
use crate::types::{Column, DataType};

use headers::{ColumnRecord, FileHeader, TableHeader};
use headers::{COLUMN_RECORD_SIZE, FILE_HEADER_SIZE, TABLE_HEADER_SIZE};
use row_codec::Cursor;

/// Everything read back from a database file.
#[derive(Debug)]
pub struct LoadedDatabase {
    pub name: String,
    pub created: String,
    pub tables: Vec<Table>,
}

/// Reads a database file. `Ok(None)` means the file does not exist and the
/// caller should start fresh; header validation failures are hard errors.
pub fn load(path: &Path) -> Result<Option<LoadedDatabase>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).wrap_err_with(|| format!("failed to read {}", path.display())),
    };

    let header = FileHeader::from_bytes(&bytes)
        .wrap_err_with(|| format!("cannot open {}", path.display()))?;
    let name = header.name();
    let created = header.created();
    let table_count = header.table_count() as usize;

    let mut cursor = Cursor::new(&bytes[FILE_HEADER_SIZE..]);
    let mut tables = Vec::new();

    for _ in 0..table_count {
        match load_table(&mut cursor) {
            Some(table) => tables.push(table),
            // Truncated tail: keep what we have.
            None => break,
        }
    }

    Ok(Some(LoadedDatabase {
        name,
        created,
        tables,
    }))
}

fn load_table(cursor: &mut Cursor<'_>) -> Option<Table> {
    let header_bytes = cursor.read_bytes(TABLE_HEADER_SIZE).ok()?;
    let header = TableHeader::from_bytes(header_bytes).ok()?;

    let mut columns = Vec::with_capacity(header.column_count() as usize);
    for _ in 0..header.column_count() {
        let record_bytes = cursor.read_bytes(COLUMN_RECORD_SIZE).ok()?;
        let record = ColumnRecord::from_bytes(record_bytes).ok()?;
        let data_type = DataType::try_from(record.data_type()).ok()?;
        columns.push(Column::new(
            record.name(),
            data_type,
            record.is_nullable(),
            record.is_primary_key(),
        ));
    }

    let mut rows = Vec::with_capacity(header.row_count() as usize);
    for _ in 0..header.row_count() {
        match row_codec::decode_row(cursor, &columns) {
            Ok(row) => rows.push(row),
            // A short row truncates the table; what decoded so far stays.
            Err(_) => {
                return Some(Table::from_parts(
                    header.name(),
                    columns,
                    rows,
                    header.next_id(),
                ));
            }
        }
    }

    Some(Table::from_parts(
        header.name(),
        columns,
        rows,
        header.next_id(),
    ))
}

/// Rewrites the whole database file: header, then every table in order,
/// tombstones included.
pub fn save(path: &Path, name: &str, created: &str, tables: &[Table]) -> Result<()> {
    let mut buf = Vec::with_capacity(FILE_HEADER_SIZE + tables.len() * TABLE_HEADER_SIZE);

    let header = FileHeader::new(name, created, tables.len() as u32);
    buf.extend_from_slice(header.as_bytes());

    for table in tables {
        let table_header = TableHeader::new(
            table.name(),
            table.columns().len() as u32,
            table.rows().len() as u32,
            table.next_id(),
        );
        buf.extend_from_slice(table_header.as_bytes());

        for col in table.columns() {
            let record = ColumnRecord::new(
                col.name(),
                col.data_type() as u8,
                col.is_nullable(),
                col.is_primary_key(),
            );
            buf.extend_from_slice(record.as_bytes());
        }

        for row in table.rows() {
            row_codec::encode_row(&mut buf, row);
        }
    }

    fs::write(path, &buf).wrap_err_with(|| format!("failed to write {}", path.display()))
}
