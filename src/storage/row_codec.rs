//! # Row Codec
//!
//! Length-prefixed binary encoding for row records. A row is framed as:
//!
//! ```text
//! deleted  u8                      tombstone flag
//! per column, in schema order:
//!   tag    u8                      0 = NULL, 1 = present
//!   payload (present cells only):
//!     Int    i64, 8 B LE
//!     Float  f64 bits, 8 B LE
//!     Bool   u8
//!     Text   u16 LE byte length + bytes
//! ```
//!
//! Tombstoned rows are encoded like any other; they disappear from the
//! file only when VACUUM compacts the in-memory buffer before a save.
//!
//! Decoding reads against the table's column list, so the stream is
//! self-describing given the schema records that precede it in the file.

use eyre::{bail, Result};

use crate::schema::Row;
use crate::types::{Column, DataType, Value};

const TAG_NULL: u8 = 0;
const TAG_PRESENT: u8 = 1;

/// Appends one row record to `buf`.
pub fn encode_row(buf: &mut Vec<u8>, row: &Row) {
    buf.push(row.deleted as u8);
    for value in &row.values {
        match value {
            Value::Null => buf.push(TAG_NULL),
            Value::Int(i) => {
                buf.push(TAG_PRESENT);
                buf.extend_from_slice(&i.to_le_bytes());
            }
            Value::Float(f) => {
                buf.push(TAG_PRESENT);
                buf.extend_from_slice(&f.to_le_bytes());
            }
            Value::Bool(b) => {
                buf.push(TAG_PRESENT);
                buf.push(*b as u8);
            }
            Value::Text(s) => {
                buf.push(TAG_PRESENT);
                buf.extend_from_slice(&(s.len() as u16).to_le_bytes());
                buf.extend_from_slice(s.as_bytes());
            }
        }
    }
}

/// Reads one row record from `cursor`, consuming exactly its bytes.
///
/// Errors signal a short or corrupt tail; the loader treats that as the
/// end of the table's data.
pub fn decode_row(cursor: &mut Cursor<'_>, columns: &[Column]) -> Result<Row> {
    let deleted = cursor.read_u8()? != 0;
    let mut values = Vec::with_capacity(columns.len());

    for col in columns {
        let tag = cursor.read_u8()?;
        if tag == TAG_NULL {
            values.push(Value::Null);
            continue;
        }
        if tag != TAG_PRESENT {
            bail!("invalid cell tag: {}", tag);
        }
        let value = match col.data_type() {
            DataType::Int => Value::Int(i64::from_le_bytes(cursor.read_array()?)),
            DataType::Float => Value::Float(f64::from_le_bytes(cursor.read_array()?)),
            DataType::Bool => Value::Bool(cursor.read_u8()? != 0),
            DataType::Text => {
                let len = u16::from_le_bytes(cursor.read_array()?) as usize;
                let bytes = cursor.read_bytes(len)?;
                Value::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        };
        values.push(value);
    }

    Ok(Row { values, deleted })
}

/// Forward-only reader over a byte slice.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            bail!("short read: wanted {} bytes, {} left", len, self.remaining());
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_bytes(N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(slice);
        Ok(arr)
    }
}
