//! # File Header Definitions
//!
//! Fixed-layout, zerocopy-backed structs for the three framing records of a
//! `.dbm` file: the file header, one table header per table, and one column
//! record per column.
//!
//! ## Layout
//!
//! ```text
//! +---------------------+
//! | FileHeader (128 B)  |  magic, version, table count, db name, created
//! +---------------------+
//! | TableHeader (80 B)  |  per table: name, ncols, nrows, next_id
//! | ColumnRecord × ncols|  72 B each: name, type, nullable, pk
//! | row records …       |  variable length, see row_codec
//! +---------------------+
//! ```
//!
//! ## Zerocopy Safety
//!
//! All structs derive `FromBytes`/`IntoBytes`/`Immutable`/`KnownLayout`/
//! `Unaligned`, so they can be read straight out of a byte buffer without
//! alignment concerns. Multi-byte fields use `U32<LittleEndian>` wrappers;
//! the file is little-endian on every platform.
//!
//! ## Names
//!
//! Table, column, and database names are stored in fixed 64-byte,
//! NUL-padded fields; the creation timestamp gets 32 bytes.

use eyre::{ensure, Result};
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// "BGMD" once the u32 is laid down little-endian.
pub const DB_MAGIC: u32 = 0x444D_4742;

pub const CURRENT_VERSION: u32 = 1;

pub const FILE_HEADER_SIZE: usize = 128;
pub const TABLE_HEADER_SIZE: usize = 80;
pub const COLUMN_RECORD_SIZE: usize = 72;

const NAME_FIELD_LEN: usize = 64;
const CREATED_FIELD_LEN: usize = 32;

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FileHeader {
    magic: U32,
    version: U32,
    table_count: U32,
    reserved0: [u8; 4],
    name: [u8; NAME_FIELD_LEN],
    created: [u8; CREATED_FIELD_LEN],
    reserved: [u8; 16],
}

const _: () = assert!(std::mem::size_of::<FileHeader>() == FILE_HEADER_SIZE);

impl FileHeader {
    pub fn new(name: &str, created: &str, table_count: u32) -> Self {
        Self {
            magic: U32::new(DB_MAGIC),
            version: U32::new(CURRENT_VERSION),
            table_count: U32::new(table_count),
            reserved0: [0; 4],
            name: pack_name::<NAME_FIELD_LEN>(name),
            created: pack_name::<CREATED_FIELD_LEN>(created),
            reserved: [0; 16],
        }
    }

    /// Parses and validates the header. A magic mismatch is the `FORMAT`
    /// failure mode: the file is not a dbmite database and the open is
    /// rejected rather than silently re-initialized.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        ensure!(
            bytes.len() >= FILE_HEADER_SIZE,
            "FORMAT: file too small for header: {} < {}",
            bytes.len(),
            FILE_HEADER_SIZE
        );

        let header = Self::ref_from_bytes(&bytes[..FILE_HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse file header: {:?}", e))?;

        ensure!(
            header.magic.get() == DB_MAGIC,
            "FORMAT: bad magic 0x{:08X} (expected 0x{:08X})",
            header.magic.get(),
            DB_MAGIC
        );

        ensure!(
            header.version.get() == CURRENT_VERSION,
            "unsupported format version: {} (expected {})",
            header.version.get(),
            CURRENT_VERSION
        );

        Ok(header)
    }

    pub fn table_count(&self) -> u32 {
        self.table_count.get()
    }

    pub fn name(&self) -> String {
        unpack_name(&self.name)
    }

    pub fn created(&self) -> String {
        unpack_name(&self.created)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct TableHeader {
    name: [u8; NAME_FIELD_LEN],
    column_count: U32,
    row_count: U32,
    next_id: U32,
    reserved: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<TableHeader>() == TABLE_HEADER_SIZE);

impl TableHeader {
    pub fn new(name: &str, column_count: u32, row_count: u32, next_id: u32) -> Self {
        Self {
            name: pack_name::<NAME_FIELD_LEN>(name),
            column_count: U32::new(column_count),
            row_count: U32::new(row_count),
            next_id: U32::new(next_id),
            reserved: [0; 4],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        ensure!(
            bytes.len() >= TABLE_HEADER_SIZE,
            "buffer too small for table header: {} < {}",
            bytes.len(),
            TABLE_HEADER_SIZE
        );
        Self::ref_from_bytes(&bytes[..TABLE_HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse table header: {:?}", e))
    }

    pub fn name(&self) -> String {
        unpack_name(&self.name)
    }

    pub fn column_count(&self) -> u32 {
        self.column_count.get()
    }

    pub fn row_count(&self) -> u32 {
        self.row_count.get()
    }

    pub fn next_id(&self) -> u32 {
        self.next_id.get()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ColumnRecord {
    name: [u8; NAME_FIELD_LEN],
    data_type: U32,
    nullable: u8,
    primary_key: u8,
    reserved: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<ColumnRecord>() == COLUMN_RECORD_SIZE);

impl ColumnRecord {
    pub fn new(name: &str, data_type: u8, nullable: bool, primary_key: bool) -> Self {
        Self {
            name: pack_name::<NAME_FIELD_LEN>(name),
            data_type: U32::new(data_type as u32),
            nullable: nullable as u8,
            primary_key: primary_key as u8,
            reserved: [0; 2],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        ensure!(
            bytes.len() >= COLUMN_RECORD_SIZE,
            "buffer too small for column record: {} < {}",
            bytes.len(),
            COLUMN_RECORD_SIZE
        );
        Self::ref_from_bytes(&bytes[..COLUMN_RECORD_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse column record: {:?}", e))
    }

    pub fn name(&self) -> String {
        unpack_name(&self.name)
    }

    pub fn data_type(&self) -> u8 {
        self.data_type.get() as u8
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable != 0
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key != 0
    }
}

fn pack_name<const N: usize>(s: &str) -> [u8; N] {
    let mut field = [0u8; N];
    let bytes = s.as_bytes();
    let mut len = bytes.len().min(N - 1);
    while len > 0 && !s.is_char_boundary(len) {
        len -= 1;
    }
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

fn unpack_name(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
