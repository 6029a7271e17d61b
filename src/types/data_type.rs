//! # Column Data Types
//!
//! The canonical `DataType` enum used across schema definitions, literal
//! parsing, predicate evaluation, and the on-disk column records.
//!
//! Uses `#[repr(u8)]` so the discriminant doubles as the storage encoding
//! in column records; `TryFrom<u8>` is the decode path.

/// The type of a column and of every non-null value stored under it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int = 1,
    Float = 2,
    Text = 3,
    Bool = 4,
}

impl DataType {
    /// Canonical display name, as shown by DESCRIBE.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int => "INT",
            DataType::Float => "FLOAT",
            DataType::Text => "TEXT",
            DataType::Bool => "BOOL",
        }
    }

    /// Resolves a SQL type token to a data type, accepting the usual
    /// aliases (INTEGER, DOUBLE, REAL, VARCHAR, STRING, BOOLEAN).
    pub fn parse(token: &str) -> Option<DataType> {
        if token.eq_ignore_ascii_case("INT") || token.eq_ignore_ascii_case("INTEGER") {
            Some(DataType::Int)
        } else if token.eq_ignore_ascii_case("FLOAT")
            || token.eq_ignore_ascii_case("DOUBLE")
            || token.eq_ignore_ascii_case("REAL")
        {
            Some(DataType::Float)
        } else if token.eq_ignore_ascii_case("TEXT")
            || token.eq_ignore_ascii_case("VARCHAR")
            || token.eq_ignore_ascii_case("STRING")
        {
            Some(DataType::Text)
        } else if token.eq_ignore_ascii_case("BOOL") || token.eq_ignore_ascii_case("BOOLEAN") {
            Some(DataType::Bool)
        } else {
            None
        }
    }
}

impl TryFrom<u8> for DataType {
    type Error = eyre::Report;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DataType::Int),
            2 => Ok(DataType::Float),
            3 => Ok(DataType::Text),
            4 => Ok(DataType::Bool),
            _ => eyre::bail!("invalid DataType discriminant: {}", value),
        }
    }
}
