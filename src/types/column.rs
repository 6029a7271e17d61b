//! # Column Metadata
//!
//! A column pairs a name with its [`DataType`] and two schema flags:
//! `nullable` (default true, cleared by `NOT NULL`) and `primary_key`
//! (recorded by `PRIMARY KEY` but not enforced by the engine).

use super::DataType;

/// Column definition inside a table's schema.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    data_type: DataType,
    nullable: bool,
    primary_key: bool,
}

impl Column {
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        nullable: bool,
        primary_key: bool,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
            primary_key,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}
