//! # Result Sets
//!
//! Every statement returns a [`ResultSet`]: an ok flag, a human-readable
//! message, an affected-row count, and (for queries) a tabular payload of
//! column headers plus stringified cells. Errors carry `ok = false` and no
//! payload; mutations carry only the message and count.

use crate::types::DataType;

/// One projected column in a query result: display name plus the schema
/// type it was read as.
#[derive(Debug, Clone)]
pub struct ResultColumn {
    name: String,
    data_type: DataType,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// The uniform return value of [`crate::Database::execute`].
#[derive(Debug)]
pub struct ResultSet {
    ok: bool,
    message: String,
    affected: usize,
    columns: Vec<ResultColumn>,
    rows: Vec<Vec<String>>,
}

impl ResultSet {
    /// A successful statement with no tabular payload.
    pub(crate) fn command(message: impl Into<String>, affected: usize) -> Self {
        Self {
            ok: true,
            message: message.into(),
            affected,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// A failed statement; the message is the diagnostic.
    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            affected: 0,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// An empty query result awaiting rows; finish with [`Self::finish`].
    pub(crate) fn query(columns: Vec<ResultColumn>) -> Self {
        Self {
            ok: true,
            message: String::new(),
            affected: 0,
            columns,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(cells);
    }

    pub(crate) fn finish(&mut self, message: impl Into<String>, affected: usize) {
        self.message = message.into();
        self.affected = affected;
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn affected(&self) -> usize {
        self.affected
    }

    /// True when the result carries a header + cell table.
    pub fn has_payload(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
