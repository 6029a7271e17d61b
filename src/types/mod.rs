//! # Type System
//!
//! The value and column types shared by the schema, the statement handlers,
//! and the on-disk codec.
//!
//! - [`DataType`]: the four column types (`INT`, `FLOAT`, `TEXT`, `BOOL`)
//! - [`Value`]: a tagged datum, either `Null` or a typed payload
//! - [`Column`]: column metadata (name, type, nullable, primary-key flag)

mod column;
mod data_type;
mod value;

pub use column::Column;
pub use data_type::DataType;
pub use value::Value;

/// Longest table or column name, in bytes of content.
pub const MAX_NAME_LEN: usize = 63;

/// Longest TEXT cell payload, in bytes.
pub const MAX_TEXT_LEN: usize = 255;
