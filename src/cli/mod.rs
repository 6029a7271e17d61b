//! # Command-Line Interface
//!
//! The interactive shell around the engine: rustyline-based line editing
//! with history, statement accumulation, and ASCII table output.

mod history;
mod repl;
mod table;

pub use repl::{print_result, Repl};
pub use table::TableFormatter;
