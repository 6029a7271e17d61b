//! # REPL - Read-Eval-Print Loop
//!
//! The interactive shell. Lines accumulate in a buffer until a statement is
//! complete, then the buffer goes to `Database::execute` and the result is
//! printed.
//!
//! ## When a Buffer Executes
//!
//! - The line contains a `;`, or
//! - the accumulated buffer starts with a one-line command: `SHOW`,
//!   `VACUUM`, or `DESC`/`DESCRIBE` (no semicolon required).
//!
//! The prompt is `db> ` for a fresh statement and `... ` while continuing.
//! `quit` or `exit` (alone on a line, any case) leaves the shell.
//!
//! ## Output
//!
//! Query results render as an ASCII box table followed by the status
//! message. Payload-free successes print `OK: <message>`; failures print
//! `ERROR: <message>` to stderr and the loop continues.

use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::history::history_path;
use crate::cli::table::TableFormatter;
use crate::database::ResultSet;
use crate::Database;

const PRIMARY_PROMPT: &str = "db> ";
const CONTINUATION_PROMPT: &str = "... ";

/// Keywords that execute without a terminating semicolon.
const ONE_LINE_COMMANDS: [&str; 4] = ["SHOW", "VACUUM", "DESC", "DESCRIBE"];

pub struct Repl {
    db: Database,
    editor: DefaultEditor,
    buffer: String,
}

impl Repl {
    pub fn new(db: Database) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            db,
            editor,
            buffer: String::new(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = if self.buffer.is_empty() {
                PRIMARY_PROMPT
            } else {
                CONTINUATION_PROMPT
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    self.buffer.clear();
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }

        self.save_history();
        println!("Goodbye.");
        Ok(())
    }

    /// Returns false when the shell should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            return false;
        }
        if trimmed.is_empty() {
            return true;
        }

        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(trimmed);

        if trimmed.contains(';') || self.is_one_line_command() {
            let sql = std::mem::take(&mut self.buffer);
            self.editor.add_history_entry(&sql).ok();
            let result = self.db.execute(&sql);
            print_result(&result);
        }

        true
    }

    fn is_one_line_command(&self) -> bool {
        ONE_LINE_COMMANDS
            .iter()
            .any(|kw| crate::sql::util::starts_with_ci(&self.buffer, kw))
    }

    fn print_welcome(&self) {
        println!(
            "dbmite v{}  db={}  tables={}",
            env!("CARGO_PKG_VERSION"),
            self.db.name(),
            self.db.tables().len()
        );
        println!("Type SQL (end with ;) or 'quit'.");
        println!();
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            if let Err(e) = self.editor.save_history(&history_file) {
                eprintln!("Warning: could not save history: {}", e);
            }
        }
    }
}

/// Prints one result: box table for payloads, `OK:`/`ERROR:` otherwise.
pub fn print_result(result: &ResultSet) {
    if !result.is_ok() {
        eprintln!("ERROR: {}", result.message());
        return;
    }
    if !result.has_payload() {
        println!("OK: {}", result.message());
        return;
    }

    let formatter = TableFormatter::new(result);
    print!("{}", formatter.render());
    println!("{}", result.message());
}
