//! # dbmite CLI Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Interactive shell (creates the file on first save if absent)
//! dbmite ./inventory
//!
//! # One-shot statement, then exit
//! dbmite ./inventory "SELECT * FROM parts;"
//! ```
//!
//! A path without `.dbm` in it gets the extension appended.

use dbmite::cli::Repl;
use dbmite::Database;
use eyre::{bail, Result};
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<String> = None;
    let mut sql_words: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("dbmite {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            arg if arg.starts_with('-') && db_path.is_none() => {
                bail!("Unknown option: {}", arg);
            }
            arg => {
                if db_path.is_none() {
                    db_path = Some(arg.to_string());
                } else {
                    sql_words.push(arg.to_string());
                }
            }
        }
        i += 1;
    }

    let Some(mut path) = db_path else {
        print_usage();
        bail!("missing database path");
    };
    if !path.contains(".dbm") {
        path.push_str(".dbm");
    }

    let db = Database::open(&path)?;

    if !sql_words.is_empty() {
        let mut db = db;
        let result = db.execute(&sql_words.join(" "));
        dbmite::cli::print_result(&result);
        return db.close();
    }

    let mut repl = Repl::new(db)?;
    repl.run()
}

fn print_usage() {
    println!("dbmite - single-file embedded SQL database");
    println!();
    println!("USAGE:");
    println!("    dbmite [OPTIONS] <DATABASE_PATH> [SQL...]");
    println!();
    println!("ARGS:");
    println!("    <DATABASE_PATH>    Database file (`.dbm` appended when missing)");
    println!("    [SQL...]           Optional statement to run instead of the shell");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help         Print help information");
    println!("    -v, --version      Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    dbmite ./inventory                      Open the shell");
    println!("    dbmite ./inventory \"SHOW TABLES;\"       Run one statement");
}
