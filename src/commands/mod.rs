//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` running it against a [`Database`] into a result type
//! - `output.rs` rendering that result as a table (JSON and toon come from serde)

mod count;
mod delete;
mod ensure;
mod max_id;
mod select;
mod upsert;

pub use count::CountCmd;
pub use delete::DeleteCmd;
pub use ensure::{EnsureDatabaseCmd, EnsureTableCmd};
pub use max_id::MaxIdCmd;
pub use select::SelectCmd;
pub use upsert::UpsertCmd;

use clap::{Args, Subcommand};
use enum_dispatch::enum_dispatch;
use std::error::Error;

use crate::cli::{parse_assignment, unzip_pairs};
use crate::db::{Database, Predicate, Value};
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, db: &Database) -> Result<Self::Output, Box<dyn Error>>;
}

/// Run a parsed command and format its result.
#[enum_dispatch]
pub trait CommandRunner {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

#[enum_dispatch(CommandRunner)]
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read rows from a table, optionally filtered with LIKE patterns
    Select(SelectCmd),

    /// Count rows, optionally only those matching every filter
    Count(CountCmd),

    /// Largest value of an id column, 0 for no rows
    MaxId(MaxIdCmd),

    /// Update the row with the given id, or insert it if none matched
    Upsert(UpsertCmd),

    /// Delete rows matching every filter (at least one is required)
    Delete(DeleteCmd),

    /// Create a table by running the given SQL, unless it already exists
    EnsureTable(EnsureTableCmd),

    /// Create a database by running the given SQL, unless it already exists
    EnsureDatabase(EnsureDatabaseCmd),
}

/// Table and `column=value` filters shared by the read commands.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct FilterArgs {
    /// Table to operate on (optionally schema-qualified)
    #[arg(short, long)]
    pub table: String,

    /// Filter as column=value; repeat to combine with AND
    #[arg(short = 'w', long = "where", value_parser = parse_assignment)]
    pub filters: Vec<(String, Value)>,
}

impl FilterArgs {
    /// The filters as a predicate, or `None` when no filter was given.
    pub fn predicate(&self) -> Option<Predicate> {
        if self.filters.is_empty() {
            return None;
        }
        let (columns, values) = unzip_pairs(self.filters.clone());
        Some(Predicate::from_parts(columns, values))
    }

    /// Filters rendered back as `column=value` for display.
    pub fn describe(&self) -> Vec<String> {
        self.filters
            .iter()
            .map(|(column, value)| format!("{}={}", column, value))
            .collect()
    }
}
