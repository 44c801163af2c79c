mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::db::Database;
use crate::output::{OutputFormat, Outputable};

pub use execute::EnsureResult;

/// Name and creation SQL shared by the ensure commands.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct EnsureArgs {
    /// Name to look up in the catalog
    #[arg(short, long)]
    pub name: String,

    /// Creation statement, run verbatim when the name is missing
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub sql: Option<String>,

    /// Read the creation statement from a file instead
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Create a table unless it already exists
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_access ensure-table -n users --sql 'CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)'
  sql_access ensure-table -n users --file schema/users.sql

Running it again once the table exists does nothing.")]
pub struct EnsureTableCmd {
    #[command(flatten)]
    pub args: EnsureArgs,
}

/// Create a database unless it already exists
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_access --url postgres://admin@localhost/postgres ensure-database -n shop --sql 'CREATE DATABASE shop'
  sql_access ensure-database -n archive --sql \"ATTACH DATABASE 'archive.sqlite' AS archive\"

On SQLite a database is a schema attached to the connection, so an attached
database only lasts for this invocation.")]
pub struct EnsureDatabaseCmd {
    #[command(flatten)]
    pub args: EnsureArgs,
}

impl CommandRunner for EnsureTableCmd {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}

impl CommandRunner for EnsureDatabaseCmd {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}
