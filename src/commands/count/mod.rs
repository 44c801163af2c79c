mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute, FilterArgs};
use crate::db::Database;
use crate::output::{OutputFormat, Outputable};

pub use execute::CountResult;

/// Count rows in a table
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_access count -t users                  # All rows
  sql_access count -t users -w role=admin    # Rows whose role is exactly 'admin'")]
pub struct CountCmd {
    #[command(flatten)]
    pub filter: FilterArgs,
}

impl CommandRunner for CountCmd {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}
