mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::cli::parse_assignment;
use crate::commands::{CommandRunner, Execute};
use crate::db::{Database, Value};
use crate::output::{OutputFormat, Outputable};

pub use execute::DeleteResult;

/// Delete rows matching every filter
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_access delete -t users -w id=3
  sql_access delete -t sessions -w user_id=3 -w expired=true

At least one filter is required; there is no way to delete every row.")]
pub struct DeleteCmd {
    /// Table to delete from
    #[arg(short, long)]
    pub table: String,

    /// Filter as column=value; repeat to combine with AND
    #[arg(short = 'w', long = "where", value_parser = parse_assignment, required = true)]
    pub filters: Vec<(String, Value)>,
}

impl CommandRunner for DeleteCmd {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}
