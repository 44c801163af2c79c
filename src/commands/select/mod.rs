mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute, FilterArgs};
use crate::db::Database;
use crate::output::{OutputFormat, Outputable};

pub use execute::SelectResult;

/// Read rows from a table
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_access select -t users                        # Every column of every row
  sql_access select -t users -c id,name -l 10       # Two columns, first 10 rows
  sql_access select -t users -w name=%li%           # Names containing 'li'
  sql_access select -t users -w role=admin -o json  # Filters combine with AND")]
pub struct SelectCmd {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Columns to return, comma separated (`*` for all)
    #[arg(short, long, value_delimiter = ',', default_value = "*")]
    pub columns: Vec<String>,

    /// Maximum number of rows to return (0 for no limit)
    #[arg(short, long, default_value_t = 0)]
    pub limit: u32,
}

impl CommandRunner for SelectCmd {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}
