mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute, FilterArgs};
use crate::db::Database;
use crate::output::{OutputFormat, Outputable};

pub use execute::MaxIdResult;

/// Show the largest value of an id column
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_access max-id -t users                      # MAX(id), 0 for an empty table
  sql_access max-id -t orders -c order_no         # Another integer column
  sql_access max-id -t orders -w customer_id=7    # Largest id among one customer's orders")]
pub struct MaxIdCmd {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Integer column to take the maximum of
    #[arg(short, long, default_value = "id")]
    pub column: String,
}

impl CommandRunner for MaxIdCmd {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}
