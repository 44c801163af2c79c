mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::cli::parse_assignment;
use crate::commands::{CommandRunner, Execute};
use crate::db::{Database, Value};
use crate::output::{OutputFormat, Outputable};

pub use execute::UpsertResult;

/// Update a row by id, inserting it when no row matched
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_access upsert -t users --id 1 -s id=1 -s name=Alice
  sql_access upsert -t users --id 4 -s id=4 -s \"name='007'\"    # Quote to keep text
  sql_access upsert -t orders --id 9 --id-column order_no -s order_no=9 -s total=12.5

The insert uses exactly the --set columns, so include the id column unless
the table generates it.")]
pub struct UpsertCmd {
    /// Table to write to
    #[arg(short, long)]
    pub table: String,

    /// Column assignment as column=value; repeat for each column
    #[arg(short, long = "set", value_parser = parse_assignment, required = true)]
    pub set: Vec<(String, Value)>,

    /// Id of the row to update
    #[arg(long, allow_negative_numbers = true)]
    pub id: i64,

    /// Column holding the id
    #[arg(long, default_value = "id")]
    pub id_column: String,
}

impl CommandRunner for UpsertCmd {
    fn run(self, db: &Database, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}
