use clap::Parser;

use sql_access::cli::Args;
use sql_access::commands::CommandRunner;
use sql_access::config::resolve_target;
use sql_access::db::Database;
use sql_access::logging::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let target = resolve_target(args.url.as_deref(), args.debug)?;
    init_tracing(target.debug())?;
    let db = Database::new(target);

    let output = args.command.run(&db, args.format)?;
    println!("{}", output);
    Ok(())
}
