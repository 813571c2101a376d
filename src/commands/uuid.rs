use clap::{Args, Subcommand};
use uuid::Uuid;

use toolbelt::log_status;
use toolbelt::Result;

#[derive(Args)]
pub struct UuidArgs {
    #[command(subcommand)]
    command: UuidCommand,
}

#[derive(Subcommand)]
enum UuidCommand {
    /// Generate UUIDv4
    New {
        /// Number of UUIDs to generate
        #[arg(short = 'n', long = "count", default_value_t = 1)]
        count: i64,
    },
}

pub fn run(args: UuidArgs) -> Result<()> {
    match args.command {
        UuidCommand::New { count } => {
            let count = if count < 1 {
                log_status!("uuid", "count {} raised to 1", count);
                1
            } else {
                count
            };
            for _ in 0..count {
                println!("{}", Uuid::new_v4());
            }
        }
    }
    Ok(())
}
