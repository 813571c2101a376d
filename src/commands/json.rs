use clap::{Args, Subcommand};

use toolbelt::core::json;
use toolbelt::utils::io::{self, ArgJoin};
use toolbelt::Result;

#[derive(Args)]
pub struct JsonArgs {
    #[command(subcommand)]
    command: JsonCommand,
}

#[derive(Subcommand)]
enum JsonCommand {
    /// Pretty-print JSON (handles stringified JSON)
    Pretty {
        /// Number of spaces to indent
        #[arg(long, default_value_t = 2)]
        indent: i64,

        /// Raw JSON (stdin when piped)
        input: Vec<String>,
    },
    /// Convert JSON to a single JSON string (escaped)
    Stringify {
        /// Minify before stringifying
        #[arg(long)]
        compact: bool,

        /// Omit surrounding quotes
        #[arg(long)]
        no_quotes: bool,

        /// Raw JSON (stdin when piped)
        input: Vec<String>,
    },
}

pub fn run(args: JsonArgs) -> Result<()> {
    match args.command {
        JsonCommand::Pretty { indent, input } => {
            let raw = io::read_input(&input, ArgJoin::Space)?;
            println!("{}", json::pretty(&raw, indent)?);
        }
        JsonCommand::Stringify {
            compact,
            no_quotes,
            input,
        } => {
            let raw = io::read_input(&input, ArgJoin::Space)?;
            println!("{}", json::stringify(&raw, compact, no_quotes)?);
        }
    }
    Ok(())
}
