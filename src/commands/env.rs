use clap::{Args, Subcommand};

use toolbelt::core::env::{self, EnvOptions};
use toolbelt::utils::io::{self, ArgJoin};
use toolbelt::Result;

#[derive(Args)]
pub struct EnvArgs {
    #[command(subcommand)]
    command: EnvCommand,
}

#[derive(Subcommand)]
enum EnvCommand {
    /// Convert a JSON object to KEY=VALUE lines
    FromJson {
        /// Upper-case keys
        #[arg(long)]
        uppercase: bool,

        /// Prefix to add to each key
        #[arg(long, default_value = "")]
        prefix: String,

        /// Flatten nested objects
        #[arg(long)]
        flatten: bool,

        /// Separator for flattened keys
        #[arg(long, default_value = "_")]
        sep: String,

        /// JSON object (stdin when piped)
        input: Vec<String>,
    },
    /// Convert key:value lines to KEY=VALUE lines
    FromKv {
        /// Upper-case keys
        #[arg(long)]
        uppercase: bool,

        /// Prefix to add to each key
        #[arg(long, default_value = "")]
        prefix: String,

        /// Lines like 'key: value' (stdin when piped)
        input: Vec<String>,
    },
}

pub fn run(args: EnvArgs) -> Result<()> {
    match args.command {
        EnvCommand::FromJson {
            uppercase,
            prefix,
            flatten,
            sep,
            input,
        } => {
            let raw = io::read_input(&input, ArgJoin::Space)?;
            let opts = EnvOptions {
                uppercase,
                prefix,
                flatten,
                separator: sep,
            };
            for line in env::from_json(&raw, &opts)? {
                println!("{}", line);
            }
        }
        EnvCommand::FromKv {
            uppercase,
            prefix,
            input,
        } => {
            let raw = io::read_input(&input, ArgJoin::Newline)?;
            for line in env::from_kv(&raw, uppercase, &prefix)? {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
