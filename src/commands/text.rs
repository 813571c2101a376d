use clap::{ArgAction, Args, Subcommand};

use toolbelt::core::text::{self, JoinOptions, QuoteStyle, SplitMode};
use toolbelt::utils::io::{self, ArgJoin};
use toolbelt::{Error, Result};

#[derive(Args)]
pub struct TextArgs {
    #[command(subcommand)]
    command: TextCommand,
}

#[derive(Subcommand)]
enum TextCommand {
    /// Join rows or columns into a single separator-delimited line
    Join {
        /// Separator between items (supports \n, \t, \r, \0 escapes)
        #[arg(long, default_value = ",")]
        sep: String,

        /// Quote style for items
        #[arg(long, value_enum, default_value = "single")]
        quote: QuoteStyle,

        /// Input splitter
        #[arg(long, value_enum, default_value = "lines")]
        split: SplitMode,

        /// Trim whitespace around each item
        #[arg(
            long,
            action = ArgAction::Set,
            num_args = 0..=1,
            require_equals = true,
            default_value_t = true,
            default_missing_value = "true"
        )]
        trim: bool,

        /// Drop empty items after trimming
        #[arg(
            long,
            action = ArgAction::Set,
            num_args = 0..=1,
            require_equals = true,
            default_value_t = true,
            default_missing_value = "true"
        )]
        skip_empty: bool,

        /// Deduplicate items (first occurrence wins)
        #[arg(long)]
        unique: bool,

        /// Items to join (stdin when piped)
        items: Vec<String>,
    },
}

pub fn run(args: TextArgs) -> Result<()> {
    match args.command {
        TextCommand::Join {
            sep,
            quote,
            split,
            trim,
            skip_empty,
            unique,
            items,
        } => {
            let raw = io::read_input(&items, ArgJoin::Newline)?;
            let split_items = text::split_items(&raw, split)?;
            if split_items.is_empty() {
                return Err(Error::NoInput);
            }
            let separator = text::decode_separator(&sep)?;
            let opts = JoinOptions {
                trim,
                skip_empty,
                unique,
                quote,
            };
            let formatted = text::format_items(split_items, &opts);
            println!("{}", formatted.join(&separator));
        }
    }
    Ok(())
}
