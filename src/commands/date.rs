use chrono::Local;
use clap::{Args, Subcommand};

use toolbelt::core::datetime;
use toolbelt::utils::io::{self, ArgJoin};
use toolbelt::{Error, Result};

#[derive(Args)]
pub struct DateArgs {
    #[command(subcommand)]
    command: DateCommand,
}

/// Output format flags shared by the date subcommands.
#[derive(Args)]
struct FormatFlags {
    /// Output format: rfc3339|unix|unixms|layout|<strftime pattern>
    #[arg(long, default_value = "rfc3339")]
    format: String,

    /// strftime layout used when --format=layout
    #[arg(long)]
    layout: Option<String>,

    /// Render in UTC
    #[arg(long)]
    utc: bool,
}

#[derive(Subcommand)]
enum DateCommand {
    /// Print current time
    Now {
        #[command(flatten)]
        format: FormatFlags,
    },
    /// Parse human time to Unix epoch
    ToEpoch {
        /// strftime layout to try before the common formats
        #[arg(long)]
        layout: Option<String>,

        /// Parse naive times as UTC
        #[arg(long)]
        utc: bool,

        /// Output milliseconds instead of seconds
        #[arg(long)]
        ms: bool,

        /// Times to convert (stdin when piped)
        times: Vec<String>,
    },
    /// Convert epoch to human time
    FromEpoch {
        #[command(flatten)]
        format: FormatFlags,

        /// Epoch values to convert (stdin when piped)
        values: Vec<String>,
    },
    /// Add a duration to now or a given time
    Add {
        /// Duration to add, e.g. 90m, 1h30m, 1500ms
        #[arg(long)]
        duration: String,

        /// Base time or epoch (defaults to now, parsed flexibly)
        #[arg(long)]
        from: Option<String>,

        #[command(flatten)]
        format: FormatFlags,
    },
}

pub fn run(args: DateArgs) -> Result<()> {
    match args.command {
        DateCommand::Now { format } => {
            let now = Local::now().fixed_offset();
            println!(
                "{}",
                datetime::format_time(now, &format.format, format.layout.as_deref(), format.utc)?
            );
        }
        DateCommand::ToEpoch {
            layout,
            utc,
            ms,
            times,
        } => {
            let input = io::read_input(&times, ArgJoin::Newline)?;
            for line in io::split_lines(&input) {
                let t = datetime::parse_flexible(&line, layout.as_deref(), utc)?;
                if ms {
                    println!("{}", t.timestamp_millis());
                } else {
                    println!("{}", t.timestamp());
                }
            }
        }
        DateCommand::FromEpoch { format, values } => {
            let input = io::read_input(&values, ArgJoin::Newline)?;
            for line in io::split_lines(&input) {
                let value = line.trim();
                if value.is_empty() {
                    continue;
                }
                let t = datetime::epoch_instant(value)?;
                println!(
                    "{}",
                    datetime::format_time(t, &format.format, format.layout.as_deref(), format.utc)?
                );
            }
        }
        DateCommand::Add {
            duration,
            from,
            format,
        } => {
            let delta = datetime::parse_duration(&duration)?;
            let base = match from.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                Some(s) => datetime::parse_flexible(s, None, format.utc)?,
                None => Local::now().fixed_offset(),
            };
            let t = base.checked_add_signed(delta).ok_or(Error::TimeOutOfRange)?;
            println!(
                "{}",
                datetime::format_time(t, &format.format, format.layout.as_deref(), format.utc)?
            );
        }
    }
    Ok(())
}
