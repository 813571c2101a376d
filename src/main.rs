use clap::{Parser, Subcommand};

mod commands;

use commands::{base64, completion, date, env, hash, json, text, uuid};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "tb")]
#[command(version = VERSION)]
#[command(about = "Day-to-day developer toolbox: JSON, dates, base64, UUIDs, env conversions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// JSON utilities
    Json(json::JsonArgs),
    /// Date and time helpers
    Date(date::DateArgs),
    /// Base64 encode/decode
    Base64(base64::Base64Args),
    /// UUID utilities
    Uuid(uuid::UuidArgs),
    /// Environment helpers
    Env(env::EnvArgs),
    /// Text utilities
    Text(text::TextArgs),
    /// Digests with common hashing algorithms
    Hash(hash::HashArgs),
    /// Generate shell completion scripts
    Completion(completion::CompletionArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Json(args) => json::run(args),
        Commands::Date(args) => date::run(args),
        Commands::Base64(args) => base64::run(args),
        Commands::Uuid(args) => uuid::run(args),
        Commands::Env(args) => env::run(args),
        Commands::Text(args) => text::run(args),
        Commands::Hash(args) => hash::run(args),
        Commands::Completion(args) => completion::run(args),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            std::process::ExitCode::FAILURE
        }
    }
}
