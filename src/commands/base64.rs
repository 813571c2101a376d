use base64::engine::general_purpose::{
    GeneralPurpose, STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD,
};
use base64::Engine as _;
use clap::{Args, Subcommand};

use toolbelt::utils::io::{self, ArgJoin};
use toolbelt::{Error, Result};

#[derive(Args)]
pub struct Base64Args {
    #[command(subcommand)]
    command: Base64Command,
}

#[derive(Subcommand)]
enum Base64Command {
    /// Base64-encode input
    Encode {
        /// Use URL-safe encoding
        #[arg(long)]
        url: bool,

        /// Omit '=' padding
        #[arg(long)]
        no_pad: bool,

        /// Data to encode (stdin when piped)
        input: Vec<String>,
    },
    /// Base64-decode input
    Decode {
        /// Expect URL-safe encoding variants
        #[arg(long)]
        url: bool,

        /// Data to decode (stdin when piped)
        input: Vec<String>,
    },
}

pub fn run(args: Base64Args) -> Result<()> {
    match args.command {
        Base64Command::Encode { url, no_pad, input } => {
            let data = io::read_input_bytes(&input, ArgJoin::Space)?;
            let engine: &GeneralPurpose = match (url, no_pad) {
                (true, true) => &URL_SAFE_NO_PAD,
                (true, false) => &URL_SAFE,
                (false, true) => &STANDARD_NO_PAD,
                (false, false) => &STANDARD,
            };
            println!("{}", engine.encode(&data));
        }
        Base64Command::Decode { url, input } => {
            let raw = io::read_input(&input, ArgJoin::Space)?;
            let trimmed = raw.trim();
            // Raw variant first, padded second, mirroring common producers.
            let attempts: [&GeneralPurpose; 2] = if url {
                [&URL_SAFE_NO_PAD, &URL_SAFE]
            } else {
                [&STANDARD_NO_PAD, &STANDARD]
            };
            let decoded = attempts
                .iter()
                .find_map(|engine| engine.decode(trimmed).ok())
                .ok_or(Error::InvalidBase64)?;
            io::print_bytes_line(&decoded)?;
        }
    }
    Ok(())
}
