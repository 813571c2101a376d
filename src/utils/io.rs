//! Standard input / argument acquisition shared by all commands.
//!
//! Piped stdin always wins; otherwise positional arguments are joined
//! according to the consuming command's convention.

use std::io::{IsTerminal, Read, Write};

use crate::core::error::{Error, Result};

/// How positional arguments are joined when stdin is not piped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgJoin {
    /// Single space between arguments (byte-oriented commands).
    Space,
    /// Newline between arguments (line-oriented commands).
    Newline,
}

pub fn is_stdin_piped() -> bool {
    !std::io::stdin().is_terminal()
}

/// Read raw input bytes: piped stdin if present, otherwise joined arguments.
pub fn read_input_bytes(args: &[String], join: ArgJoin) -> Result<Vec<u8>> {
    if is_stdin_piped() {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    join_args(args, join).map(String::into_bytes)
}

/// Read raw input as text: piped stdin if present, otherwise joined arguments.
pub fn read_input(args: &[String], join: ArgJoin) -> Result<String> {
    read_input_bytes(args, join).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

fn join_args(args: &[String], join: ArgJoin) -> Result<String> {
    match join {
        ArgJoin::Space => {
            if args.is_empty() {
                return Err(Error::NoInput);
            }
            Ok(args.join(" "))
        }
        ArgJoin::Newline => {
            let joined = args.join("\n");
            if joined.trim().is_empty() {
                return Err(Error::NoInput);
            }
            Ok(joined)
        }
    }
}

/// Split input into lines: trims the whole input, strips carriage returns,
/// splits on newlines. Empty input yields no lines.
pub fn split_lines(input: &str) -> Vec<String> {
    let cleaned = input.trim().replace('\r', "");
    if cleaned.is_empty() {
        return Vec::new();
    }
    cleaned.split('\n').map(str::to_string).collect()
}

/// Write raw bytes to stdout followed by a newline.
pub fn print_bytes_line(bytes: &[u8]) -> Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(bytes)?;
    out.write_all(b"\n")?;
    Ok(())
}
