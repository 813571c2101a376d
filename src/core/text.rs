//! Splitting, normalizing, and joining item lists for the text commands.

use std::collections::HashSet;

use clap::ValueEnum;

use crate::core::error::{Error, Result};

/// How raw input is split into items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SplitMode {
    /// One item per line.
    Lines,
    /// Split on runs of tabs or newlines.
    Tab,
    /// CSV records, fields flattened in record order.
    Csv,
}

/// How each item is quoted in the joined output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuoteStyle {
    /// Wrap in single quotes, doubling embedded single quotes.
    Single,
    /// Wrap in double quotes, backslash-escaping embedded double quotes.
    Double,
    /// Pass items through unmodified.
    None,
}

/// Item post-processing options for `text join`.
#[derive(Debug, Clone)]
pub struct JoinOptions {
    pub trim: bool,
    pub skip_empty: bool,
    pub unique: bool,
    pub quote: QuoteStyle,
}

pub fn split_items(raw: &str, mode: SplitMode) -> Result<Vec<String>> {
    match mode {
        SplitMode::Lines => Ok(split_line_items(raw)),
        SplitMode::Tab => Ok(split_tab_items(raw)),
        SplitMode::Csv => split_csv_items(raw),
    }
}

fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn split_line_items(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    normalize_newlines(raw)
        .split('\n')
        .map(str::to_string)
        .collect()
}

fn split_tab_items(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    // Consecutive separators collapse, so runs never produce empty items.
    normalize_newlines(raw)
        .split(|c| c == '\n' || c == '\t')
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_csv_items(raw: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());
    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        items.extend(record.iter().map(str::to_string));
    }
    Ok(items)
}

/// Trim, drop empties, dedupe (first occurrence wins), and quote, in that
/// order.
pub fn format_items(items: Vec<String>, opts: &JoinOptions) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for mut item in items {
        if opts.trim {
            item = item.trim().to_string();
        }
        if opts.skip_empty && item.is_empty() {
            continue;
        }
        if opts.unique && !seen.insert(item.clone()) {
            continue;
        }
        out.push(quote_item(&item, opts.quote));
    }
    out
}

fn quote_item(s: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Single => format!("'{}'", s.replace('\'', "''")),
        QuoteStyle::Double => format!("\"{}\"", s.replace('"', "\\\"")),
        QuoteStyle::None => s.to_string(),
    }
}

/// Decode `\n`, `\t`, `\r`, `\0`, and `\\` escapes in a separator; any other
/// escaped character keeps its backslash. A trailing lone backslash is an
/// error.
pub fn decode_separator(s: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => return Err(Error::TrailingBackslash),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Ok(out)
}
