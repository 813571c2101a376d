use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no input provided; pass arguments or pipe data")]
    NoInput,

    #[error("empty input")]
    EmptyInput,

    #[error("invalid JSON")]
    InvalidJson,

    #[error("invalid JSON or stringified JSON")]
    NotJson,

    #[error("expected a JSON object: {0}")]
    ObjectParse(#[source] serde_json::Error),

    #[error("expected a JSON object at top level")]
    NotAnObject,

    #[error("could not parse time {0:?}; provide --layout")]
    TimeParse(String),

    #[error("invalid epoch value: {0}")]
    InvalidEpoch(String),

    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    #[error("resulting time out of range")]
    TimeOutOfRange,

    #[error("unsupported layout {0:?}")]
    InvalidLayout(String),

    #[error("invalid base64 input")]
    InvalidBase64,

    #[error("invalid line: {0:?} (expected 'key: value')")]
    InvalidKvLine(String),

    #[error("trailing backslash in separator")]
    TrailingBackslash,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
