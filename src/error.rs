use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("invalid value '{text}': {reason}")]
    ParseValue { text: String, reason: String },
    #[error("test vector line {line}: {reason}")]
    BadVector { line: usize, reason: String },
    #[error("cycle {cycle}: port '{port}' expected {expected}, found {actual}")]
    Mismatch {
        cycle: u64,
        port: &'static str,
        expected: String,
        actual: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
