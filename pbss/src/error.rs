use std::io;
use thiserror::Error;

/// Decode failures. Every variant is fatal to the decode that raised it;
/// nothing in the engine retries.
#[derive(Debug, Error)]
pub enum Error {
    /// The input ended before the value's declared encoding did.
    #[error("unexpected end of input")]
    EarlyEof,

    /// A decoded integer does not name a known enum member.
    #[error("unknown enum discriminant {0}")]
    BadEnumValue(i64),

    /// A decoded byte sequence is not valid UTF-8.
    #[error("string content is not valid UTF-8")]
    BadUtf8(#[from] std::string::FromUtf8Error),

    /// A decoded element count does not match the target's required length.
    #[error("sequence length {actual} where exactly {expected} is required")]
    BadLength { expected: usize, actual: usize },

    #[error(transparent)]
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::EarlyEof,
            _ => Error::Io(e),
        }
    }
}
