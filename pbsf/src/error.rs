use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("block checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    BadChecksum { stored: u32, computed: u32 },

    #[error("unknown content encoding id {0}")]
    UnknownEncoding(i16),

    #[error("file header mismatch: expected {expected:#010x}, found {actual:#010x}")]
    UnknownRealm { expected: u32, actual: u32 },

    #[error("block holds content type {actual}, caller requested {expected}")]
    TypeMismatch { expected: i16, actual: i16 },

    #[error("index is keyed by type {actual}, caller requested {expected}")]
    KeyMismatch { expected: i16, actual: i16 },

    #[error("key not present in the index")]
    KeyMissing,

    #[error(transparent)]
    Codec(#[from] pbss::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
