//! Checksummed, optionally compressed block container files for values
//! serialized with [`pbss`].
//!
//! A file belongs to a realm (validated from the header), and holds typed
//! blocks; each block carries its content type, its encoding, and a CRC-32C
//! checksum over the stored content. On top of the sequential layer sits an
//! indexed layer giving random access by key through a trailing index block.

pub mod block;
pub mod defs;
pub mod encoding;
pub mod error;
pub mod fs_utils;
mod header;
mod indexed;
mod realm;
mod seq_file;

pub use block::{decode_block, decode_value, encode_block, encode_value};
pub use defs::{EncodedBlock, FileHeader, MAGIC};
pub use encoding::{preferred_encoding, Encoding};
pub use error::{Error, Result};
pub use header::{check_header, write_header};
pub use indexed::{
    open_indexed_input_file, open_indexed_output_file, IndexedInputFile, IndexedOutputFile,
    MARKER_FULL_SIZE,
};
pub use realm::{ContentTyped, Realm};
pub use seq_file::{
    create_sequential_output_file, open_sequential_input_file, SequentialInputFile,
    SequentialOutputFile,
};
