//! Content encodings and the compression seam.
//!
//! Wire ids are frozen: 1 identity, 2 LZO, 3 LZ4. LZ4 payloads carry a
//! leading decompressed-size field. Id 2 stays reserved for old files; no
//! maintained pure-Rust LZO exists, so decoding it reports
//! [`Error::UnknownEncoding`].

use crate::error::{Error, Result};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::env;
use std::io;
use std::sync::OnceLock;

#[repr(i16)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
pub enum Encoding {
    Identity = 1,
    Lzo = 2,
    Lz4 = 3,
}

/// The encoding used for newly written blocks, resolved once per process
/// from `PBSF_PREFERRED_ENCODING` (`identity` or `lz4`; default `lz4`).
pub fn preferred_encoding() -> Encoding {
    static PREFERRED: OnceLock<Encoding> = OnceLock::new();
    *PREFERRED.get_or_init(|| match env::var("PBSF_PREFERRED_ENCODING").ok().as_deref() {
        Some("identity") => Encoding::Identity,
        _ => Encoding::Lz4,
    })
}

/// Packs `raw` under the requested encoding, falling back to identity when
/// the packed form would not be smaller. Returns the wire id actually used
/// and the stored bytes.
pub fn pack(raw: &[u8], encoding: Encoding) -> (i16, Vec<u8>) {
    match encoding {
        Encoding::Lz4 => {
            let packed = lz4_flex::compress_prepend_size(raw);
            if packed.len() < raw.len() {
                (Encoding::Lz4 as i16, packed)
            } else {
                (Encoding::Identity as i16, raw.to_vec())
            }
        }
        _ => (Encoding::Identity as i16, raw.to_vec()),
    }
}

/// Recovers the raw bytes stored under the given wire id.
pub fn unpack(encoding_id: i16, stored: &[u8]) -> Result<Vec<u8>> {
    match Encoding::from_i16(encoding_id) {
        Some(Encoding::Identity) => Ok(stored.to_vec()),
        Some(Encoding::Lz4) => lz4_flex::decompress_size_prepended(stored)
            .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e))),
        Some(Encoding::Lzo) | None => Err(Error::UnknownEncoding(encoding_id)),
    }
}
