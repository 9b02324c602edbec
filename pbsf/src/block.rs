//! Block encode/decode: serialization, compression and checksumming of one
//! typed value into one [`EncodedBlock`].
//!
//! The checksum covers the stored (possibly compressed) content and is
//! verified before any decompression is attempted.

use crate::defs::EncodedBlock;
use crate::encoding::{pack, unpack, Encoding};
use crate::error::{Error, Result};
use crate::realm::{ContentTyped, Realm};
use pbss::{parse_from_buffer, serialize_to_buffer};

/// Frames raw content bytes into a block under the given content type.
pub fn encode_block(content_type: i16, raw: &[u8], encoding: Encoding) -> EncodedBlock {
    let (content_encoding, content) = pack(raw, encoding);
    EncodedBlock {
        content_type,
        content_encoding,
        content_checksum: crc32c::crc32c(&content),
        content,
    }
}

/// Recovers a block's raw content bytes, verifying the checksum first.
pub fn decode_block(block: &EncodedBlock) -> Result<Vec<u8>> {
    let computed = crc32c::crc32c(&block.content);
    if computed != block.content_checksum {
        return Err(Error::BadChecksum { stored: block.content_checksum, computed });
    }
    unpack(block.content_encoding, &block.content)
}

/// Serializes one value into a block under its registered content type.
pub fn encode_value<R: Realm, T: ContentTyped<R>>(
    value: &T,
    encoding: Encoding,
) -> Result<EncodedBlock> {
    let raw = serialize_to_buffer(value)?;
    Ok(encode_block(T::CONTENT_TYPE, &raw, encoding))
}

/// Parses one value out of a block, refusing a content-type mismatch.
pub fn decode_value<R: Realm, T: ContentTyped<R>>(block: &EncodedBlock) -> Result<T> {
    if block.content_type != T::CONTENT_TYPE {
        return Err(Error::TypeMismatch {
            expected: T::CONTENT_TYPE,
            actual: block.content_type,
        });
    }
    let raw = decode_block(block)?;
    Ok(parse_from_buffer(&raw)?)
}
