//! Wire definitions shared by every pbsf file.
//!
//! A file is a fixed header followed by back-to-back encoded blocks:
//!
//! ```text
//! file {
//!     header:     { magic: u32 = "pbs3", realm: u32 },
//!     block*:     {
//!         content_type:       i16,        // positive: realm-defined;
//!                                         // negative: reserved meta types
//!         content_encoding:   i16,        // see crate::encoding
//!         content_checksum:   u32,        // CRC-32C over `content`
//!         content:            Vec<u8>,    // var-uint count, then bytes
//!     },
//! }
//! ```

/// `"pbs3"` read as a little-endian u32.
pub const MAGIC: u32 = u32::from_le_bytes(*b"pbs3");

pbss::tuple_struct! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct FileHeader {
        pub magic: u32,
        pub realm: u32,
    }
}

pbss::tuple_struct! {
    #[derive(Clone, PartialEq, Eq, Debug)]
    pub struct EncodedBlock {
        pub content_type: i16,
        pub content_encoding: i16,
        pub content_checksum: u32,
        pub content: Vec<u8>,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pbss::{serialize_to_buffer, serialized_size, Ser};

    #[test]
    fn magic_is_ascii_pbs3() {
        assert_eq!(MAGIC.to_le_bytes(), *b"pbs3");
    }

    #[test]
    fn header_is_eight_bytes() {
        assert_eq!(<FileHeader as Ser>::FIXED_SIZE, Some(8));
        let buf = serialize_to_buffer(&FileHeader { magic: MAGIC, realm: 7 }).unwrap();
        assert_eq!(&buf[..4], b"pbs3");
    }

    #[test]
    fn block_framing_overhead() {
        let block = EncodedBlock {
            content_type: 1,
            content_encoding: 1,
            content_checksum: 0,
            content: vec![0xab; 5],
        };
        // i16 + i16 + u32 + count var-uint + content
        assert_eq!(serialized_size(&block), 2 + 2 + 4 + 1 + 5);
    }
}
