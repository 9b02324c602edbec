//! In-memory encode and decode helpers.
//!
//! [`serialize_to_buffer`] allocates the output buffer at its exact final
//! size, computed by [`serialized_size`](crate::serialized_size) before any
//! byte is written, then fills it through a bounds-checked slice writer. A
//! size/encode disagreement is a codec bug and panics rather than producing
//! a short or padded buffer.

use crate::error::Result;
use crate::traits::{serialize, serialized_size, Deser, Ser};
use std::io::{self, Write};

/// An `io::Write` over a pre-sized byte slice. Refuses to grow.
pub struct SliceWriter<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, pos: 0 }
    }

    pub fn written(&self) -> usize {
        self.pos
    }
}

impl Write for SliceWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let rem = &mut self.dst[self.pos..];
        if buf.len() > rem.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "encoded size exceeds the precomputed size",
            ));
        }
        rem[..buf.len()].copy_from_slice(buf);
        self.pos += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Encodes `value` into a freshly allocated buffer of exactly the right size.
pub fn serialize_to_buffer<T: Ser + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let size = serialized_size(value);
    let mut buf = vec![0u8; size];
    let mut w = SliceWriter::new(&mut buf);
    serialize(&mut w, value)?;
    assert_eq!(w.written(), size, "size computation disagrees with encoder");
    Ok(buf)
}

/// Decodes one value from the front of `buf`. Trailing bytes are ignored.
pub fn parse_from_buffer<T: Deser>(mut buf: &[u8]) -> Result<T> {
    T::deser(&mut buf)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn writer_is_bounds_checked() {
        let mut dst = [0u8; 2];
        let mut w = SliceWriter::new(&mut dst);
        assert_eq!(w.write(&[1]).unwrap(), 1);
        assert!(w.write(&[2, 3]).is_err());
        assert_eq!(w.written(), 1);
    }

    #[test]
    fn buffer_is_exactly_sized() {
        let v = (1u8, vec![2u16, 3], "four".to_owned());
        let buf = serialize_to_buffer(&v).unwrap();
        assert_eq!(buf.len(), serialized_size(&v));
        let back: (u8, Vec<u16>, String) = parse_from_buffer(&buf).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn trailing_bytes_are_left_alone() {
        let buf = [0x2au8, 0xff, 0xff];
        assert_eq!(parse_from_buffer::<u8>(&buf).unwrap(), 0x2a);
    }

    #[test]
    fn empty_buffer_is_early_eof() {
        let err = parse_from_buffer::<u32>(&[]).unwrap_err();
        assert!(matches!(err, Error::EarlyEof));
    }
}
