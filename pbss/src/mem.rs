//! Byte views over primitive slices for the sequence codec's bulk-copy path.
//!
//! The wire format stores multi-byte primitives in native byte order, so a
//! contiguous run of them is bit-identical to its in-memory representation
//! and can be copied wholesale. This is deliberately not byte-order-portable.

use crate::error::{Error, Result};
use crate::io_utils::read_exact_or_eof;
use std::io::Read;
use std::mem;
use std::ptr;
use std::slice;

/// Upper bound on bytes reserved ahead of input verification. A declared
/// element count is attacker-controlled until the bytes actually arrive, so
/// decoders grow their buffers in steps of at most this many bytes.
pub(crate) const MAX_PREALLOC_BYTES: usize = 1 << 16;

/// Types whose serialized form equals their in-memory bytes.
///
/// # Safety
///
/// Implementors must be non-zero-sized with no padding, no invalid bit
/// patterns, and no drop glue; every `size_of::<Self>()`-byte pattern must be
/// a valid value.
pub unsafe trait MemoryLayout: Copy {}

unsafe impl MemoryLayout for u8 {}
unsafe impl MemoryLayout for i8 {}
unsafe impl MemoryLayout for u16 {}
unsafe impl MemoryLayout for i16 {}
unsafe impl MemoryLayout for u32 {}
unsafe impl MemoryLayout for i32 {}
unsafe impl MemoryLayout for u64 {}
unsafe impl MemoryLayout for i64 {}
unsafe impl MemoryLayout for f32 {}
unsafe impl MemoryLayout for f64 {}

pub fn bytes_of<T: MemoryLayout>(values: &[T]) -> &[u8] {
    // Sound per the MemoryLayout contract: no padding, all patterns valid.
    unsafe { slice::from_raw_parts(values.as_ptr().cast::<u8>(), mem::size_of_val(values)) }
}

/// Reads `count` elements into a `Vec<T>` by bulk byte copies.
///
/// The spare capacity is zero-filled before being handed to the reader:
/// `Read::read_exact` must never see uninitialized memory. Growth happens in
/// chunks of at most [`MAX_PREALLOC_BYTES`] so a corrupt count fails with
/// [`Error::EarlyEof`] instead of exhausting memory up front.
pub fn read_bulk<T: MemoryLayout, R: Read + ?Sized>(r: &mut R, count: usize) -> Result<Vec<T>> {
    let elem = mem::size_of::<T>();
    count.checked_mul(elem).ok_or(Error::EarlyEof)?;

    let chunk_elems = (MAX_PREALLOC_BYTES / elem).max(1);
    let mut coll = Vec::<T>::new();
    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(chunk_elems);
        let byte_len = n * elem;
        coll.reserve(n);
        unsafe {
            let dst = coll.as_mut_ptr().add(coll.len()).cast::<u8>();
            ptr::write_bytes(dst, 0, byte_len);
            read_exact_or_eof(r, slice::from_raw_parts_mut(dst, byte_len))?;
            // The bytes are initialized and, per MemoryLayout, valid `T`s.
            coll.set_len(coll.len() + n);
        }
        remaining -= n;
    }
    Ok(coll)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn bulk_read_crosses_chunk_boundaries() {
        let values: Vec<u64> = (0..3 * MAX_PREALLOC_BYTES as u64 / 8).collect();
        let bytes = bytes_of(&values).to_vec();
        let got: Vec<u64> = read_bulk(&mut Cursor::new(bytes), values.len()).unwrap();
        assert_eq!(got, values);
    }

    #[test]
    fn short_input_in_a_later_chunk_is_early_eof() {
        let whole = MAX_PREALLOC_BYTES / 8 + 5;
        let bytes = vec![0u8; MAX_PREALLOC_BYTES + 8];
        let err = read_bulk::<u64, _>(&mut Cursor::new(bytes), whole).unwrap_err();
        assert!(matches!(err, Error::EarlyEof));
    }

    #[test]
    fn absurd_count_fails_without_reserving_it() {
        // count * size_of::<u64>() overflows usize
        let err = read_bulk::<u64, _>(&mut Cursor::new(vec![]), usize::MAX).unwrap_err();
        assert!(matches!(err, Error::EarlyEof));
        // count fits but the input is empty; must fail on the first chunk
        let err = read_bulk::<u64, _>(&mut Cursor::new(vec![]), 1 << 40).unwrap_err();
        assert!(matches!(err, Error::EarlyEof));
    }
}
