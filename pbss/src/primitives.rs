//! Fixed-width codec for arithmetic types: `size_of::<T>()` bytes, native
//! byte order, no padding. Single-byte types reduce to one byte on the wire.

use crate::error::Result;
use crate::io_utils::{read_byte, read_exact_or_eof};
use crate::mem;
use crate::traits::{Deser, Ser};
use std::io::{Read, Write};

macro_rules! prim_codec {
    ($($t:ty),*) => {$(
        impl Ser for $t {
            const FIXED_SIZE: Option<usize> = Some(std::mem::size_of::<$t>());

            fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
                w.write_all(&self.to_ne_bytes())?;
                Ok(())
            }

            fn aot_size(&self) -> usize {
                std::mem::size_of::<$t>()
            }

            fn ser_slice<W: Write + ?Sized>(slice: &[Self], w: &mut W) -> Result<()> {
                w.write_all(mem::bytes_of(slice))?;
                Ok(())
            }
        }

        impl Deser for $t {
            fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                read_exact_or_eof(r, &mut buf)?;
                Ok(<$t>::from_ne_bytes(buf))
            }

            fn deser_vec<R: Read + ?Sized>(r: &mut R, count: usize) -> Result<Vec<Self>> {
                mem::read_bulk(r, count)
            }
        }
    )*};
}

prim_codec!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

// bool is one byte on the wire but stays on the element-wise path: arbitrary
// bytes are not valid `bool` representations.
impl Ser for bool {
    const FIXED_SIZE: Option<usize> = Some(1);

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_all(&[*self as u8])?;
        Ok(())
    }

    fn aot_size(&self) -> usize {
        1
    }
}

impl Deser for bool {
    fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(read_byte(r)? != 0)
    }
}
