use crate::error::Result;
use crate::io_utils::read_byte;
use crate::traits::{Deser, Ser};
use derive_more::{Deref, From};
use num_traits::{PrimInt, Unsigned};
use std::io::{Read, Write};

/// Wrapper marking an unsigned integer for variable-length encoding:
/// little-endian base-128 groups of 7 bits, high bit as continuation.
/// Zero encodes to a single `0x00` byte; a `u64` needs at most 10 bytes.
#[derive(Deref, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VarUint<U>(pub U);

/// Unsigned primitives usable under [`VarUint`].
pub trait VarUintRepr: PrimInt + Unsigned {
    const REPR_BITS: u32;

    /// Low 7 bits as one encoded group.
    fn low7(self) -> u8;
    fn shr7(self) -> Self;
    /// Ors a 7-bit group in at `offset`; caller guarantees `offset < REPR_BITS`.
    fn accum(self, group: u8, offset: u32) -> Self;
}

macro_rules! var_uint_repr {
    ($($t:ty),*) => {$(
        impl VarUintRepr for $t {
            const REPR_BITS: u32 = <$t>::BITS;

            fn low7(self) -> u8 {
                (self & 0x7f) as u8
            }
            fn shr7(self) -> Self {
                self >> 7
            }
            fn accum(self, group: u8, offset: u32) -> Self {
                self | (((group & 0x7f) as $t) << offset)
            }
        }
    )*};
}
var_uint_repr!(u8, u16, u32, u64, u128, usize);

/// Encoded byte count of `n` under the var-uint scheme.
pub fn var_uint_len<U: VarUintRepr>(n: U) -> usize {
    let mut x = n.shr7();
    let mut len = 1;
    while x != U::zero() {
        x = x.shr7();
        len += 1;
    }
    len
}

/// Const counterpart of [`var_uint_len`] for `usize`, used by compile-time
/// size computation.
pub const fn var_uint_len_const(mut n: usize) -> usize {
    let mut len = 1;
    while n >> 7 != 0 {
        n >>= 7;
        len += 1;
    }
    len
}

impl<U: VarUintRepr> Ser for VarUint<U> {
    const FIXED_SIZE: Option<usize> = None;

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let mut n = self.0;
        loop {
            let mut byte = n.low7();
            n = n.shr7();
            if n != U::zero() {
                byte |= 0x80;
            }
            w.write_all(&[byte])?;
            if n == U::zero() {
                return Ok(());
            }
        }
    }

    fn static_size(&self) -> Option<usize> {
        Some(var_uint_len(self.0))
    }

    fn aot_size(&self) -> usize {
        var_uint_len(self.0)
    }
}

impl<U: VarUintRepr> Deser for VarUint<U> {
    fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let mut n = U::zero();
        let mut offset = 0u32;
        loop {
            let byte = read_byte(r)?;
            if offset < U::REPR_BITS {
                n = n.accum(byte, offset);
            }
            offset += 7;
            if byte & 0x80 == 0 {
                return Ok(VarUint(n));
            }
        }
    }
}
