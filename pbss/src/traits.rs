use crate::error::Result;
use std::io::{Read, Write};

/// Serialization of one value onto a byte sink.
///
/// The three size queries form a strict precedence: [`Ser::FIXED_SIZE`] when
/// the encoding can never vary, else [`Ser::static_size`] when the length is
/// cheaply computable from the value's shape, else [`Ser::aot_size`], which
/// walks the value exactly as `ser` would without writing bytes. All three
/// agree on the byte count whenever more than one is defined;
/// [`serialized_size`] applies the precedence for callers.
pub trait Ser {
    /// Serialized size known at compile time, independent of any instance.
    const FIXED_SIZE: Option<usize>;

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()>;

    /// Cheap size from the value's structure, `None` if a full walk is needed.
    fn static_size(&self) -> Option<usize> {
        Self::FIXED_SIZE
    }

    /// Exact serialized length, computed without performing a real write.
    fn aot_size(&self) -> usize;

    /// Writes a contiguous run of elements. Memory-layout primitive types
    /// override this with one bulk copy.
    fn ser_slice<W: Write + ?Sized>(slice: &[Self], w: &mut W) -> Result<()>
    where
        Self: Sized,
    {
        for v in slice {
            v.ser(w)?;
        }
        Ok(())
    }
}

/// Parsing of one value out of a byte source.
pub trait Deser: Sized {
    fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self>;

    /// Reads `count` consecutive elements. Memory-layout primitive types
    /// override this with bulk reads into pre-sized allocations.
    ///
    /// `count` comes straight off the wire, so only a bounded amount of it
    /// is reserved ahead of the elements actually arriving.
    fn deser_vec<R: Read + ?Sized>(r: &mut R, count: usize) -> Result<Vec<Self>> {
        let capped = count.min(crate::mem::MAX_PREALLOC_BYTES / std::mem::size_of::<Self>().max(1));
        let mut coll = Vec::with_capacity(capped);
        for _ in 0..count {
            coll.push(Self::deser(r)?);
        }
        Ok(coll)
    }
}

/// The size-precedence rule: fixed, else static, else ahead-of-time.
pub fn serialized_size<T: Ser + ?Sized>(value: &T) -> usize {
    if let Some(n) = T::FIXED_SIZE {
        return n;
    }
    if let Some(n) = value.static_size() {
        return n;
    }
    value.aot_size()
}

/// Serializes one value, deduced from the argument type.
pub fn serialize<T: Ser + ?Sized, W: Write + ?Sized>(w: &mut W, value: &T) -> Result<()> {
    value.ser(w)
}

/// Parses one value of an explicitly requested type.
pub fn parse<T: Deser, R: Read + ?Sized>(r: &mut R) -> Result<T> {
    T::deser(r)
}
