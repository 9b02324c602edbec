//! Tagged struct codec, the self-describing composite format.
//!
//! Wire layout per struct instance:
//!
//! ```text
//! struct {
//!     field*:     {
//!         tag:        u8,        // 1..=255, struct-local
//!         len:        var_uint,  // payload byte count
//!         payload:    [u8; len],
//!     },
//!     terminator: u8 = 0,
//! }
//! ```
//!
//! The length is always on the wire, fixed-size fields included; a decoder
//! that knows a field's type skips the (redundant) length without decoding
//! it, and a decoder that does not recognize a tag reads the length and
//! skips the payload. That skippability is what buys forward compatibility:
//! old readers ignore new fields, and fields absent from the stream keep
//! their default value. Fields may arrive in any order; a repeated tag
//! overwrites the earlier value.

use crate::error::Result;
use crate::io_utils::{skip_exact, skip_var_uint};
use crate::traits::{serialized_size, Deser, Ser};
use crate::var_uint::{var_uint_len, var_uint_len_const, VarUint};
use std::io::{Read, Write};

/// Emits one field's tag and payload length.
pub fn write_field_header<T: Ser + ?Sized, W: Write + ?Sized>(
    w: &mut W,
    tag: u8,
    value: &T,
) -> Result<()> {
    w.write_all(&[tag])?;
    VarUint(serialized_size(value)).ser(w)
}

/// Skips the length prefix of a recognized field. When the field type has a
/// fixed size the prefix's width is known and the bytes are discarded
/// blindly; otherwise the var-uint is scanned to its terminating byte.
pub fn skip_length_of<T: Ser + ?Sized, R: Read + ?Sized>(r: &mut R) -> Result<()> {
    match T::FIXED_SIZE {
        Some(n) => skip_exact(r, var_uint_len_const(n)),
        None => skip_var_uint(r),
    }
}

/// Consumes an unrecognized field: reads its length, discards its payload.
pub fn skip_unknown_field<R: Read + ?Sized>(r: &mut R) -> Result<()> {
    let len = VarUint::<usize>::deser(r)?.0;
    skip_exact(r, len)
}

/// On-wire cost of one field: tag, length prefix, payload.
pub fn field_envelope_size<T: Ser + ?Sized>(value: &T) -> usize {
    let payload = serialized_size(value);
    1 + var_uint_len(payload) + payload
}

/// Compile-time check that a struct's tags are nonzero and distinct.
pub const fn check_tags(tags: &[u8]) {
    let mut i = 0;
    while i < tags.len() {
        assert!(tags[i] != 0, "tag 0 is reserved as the struct terminator");
        let mut j = i + 1;
        while j < tags.len() {
            assert!(tags[i] != tags[j], "duplicate field tag");
            j += 1;
        }
        i += 1;
    }
}

/// Declares a struct and implements the tagged codec for it.
///
/// The struct must implement `Default`; fields missing from a stream keep
/// their default value.
///
/// ```
/// pbss::tagged_struct! {
///     #[derive(Clone, Default, PartialEq, Debug)]
///     pub struct Particle {
///         1 => pub charge: i32,
///         2 => pub track: Vec<f64>,
///     }
/// }
///
/// let p = Particle { charge: -1, track: vec![0.5] };
/// let buf = pbss::serialize_to_buffer(&p).unwrap();
/// assert_eq!(pbss::parse_from_buffer::<Particle>(&buf).unwrap(), p);
/// ```
#[macro_export]
macro_rules! tagged_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            $($tag:literal => $fvis:vis $field:ident : $fty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $Name {
            $($fvis $field: $fty,)+
        }

        const _: () = $crate::tagged::check_tags(&[$($tag),+]);

        impl $crate::Ser for $Name {
            const FIXED_SIZE: Option<usize> =
                $crate::size::tagged_fixed(&[$(<$fty as $crate::Ser>::FIXED_SIZE),+]);

            fn ser<W: std::io::Write + ?Sized>(&self, w: &mut W) -> $crate::Result<()> {
                $(
                    $crate::tagged::write_field_header(w, $tag, &self.$field)?;
                    $crate::Ser::ser(&self.$field, w)?;
                )+
                w.write_all(&[0u8])?;
                Ok(())
            }

            fn aot_size(&self) -> usize {
                let mut total = 1; // terminator
                $(total += $crate::tagged::field_envelope_size(&self.$field);)+
                total
            }
        }

        impl $crate::Deser for $Name {
            fn deser<R: std::io::Read + ?Sized>(r: &mut R) -> $crate::Result<Self> {
                let mut obj = <Self as Default>::default();
                loop {
                    match $crate::io_utils::read_byte(r)? {
                        0 => break,
                        $(
                            $tag => {
                                $crate::tagged::skip_length_of::<$fty, _>(r)?;
                                obj.$field = <$fty as $crate::Deser>::deser(r)?;
                            }
                        )+
                        _ => $crate::tagged::skip_unknown_field(r)?,
                    }
                }
                Ok(obj)
            }
        }
    };
}
