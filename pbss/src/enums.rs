//! Enum codec: an enum travels as its underlying integral type.
//!
//! The target enum derives `num_derive::FromPrimitive` and carries an
//! explicit `#[repr]`; decode of an integer that names no member
//! fails with [`crate::Error::BadEnumValue`].

/// Implements [`Ser`](crate::Ser) and [`Deser`](crate::Deser) for a C-like
/// enum, delegating to the given underlying integral type.
///
/// ```
/// use num_derive::FromPrimitive;
///
/// #[repr(u16)]
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
/// enum Color {
///     Red = 1,
///     Green = 7,
/// }
/// pbss::enum_codec!(Color as u16);
///
/// let buf = pbss::serialize_to_buffer(&Color::Green).unwrap();
/// assert_eq!(pbss::parse_from_buffer::<Color>(&buf).unwrap(), Color::Green);
/// ```
#[macro_export]
macro_rules! enum_codec {
    ($Enum:ty as $repr:ty) => {
        impl $crate::Ser for $Enum {
            const FIXED_SIZE: Option<usize> = Some(std::mem::size_of::<$repr>());

            fn ser<W: std::io::Write + ?Sized>(&self, w: &mut W) -> $crate::Result<()> {
                $crate::Ser::ser(&(*self as $repr), w)
            }

            fn aot_size(&self) -> usize {
                std::mem::size_of::<$repr>()
            }
        }

        impl $crate::Deser for $Enum {
            fn deser<R: std::io::Read + ?Sized>(r: &mut R) -> $crate::Result<Self> {
                let raw = <$repr as $crate::Deser>::deser(r)?;
                <Self as $crate::_num_traits::FromPrimitive>::from_i64(raw as i64)
                    .ok_or($crate::Error::BadEnumValue(raw as i64))
            }
        }
    };
}
