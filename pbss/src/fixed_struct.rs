//! Positional struct codec: named structs serialized exactly like tuples,
//! members in declaration order, no tags. Use [`crate::tagged_struct!`]
//! instead when the layout must survive schema change.

/// Declares a struct and implements the positional codec for it.
///
/// ```
/// pbss::tuple_struct! {
///     #[derive(Clone, Copy, PartialEq, Eq, Debug)]
///     pub struct Header {
///         pub magic: u32,
///         pub realm: u32,
///     }
/// }
///
/// let buf = pbss::serialize_to_buffer(&Header { magic: 1, realm: 2 }).unwrap();
/// assert_eq!(buf.len(), 8);
/// ```
#[macro_export]
macro_rules! tuple_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            $($fvis:vis $field:ident : $fty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $Name {
            $($fvis $field: $fty,)+
        }

        impl $crate::Ser for $Name {
            const FIXED_SIZE: Option<usize> =
                $crate::size::sum_fixed(&[$(<$fty as $crate::Ser>::FIXED_SIZE),+]);

            fn ser<W: std::io::Write + ?Sized>(&self, w: &mut W) -> $crate::Result<()> {
                $($crate::Ser::ser(&self.$field, w)?;)+
                Ok(())
            }

            fn static_size(&self) -> Option<usize> {
                let mut total = 0;
                $(total += $crate::Ser::static_size(&self.$field)?;)+
                Some(total)
            }

            fn aot_size(&self) -> usize {
                let mut total = 0;
                $(total += $crate::serialized_size(&self.$field);)+
                total
            }
        }

        impl $crate::Deser for $Name {
            fn deser<R: std::io::Read + ?Sized>(r: &mut R) -> $crate::Result<Self> {
                $(let $field = <$fty as $crate::Deser>::deser(r)?;)+
                Ok(Self { $($field,)+ })
            }
        }
    };
}
