//! Realm and content-type registration.
//!
//! A realm names a family of files; its id travels in the file header and a
//! reader refuses files from another realm. Within a realm, each storable
//! type owns a positive content-type id. Negative ids are reserved for the
//! container's own meta blocks (the index and its position marker).

use pbss::{Deser, Ser};

/// A family of compatible files. Usually a unit struct declared through
/// [`realm!`](crate::realm!).
pub trait Realm {
    const ID: u32;
}

/// A type storable in files of realm `R`, under a fixed content-type id.
pub trait ContentTyped<R: Realm>: Ser + Deser {
    const CONTENT_TYPE: i16;
}

/// Declares a realm and registers its content types.
///
/// ```
/// pbss::tuple_struct! {
///     #[derive(Clone, Copy, PartialEq, Eq, Debug)]
///     pub struct Sample {
///         pub value: u32,
///     }
/// }
///
/// pbsf::realm! {
///     pub struct Lab = 0x4c4142;
///     Sample => 1,
/// }
/// ```
#[macro_export]
macro_rules! realm {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident = $id:expr;
        $($ty:ty => $ctype:expr),* $(,)?
    ) => {
        $(#[$meta])*
        $vis struct $Name;

        impl $crate::Realm for $Name {
            const ID: u32 = $id;
        }

        $(
            impl $crate::ContentTyped<$Name> for $ty {
                const CONTENT_TYPE: i16 = $ctype;
            }
            const _: () = assert!($ctype > 0, "content-type ids must be positive");
        )*
    };
}
