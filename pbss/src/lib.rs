//! Compile-time reflection-free binary serialization.
//!
//! Every serializable shape gets its codec at compile time, either from the
//! blanket impls in this crate (primitives, tuples, sequences) or from the
//! declaration macros ([`tuple_struct!`], [`tagged_struct!`], [`enum_codec!`]).
//! There is no runtime schema and no per-value dispatch.
//!
//! Wire format in brief:
//! - unsigned counts and lengths are var-uints, little-endian base-128,
//!   low 7 bits per byte, high bit set on every byte but the last;
//! - primitives are their in-memory bytes, native endianness;
//! - enums are their underlying integral type;
//! - tuples and [`tuple_struct!`] structs are members in order, untagged;
//! - [`tagged_struct!`] structs are `(tag, len, payload)*` then a `0` byte,
//!   skippable and extensible;
//! - sequences are a var-uint count then the elements.
//!
//! Sizes are computed ahead of time through a three-tier protocol
//! ([`Ser::FIXED_SIZE`], [`Ser::static_size`], [`Ser::aot_size`]) so output
//! buffers never reallocate.

mod buffer;
mod enums;
pub mod error;
mod fixed_struct;
pub mod io_utils;
mod iter;
pub mod mem;
mod primitives;
mod sequence;
pub mod size;
pub mod tagged;
mod traits;
mod tuples;
mod var_uint;

pub use buffer::{parse_from_buffer, serialize_to_buffer, SliceWriter};
pub use error::{Error, Result};
pub use iter::{parse_all, ParseIter};
pub use mem::MemoryLayout;
pub use traits::{parse, serialize, serialized_size, Deser, Ser};
pub use var_uint::{var_uint_len, var_uint_len_const, VarUint, VarUintRepr};

#[doc(hidden)]
pub use num_traits as _num_traits;
