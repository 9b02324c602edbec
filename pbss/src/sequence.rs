//! Homogeneous sequence codec: element count as var-uint, then the elements.
//!
//! Contiguous runs of memory-layout primitives go through one bulk copy (see
//! [`crate::mem`]); everything else is element-wise. Order-preserving
//! containers decode by appending; order-defining containers decode by
//! inserting and rely on their own ordering.

use crate::error::{Error, Result};
use crate::traits::{serialized_size, Deser, Ser};
use crate::var_uint::{var_uint_len, VarUint};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::io::{Read, Write};

fn seq_static_size<T: Ser>(len: usize) -> Option<usize> {
    T::FIXED_SIZE.map(|elem| var_uint_len(len) + elem * len)
}

impl<T: Ser> Ser for [T] {
    const FIXED_SIZE: Option<usize> = None;

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        VarUint(self.len()).ser(w)?;
        T::ser_slice(self, w)
    }

    fn static_size(&self) -> Option<usize> {
        seq_static_size::<T>(self.len())
    }

    fn aot_size(&self) -> usize {
        let prefix = var_uint_len(self.len());
        match T::FIXED_SIZE {
            Some(elem) => prefix + elem * self.len(),
            None => prefix + self.iter().map(serialized_size).sum::<usize>(),
        }
    }
}

impl<T: Ser> Ser for Vec<T> {
    const FIXED_SIZE: Option<usize> = None;

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.as_slice().ser(w)
    }

    fn static_size(&self) -> Option<usize> {
        self.as_slice().static_size()
    }

    fn aot_size(&self) -> usize {
        self.as_slice().aot_size()
    }
}

impl<T: Deser> Deser for Vec<T> {
    fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let count = VarUint::<usize>::deser(r)?.0;
        T::deser_vec(r, count)
    }
}

impl<T: Ser, const N: usize> Ser for [T; N] {
    const FIXED_SIZE: Option<usize> = None;

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.as_slice().ser(w)
    }

    fn static_size(&self) -> Option<usize> {
        self.as_slice().static_size()
    }

    fn aot_size(&self) -> usize {
        self.as_slice().aot_size()
    }
}

impl<T: Deser, const N: usize> Deser for [T; N] {
    fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let count = VarUint::<usize>::deser(r)?.0;
        if count != N {
            return Err(Error::BadLength { expected: N, actual: count });
        }
        let elems = T::deser_vec(r, N)?;
        match elems.try_into() {
            Ok(arr) => Ok(arr),
            Err(_) => Err(Error::BadLength { expected: N, actual: count }),
        }
    }
}

impl Ser for str {
    const FIXED_SIZE: Option<usize> = None;

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        VarUint(self.len()).ser(w)?;
        w.write_all(self.as_bytes())?;
        Ok(())
    }

    fn static_size(&self) -> Option<usize> {
        Some(var_uint_len(self.len()) + self.len())
    }

    fn aot_size(&self) -> usize {
        var_uint_len(self.len()) + self.len()
    }
}

impl Ser for String {
    const FIXED_SIZE: Option<usize> = None;

    fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.as_str().ser(w)
    }

    fn static_size(&self) -> Option<usize> {
        self.as_str().static_size()
    }

    fn aot_size(&self) -> usize {
        self.as_str().aot_size()
    }
}

impl Deser for String {
    fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let count = VarUint::<usize>::deser(r)?.0;
        let bytes = u8::deser_vec(r, count)?;
        Ok(String::from_utf8(bytes)?)
    }
}

macro_rules! set_codec {
    ($Set:ident, $($extra:ident),*) => {
        impl<T: Ser> Ser for $Set<T> {
            const FIXED_SIZE: Option<usize> = None;

            fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
                VarUint(self.len()).ser(w)?;
                for v in self {
                    v.ser(w)?;
                }
                Ok(())
            }

            fn static_size(&self) -> Option<usize> {
                seq_static_size::<T>(self.len())
            }

            fn aot_size(&self) -> usize {
                let prefix = var_uint_len(self.len());
                match T::FIXED_SIZE {
                    Some(elem) => prefix + elem * self.len(),
                    None => prefix + self.iter().map(serialized_size).sum::<usize>(),
                }
            }
        }

        impl<T: Deser $(+ $extra)*> Deser for $Set<T> {
            fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
                let count = VarUint::<usize>::deser(r)?.0;
                let mut coll = Self::default();
                for _ in 0..count {
                    coll.insert(T::deser(r)?);
                }
                Ok(coll)
            }
        }
    };
}

set_codec!(BTreeSet, Ord);
set_codec!(HashSet, Hash, Eq);

macro_rules! map_codec {
    ($Map:ident, $($extra:ident),*) => {
        impl<K: Ser, V: Ser> Ser for $Map<K, V> {
            const FIXED_SIZE: Option<usize> = None;

            fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
                VarUint(self.len()).ser(w)?;
                for (k, v) in self {
                    k.ser(w)?;
                    v.ser(w)?;
                }
                Ok(())
            }

            fn static_size(&self) -> Option<usize> {
                match (K::FIXED_SIZE, V::FIXED_SIZE) {
                    (Some(kf), Some(vf)) => {
                        Some(var_uint_len(self.len()) + (kf + vf) * self.len())
                    }
                    _ => None,
                }
            }

            fn aot_size(&self) -> usize {
                let mut total = var_uint_len(self.len());
                for (k, v) in self {
                    total += serialized_size(k) + serialized_size(v);
                }
                total
            }
        }

        impl<K: Deser $(+ $extra)*, V: Deser> Deser for $Map<K, V> {
            fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
                let count = VarUint::<usize>::deser(r)?.0;
                let mut coll = Self::default();
                for _ in 0..count {
                    let k = K::deser(r)?;
                    let v = V::deser(r)?;
                    coll.insert(k, v);
                }
                Ok(coll)
            }
        }
    };
}

map_codec!(BTreeMap, Ord);
map_codec!(HashMap, Hash, Eq);
