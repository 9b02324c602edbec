//! Const helpers for compile-time size computation of composite types.

use crate::var_uint::var_uint_len_const;

/// Sums member fixed sizes; `None` as soon as any member's size can vary.
pub const fn sum_fixed(parts: &[Option<usize>]) -> Option<usize> {
    let mut total = 0;
    let mut i = 0;
    while i < parts.len() {
        match parts[i] {
            Some(n) => total += n,
            None => return None,
        }
        i += 1;
    }
    Some(total)
}

/// Fixed size of a tagged struct: per field one tag byte, the var-uint of the
/// field's fixed size, and the payload; plus the zero terminator.
pub const fn tagged_fixed(parts: &[Option<usize>]) -> Option<usize> {
    let mut total = 1; // terminator
    let mut i = 0;
    while i < parts.len() {
        match parts[i] {
            Some(n) => total += 1 + var_uint_len_const(n) + n,
            None => return None,
        }
        i += 1;
    }
    Some(total)
}
