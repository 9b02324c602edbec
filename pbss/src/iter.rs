//! Lazy decoding of a stream of back-to-back values.

use crate::error::Result;
use crate::traits::Deser;
use std::io::BufRead;
use std::marker::PhantomData;

/// Returns an iterator decoding consecutive `T` values from `r` until clean
/// end of input. A value cut off mid-decode yields `Err(EarlyEof)`; after any
/// error the iterator is fused.
pub fn parse_all<T: Deser, R: BufRead>(r: R) -> ParseIter<T, R> {
    ParseIter { r, done: false, phantom: PhantomData }
}

pub struct ParseIter<T, R> {
    r: R,
    done: bool,
    phantom: PhantomData<T>,
}

impl<T: Deser, R: BufRead> Iterator for ParseIter<T, R> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.r.fill_buf() {
            Ok(buf) if buf.is_empty() => {
                self.done = true;
                return None;
            }
            Ok(_) => (),
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        }
        let res = T::deser(&mut self.r);
        if res.is_err() {
            self.done = true;
        }
        Some(res)
    }
}
