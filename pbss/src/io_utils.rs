use crate::error::{Error, Result};
use std::io::{self, Read};

pub fn read_byte<R: Read + ?Sized>(r: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact_or_eof(r, &mut buf)?;
    Ok(buf[0])
}

/// `read_exact` with short reads reported as [`Error::EarlyEof`].
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(Error::from)
}

/// Discards exactly `count` bytes.
pub fn skip_exact<R: Read + ?Sized>(r: &mut R, count: usize) -> Result<()> {
    let copied = io::copy(&mut r.take(count as u64), &mut io::sink())?;
    if copied < count as u64 {
        return Err(Error::EarlyEof);
    }
    Ok(())
}

/// Advances past one var-uint without decoding its value.
pub fn skip_var_uint<R: Read + ?Sized>(r: &mut R) -> Result<()> {
    while read_byte(r)? & 0x80 != 0 {}
    Ok(())
}
