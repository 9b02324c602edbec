//! Sequential block files: append typed blocks, stream them back.

use crate::block::{decode_value, encode_value};
use crate::defs::EncodedBlock;
use crate::encoding::{preferred_encoding, Encoding};
use crate::error::Result;
use crate::header::{check_header, write_header};
use crate::realm::{ContentTyped, Realm};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

/// A write handle over a fresh sequential file of realm `R`.
pub struct SequentialOutputFile<R: Realm> {
    w: BufWriter<File>,
    _realm: PhantomData<R>,
}

/// Creates (truncating) a sequential file and writes its header.
pub fn create_sequential_output_file<R: Realm, P: AsRef<Path>>(
    path: P,
) -> Result<SequentialOutputFile<R>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path.as_ref())?;
    let mut w = BufWriter::new(file);
    write_header::<R, _>(&mut w)?;
    Ok(SequentialOutputFile { w, _realm: PhantomData })
}

impl<R: Realm> SequentialOutputFile<R> {
    /// Appends one value under the process-preferred encoding.
    pub fn write<T: ContentTyped<R>>(&mut self, value: &T) -> Result<()> {
        self.write_with_encoding(value, preferred_encoding())
    }

    pub fn write_with_encoding<T: ContentTyped<R>>(
        &mut self,
        value: &T,
        encoding: Encoding,
    ) -> Result<()> {
        let block = encode_value::<R, T>(value, encoding)?;
        pbss::serialize(&mut self.w, &block)?;
        Ok(())
    }

    pub fn close(mut self) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }
}

/// A read handle over a sequential file of realm `R`.
#[derive(Debug)]
pub struct SequentialInputFile<R: Realm> {
    r: BufReader<File>,
    _realm: PhantomData<R>,
}

/// Opens a sequential file, validating its header.
pub fn open_sequential_input_file<R: Realm, P: AsRef<Path>>(
    path: P,
) -> Result<SequentialInputFile<R>> {
    let file = File::open(path.as_ref())?;
    let mut r = BufReader::new(file);
    check_header::<R, _>(&mut r)?;
    Ok(SequentialInputFile { r, _realm: PhantomData })
}

impl<R: Realm> SequentialInputFile<R> {
    /// Streams the remaining values of one content type, silently skipping
    /// blocks of every other type. Decoding work happens per matching block,
    /// at iteration time.
    pub fn read_one_type<T: ContentTyped<R>>(
        &mut self,
    ) -> impl Iterator<Item = Result<T>> + '_ {
        pbss::parse_all::<EncodedBlock, _>(&mut self.r).filter_map(|res| match res {
            Err(e) => Some(Err(e.into())),
            Ok(block) if block.content_type != T::CONTENT_TYPE => None,
            Ok(block) => Some(decode_value::<R, T>(&block)),
        })
    }
}
