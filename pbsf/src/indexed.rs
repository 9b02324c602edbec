//! Indexed block files: random access by key over an append-only block file.
//!
//! Layout is a sequential file whose last two blocks belong to a reserved
//! meta realm: an index block (a serialized `BTreeMap<K, i64>` of key to
//! block offset) and a fixed-size position marker block pointing back at it.
//! A reader seeks [`MARKER_FULL_SIZE`] bytes back from EOF, follows the
//! marker to the index, and loads it whole; values stay on disk until asked
//! for. A writer appends value blocks, keeps the index in memory, and lays
//! down a fresh index and marker on close. Reopening a writer resumes in
//! front of the old index region, which the next close overwrites.
//!
//! One process-level exclusive lock guards each file open for writing.
//! Concurrent readers of a closed file need no coordination.

use crate::block::{decode_block, decode_value, encode_block, encode_value};
use crate::defs::EncodedBlock;
use crate::encoding::{preferred_encoding, Encoding};
use crate::error::{Error, Result};
use crate::fs_utils::lock_file_exclusive;
use crate::header::{check_header, write_header};
use crate::realm::{ContentTyped, Realm};
use pbss::{parse_from_buffer, serialize_to_buffer, serialized_size, Ser};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Content type of the trailing index block.
const INDEX_TYPE_ID: i16 = -11;
/// Content type of the trailing position-marker block.
const MARKER_TYPE_ID: i16 = -10;

pbss::tuple_struct! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    struct IndexPositionMarker {
        pos: i64,
        keyid: i16,
    }
}

/// On-disk size of the marker block. The marker is always stored under the
/// identity encoding, so the whole block's size is a compile-time constant
/// and a reader can find it by seeking back from EOF.
pub const MARKER_FULL_SIZE: u64 = {
    let payload = match <IndexPositionMarker as Ser>::FIXED_SIZE {
        Some(n) => n,
        None => unreachable!(),
    };
    (2 + 2 + 4 + pbss::var_uint_len_const(payload) + payload) as u64
};

const HEADER_SIZE: i64 = 8;

/// A read handle over a closed indexed file of realm `R`, keyed by `K`.
#[derive(Debug)]
pub struct IndexedInputFile<R: Realm, K: ContentTyped<R> + Ord> {
    r: BufReader<File>,
    index: BTreeMap<K, i64>,
    _realm: PhantomData<R>,
}

/// Opens an indexed file for reading: validates the header, follows the
/// trailing marker, loads the whole index into memory.
pub fn open_indexed_input_file<R, K, P>(path: P) -> Result<IndexedInputFile<R, K>>
where
    R: Realm,
    K: ContentTyped<R> + Ord,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let mut r = BufReader::new(file);
    check_header::<R, _>(&mut r)?;

    r.seek(SeekFrom::End(-(MARKER_FULL_SIZE as i64)))?;
    let marker_block: EncodedBlock = pbss::parse(&mut r)?;
    if marker_block.content_type != MARKER_TYPE_ID {
        return Err(Error::TypeMismatch {
            expected: MARKER_TYPE_ID,
            actual: marker_block.content_type,
        });
    }
    let marker: IndexPositionMarker = parse_from_buffer(&decode_block(&marker_block)?)?;
    if marker.keyid != K::CONTENT_TYPE {
        return Err(Error::KeyMismatch {
            expected: K::CONTENT_TYPE,
            actual: marker.keyid,
        });
    }

    r.seek(SeekFrom::Start(marker.pos as u64))?;
    let index_block: EncodedBlock = pbss::parse(&mut r)?;
    if index_block.content_type != INDEX_TYPE_ID {
        return Err(Error::TypeMismatch {
            expected: INDEX_TYPE_ID,
            actual: index_block.content_type,
        });
    }
    let index: BTreeMap<K, i64> = parse_from_buffer(&decode_block(&index_block)?)?;

    Ok(IndexedInputFile { r, index, _realm: PhantomData })
}

impl<R: Realm, K: ContentTyped<R> + Ord> IndexedInputFile<R, K> {
    /// Reads and decodes the block stored under `key`. The disk read happens
    /// here, not at open time.
    pub fn get<T: ContentTyped<R>>(&mut self, key: &K) -> Result<T> {
        let &pos = self.index.get(key).ok_or(Error::KeyMissing)?;
        self.r.seek(SeekFrom::Start(pos as u64))?;
        let block: EncodedBlock = pbss::parse(&mut self.r)?;
        decode_value::<R, T>(&block)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    /// Keys with their block offsets, in ascending key order.
    pub fn offsets(&self) -> impl Iterator<Item = (&K, i64)> {
        self.index.iter().map(|(k, &pos)| (k, pos))
    }

    /// Keys in `[lo, hi]`, both bounds inclusive, in ascending order.
    pub fn range<'a>(&'a self, lo: &'a K, hi: &'a K) -> impl Iterator<Item = &'a K> {
        self.index.range(lo..=hi).map(|(k, _)| k)
    }
}

/// A write handle over an indexed file of realm `R`, keyed by `K`. Holds an
/// exclusive lock for its lifetime; already-written blocks stay readable
/// through [`IndexedOutputFile::get`].
pub struct IndexedOutputFile<R: Realm, K: ContentTyped<R> + Ord> {
    w: BufWriter<File>,
    path: PathBuf,
    pos: i64,
    index: BTreeMap<K, i64>,
    closed: bool,
    _realm: PhantomData<R>,
}

/// Opens an indexed file for writing. With `truncate` the file starts over;
/// without it an existing file's index is loaded and writing resumes where
/// the old index block stood.
pub fn open_indexed_output_file<R, K, P>(
    path: P,
    truncate: bool,
) -> Result<IndexedOutputFile<R, K>>
where
    R: Realm,
    K: ContentTyped<R> + Ord,
    P: AsRef<Path>,
{
    let path = path.as_ref().to_owned();
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&path)?;
    lock_file_exclusive(&file)?;

    let len = file.metadata()?.len();
    if truncate || len == 0 {
        file.set_len(0)?;
        (&file).seek(SeekFrom::Start(0))?;
        let mut w = BufWriter::new(file);
        write_header::<R, _>(&mut w)?;
        return Ok(IndexedOutputFile {
            w,
            path,
            pos: HEADER_SIZE,
            index: BTreeMap::new(),
            closed: false,
            _realm: PhantomData,
        });
    }

    let mut rf = &file;
    check_header::<R, _>(&mut rf)?;

    rf.seek(SeekFrom::End(-(MARKER_FULL_SIZE as i64)))?;
    let marker_block: EncodedBlock = pbss::parse(&mut rf)?;
    if marker_block.content_type != MARKER_TYPE_ID {
        return Err(Error::TypeMismatch {
            expected: MARKER_TYPE_ID,
            actual: marker_block.content_type,
        });
    }
    let marker: IndexPositionMarker = parse_from_buffer(&decode_block(&marker_block)?)?;
    if marker.keyid != K::CONTENT_TYPE {
        return Err(Error::KeyMismatch {
            expected: K::CONTENT_TYPE,
            actual: marker.keyid,
        });
    }

    rf.seek(SeekFrom::Start(marker.pos as u64))?;
    let index_block: EncodedBlock = pbss::parse(&mut rf)?;
    if index_block.content_type != INDEX_TYPE_ID {
        return Err(Error::TypeMismatch {
            expected: INDEX_TYPE_ID,
            actual: index_block.content_type,
        });
    }
    let index: BTreeMap<K, i64> = parse_from_buffer(&decode_block(&index_block)?)?;

    // new blocks overwrite the old index region; close() lays down a fresh one
    file.set_len(marker.pos as u64)?;
    (&file).seek(SeekFrom::Start(marker.pos as u64))?;
    let w = BufWriter::new(file);

    Ok(IndexedOutputFile {
        w,
        path,
        pos: marker.pos,
        index,
        closed: false,
        _realm: PhantomData,
    })
}

impl<R: Realm, K: ContentTyped<R> + Ord> IndexedOutputFile<R, K> {
    /// Appends one value block under `key`, under the process-preferred
    /// encoding. Inserting a key again points the index at the new block;
    /// the superseded block stays in the file, unreferenced.
    pub fn insert<T: ContentTyped<R>>(&mut self, key: K, value: &T) -> Result<()> {
        self.insert_with_encoding(key, value, preferred_encoding())
    }

    pub fn insert_with_encoding<T: ContentTyped<R>>(
        &mut self,
        key: K,
        value: &T,
        encoding: Encoding,
    ) -> Result<()> {
        let block = encode_value::<R, T>(value, encoding)?;
        let size = serialized_size(&block);
        pbss::serialize(&mut self.w, &block)?;
        self.index.insert(key, self.pos);
        self.pos += size as i64;
        Ok(())
    }

    /// Reads back a block already written through this handle, via a
    /// separate read handle on the same path.
    pub fn get<T: ContentTyped<R>>(&mut self, key: &K) -> Result<T> {
        let &pos = self.index.get(key).ok_or(Error::KeyMissing)?;
        self.w.flush()?;
        let mut r = File::open(&self.path)?;
        r.seek(SeekFrom::Start(pos as u64))?;
        let block: EncodedBlock = pbss::parse(&mut r)?;
        decode_value::<R, T>(&block)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Writes the index block and its marker, then flushes. The handle (and
    /// its lock) are released on return.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.write_index()
    }

    fn write_index(&mut self) -> Result<()> {
        let raw = serialize_to_buffer(&self.index)?;
        let index_block = encode_block(INDEX_TYPE_ID, &raw, preferred_encoding());
        let index_pos = self.pos;
        self.pos += serialized_size(&index_block) as i64;
        pbss::serialize(&mut self.w, &index_block)?;

        let marker = IndexPositionMarker { pos: index_pos, keyid: K::CONTENT_TYPE };
        let marker_raw = serialize_to_buffer(&marker)?;
        let marker_block = encode_block(MARKER_TYPE_ID, &marker_raw, Encoding::Identity);
        debug_assert_eq!(serialized_size(&marker_block) as u64, MARKER_FULL_SIZE);
        self.pos += serialized_size(&marker_block) as i64;
        pbss::serialize(&mut self.w, &marker_block)?;

        self.w.flush()?;
        Ok(())
    }
}

impl<R: Realm, K: ContentTyped<R> + Ord> Drop for IndexedOutputFile<R, K> {
    /// Best-effort index flush for handles dropped without `close()`.
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.write_index();
        }
    }
}
