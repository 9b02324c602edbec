use crate::error::Result;
use fs2::FileExt;
use std::fs::File;

/// Takes an exclusive advisory lock, failing immediately if another process
/// holds one.
pub fn lock_file_exclusive(file: &File) -> Result<()> {
    file.try_lock_exclusive()?;
    Ok(())
}
