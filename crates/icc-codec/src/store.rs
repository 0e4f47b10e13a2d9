//! Backing byte stores
//!
//! A profile never holds a file open between calls. [`FileStore`] opens the
//! file inside every operation and the handle is dropped on all exit paths,
//! errors included. [`MemoryStore`] keeps the bytes in a `Vec` for callers
//! that already have the profile in memory.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Random-access byte storage behind an [`IccProfile`](crate::IccProfile)
pub trait ByteStore {
    /// Current length in bytes
    fn len(&self) -> Result<u64>;

    /// Read exactly `len` bytes at `offset`
    ///
    /// Fails with `TruncatedInput` if the store ends first.
    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>>;

    /// Read the whole store
    fn read_all(&self) -> Result<Vec<u8>>;

    /// Write `bytes` at `offset` in a single operation
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()>;
}

fn check_range(offset: u64, len: usize, store_len: u64) -> Result<()> {
    if offset.saturating_add(len as u64) > store_len {
        return Err(Error::truncated(
            offset,
            len as u64,
            store_len.saturating_sub(offset),
        ));
    }
    Ok(())
}

/// A profile file on disk, re-opened for every operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteStore for FileStore {
    fn len(&self) -> Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        check_range(offset, len, file.metadata()?.len())?;

        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_all(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }
}

/// Profile bytes held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    data: Vec<u8>,
}

impl MemoryStore {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ByteStore for MemoryStore {
    fn len(&self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        check_range(offset, len, self.data.len() as u64)?;
        let start = offset as usize;
        Ok(self.data[start..start + len].to_vec())
    }

    fn read_all(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    /// Writing past the end grows the buffer, zero-filling any gap, as a
    /// file would
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        let start = usize::try_from(offset).map_err(|_| Error::out_of_range("offset", offset))?;
        let end = start + bytes.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }
}
