//! Temporary profile files
//!
//! [`ScratchFile`] wraps a [`NamedTempFile`] so tests can hand a real path
//! to `IccProfile::open` and read the bytes back afterwards. The file is
//! removed when dropped.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// A profile written to a named temp file
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Create the file with `contents`; `name` is kept as a suffix for debugging
    pub fn new(name: &str, contents: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("icc-codec-")
            .suffix(name)
            .tempfile()?;
        file.write_all(contents)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Current file contents
    pub fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(self.file.path())
    }
}
