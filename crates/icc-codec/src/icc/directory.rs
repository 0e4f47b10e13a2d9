//! Tag directory
//!
//! A 4-byte tag count at offset 128, followed by `count` entries of
//! signature(4) + offset(4) + size(4). Offsets are absolute file positions.

use std::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::cursor::ByteReader;
use super::header::HEADER_SIZE;
use super::types::Signature;
use crate::{Error, Result};

/// Size of one directory entry
pub const TAG_ENTRY_SIZE: usize = 12;

/// Offset of the first directory entry
pub const TAG_TABLE_START: usize = HEADER_SIZE + 4;

/// Tag table entry (as stored in profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    signature: Signature,
    offset: u32,
    size: u32,
}

impl Tag {
    pub const fn new(signature: Signature, offset: u32, size: u32) -> Self {
        Self {
            signature,
            offset,
            size,
        }
    }

    /// Tag signature (its purpose, e.g. 'desc')
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Absolute offset of the payload
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Payload size in bytes
    pub fn size(&self) -> u32 {
        self.size
    }

    /// One past the last payload byte
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }
}

/// Ordered list of tags, as found in the profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagDirectory {
    tags: Vec<Tag>,
}

impl TagDirectory {
    /// Parse the directory from profile bytes (starting at byte 0)
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);
        r.seek(HEADER_SIZE as u64)?;
        let count = r.read_u32()? as u64;

        let required = TAG_TABLE_START as u64 + count * TAG_ENTRY_SIZE as u64;
        if (data.len() as u64) < required {
            return Err(Error::truncated(
                TAG_TABLE_START as u64,
                count * TAG_ENTRY_SIZE as u64,
                data.len().saturating_sub(TAG_TABLE_START) as u64,
            ));
        }

        let mut tags = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let signature = r.read_signature()?;
            let offset = r.read_u32()?;
            let size = r.read_u32()?;
            tags.push(Tag::new(signature, offset, size));
        }

        log::debug!("Parsed tag directory with {} entries", tags.len());
        Ok(Self { tags })
    }

    /// Number of bytes the directory occupies for `count` tags, count field included
    pub fn byte_len(count: usize) -> usize {
        4 + count * TAG_ENTRY_SIZE
    }

    /// First tag with the given signature
    pub fn get(&self, signature: Signature) -> Option<&Tag> {
        self.tags.iter().find(|t| t.signature == signature)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

impl<'a> IntoIterator for &'a TagDirectory {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
