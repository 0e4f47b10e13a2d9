//! ICC profile access
//!
//! [`IccProfile`] owns a snapshot of the header and the tag directory and
//! reads or writes tag payloads against its [`ByteStore`]. A value of this
//! type is always an opened profile: `open` either parses the header and the
//! directory or returns the error.
//!
//! Each write is a single seek+write into the store. There is no transaction
//! across writes, so a caller doing several edits can observe a partially
//! updated file if a later one fails.

use std::path::Path;

use crate::icc::{HEADER_SIZE, ProfileHeader, Signature, Tag, TagData, TagDirectory};
use crate::options::{ProfileOptions, SlotPolicy};
use crate::store::{ByteStore, FileStore, MemoryStore};
use crate::{Error, Result};

/// An opened ICC profile
#[derive(Debug, Clone)]
pub struct IccProfile<S = FileStore> {
    store: S,
    header: ProfileHeader,
    directory: TagDirectory,
    options: ProfileOptions,
}

/// Outcome of [`IccProfile::copy_tags_from`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Tags whose payload was written
    pub copied: Vec<Signature>,
    /// Source tags with no slot of the same signature here
    pub missing: Vec<Signature>,
    /// Tags whose payload did not fit the slot
    pub rejected: Vec<Signature>,
}

impl IccProfile<FileStore> {
    /// Open a profile file with default options
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ProfileOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: ProfileOptions) -> Result<Self> {
        Self::from_store_with(FileStore::new(path), options)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl IccProfile<MemoryStore> {
    /// Parse a profile held in memory
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_store(MemoryStore::new(data))
    }

    /// Current profile bytes, edits included
    pub fn as_bytes(&self) -> &[u8] {
        self.store.as_bytes()
    }
}

impl<S: ByteStore> IccProfile<S> {
    pub fn from_store(store: S) -> Result<Self> {
        Self::from_store_with(store, ProfileOptions::default())
    }

    pub fn from_store_with(store: S, options: ProfileOptions) -> Result<Self> {
        let (header, directory) = Self::load(&store)?;
        Ok(Self {
            store,
            header,
            directory,
            options,
        })
    }

    fn load(store: &S) -> Result<(ProfileHeader, TagDirectory)> {
        let data = store.read_all()?;
        let header = ProfileHeader::parse(&data)?;
        let directory = TagDirectory::parse(&data)?;

        if !header.has_valid_signature() {
            log::warn!("Profile file signature is '{}', expected 'acsp'", header.signature);
        }
        log::debug!(
            "Opened profile: {} bytes, version {}, {} tags",
            data.len(),
            header.version,
            directory.len()
        );
        Ok((header, directory))
    }

    /// Re-read header and directory from the store
    ///
    /// On failure the previous snapshot is kept.
    pub fn reload(&mut self) -> Result<()> {
        let (header, directory) = Self::load(&self.store)?;
        self.header = header;
        self.directory = directory;
        Ok(())
    }

    pub fn header(&self) -> &ProfileHeader {
        &self.header
    }

    /// Tags in directory order
    pub fn tags(&self) -> &[Tag] {
        self.directory.as_slice()
    }

    pub fn directory(&self) -> &TagDirectory {
        &self.directory
    }

    /// First tag with the given signature
    pub fn tag_by_signature(&self, signature: Signature) -> Option<Tag> {
        self.directory.get(signature).copied()
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read and decode a tag payload
    pub fn read_tag(&self, tag: &Tag) -> Result<TagData> {
        let bytes = self.store.read_at(tag.offset() as u64, tag.size() as usize)?;
        let data = TagData::decode_with(&bytes, self.options.text_encoding);
        log::debug!(
            "Read tag '{}' ({} bytes at {}) as {:?}",
            tag.signature(),
            tag.size(),
            tag.offset(),
            data.tag_type()
        );
        Ok(data)
    }

    /// Encode `data` into the slot of `tag`
    ///
    /// The payload may not be larger than the slot. Under
    /// [`SlotPolicy::PadToSlot`] a shorter payload is zero-filled to the slot
    /// size; under [`SlotPolicy::Exact`] it is rejected.
    pub fn write_tag(&mut self, tag: &Tag, data: &TagData) -> Result<()> {
        let mut bytes = data.encode()?;
        let slot = tag.size();

        if bytes.len() != slot as usize {
            match self.options.slot_policy {
                SlotPolicy::Exact => {
                    return Err(Error::SlotSizeMismatch {
                        tag: tag.signature(),
                        slot,
                        encoded: bytes.len(),
                    });
                }
                SlotPolicy::PadToSlot if bytes.len() > slot as usize => {
                    return Err(Error::SlotOverflow {
                        tag: tag.signature(),
                        slot,
                        encoded: bytes.len(),
                    });
                }
                SlotPolicy::PadToSlot => bytes.resize(slot as usize, 0),
            }
        }

        let store_len = self.store.len()?;
        if tag.end() > store_len {
            return Err(Error::truncated(
                tag.offset() as u64,
                slot as u64,
                store_len.saturating_sub(tag.offset() as u64),
            ));
        }

        self.store.write_at(tag.offset() as u64, &bytes)?;
        log::debug!(
            "Wrote tag '{}' ({:?}, {} bytes at {})",
            tag.signature(),
            data.tag_type(),
            bytes.len(),
            tag.offset()
        );
        Ok(())
    }

    /// Replace the header, rewriting bytes 0..128 in one write
    pub fn write_header(&mut self, header: ProfileHeader) -> Result<()> {
        let bytes = header.to_bytes()?;
        let store_len = self.store.len()?;
        if store_len < HEADER_SIZE as u64 {
            return Err(Error::truncated(0, HEADER_SIZE as u64, store_len));
        }

        self.store.write_at(0, &bytes)?;
        self.header = header;
        log::debug!("Wrote profile header");
        Ok(())
    }

    /// Copy every tag of `source` whose signature also exists here
    ///
    /// Payloads that do not fit the matching slot are listed in
    /// [`CopyReport::rejected`]; other errors stop the copy.
    pub fn copy_tags_from<T: ByteStore>(&mut self, source: &IccProfile<T>) -> Result<CopyReport> {
        let mut report = CopyReport::default();

        for source_tag in source.tags() {
            let Some(target) = self.tag_by_signature(source_tag.signature()) else {
                report.missing.push(source_tag.signature());
                continue;
            };

            let data = source.read_tag(source_tag)?;
            match self.write_tag(&target, &data) {
                Ok(()) => report.copied.push(target.signature()),
                Err(Error::SlotOverflow { tag, .. }) | Err(Error::SlotSizeMismatch { tag, .. }) => {
                    log::warn!("Tag '{}' from source does not fit its slot, skipped", tag);
                    report.rejected.push(tag);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::{TextData, TextEncoding, Xyz};

    /// Header + directory with a 'desc' text slot of 24 bytes and a
    /// 'wtpt' XYZ slot of 20 bytes
    fn create_profile() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[8] = 4;
        data[9] = 0x30;
        data[12..16].copy_from_slice(b"mntr");
        data[16..20].copy_from_slice(b"RGB ");
        data[20..24].copy_from_slice(b"XYZ ");
        data[36..40].copy_from_slice(b"acsp");

        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(b"desc");
        data.extend_from_slice(&156u32.to_be_bytes());
        data.extend_from_slice(&24u32.to_be_bytes());
        data.extend_from_slice(b"wtpt");
        data.extend_from_slice(&180u32.to_be_bytes());
        data.extend_from_slice(&20u32.to_be_bytes());

        data.extend_from_slice(b"text\0\0\0\0Test\0");
        data.resize(180, 0);
        data.extend_from_slice(b"XYZ \0\0\0\0");
        data.extend_from_slice(&[
            0x00, 0x00, 0xF6, 0xD6, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xD3, 0x2D,
        ]);

        let size = data.len() as u32;
        data[0..4].copy_from_slice(&size.to_be_bytes());
        data
    }

    #[test]
    fn test_open_and_read() {
        let profile = IccProfile::from_bytes(create_profile()).unwrap();
        assert_eq!(profile.header().version.to_string(), "4.3.0");
        assert_eq!(profile.tags().len(), 2);

        let desc = profile.tag_by_signature(Signature::DESC).unwrap();
        let data = profile.read_tag(&desc).unwrap();
        assert_eq!(data.as_text().unwrap().text, "Test");

        let wtpt = profile.tag_by_signature(Signature::MEDIA_WHITE).unwrap();
        let white = *profile.read_tag(&wtpt).unwrap().as_xyz().unwrap();
        assert!((white.x - 0.9642).abs() < 1e-4);
    }

    #[test]
    fn test_open_too_small() {
        let err = IccProfile::from_bytes(vec![0u8; 100]).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_write_pads_slot() {
        let mut profile = IccProfile::from_bytes(create_profile()).unwrap();
        let desc = profile.tag_by_signature(Signature::DESC).unwrap();

        let text = TagData::Text(TextData::new("Ab", TextEncoding::Utf8));
        profile.write_tag(&desc, &text).unwrap();

        let slot = &profile.as_bytes()[156..180];
        assert_eq!(&slot[..10], b"text\0\0\0\0Ab");
        assert!(slot[10..].iter().all(|&b| b == 0));
        assert_eq!(profile.read_tag(&desc).unwrap(), text);
    }

    #[test]
    fn test_utf16_text_in_odd_slot() {
        let mut data = create_profile();
        // Shrink the 'desc' slot to 15 bytes
        data[140..144].copy_from_slice(&15u32.to_be_bytes());
        let options = ProfileOptions::default().with_text_encoding(TextEncoding::Utf16Be);
        let mut profile = IccProfile::from_store_with(MemoryStore::new(data), options).unwrap();
        let desc = profile.tag_by_signature(Signature::DESC).unwrap();
        assert_eq!(desc.size(), 15);

        let text = TagData::Text(TextData::new("AB", TextEncoding::Utf16Be));
        profile.write_tag(&desc, &text).unwrap();
        assert_eq!(profile.read_tag(&desc).unwrap(), text);
    }

    #[test]
    fn test_write_overflow_is_rejected() {
        let mut profile = IccProfile::from_bytes(create_profile()).unwrap();
        let before = profile.as_bytes().to_vec();
        let desc = profile.tag_by_signature(Signature::DESC).unwrap();

        let text = TagData::Text(TextData::new("This does not fit in the slot", TextEncoding::Utf8));
        match profile.write_tag(&desc, &text) {
            Err(Error::SlotOverflow { tag, slot, encoded }) => {
                assert_eq!(tag, Signature::DESC);
                assert_eq!(slot, 24);
                assert_eq!(encoded, 37);
            }
            other => panic!("Expected SlotOverflow, got {:?}", other),
        }
        assert_eq!(profile.as_bytes(), before.as_slice());
    }

    #[test]
    fn test_exact_policy() {
        let options = ProfileOptions::default().with_slot_policy(SlotPolicy::Exact);
        let mut profile = IccProfile::from_store_with(MemoryStore::new(create_profile()), options).unwrap();
        let wtpt = profile.tag_by_signature(Signature::MEDIA_WHITE).unwrap();
        let desc = profile.tag_by_signature(Signature::DESC).unwrap();

        profile
            .write_tag(&wtpt, &TagData::Xyz(Xyz::new(0.95, 1.0, 1.09)))
            .unwrap();
        assert!(matches!(
            profile.write_tag(&desc, &TagData::Text(TextData::new("x", TextEncoding::Utf8))),
            Err(Error::SlotSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_write_header_keeps_tags() {
        let mut profile = IccProfile::from_bytes(create_profile()).unwrap();
        let tail = profile.as_bytes()[HEADER_SIZE..].to_vec();

        let header = profile.header().edit().cmm_type("ADBE").version("2.1.0").build().unwrap();
        profile.write_header(header.clone()).unwrap();

        assert_eq!(profile.header(), &header);
        assert_eq!(&profile.as_bytes()[4..8], b"ADBE");
        assert_eq!(&profile.as_bytes()[HEADER_SIZE..], tail.as_slice());

        profile.reload().unwrap();
        assert_eq!(profile.header(), &header);
    }

    #[test]
    fn test_read_tag_past_end() {
        let profile = IccProfile::from_bytes(create_profile()).unwrap();
        let bogus = Tag::new(Signature::COPYRIGHT, 190, 40);
        assert!(profile.read_tag(&bogus).unwrap_err().is_truncated());
    }
}
