//! ICC Profile Binary Format
//!
//! Decoding and encoding of the on-disk pieces of an ICC profile, following
//! ICC.1:2022. All multi-byte values are big-endian.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table: a count followed by 12-byte entries
//! 3. Tag payloads (may overlap or be shared between entries)
//!
//! # Example
//!
//! ```
//! use icc_codec::icc::{TagData, TextData, TextEncoding};
//!
//! let tag = TagData::Text(TextData::new("sRGB", TextEncoding::Utf8));
//! let bytes = tag.encode().unwrap();
//! assert_eq!(&bytes[..4], b"text");
//! assert_eq!(TagData::decode(&bytes), tag);
//! ```

pub mod cursor;
pub mod directory;
pub mod header;
pub mod tags;

mod types;

pub use directory::{TAG_ENTRY_SIZE, TAG_TABLE_START, Tag, TagDirectory};
pub use header::{HEADER_SIZE, HeaderBuilder, ProfileHeader, ProfileVersion, RenderingIntent};
pub use tags::{
    CurveData, GenericData, LocalizedString, MlucData, TagData, TagType, TextData, TextEncoding,
};
pub use types::{DateTime, S15Fixed16, Signature, Xyz, u16_to_unit, unit_to_u16};
