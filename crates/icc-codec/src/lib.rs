//! # icc-codec - ICC profile reader and editor
//!
//! Reads and rewrites ICC color profiles in place: the 128-byte header, the
//! tag directory and the payloads of the common tag types.
//!
//! ## Scope
//!
//! - **Header**: every field decoded, edited through a validating builder
//! - **Tags**: 'text', 'XYZ ', 'curv' and 'mluc' are interpreted; any other
//!   payload is kept as raw bytes and written back unchanged
//! - **In place**: a tag is rewritten inside the slot its directory entry
//!   describes; the directory and the file length never change
//!
//! Color conversion, profile creation from scratch and moving or resizing
//! tags are out of scope.
//!
//! ## Quick Start
//!
//! ```no_run
//! use icc_codec::{IccProfile, Signature, TagData, TextData, TextEncoding};
//!
//! let mut profile = IccProfile::open("display.icc")?;
//! println!("version {}", profile.header().version);
//!
//! if let Some(desc) = profile.tag_by_signature(Signature::DESC) {
//!     println!("desc: {}", profile.read_tag(&desc)?);
//!     let text = TagData::Text(TextData::new("Example Media", TextEncoding::Utf8));
//!     profile.write_tag(&desc, &text)?;
//! }
//!
//! let header = profile.header().edit().creator("EXMP").build()?;
//! profile.write_header(header)?;
//! # Ok::<(), icc_codec::Error>(())
//! ```

pub mod error;
pub mod icc;
pub mod options;
pub mod profile;
pub mod store;

pub use error::{Error, Result};
pub use icc::{
    CurveData, DateTime, GenericData, HeaderBuilder, LocalizedString, MlucData, ProfileHeader,
    ProfileVersion, RenderingIntent, S15Fixed16, Signature, Tag, TagData, TagDirectory, TagType,
    TextData, TextEncoding, Xyz, u16_to_unit, unit_to_u16,
};
pub use options::{ProfileOptions, SlotPolicy};
pub use profile::{CopyReport, IccProfile};
pub use store::{ByteStore, FileStore, MemoryStore};

/// Version of icc-codec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
