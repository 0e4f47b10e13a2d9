//! ICC Profile Tag Payloads
//!
//! Every payload starts with:
//! - A 4-byte type signature identifying the data format
//! - 4 reserved bytes
//! - Type-specific data
//!
//! The type signature is independent of the tag's directory signature: 'desc'
//! names what a tag is for, 'text' or 'mluc' how its bytes are laid out.
//! Only four payload types are interpreted; everything else, including a
//! known type whose bytes are malformed, is kept as [`GenericData`].
//!
//! See ICC.1:2022 Section 10.

mod curves;
mod mluc;
mod text;
mod xyz;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use curves::CurveData;
pub use mluc::{LocalizedString, MlucData};
pub use text::{TextData, TextEncoding};
pub use xyz::XYZ_PAYLOAD_SIZE;

use super::cursor::ByteWriter;
use super::types::{Signature, Xyz};
use crate::Result;

/// Type signature + reserved bytes
pub const PAYLOAD_HEADER_SIZE: usize = 8;

pub(crate) fn write_payload_header(w: &mut ByteWriter, type_sig: Signature) {
    w.write_signature(type_sig);
    w.write_zeros(4);
}

/// Payload kinds this codec interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Text,
    Xyz,
    Curve,
    MultiLocalizedUnicode,
    Unknown,
}

impl TagType {
    pub fn from_signature(sig: Signature) -> Self {
        match sig {
            Signature::TEXT_TYPE => Self::Text,
            Signature::XYZ_TYPE => Self::Xyz,
            Signature::CURVE_TYPE => Self::Curve,
            Signature::MLUC_TYPE => Self::MultiLocalizedUnicode,
            _ => Self::Unknown,
        }
    }

    /// Classify a payload by its first four bytes
    pub fn of(payload: &[u8]) -> Self {
        match payload {
            [a, b, c, d, ..] => Self::from_signature(Signature::from_bytes([*a, *b, *c, *d])),
            _ => Self::Unknown,
        }
    }

    pub fn signature(self) -> Option<Signature> {
        match self {
            Self::Text => Some(Signature::TEXT_TYPE),
            Self::Xyz => Some(Signature::XYZ_TYPE),
            Self::Curve => Some(Signature::CURVE_TYPE),
            Self::MultiLocalizedUnicode => Some(Signature::MLUC_TYPE),
            Self::Unknown => None,
        }
    }
}

/// Opaque payload bytes, written back unchanged
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenericData {
    pub bytes: Vec<u8>,
}

impl GenericData {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

/// Space-separated upper-case hex, e.g. `01 02 0A FF`
impl fmt::Display for GenericData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

/// Decoded tag payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TagData {
    /// 'text'
    Text(TextData),
    /// 'XYZ '
    Xyz(Xyz),
    /// 'curv'
    Curve(CurveData),
    /// 'mluc'
    MultiLocalizedUnicode(MlucData),
    /// Anything else, raw
    Generic(GenericData),
}

impl TagData {
    /// Decode a payload, reading 'text' as UTF-8
    pub fn decode(data: &[u8]) -> Self {
        Self::decode_with(data, TextEncoding::Utf8)
    }

    /// Decode a payload, reading 'text' in `encoding`
    ///
    /// Never fails: payloads that are too short or internally inconsistent
    /// come back as [`TagData::Generic`] holding the bytes unchanged.
    pub fn decode_with(data: &[u8], encoding: TextEncoding) -> Self {
        let tag_type = TagType::of(data);
        let decoded = match tag_type {
            TagType::Text => TextData::decode(data, encoding).map(TagData::Text),
            TagType::Xyz => xyz::decode(data).map(TagData::Xyz),
            TagType::Curve => CurveData::decode(data).map(TagData::Curve),
            TagType::MultiLocalizedUnicode => MlucData::decode(data).map(TagData::MultiLocalizedUnicode),
            TagType::Unknown => None,
        };

        decoded.unwrap_or_else(|| {
            if tag_type != TagType::Unknown {
                log::warn!(
                    "Malformed {:?} payload of {} bytes, keeping raw bytes",
                    tag_type,
                    data.len()
                );
            }
            TagData::Generic(GenericData::new(data))
        })
    }

    /// Encode to the full on-disk payload, type header included
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            TagData::Text(text) => text.encode(),
            TagData::Xyz(v) => xyz::encode(v),
            TagData::Curve(curve) => curve.encode(),
            TagData::MultiLocalizedUnicode(mluc) => mluc.encode(),
            TagData::Generic(raw) => Ok(raw.bytes.clone()),
        }
    }

    pub fn tag_type(&self) -> TagType {
        match self {
            TagData::Text(_) => TagType::Text,
            TagData::Xyz(_) => TagType::Xyz,
            TagData::Curve(_) => TagType::Curve,
            TagData::MultiLocalizedUnicode(_) => TagType::MultiLocalizedUnicode,
            TagData::Generic(_) => TagType::Unknown,
        }
    }

    /// Type signature written at the start of the payload
    pub fn type_signature(&self) -> Option<Signature> {
        match self {
            TagData::Generic(raw) => match raw.bytes.as_slice() {
                [a, b, c, d, ..] => Some(Signature::from_bytes([*a, *b, *c, *d])),
                _ => None,
            },
            other => other.tag_type().signature(),
        }
    }

    pub fn as_text(&self) -> Option<&TextData> {
        match self {
            TagData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_xyz(&self) -> Option<&Xyz> {
        match self {
            TagData::Xyz(xyz) => Some(xyz),
            _ => None,
        }
    }

    pub fn as_curve(&self) -> Option<&CurveData> {
        match self {
            TagData::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_mluc(&self) -> Option<&MlucData> {
        match self {
            TagData::MultiLocalizedUnicode(mluc) => Some(mluc),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericData> {
        match self {
            TagData::Generic(raw) => Some(raw),
            _ => None,
        }
    }
}

impl fmt::Display for TagData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagData::Text(text) => fmt::Display::fmt(text, f),
            TagData::Xyz(xyz) => fmt::Display::fmt(xyz, f),
            TagData::Curve(curve) => fmt::Display::fmt(curve, f),
            TagData::MultiLocalizedUnicode(mluc) => fmt::Display::fmt(mluc, f),
            TagData::Generic(raw) => fmt::Display::fmt(raw, f),
        }
    }
}

impl From<TextData> for TagData {
    fn from(v: TextData) -> Self {
        TagData::Text(v)
    }
}

impl From<Xyz> for TagData {
    fn from(v: Xyz) -> Self {
        TagData::Xyz(v)
    }
}

impl From<CurveData> for TagData {
    fn from(v: CurveData) -> Self {
        TagData::Curve(v)
    }
}

impl From<MlucData> for TagData {
    fn from(v: MlucData) -> Self {
        TagData::MultiLocalizedUnicode(v)
    }
}

impl From<GenericData> for TagData {
    fn from(v: GenericData) -> Self {
        TagData::Generic(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_is_generic() {
        let data = [
            b'z', b'z', b'z', b'z', // type sig "zzzz"
            0, 0, 0, 0, // reserved
            1, 2, 3, 4, // payload
        ];

        let tag = TagData::decode(&data);
        assert_eq!(tag, TagData::Generic(GenericData::new(data)));
        assert_eq!(tag.type_signature(), Some(Signature::from_bytes(*b"zzzz")));
        assert_eq!(tag.encode().unwrap(), data);
    }

    #[test]
    fn test_short_known_types_fall_back() {
        let cases: [&[u8]; 4] = [
            b"text\0\0\0",
            b"XYZ \0\0\0\0\0\0\0\0",
            b"curv\0\0\0\0",
            b"mluc\0\0\0\0\0\0\0\x01",
        ];
        for data in cases {
            match TagData::decode(data) {
                TagData::Generic(raw) => assert_eq!(raw.bytes, data),
                other => panic!("Expected Generic, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_dispatch() {
        assert_eq!(TagData::decode(b"text\0\0\0\0abc").tag_type(), TagType::Text);
        let xyz = TagData::Xyz(Xyz::new(0.25, 0.5, 0.75));
        assert_eq!(TagData::decode(&xyz.encode().unwrap()), xyz);
        let curve = TagData::Curve(CurveData::new(vec![0.0, 1.0]));
        assert_eq!(TagData::decode(&curve.encode().unwrap()), curve);
    }

    #[test]
    fn test_decode_with_encoding() {
        let data = TagData::Text(TextData::new("Größe", TextEncoding::Utf16Be));
        let bytes = data.encode().unwrap();
        assert_eq!(TagData::decode_with(&bytes, TextEncoding::Utf16Be), data);
    }

    #[test]
    fn test_tag_type_from_signature() {
        assert_eq!(TagType::of(b"text"), TagType::Text);
        assert_eq!(TagType::of(b"XYZ "), TagType::Xyz);
        assert_eq!(TagType::of(b"curv"), TagType::Curve);
        assert_eq!(TagType::of(b"mluc"), TagType::MultiLocalizedUnicode);
        assert_eq!(TagType::of(b"abcd"), TagType::Unknown);
        assert_eq!(TagType::of(b"ab"), TagType::Unknown);
    }

    #[test]
    fn test_generic_display() {
        let raw = GenericData::new(vec![0x01, 0x02, 0x0A, 0xFF]);
        assert_eq!(raw.to_string(), "01 02 0A FF");
        assert_eq!(TagData::Generic(GenericData::default()).to_string(), "");
    }

    #[test]
    fn test_display_variants() {
        assert_eq!(
            TagData::Text(TextData::new("Example Media", TextEncoding::Utf8)).to_string(),
            "Example Media"
        );
        assert_eq!(
            TagData::Xyz(Xyz::new(1.0, 0.5, 0.25)).to_string(),
            "X: 1.0000, Y: 0.5000, Z: 0.2500"
        );
    }
}
