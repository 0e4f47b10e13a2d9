//! textType
//!
//! 'text' + 4 reserved bytes + the text in a declared character encoding.
//! ICC requires 7-bit ASCII with a NUL terminator; editors in the wild also
//! store UTF-8 and UTF-16, so the encoding travels with the decoded value.
//!
//! See ICC.1:2022 Section 10.24

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{PAYLOAD_HEADER_SIZE, write_payload_header};
use crate::icc::cursor::ByteWriter;
use crate::icc::types::Signature;
use crate::{Error, Result};

/// Character encoding of a text payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    /// ISO-8859-1
    Latin1,
    Utf16Be,
    Utf16Le,
}

impl TextEncoding {
    /// Code unit width, used when stripping NUL padding
    fn unit(self) -> usize {
        match self {
            Self::Utf16Be | Self::Utf16Le => 2,
            _ => 1,
        }
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => {
                if !text.is_ascii() {
                    return Err(Error::invalid("ASCII text", text));
                }
                Ok(text.as_bytes().to_vec())
            }
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c as u32).map_err(|_| Error::invalid("Latin-1 text", text)))
                .collect(),
            Self::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
        }
    }

    /// Decode `bytes`, or `None` if they are not valid in this encoding
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| b as char).collect()),
            Self::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        })
    }
}

/// Decode UTF-16 code units; odd lengths and unpaired surrogates are rejected
pub(crate) fn decode_utf16(data: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }

    let utf16: Vec<u16> = data.chunks_exact(2).map(|c| unit([c[0], c[1]])).collect();

    String::from_utf16(&utf16).ok()
}

/// Text tag data
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextData {
    pub text: String,
    pub encoding: TextEncoding,
}

impl TextData {
    pub fn new(text: impl Into<String>, encoding: TextEncoding) -> Self {
        Self {
            text: text.into(),
            encoding,
        }
    }

    /// Decode a full 'text' payload. Trailing NUL code units are padding.
    ///
    /// For UTF-16 a single odd trailing zero byte is padding too, as left by
    /// zero-filling an odd-sized slot.
    pub fn decode(payload: &[u8], encoding: TextEncoding) -> Option<Self> {
        if payload.len() < PAYLOAD_HEADER_SIZE {
            return None;
        }
        let mut content = &payload[PAYLOAD_HEADER_SIZE..];
        let unit = encoding.unit();
        if content.len() % unit != 0 && content.last() == Some(&0) {
            content = &content[..content.len() - 1];
        }
        while content.len() >= unit && content[content.len() - unit..].iter().all(|&b| b == 0) {
            content = &content[..content.len() - unit];
        }

        let text = encoding.decode(content)?;
        Some(Self { text, encoding })
    }

    /// Encode to a full payload. Text ending in NUL is rejected, since the
    /// trailing NUL would be read back as padding.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.text.ends_with('\0') {
            return Err(Error::invalid("text ending in NUL", self.text.as_str()));
        }
        let content = self.encoding.encode(&self.text)?;
        let mut w = ByteWriter::with_capacity(PAYLOAD_HEADER_SIZE + content.len());
        write_payload_header(&mut w, Signature::TEXT_TYPE);
        w.write_bytes(&content);
        Ok(w.into_inner())
    }
}

impl fmt::Display for TextData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
