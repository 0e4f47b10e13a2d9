//! multiLocalizedUnicodeType
//!
//! Layout:
//!
//! ```text
//! 0   'mluc'
//! 4   reserved
//! 8   record count
//! 12  record size (12)
//! 16  records: language(2) country(2) length(4) offset(4)
//! ..  UTF-16BE strings
//! ```
//!
//! String offsets are measured from byte 0 of the payload (the 'm' of
//! 'mluc'), on both read and write.
//!
//! Records are length then offset, as ICC.1 files store them, not the
//! offset-then-length order some format summaries list.
//!
//! See ICC.1:2022 Section 10.15

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::text::decode_utf16;
use super::{PAYLOAD_HEADER_SIZE, write_payload_header};
use crate::icc::cursor::{ByteReader, ByteWriter};
use crate::icc::types::Signature;
use crate::{Error, Result};

/// Payload header plus record count and record size
pub const MLUC_MIN_SIZE: usize = PAYLOAD_HEADER_SIZE + 8;

/// Size of a record as written
pub const MLUC_RECORD_SIZE: u32 = 12;

/// One localized string
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalizedString {
    /// ISO 639-1 language code, e.g. "en"
    pub language: String,
    /// ISO 3166-1 country code, e.g. "US"
    pub country: String,
    pub text: String,
}

/// Multi-localized Unicode data, in record order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MlucData {
    records: Vec<LocalizedString>,
}

impl MlucData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text for a locale; an existing entry keeps its position
    pub fn insert(
        &mut self,
        language: impl Into<String>,
        country: impl Into<String>,
        text: impl Into<String>,
    ) {
        let (language, country, text) = (language.into(), country.into(), text.into());
        match self
            .records
            .iter_mut()
            .find(|r| r.language == language && r.country == country)
        {
            Some(record) => record.text = text,
            None => self.records.push(LocalizedString {
                language,
                country,
                text,
            }),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(
        mut self,
        language: impl Into<String>,
        country: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(language, country, text);
        self
    }

    pub fn get(&self, language: &str, country: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.language == language && r.country == country)
            .map(|r| r.text.as_str())
    }

    /// First record, conventionally the primary (often en-US) text
    pub fn first(&self) -> Option<&LocalizedString> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocalizedString> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decode a full 'mluc' payload; `None` if any record or string lies
    /// outside it or is not valid UTF-16BE
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() < MLUC_MIN_SIZE {
            return None;
        }
        let mut r = ByteReader::new(payload);
        r.skip(PAYLOAD_HEADER_SIZE).ok()?;
        let count = r.read_u32().ok()? as u64;
        let record_size = r.read_u32().ok()? as u64;
        if record_size < MLUC_RECORD_SIZE as u64 {
            return None;
        }
        let table_len = count.checked_mul(record_size)?;
        if MLUC_MIN_SIZE as u64 + table_len > payload.len() as u64 {
            return None;
        }

        let mut records = Vec::with_capacity(count as usize);
        for i in 0..count {
            r.seek(MLUC_MIN_SIZE as u64 + i * record_size).ok()?;
            let language = ascii_code(r.read_bytes(2).ok()?)?;
            let country = ascii_code(r.read_bytes(2).ok()?)?;
            let length = r.read_u32().ok()? as usize;
            let offset = r.read_u32().ok()? as usize;

            let end = offset.checked_add(length)?;
            let text = decode_utf16(payload.get(offset..end)?, u16::from_be_bytes)?;
            records.push(LocalizedString {
                language,
                country,
                text,
            });
        }

        Some(Self { records })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let count = self.records.len();
        let table_end = MLUC_MIN_SIZE + count * MLUC_RECORD_SIZE as usize;

        let strings: Vec<Vec<u8>> = self
            .records
            .iter()
            .map(|r| r.text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            .collect();

        let total = table_end + strings.iter().map(Vec::len).sum::<usize>();
        if total > u32::MAX as usize {
            return Err(Error::out_of_range("mluc payload size", total));
        }

        let mut w = ByteWriter::with_capacity(total);
        write_payload_header(&mut w, Signature::MLUC_TYPE);
        w.write_u32(count as u32)?;
        w.write_u32(MLUC_RECORD_SIZE)?;

        let mut offset = table_end;
        for (record, s) in self.records.iter().zip(&strings) {
            w.write_bytes(&code_bytes("mluc language code", &record.language)?);
            w.write_bytes(&code_bytes("mluc country code", &record.country)?);
            w.write_u32(s.len() as u32)?;
            w.write_u32(offset as u32)?;
            offset += s.len();
        }
        for s in &strings {
            w.write_bytes(s);
        }

        Ok(w.into_inner())
    }
}

fn ascii_code(b: &[u8]) -> Option<String> {
    b.is_ascii()
        .then(|| b.iter().map(|&c| c as char).collect())
}

fn code_bytes(field: &'static str, code: &str) -> Result<[u8; 2]> {
    match code.as_bytes() {
        [a, b] if code.is_ascii() => Ok([*a, *b]),
        _ => Err(Error::invalid(field, code)),
    }
}

impl fmt::Display for MlucData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.records {
            writeln!(f, "{}-{}: {}", r.language, r.country, r.text)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MlucData {
    type Item = &'a LocalizedString;
    type IntoIter = std::slice::Iter<'a, LocalizedString>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
