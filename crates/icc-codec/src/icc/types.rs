//! ICC Profile Basic Types
//!
//! Four-character signatures, fixed-point numbers and the date/time record
//! shared by the header and the tag payloads.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Four-character ICC signature
///
/// Holds the raw on-disk bytes so a read/write cycle is byte-exact. `Display`
/// shows the trimmed form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature([u8; 4]);

impl Signature {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(b)
    }

    pub const fn from_u32(v: u32) -> Self {
        Self(v.to_be_bytes())
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// The untrimmed four bytes
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Parse text into a signature, right-padding with spaces.
    ///
    /// `field` names the value in the error.
    pub fn parse_field(field: &'static str, text: &str) -> Result<Self> {
        if !text.is_ascii() {
            return Err(Error::invalid(field, text));
        }
        let bytes = text.as_bytes();
        if bytes.len() > 4 {
            return Err(Error::FieldTooLong {
                field,
                max: 4,
                actual: bytes.len(),
            });
        }
        let mut out = [b' '; 4];
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// Display form: trailing spaces and NULs removed
    pub fn trimmed(&self) -> String {
        String::from_utf8_lossy(&self.0)
            .trim_end_matches([' ', '\0'])
            .to_string()
    }

    // Tag signatures
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const MEDIA_WHITE: Self = Self::from_bytes(*b"wtpt");
    pub const MEDIA_BLACK: Self = Self::from_bytes(*b"bkpt");
    pub const RED_COLORANT: Self = Self::from_bytes(*b"rXYZ");
    pub const GREEN_COLORANT: Self = Self::from_bytes(*b"gXYZ");
    pub const BLUE_COLORANT: Self = Self::from_bytes(*b"bXYZ");
    pub const RED_TRC: Self = Self::from_bytes(*b"rTRC");
    pub const GREEN_TRC: Self = Self::from_bytes(*b"gTRC");
    pub const BLUE_TRC: Self = Self::from_bytes(*b"bTRC");
    pub const GRAY_TRC: Self = Self::from_bytes(*b"kTRC");
    pub const DEVICE_MFG_DESC: Self = Self::from_bytes(*b"dmnd");
    pub const DEVICE_MODEL_DESC: Self = Self::from_bytes(*b"dmdd");

    // Payload type signatures
    pub const TEXT_TYPE: Self = Self::from_bytes(*b"text");
    pub const XYZ_TYPE: Self = Self::from_bytes(*b"XYZ ");
    pub const CURVE_TYPE: Self = Self::from_bytes(*b"curv");
    pub const MLUC_TYPE: Self = Self::from_bytes(*b"mluc");

    /// Profile file signature, 'acsp'
    pub const PROFILE_FILE: Self = Self::from_bytes(*b"acsp");
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trimmed())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_field("signature", s)
    }
}

impl From<[u8; 4]> for Signature {
    fn from(b: [u8; 4]) -> Self {
        Self(b)
    }
}

/// s15Fixed16Number - signed 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S15Fixed16(pub i32);

impl S15Fixed16 {
    const SCALE: f64 = 65536.0;

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Round `val * 65536` to the nearest representable value
    pub fn try_from_f64(field: &'static str, val: f64) -> Result<Self> {
        let scaled = (val * Self::SCALE).round();
        if !scaled.is_finite() || scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
            return Err(Error::out_of_range(field, val));
        }
        Ok(Self(scaled as i32))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }
}

/// Decode a u16 sample as a fraction of 65535
pub fn u16_to_unit(raw: u16) -> f64 {
    raw as f64 / 65535.0
}

/// Encode a fraction as a u16 sample, clamped to [0, 65535]
pub fn unit_to_u16(field: &'static str, val: f64) -> Result<u16> {
    if !val.is_finite() {
        return Err(Error::out_of_range(field, val));
    }
    Ok((val * 65535.0).round().clamp(0.0, 65535.0) as u16)
}

/// CIE XYZ triple as stored in XYZNumber
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// D50 as encoded in v4 profiles
    pub const D50: Self = Self::new(0.9642, 1.0, 0.8249);
}

impl fmt::Display for Xyz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {:.4}, Y: {:.4}, Z: {:.4}", self.x, self.y, self.z)
    }
}

/// dateTimeNumber - ICC date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTime {
    pub const fn new(year: u16, month: u16, day: u16, hour: u16, minute: u16, second: u16) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for DateTime {
    type Err = Error;

    /// Parses `YYYY-MM-DD HH:MM:SS`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid("creation date/time", s);

        let (date, time) = s.split_once(' ').ok_or_else(invalid)?;
        let date: Vec<&str> = date.split('-').collect();
        let time: Vec<&str> = time.split(':').collect();
        if date.len() != 3 || time.len() != 3 {
            return Err(invalid());
        }

        let field = |part: &str, width: usize| -> Result<u16> {
            if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u16>().map_err(|_| invalid())
        };

        Ok(Self {
            year: field(date[0], 4)?,
            month: field(date[1], 2)?,
            day: field(date[2], 2)?,
            hour: field(time[0], 2)?,
            minute: field(time[1], 2)?,
            second: field(time[2], 2)?,
        })
    }
}
