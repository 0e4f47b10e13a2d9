//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2022 Section 7.2.
//!
//! The header is an immutable value. Edits go through [`HeaderBuilder`], which
//! takes the textual values an editor collects and validates them all at
//! [`HeaderBuilder::build`].

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::cursor::{ByteReader, ByteWriter};
use super::types::{DateTime, S15Fixed16, Signature, Xyz};
use crate::{Error, Result};

/// Size of the header record
pub const HEADER_SIZE: usize = 128;

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfileHeader {
    /// Profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: Signature,
    /// Profile version
    pub version: ProfileVersion,
    /// Device class (mntr, prtr, scnr, ...)
    pub device_class: Signature,
    /// Color space of data (RGB, CMYK, ...)
    pub color_space: Signature,
    /// Profile connection space (XYZ or Lab)
    pub pcs: Signature,
    /// Date and time profile was created
    pub creation_date_time: DateTime,
    /// Profile file signature, 'acsp' in a valid profile. Not enforced.
    pub signature: Signature,
    /// Primary platform signature
    pub primary_platform: Signature,
    /// Profile flags
    pub flags: i32,
    /// Device manufacturer signature
    pub manufacturer: Signature,
    /// Device model signature
    pub model: Signature,
    /// Device attributes
    pub attributes: i64,
    /// Rendering intent
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant
    pub illuminant: Xyz,
    /// Profile creator signature
    pub creator: Signature,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
    /// Bytes 100..128, carried through unchanged
    pub reserved: [u8; 28],
}

impl ProfileHeader {
    /// Parse header from the first 128 bytes of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::truncated(
                0,
                HEADER_SIZE as u64,
                data.len() as u64,
            ));
        }

        let mut r = ByteReader::new(&data[..HEADER_SIZE]);

        let size = r.read_u32()?;
        let cmm_type = r.read_signature()?;
        let version = ProfileVersion::from_bytes(r.read_u32()?.to_be_bytes());
        let device_class = r.read_signature()?;
        let color_space = r.read_signature()?;
        let pcs = r.read_signature()?;
        let creation_date_time = DateTime {
            year: r.read_u16()?,
            month: r.read_u16()?,
            day: r.read_u16()?,
            hour: r.read_u16()?,
            minute: r.read_u16()?,
            second: r.read_u16()?,
        };
        let signature = r.read_signature()?;
        let primary_platform = r.read_signature()?;
        let flags = r.read_i32()?;
        let manufacturer = r.read_signature()?;
        let model = r.read_signature()?;
        let attributes = r.read_i64()?;
        let rendering_intent = RenderingIntent::from_u32(r.read_u32()?);
        let illuminant = Xyz {
            x: S15Fixed16(r.read_i32()?).to_f64(),
            y: S15Fixed16(r.read_i32()?).to_f64(),
            z: S15Fixed16(r.read_i32()?).to_f64(),
        };
        let creator = r.read_signature()?;
        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(r.read_bytes(16)?);
        let mut reserved = [0u8; 28];
        reserved.copy_from_slice(r.read_bytes(28)?);

        Ok(Self {
            size,
            cmm_type,
            version,
            device_class,
            color_space,
            pcs,
            creation_date_time,
            signature,
            primary_platform,
            flags,
            manufacturer,
            model,
            attributes,
            rendering_intent,
            illuminant,
            creator,
            profile_id,
            reserved,
        })
    }

    /// Serialize into a full 128-byte record
    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE]> {
        let mut w = ByteWriter::with_capacity(HEADER_SIZE);

        w.write_u32(self.size)?;
        w.write_signature(self.cmm_type);
        w.write_bytes(&self.version.to_bytes());
        w.write_signature(self.device_class);
        w.write_signature(self.color_space);
        w.write_signature(self.pcs);
        let dt = &self.creation_date_time;
        for v in [dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second] {
            w.write_u16(v)?;
        }
        w.write_signature(self.signature);
        w.write_signature(self.primary_platform);
        w.write_i32(self.flags)?;
        w.write_signature(self.manufacturer);
        w.write_signature(self.model);
        w.write_i64(self.attributes)?;
        w.write_u32(self.rendering_intent.to_u32())?;
        w.write_i32(S15Fixed16::try_from_f64("illuminant X", self.illuminant.x)?.0)?;
        w.write_i32(S15Fixed16::try_from_f64("illuminant Y", self.illuminant.y)?.0)?;
        w.write_i32(S15Fixed16::try_from_f64("illuminant Z", self.illuminant.z)?.0)?;
        w.write_signature(self.creator);
        w.write_bytes(&self.profile_id);
        w.write_bytes(&self.reserved);

        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(&w.into_inner());
        Ok(out)
    }

    /// Start a copy-with edit of this header
    pub fn edit(&self) -> HeaderBuilder {
        HeaderBuilder::new(self.clone())
    }

    /// True when the file signature is 'acsp'
    pub fn has_valid_signature(&self) -> bool {
        self.signature == Signature::PROFILE_FILE
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub bugfix: u8,
}

impl ProfileVersion {
    /// Build a version, checking the nibble widths of minor and bugfix
    pub fn new(major: u8, minor: u8, bugfix: u8) -> Result<Self> {
        if minor > 0x0F {
            return Err(Error::out_of_range("version minor", minor));
        }
        if bugfix > 0x0F {
            return Err(Error::out_of_range("version bugfix", bugfix));
        }
        Ok(Self {
            major,
            minor,
            bugfix,
        })
    }

    /// Decode the 4 version bytes (the last two are reserved)
    pub fn from_bytes(b: [u8; 4]) -> Self {
        Self {
            major: b[0],
            minor: b[1] >> 4,
            bugfix: b[1] & 0x0F,
        }
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        [self.major, (self.minor << 4) | (self.bugfix & 0x0F), 0, 0]
    }

    /// Check if version is at least the specified version
    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

impl fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.bugfix)
    }
}

impl FromStr for ProfileVersion {
    type Err = Error;

    /// Parses `major.minor.bugfix`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3
            || parts
                .iter()
                .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(Error::invalid("version", s));
        }

        let component = |name: &'static str, part: &str, max: u64| -> Result<u8> {
            // All-digit strings only fail to parse on overflow
            let v = part
                .parse::<u64>()
                .map_err(|_| Error::out_of_range(name, part))?;
            if v > max {
                return Err(Error::out_of_range(name, v));
            }
            Ok(v as u8)
        };

        Ok(Self {
            major: component("version major", parts[0], 0xFF)?,
            minor: component("version minor", parts[1], 0x0F)?,
            bugfix: component("version bugfix", parts[2], 0x0F)?,
        })
    }
}

/// ICC Rendering Intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RenderingIntent {
    /// Perceptual - best for photographs
    #[default]
    Perceptual,
    /// Relative colorimetric - preserves in-gamut colors
    RelativeColorimetric,
    /// Saturation - maintains saturation
    Saturation,
    /// Absolute colorimetric - preserves white point
    AbsoluteColorimetric,
    /// Value outside 0..=3, kept so the header round-trips
    Unknown(u32),
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Self {
        match val {
            0 => Self::Perceptual,
            1 => Self::RelativeColorimetric,
            2 => Self::Saturation,
            3 => Self::AbsoluteColorimetric,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
            Self::Unknown(v) => *v,
        }
    }
}

impl fmt::Display for RenderingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perceptual => f.write_str("Perceptual"),
            Self::RelativeColorimetric => f.write_str("Relative Colorimetric"),
            Self::Saturation => f.write_str("Saturation"),
            Self::AbsoluteColorimetric => f.write_str("Absolute Colorimetric"),
            Self::Unknown(v) => write!(f, "Unknown ({v})"),
        }
    }
}

/// Copy-with editor for [`ProfileHeader`]
///
/// Text setters store the raw input; nothing is checked until `build`, which
/// reports the first invalid field.
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    base: ProfileHeader,
    cmm_type: Option<String>,
    version: Option<String>,
    device_class: Option<String>,
    color_space: Option<String>,
    pcs: Option<String>,
    creation_date_time: Option<String>,
    signature: Option<String>,
    primary_platform: Option<String>,
    manufacturer: Option<String>,
    model: Option<String>,
    creator: Option<String>,
}

impl HeaderBuilder {
    pub fn new(base: ProfileHeader) -> Self {
        Self {
            base,
            cmm_type: None,
            version: None,
            device_class: None,
            color_space: None,
            pcs: None,
            creation_date_time: None,
            signature: None,
            primary_platform: None,
            manufacturer: None,
            model: None,
            creator: None,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.base.size = size;
        self
    }

    pub fn cmm_type(mut self, v: impl Into<String>) -> Self {
        self.cmm_type = Some(v.into());
        self
    }

    /// `major.minor.bugfix`
    pub fn version(mut self, v: impl Into<String>) -> Self {
        self.version = Some(v.into());
        self
    }

    pub fn device_class(mut self, v: impl Into<String>) -> Self {
        self.device_class = Some(v.into());
        self
    }

    pub fn color_space(mut self, v: impl Into<String>) -> Self {
        self.color_space = Some(v.into());
        self
    }

    pub fn pcs(mut self, v: impl Into<String>) -> Self {
        self.pcs = Some(v.into());
        self
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn creation_date_time(mut self, v: impl Into<String>) -> Self {
        self.creation_date_time = Some(v.into());
        self
    }

    pub fn signature(mut self, v: impl Into<String>) -> Self {
        self.signature = Some(v.into());
        self
    }

    pub fn primary_platform(mut self, v: impl Into<String>) -> Self {
        self.primary_platform = Some(v.into());
        self
    }

    pub fn flags(mut self, flags: i32) -> Self {
        self.base.flags = flags;
        self
    }

    pub fn manufacturer(mut self, v: impl Into<String>) -> Self {
        self.manufacturer = Some(v.into());
        self
    }

    pub fn model(mut self, v: impl Into<String>) -> Self {
        self.model = Some(v.into());
        self
    }

    pub fn attributes(mut self, attributes: i64) -> Self {
        self.base.attributes = attributes;
        self
    }

    pub fn rendering_intent(mut self, intent: RenderingIntent) -> Self {
        self.base.rendering_intent = intent;
        self
    }

    pub fn illuminant(mut self, illuminant: Xyz) -> Self {
        self.base.illuminant = illuminant;
        self
    }

    pub fn creator(mut self, v: impl Into<String>) -> Self {
        self.creator = Some(v.into());
        self
    }

    /// Validate every pending text field and produce the new header
    pub fn build(self) -> Result<ProfileHeader> {
        fn sig(field: &'static str, text: Option<String>, current: Signature) -> Result<Signature> {
            match text {
                Some(t) => Signature::parse_field(field, &t),
                None => Ok(current),
            }
        }

        let base = self.base;
        Ok(ProfileHeader {
            cmm_type: sig("cmm type", self.cmm_type, base.cmm_type)?,
            version: match self.version {
                Some(v) => v.parse()?,
                None => base.version,
            },
            device_class: sig("device class", self.device_class, base.device_class)?,
            color_space: sig("color space", self.color_space, base.color_space)?,
            pcs: sig("pcs", self.pcs, base.pcs)?,
            creation_date_time: match self.creation_date_time {
                Some(v) => v.parse()?,
                None => base.creation_date_time,
            },
            signature: sig("signature", self.signature, base.signature)?,
            primary_platform: sig("primary platform", self.primary_platform, base.primary_platform)?,
            manufacturer: sig("manufacturer", self.manufacturer, base.manufacturer)?,
            model: sig("model", self.model, base.model)?,
            creator: sig("creator", self.creator, base.creator)?,
            ..base
        })
    }
}
