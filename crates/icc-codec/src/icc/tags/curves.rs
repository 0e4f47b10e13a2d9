//! curveType
//!
//! 'curv' + 4 reserved bytes + u32 entry count + count x u16 samples.
//! Samples are fractions of 65535. A count of zero is the identity curve and
//! a single entry is, per ICC, a u8Fixed8 gamma; both are kept as plain
//! sample lists here and interpreted on request.
//!
//! See ICC.1:2022 Section 10.6

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{PAYLOAD_HEADER_SIZE, write_payload_header};
use crate::icc::cursor::{ByteReader, ByteWriter};
use crate::icc::types::{Signature, u16_to_unit, unit_to_u16};
use crate::{Error, Result};

/// Smallest valid 'curv' payload: type header plus count
pub const CURVE_MIN_SIZE: usize = PAYLOAD_HEADER_SIZE + 4;

/// Curve tag data (curv type)
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveData {
    /// Samples in [0.0, 1.0]
    pub points: Vec<f64>,
}

impl CurveData {
    pub fn new(points: Vec<f64>) -> Self {
        Self { points }
    }

    /// Decode a full 'curv' payload; `None` if the samples run past the end
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() < CURVE_MIN_SIZE {
            return None;
        }
        let mut r = ByteReader::new(payload);
        r.skip(PAYLOAD_HEADER_SIZE).ok()?;
        let count = r.read_u32().ok()? as usize;
        if r.remaining() / 2 < count {
            return None;
        }

        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(u16_to_unit(r.read_u16().ok()?));
        }
        Some(Self { points })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let count = u32::try_from(self.points.len())
            .map_err(|_| Error::out_of_range("curve entry count", self.points.len()))?;

        let mut w = ByteWriter::with_capacity(CURVE_MIN_SIZE + self.points.len() * 2);
        write_payload_header(&mut w, Signature::CURVE_TYPE);
        w.write_u32(count)?;
        for &p in &self.points {
            w.write_u16(unit_to_u16("curve point", p)?)?;
        }
        Ok(w.into_inner())
    }

    /// Identity curve (no entries)
    pub fn is_identity(&self) -> bool {
        self.points.is_empty()
    }

    /// Gamma exponent of a single-entry curve, read back as u8Fixed8
    pub fn gamma(&self) -> Option<f64> {
        match self.points.as_slice() {
            [p] => Some(f64::from(unit_to_u16("curve point", *p).ok()?) / 256.0),
            _ => None,
        }
    }
}

impl fmt::Display for CurveData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Curve Points: {:?}", self.points)
    }
}
