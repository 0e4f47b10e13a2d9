//! XYZ Tag Type
//!
//! 'XYZ ' + 4 reserved bytes + one XYZNumber (3 x s15Fixed16). The tag's
//! directory size includes the 8-byte type header, so a single XYZ value
//! occupies 20 bytes.
//!
//! See ICC.1:2022 Section 10.31

use super::{PAYLOAD_HEADER_SIZE, write_payload_header};
use crate::Result;
use crate::icc::cursor::{ByteReader, ByteWriter};
use crate::icc::types::{S15Fixed16, Signature, Xyz};

/// Full payload size of a single-value XYZ tag
pub const XYZ_PAYLOAD_SIZE: usize = PAYLOAD_HEADER_SIZE + 12;

/// Decode the first XYZNumber of an 'XYZ ' payload
pub fn decode(payload: &[u8]) -> Option<Xyz> {
    if payload.len() < XYZ_PAYLOAD_SIZE {
        return None;
    }
    let mut r = ByteReader::new(&payload[PAYLOAD_HEADER_SIZE..XYZ_PAYLOAD_SIZE]);
    let x = r.read_i32().ok()?;
    let y = r.read_i32().ok()?;
    let z = r.read_i32().ok()?;
    Some(Xyz::new(
        S15Fixed16(x).to_f64(),
        S15Fixed16(y).to_f64(),
        S15Fixed16(z).to_f64(),
    ))
}

pub fn encode(xyz: &Xyz) -> Result<Vec<u8>> {
    let mut w = ByteWriter::with_capacity(XYZ_PAYLOAD_SIZE);
    write_payload_header(&mut w, Signature::XYZ_TYPE);
    w.write_i32(S15Fixed16::try_from_f64("XYZ x", xyz.x)?.0)?;
    w.write_i32(S15Fixed16::try_from_f64("XYZ y", xyz.y)?.0)?;
    w.write_i32(S15Fixed16::try_from_f64("XYZ z", xyz.z)?.0)?;
    Ok(w.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_decode_d50() {
        let data: [u8; 20] = [
            b'X', b'Y', b'Z', b' ', 0, 0, 0, 0, //
            0x00, 0x00, 0xF6, 0xD6, // X = 0.9642 (approximately)
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z = 0.8249 (approximately)
        ];

        let xyz = decode(&data).unwrap();
        assert!((xyz.x - 0.9642).abs() < 0.0001);
        assert_eq!(xyz.y, 1.0);
        assert!((xyz.z - 0.8249).abs() < 0.0001);

        assert_eq!(encode(&xyz).unwrap(), data);
    }

    #[test]
    fn test_negative_values() {
        let xyz = Xyz::new(-0.5, 2.25, -32768.0);
        let bytes = encode(&xyz).unwrap();
        assert_eq!(bytes.len(), XYZ_PAYLOAD_SIZE);
        assert_eq!(decode(&bytes).unwrap(), xyz);
    }

    #[test]
    fn test_too_small() {
        assert!(decode(b"XYZ \0\0\0\0\0\0\0\0").is_none());
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            encode(&Xyz::new(0.0, 40000.0, 0.0)),
            Err(Error::ValueOutOfRange { field: "XYZ y", .. })
        ));
    }
}
