//! Round-trip properties over seeded random values
//!
//! Each test draws a few hundred values from a fixed seed; a failure message
//! includes the value so the case can be replayed.

use codec_tests::patterns::{self, rng};
use icc_codec::{
    CurveData, DateTime, MlucData, ProfileVersion, S15Fixed16, Signature, TagData, TextData,
    TextEncoding, u16_to_unit, unit_to_u16,
};
use rand::Rng;

const CASES: usize = 500;

#[test]
fn test_signature_text_round_trip() {
    let mut r = rng(0x5147);
    for _ in 0..CASES {
        let text = patterns::signature_text(&mut r);
        let sig = Signature::parse_field("signature", &text).unwrap();
        assert_eq!(sig.to_string(), text, "signature {:?}", text);
        assert_eq!(Signature::from_u32(sig.to_u32()), sig);
    }
}

#[test]
fn test_version_round_trip() {
    let mut r = rng(0x7645);
    for _ in 0..CASES {
        let (major, minor, bugfix) = (r.gen_range(0..=255u8), r.gen_range(0..16u8), r.gen_range(0..16u8));
        let text = format!("{}.{}.{}", major, minor, bugfix);
        let version: ProfileVersion = text.parse().unwrap();
        assert_eq!(version.to_string(), text);
        assert_eq!(ProfileVersion::from_bytes(version.to_bytes()), version);
    }
}

#[test]
fn test_s15fixed16_within_one_step() {
    let mut r = rng(0x5150);
    for _ in 0..CASES {
        let value = patterns::s15_value(&mut r);
        let fixed = S15Fixed16::try_from_f64("value", value).unwrap();
        assert!(
            (fixed.to_f64() - value).abs() <= 0.5 / 65536.0,
            "{} became {}",
            value,
            fixed.to_f64()
        );
        // Decoded values are exact on re-encode
        assert_eq!(S15Fixed16::try_from_f64("value", fixed.to_f64()).unwrap(), fixed);
    }
}

#[test]
fn test_u16_samples_are_stable() {
    for raw in (0..=u16::MAX).step_by(7).chain([u16::MAX]) {
        assert_eq!(unit_to_u16("sample", u16_to_unit(raw)).unwrap(), raw);
    }
}

#[test]
fn test_date_time_round_trip() {
    let mut r = rng(0xDA7E);
    for _ in 0..CASES {
        let dt = DateTime::new(
            r.gen_range(0..=9999),
            r.gen_range(1..=12),
            r.gen_range(1..=31),
            r.gen_range(0..24),
            r.gen_range(0..60),
            r.gen_range(0..60),
        );
        assert_eq!(dt.to_string().parse::<DateTime>().unwrap(), dt);
    }
}

#[test]
fn test_text_round_trip_per_encoding() {
    let mut r = rng(0x7E47);
    for encoding in [
        TextEncoding::Utf8,
        TextEncoding::Ascii,
        TextEncoding::Latin1,
        TextEncoding::Utf16Be,
        TextEncoding::Utf16Le,
    ] {
        for _ in 0..CASES / 5 {
            let data = TagData::Text(TextData::new(patterns::text(&mut r, encoding), encoding));
            let bytes = data.encode().unwrap();
            assert_eq!(TagData::decode_with(&bytes, encoding), data, "{:?}", data);
        }
    }
}

#[test]
fn test_quantized_curve_round_trip() {
    let mut r = rng(0xC0);
    for _ in 0..CASES / 5 {
        let curve = patterns::quantized_curve(&mut r);
        let bytes = curve.encode().unwrap();
        assert_eq!(bytes.len(), 12 + curve.points.len() * 2);
        assert_eq!(CurveData::decode(&bytes).unwrap(), curve);
    }
}

#[test]
fn test_xyz_within_one_step() {
    let mut r = rng(0x0A2);
    for _ in 0..CASES {
        let xyz = patterns::xyz(&mut r);
        let decoded = TagData::decode(&TagData::Xyz(xyz).encode().unwrap());
        let back = decoded.as_xyz().unwrap();
        for (a, b) in [(xyz.x, back.x), (xyz.y, back.y), (xyz.z, back.z)] {
            assert!((a - b).abs() <= 0.5 / 65536.0, "{} became {}", a, b);
        }
    }
}

#[test]
fn test_mluc_round_trip() {
    let mut r = rng(0x3117);
    for _ in 0..CASES / 5 {
        let mluc = patterns::mluc(&mut r);
        let bytes = mluc.encode().unwrap();
        assert_eq!(MlucData::decode(&bytes).unwrap(), mluc, "{:?}", mluc);
    }
}

#[test]
fn test_random_bytes_never_panic() {
    let mut r = rng(0xF022);
    let types: [&[u8; 4]; 5] = [b"text", b"XYZ ", b"curv", b"mluc", b"zzzz"];
    for _ in 0..CASES * 4 {
        let mut bytes = types[r.gen_range(0..types.len())].to_vec();
        let len = r.gen_range(0..64);
        bytes.extend((0..len).map(|_| r.gen_range(0..=255u8)));

        // Undecodable input keeps its bytes
        match TagData::decode(&bytes) {
            TagData::Generic(raw) => assert_eq!(raw.bytes, bytes),
            other => {
                let _ = other.encode();
            }
        }
    }
}
