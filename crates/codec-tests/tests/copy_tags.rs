//! Copying tag payloads between profiles

use anyhow::Result;
use codec_tests::fixtures::PRIVATE_TAG;
use codec_tests::{ProfileBuilder, ScratchFile, sample_profile};
use icc_codec::{
    CopyReport, IccProfile, MlucData, Signature, TagData, TextData, TextEncoding, Xyz,
};

fn text(s: &str) -> TagData {
    TagData::Text(TextData::new(s, TextEncoding::Utf8))
}

#[test]
fn test_copy_into_matching_slots() -> Result<()> {
    let source = IccProfile::from_bytes(
        ProfileBuilder::new()
            .tag(Signature::DESC, &text("Copied Display"))
            .tag(Signature::MEDIA_WHITE, &TagData::Xyz(Xyz::new(0.95, 1.0, 1.09)))
            .tag(Signature::MEDIA_BLACK, &TagData::Xyz(Xyz::new(0.0, 0.0, 0.0)))
            .build(),
    )?;
    let mut target = IccProfile::from_bytes(sample_profile())?;

    let report = target.copy_tags_from(&source)?;
    assert_eq!(
        report,
        CopyReport {
            copied: vec![Signature::DESC, Signature::MEDIA_WHITE],
            missing: vec![Signature::MEDIA_BLACK],
            rejected: vec![],
        }
    );

    let desc = target.tag_by_signature(Signature::DESC).unwrap();
    assert_eq!(target.read_tag(&desc)?, text("Copied Display"));
    let wtpt = target.tag_by_signature(Signature::MEDIA_WHITE).unwrap();
    let white = *target.read_tag(&wtpt)?.as_xyz().unwrap();
    assert!((white.z - 1.09).abs() < 1e-4);
    Ok(())
}

#[test]
fn test_oversized_payload_is_rejected() -> Result<()> {
    let long_mluc = MlucData::new().with("en", "US", "A manufacturer name far too long for the slot it is copied into");
    let source = IccProfile::from_bytes(
        ProfileBuilder::new()
            .tag(Signature::DEVICE_MFG_DESC, &TagData::MultiLocalizedUnicode(long_mluc))
            .tag(Signature::COPYRIGHT, &text("Short"))
            .build(),
    )?;
    let mut target = IccProfile::from_bytes(sample_profile())?;
    let dmnd = target.tag_by_signature(Signature::DEVICE_MFG_DESC).unwrap();
    let before = target.read_tag(&dmnd)?;

    let report = target.copy_tags_from(&source)?;
    assert_eq!(report.rejected, [Signature::DEVICE_MFG_DESC]);
    assert_eq!(report.copied, [Signature::COPYRIGHT]);
    assert_eq!(target.read_tag(&dmnd)?, before);
    Ok(())
}

#[test]
fn test_copy_between_files() -> Result<()> {
    let source_file = ScratchFile::new("copy_src.icc", &sample_profile())?;
    let target_file = ScratchFile::new(
        "copy_dst.icc",
        &ProfileBuilder::new()
            .raw_tag(PRIVATE_TAG, vec![0; 12], 12)
            .raw_tag(Signature::RED_TRC, vec![0; 64], 64)
            .build(),
    )?;

    let source = IccProfile::open(source_file.path())?;
    let mut target = IccProfile::open(target_file.path())?;
    let report = target.copy_tags_from(&source)?;
    assert_eq!(report.copied, [Signature::RED_TRC, PRIVATE_TAG]);
    assert_eq!(report.missing.len(), 5);

    // Opaque payloads are copied byte for byte
    let reopened = IccProfile::open(target_file.path())?;
    let private = reopened.tag_by_signature(PRIVATE_TAG).unwrap();
    assert_eq!(
        reopened.read_tag(&private)?.encode()?,
        b"zzzz\0\0\0\0\x01\x02\x03\x04"
    );
    let trc = reopened.tag_by_signature(Signature::RED_TRC).unwrap();
    assert_eq!(reopened.read_tag(&trc)?.as_curve().unwrap().points.len(), 16);
    Ok(())
}

#[test]
fn test_copy_from_self_shape_is_identity() -> Result<()> {
    let source = IccProfile::from_bytes(sample_profile())?;
    let mut target = IccProfile::from_bytes(sample_profile())?;

    let report = target.copy_tags_from(&source)?;
    assert_eq!(report.copied.len(), 7);
    assert!(report.missing.is_empty() && report.rejected.is_empty());
    assert_eq!(target.as_bytes(), source.as_bytes());
    Ok(())
}
