//! Synthetic profiles
//!
//! [`ProfileBuilder`] lays out a header, a tag directory and payload slots
//! with known offsets. Slots start on 4-byte boundaries and may be larger
//! than their payload, leaving zero padding as real profiles often do.

use icc_codec::{CurveData, GenericData, MlucData, Signature, TagData, TextData, TextEncoding, Xyz};

const HEADER_SIZE: usize = 128;

struct Slot {
    signature: Signature,
    payload: Vec<u8>,
    size: u32,
    /// Index of an earlier slot whose bytes this entry points at
    shares: Option<usize>,
}

/// Builds profile bytes with a predictable layout
pub struct ProfileBuilder {
    header: [u8; HEADER_SIZE],
    slots: Vec<Slot>,
    trailing: usize,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    /// A v4.3 RGB display profile header with no tags
    pub fn new() -> Self {
        let mut header = [0u8; HEADER_SIZE];
        header[4..8].copy_from_slice(b"lcms");
        header[8] = 4;
        header[9] = 0x30;
        header[12..16].copy_from_slice(b"mntr");
        header[16..20].copy_from_slice(b"RGB ");
        header[20..24].copy_from_slice(b"XYZ ");
        for (i, v) in [2024u16, 3, 15, 12, 30, 45].iter().enumerate() {
            header[24 + i * 2..26 + i * 2].copy_from_slice(&v.to_be_bytes());
        }
        header[36..40].copy_from_slice(b"acsp");
        header[40..44].copy_from_slice(b"APPL");
        // D50 illuminant, as stored by most profiles
        header[68..72].copy_from_slice(&0x0000_F6D6u32.to_be_bytes());
        header[72..76].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        header[76..80].copy_from_slice(&0x0000_D32Du32.to_be_bytes());
        header[80..84].copy_from_slice(b"lcms");
        Self {
            header,
            slots: Vec::new(),
            trailing: 0,
        }
    }

    /// Overwrite header bytes starting at `offset`
    pub fn header_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.header[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Add a tag whose slot is exactly the encoded payload
    pub fn tag(self, signature: Signature, data: &TagData) -> Self {
        let payload = encode(data);
        let size = payload.len() as u32;
        self.raw_tag(signature, payload, size)
    }

    /// Add a tag with a slot of `size` bytes, zero-padded past the payload
    pub fn tag_in_slot(self, signature: Signature, data: &TagData, size: u32) -> Self {
        self.raw_tag(signature, encode(data), size)
    }

    pub fn raw_tag(mut self, signature: Signature, payload: Vec<u8>, size: u32) -> Self {
        assert!(payload.len() <= size as usize, "payload larger than its slot");
        self.slots.push(Slot {
            signature,
            payload,
            size,
            shares: None,
        });
        self
    }

    /// Add a directory entry pointing at the slot of an earlier tag
    pub fn shared(mut self, signature: Signature, existing: Signature) -> Self {
        let index = self
            .slots
            .iter()
            .position(|s| s.signature == existing && s.shares.is_none())
            .expect("shared tag refers to an existing slot");
        let size = self.slots[index].size;
        self.slots.push(Slot {
            signature,
            payload: Vec::new(),
            size,
            shares: Some(index),
        });
        self
    }

    /// Append `len` zero bytes after the last slot
    pub fn trailing(mut self, len: usize) -> Self {
        self.trailing = len;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let table_end = HEADER_SIZE + 4 + self.slots.len() * 12;
        let mut offsets = Vec::with_capacity(self.slots.len());
        let mut next = align4(table_end);

        for slot in &self.slots {
            match slot.shares {
                Some(index) => offsets.push(offsets[index]),
                None => {
                    offsets.push(next);
                    next = align4(next + slot.size as usize);
                }
            }
        }

        let mut data = self.header.to_vec();
        data.extend_from_slice(&(self.slots.len() as u32).to_be_bytes());
        for (slot, offset) in self.slots.iter().zip(&offsets) {
            data.extend_from_slice(slot.signature.as_bytes());
            data.extend_from_slice(&(*offset as u32).to_be_bytes());
            data.extend_from_slice(&slot.size.to_be_bytes());
        }

        data.resize(next, 0);
        for (slot, offset) in self.slots.iter().zip(&offsets) {
            if slot.shares.is_none() {
                data[*offset..*offset + slot.payload.len()].copy_from_slice(&slot.payload);
            }
        }
        data.resize(next + self.trailing, 0);

        let size = data.len() as u32;
        data[0..4].copy_from_slice(&size.to_be_bytes());
        data
    }
}

fn encode(data: &TagData) -> Vec<u8> {
    data.encode().expect("fixture payload encodes")
}

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

/// Signature of the opaque tag in [`sample_profile`]
pub const PRIVATE_TAG: Signature = Signature::from_bytes(*b"zzzz");

/// A display profile with one tag of every payload kind:
///
/// | tag    | payload                          | slot |
/// |--------|----------------------------------|------|
/// | `desc` | text "Sample Display" (UTF-8)    | 64   |
/// | `cprt` | text "No copyright"              | 20   |
/// | `wtpt` | XYZ D50                          | 20   |
/// | `rTRC` | 16-point gamma 2.2 curve         | 44   |
/// | `gTRC` | shares the `rTRC` slot           | 44   |
/// | `dmnd` | mluc en-US, de-DE                | 96   |
/// | `zzzz` | opaque bytes                     | 12   |
pub fn sample_profile() -> Vec<u8> {
    let curve: Vec<f64> = (0..16).map(|i| (i as f64 / 15.0).powf(2.2)).collect();
    let mluc = MlucData::new()
        .with("en", "US", "Example Corp")
        .with("de", "DE", "Beispiel AG");

    ProfileBuilder::new()
        .tag_in_slot(
            Signature::DESC,
            &TagData::Text(TextData::new("Sample Display", TextEncoding::Utf8)),
            64,
        )
        .tag(
            Signature::COPYRIGHT,
            &TagData::Text(TextData::new("No copyright", TextEncoding::Utf8)),
        )
        .tag(Signature::MEDIA_WHITE, &TagData::Xyz(Xyz::D50))
        .tag(Signature::RED_TRC, &TagData::Curve(CurveData::new(curve)))
        .shared(Signature::GREEN_TRC, Signature::RED_TRC)
        .tag_in_slot(
            Signature::DEVICE_MFG_DESC,
            &TagData::MultiLocalizedUnicode(mluc),
            96,
        )
        .raw_tag(
            PRIVATE_TAG,
            GenericData::new(*b"zzzz\0\0\0\0\x01\x02\x03\x04").bytes,
            12,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_layout() {
        let data = sample_profile();
        assert_eq!(
            u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize,
            data.len()
        );
        assert_eq!(u32::from_be_bytes([data[128], data[129], data[130], data[131]]), 7);
        // First slot starts right after the 7-entry table
        assert_eq!(&data[216..220], b"text");
    }

    #[test]
    fn test_shared_slot_offsets() {
        let data = ProfileBuilder::new()
            .tag(Signature::RED_TRC, &TagData::Curve(CurveData::new(vec![0.0, 1.0])))
            .shared(Signature::BLUE_TRC, Signature::RED_TRC)
            .build();
        assert_eq!(&data[136..140], &data[148..152]);
    }
}
