//! Seeded random inputs
//!
//! Generators for the property tests. Every generator takes the RNG so a
//! failing case can be replayed from its seed.

use icc_codec::{CurveData, MlucData, TextEncoding, Xyz};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Characters drawn for text in each encoding
const ASCII: &[char] = &['a', 'Z', '0', ' ', '-', '.', '~', '\t'];
const LATIN1: &[char] = &['é', 'ß', 'Ü', '©', '±', 'ÿ'];
const UNICODE: &[char] = &['Ω', 'ж', '例', '色', '€', '🎨'];

/// Deterministic RNG for `seed`
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// 1-4 printable ASCII characters, no spaces
pub fn signature_text(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(1..=4);
    (0..len)
        .map(|_| rng.gen_range(b'!'..=b'~') as char)
        .collect()
}

/// Text representable in `encoding`, without NUL characters
pub fn text(rng: &mut impl Rng, encoding: TextEncoding) -> String {
    let len = rng.gen_range(0..40);
    (0..len)
        .map(|_| {
            let pool: &[char] = match encoding {
                TextEncoding::Ascii => ASCII,
                TextEncoding::Latin1 if rng.gen_bool(0.5) => ASCII,
                TextEncoding::Latin1 => LATIN1,
                _ => match rng.gen_range(0..3) {
                    0 => ASCII,
                    1 => LATIN1,
                    _ => UNICODE,
                },
            };
            pool[rng.gen_range(0..pool.len())]
        })
        .collect()
}

/// A value representable as S15Fixed16
pub fn s15_value(rng: &mut impl Rng) -> f64 {
    rng.gen_range(-32768.0..32767.99)
}

pub fn xyz(rng: &mut impl Rng) -> Xyz {
    Xyz::new(
        rng.gen_range(0.0..2.0),
        rng.gen_range(0.0..2.0),
        rng.gen_range(0.0..2.0),
    )
}

/// Curve whose points are already on the u16 grid
pub fn quantized_curve(rng: &mut impl Rng) -> CurveData {
    let count = rng.gen_range(0..300);
    CurveData::new(
        (0..count)
            .map(|_| rng.gen_range(0..=u16::MAX) as f64 / 65535.0)
            .collect(),
    )
}

/// Up to 5 records with distinct locales
pub fn mluc(rng: &mut impl Rng) -> MlucData {
    const LOCALES: [(&str, &str); 6] = [
        ("en", "US"),
        ("en", "GB"),
        ("de", "DE"),
        ("fr", "FR"),
        ("ja", "JP"),
        ("zh", "CN"),
    ];
    let mut mluc = MlucData::new();
    for _ in 0..rng.gen_range(0..=5) {
        let (language, country) = LOCALES[rng.gen_range(0..LOCALES.len())];
        mluc.insert(language, country, text(rng, TextEncoding::Utf16Be));
    }
    mluc
}
