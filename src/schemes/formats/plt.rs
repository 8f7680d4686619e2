//! Fixed-size binary palette (`.plt`).
//!
//! A PLT file is exactly 64 bytes: 16 records of red, green, blue, and one
//! ignored byte. Channels are 6-bit samples (0..=0x3f) that are rescaled to
//! 8 bits by replicating their top two bits into the new low bits.

use crate::color::Rgb;
use crate::scheme::{ColorScheme, SchemeParseOptions, COLOR_TABLE_SIZE};
use crate::schemes::SchemeParser;

const RECORD_SIZE: usize = 4;
const EXPECTED_FILE_SIZE: usize = COLOR_TABLE_SIZE * RECORD_SIZE;
const MAX_SAMPLE: u8 = 0x3f;

/// Clamp a raw channel byte to 6 bits and widen it to 8 bits.
///
/// Some files carry out-of-range samples; they are truncated to `0x3f`.
pub fn rescale_6bit(raw: u8) -> u8 {
    let sample = raw.min(MAX_SAMPLE);
    (sample << 2) | ((sample >> 4) & 0x3)
}

/// Parser for the binary PLT palette format.
#[derive(Debug, Default, Clone, Copy)]
pub struct PltSchemeParser;

impl SchemeParser for PltSchemeParser {
    fn name(&self) -> &'static str {
        "PLT File Parser"
    }

    fn file_extension(&self) -> &'static str {
        ".plt"
    }

    fn decode(
        &self,
        scheme_name: &str,
        bytes: &[u8],
        options: &SchemeParseOptions,
    ) -> Result<ColorScheme, String> {
        if bytes.len() != EXPECTED_FILE_SIZE {
            return Err(format!(
                "invalid PLT file: expected {EXPECTED_FILE_SIZE} bytes, found {}",
                bytes.len()
            ));
        }

        let mut table = [Rgb::BLACK; COLOR_TABLE_SIZE];
        for (entry, record) in table.iter_mut().zip(bytes.chunks_exact(RECORD_SIZE)) {
            // record[3] is alpha and never read.
            *entry = Rgb::new(
                rescale_6bit(record[0]),
                rescale_6bit(record[1]),
                rescale_6bit(record[2]),
            );
        }

        tracing::debug!(
            scheme = scheme_name,
            background = options.background_index(),
            foreground = options.foreground_index(),
            "decoded PLT palette"
        );
        Ok(ColorScheme::with_indexed_attributes(
            scheme_name,
            table,
            options,
        ))
    }
}
