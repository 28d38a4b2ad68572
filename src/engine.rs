//! Adapter around the quirc engine: feeds it a luminance buffer, walks the
//! located symbols in discovery order and applies the one-shot flip retry.

use log::debug;

use crate::pixels::PixelBuffer;

/// Raw outcome for one located symbol. Failures here are private to their
/// symbol; they never abort the scan.
pub(crate) enum SymbolOutcome {
    Decoded(quircs::Data),
    Failed(String),
}

/// Runs the engine's symbol-finding pass over the whole image and decodes
/// every located symbol. A fresh engine instance is allocated per call: the
/// engine is not re-entrant, and per-call state keeps concurrent decodes
/// fully independent.
pub(crate) fn scan(buffer: &PixelBuffer) -> Vec<SymbolOutcome> {
    let mut engine = quircs::Quirc::default();
    let codes = engine.identify(buffer.width(), buffer.height(), buffer.data());

    let mut outcomes = Vec::new();
    for extracted in codes {
        outcomes.push(match extracted {
            Ok(code) => decode_symbol(&code),
            Err(err) => SymbolOutcome::Failed(format!("failed to extract symbol: {err:?}")),
        });
    }

    debug!(
        "engine located {} symbol(s) in {}x{} image",
        outcomes.len(),
        buffer.width(),
        buffer.height()
    );
    outcomes
}

fn decode_symbol(code: &quircs::Code) -> SymbolOutcome {
    match code.decode() {
        Ok(data) => SymbolOutcome::Decoded(data),
        // An uncorrectable data-ECC failure on an extractable grid is what a
        // mirrored symbol looks like. One retry on the flipped grid, never
        // more; whatever error survives it belongs to this symbol alone.
        Err(quircs::DecodeError::DataEcc) => match flip(code).decode() {
            Ok(data) => SymbolOutcome::Decoded(data),
            Err(err) => SymbolOutcome::Failed(describe(err)),
        },
        Err(err) => SymbolOutcome::Failed(describe(err)),
    }
}

/// Mirrors an extracted cell grid along its main diagonal, recovering
/// symbols captured in mirrored orientation.
fn flip(code: &quircs::Code) -> quircs::Code {
    let mut flipped = code.clone();
    flipped.cell_bitmap.fill(0);
    let size = code.size as usize;
    for y in 0..size {
        for x in 0..size {
            if bitmap_bit(&code.cell_bitmap, y * size + x) {
                set_bitmap_bit(&mut flipped.cell_bitmap, x * size + y);
            }
        }
    }
    flipped
}

#[inline]
fn bitmap_bit(bitmap: &[u8], index: usize) -> bool {
    bitmap[index >> 3] & (1 << (index & 7)) != 0
}

#[inline]
fn set_bitmap_bit(bitmap: &mut [u8], index: usize) {
    bitmap[index >> 3] |= 1 << (index & 7);
}

/// Fixed per-failure messages, one per engine decode error.
fn describe(err: quircs::DecodeError) -> String {
    let msg = match err {
        quircs::DecodeError::InvalidGridSize => "invalid grid size",
        quircs::DecodeError::InvalidVersion => "invalid version",
        quircs::DecodeError::FormatEcc => "format data ECC failure",
        quircs::DecodeError::DataEcc => "ECC failure",
        // The variant name carries the upstream engine's spelling.
        quircs::DecodeError::UnkownDataType => "unknown data type",
        quircs::DecodeError::DataOverflow => "data overflow",
        quircs::DecodeError::DataUnderflow => "data underflow",
    };
    msg.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_bit_helpers_round_trip() {
        let mut bitmap = [0u8; 8];
        let set = [0usize, 1, 7, 8, 9, 30, 63];
        for &i in &set {
            set_bitmap_bit(&mut bitmap, i);
        }
        for i in 0..64 {
            assert_eq!(bitmap_bit(&bitmap, i), set.contains(&i), "bit {i}");
        }
    }

    #[test]
    fn decode_errors_map_to_fixed_messages() {
        assert_eq!(describe(quircs::DecodeError::InvalidGridSize), "invalid grid size");
        assert_eq!(describe(quircs::DecodeError::FormatEcc), "format data ECC failure");
        assert_eq!(describe(quircs::DecodeError::DataEcc), "ECC failure");
        assert_eq!(describe(quircs::DecodeError::UnkownDataType), "unknown data type");
    }

    #[test]
    fn empty_buffer_yields_no_symbols() {
        let buffer = PixelBuffer::new(64, 64, vec![255u8; 64 * 64]).unwrap();
        assert!(scan(&buffer).is_empty());
    }
}
