//! Public result model: one decode call yields a list of per-symbol results.
//!
//! The symbolic name tables in here mirror the quirc engine's numeric
//! constants; they are plain `match` mappings with no shared state.

use serde::Serialize;

/// Smallest QR symbol version.
pub const VERSION_MIN: u16 = 1;
/// Largest QR symbol version.
pub const VERSION_MAX: u16 = 40;

/// Result list of one decode call, in the engine's discovery order.
pub type CodeList = Vec<CodeResult>;

/// Outcome for a single located symbol: either an isolated error or the
/// decoded code. Never both; an errored symbol carries no metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CodeResult {
    Error { err: String },
    Code(DecodedCode),
}

impl CodeResult {
    pub fn is_err(&self) -> bool {
        matches!(self, CodeResult::Error { .. })
    }

    pub fn as_code(&self) -> Option<&DecodedCode> {
        match self {
            CodeResult::Code(code) => Some(code),
            CodeResult::Error { .. } => None,
        }
    }
}

/// One successfully decoded QR symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedCode {
    /// Symbol version, 1..=40.
    pub version: u16,
    pub ecc_level: EccLevel,
    /// XOR mask pattern index, 0..=7.
    pub mask: u8,
    pub mode: Mode,
    /// Declared character encoding of the payload, if the symbol carries an
    /// ECI segment with a known assignment number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eci: Option<&'static str>,
    /// Raw decoded bytes, exactly as long as the engine reported. BYTE-mode
    /// payloads are not necessarily valid text, so no string conversion
    /// happens here.
    pub data: Vec<u8>,
}

/// QR error-correction strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EccLevel {
    L,
    M,
    Q,
    H,
}

impl EccLevel {
    /// Maps the engine's numeric ECC level (quirc constants: M=0, L=1, H=2,
    /// Q=3).
    pub(crate) fn from_engine_value(value: u32) -> Self {
        match value {
            1 => EccLevel::L,
            2 => EccLevel::H,
            3 => EccLevel::Q,
            _ => EccLevel::M, // 0
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EccLevel::L => "L",
            EccLevel::M => "M",
            EccLevel::Q => "Q",
            EccLevel::H => "H",
        }
    }
}

/// QR data encoding mode of the decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Numeric,
    Alnum,
    Byte,
    Kanji,
}

impl Mode {
    /// Maps the engine's numeric data type (quirc constants: NUMERIC=1,
    /// ALPHA=2, BYTE=4, KANJI=8). Byte is the catch-all, being the generic
    /// mode.
    pub(crate) fn from_engine_value(value: u32) -> Self {
        match value {
            1 => Mode::Numeric,
            2 => Mode::Alnum,
            8 => Mode::Kanji,
            _ => Mode::Byte, // 4
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Numeric => "NUMERIC",
            Mode::Alnum => "ALNUM",
            Mode::Byte => "BYTE",
            Mode::Kanji => "KANJI",
        }
    }
}

/// Name for a known ECI assignment number. The numbering has gaps (3, 12, 14
/// are unassigned); unknown numbers are reported as absent, never defaulted.
pub fn eci_name(assignment: u32) -> Option<&'static str> {
    match assignment {
        1 => Some("ISO_8859_1"),
        2 => Some("IBM437"),
        4 => Some("ISO_8859_2"),
        5 => Some("ISO_8859_3"),
        6 => Some("ISO_8859_4"),
        7 => Some("ISO_8859_5"),
        8 => Some("ISO_8859_6"),
        9 => Some("ISO_8859_7"),
        10 => Some("ISO_8859_8"),
        11 => Some("ISO_8859_9"),
        13 => Some("WINDOWS_874"),
        15 => Some("ISO_8859_13"),
        17 => Some("ISO_8859_15"),
        20 => Some("SHIFT_JIS"),
        26 => Some("UTF_8"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_bounds() {
        assert_eq!(VERSION_MIN, 1);
        assert_eq!(VERSION_MAX, 40);
    }

    #[test]
    fn ecc_levels_follow_engine_numbering() {
        assert_eq!(EccLevel::from_engine_value(0), EccLevel::M);
        assert_eq!(EccLevel::from_engine_value(1), EccLevel::L);
        assert_eq!(EccLevel::from_engine_value(2), EccLevel::H);
        assert_eq!(EccLevel::from_engine_value(3), EccLevel::Q);
    }

    #[test]
    fn modes_follow_engine_numbering() {
        assert_eq!(Mode::from_engine_value(1), Mode::Numeric);
        assert_eq!(Mode::from_engine_value(2), Mode::Alnum);
        assert_eq!(Mode::from_engine_value(4), Mode::Byte);
        assert_eq!(Mode::from_engine_value(8), Mode::Kanji);
    }

    #[test]
    fn eci_table_has_explicit_gaps() {
        assert_eq!(eci_name(1), Some("ISO_8859_1"));
        assert_eq!(eci_name(20), Some("SHIFT_JIS"));
        assert_eq!(eci_name(26), Some("UTF_8"));
        for unassigned in [0, 3, 12, 14, 16, 18, 19, 21, 25, 27, 899] {
            assert_eq!(eci_name(unassigned), None, "eci {unassigned}");
        }
    }

    #[test]
    fn error_and_code_serialize_to_documented_shapes() {
        let err = CodeResult::Error {
            err: "ECC failure".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({ "err": "ECC failure" })
        );

        let code = CodeResult::Code(DecodedCode {
            version: 1,
            ecc_level: EccLevel::H,
            mask: 3,
            mode: Mode::Byte,
            eci: None,
            data: b"hi".to_vec(),
        });
        assert_eq!(
            serde_json::to_value(&code).unwrap(),
            serde_json::json!({
                "version": 1,
                "ecc_level": "H",
                "mask": 3,
                "mode": "BYTE",
                "data": [104, 105],
            })
        );
    }

    #[test]
    fn eci_serializes_only_when_present() {
        let code = CodeResult::Code(DecodedCode {
            version: 2,
            ecc_level: EccLevel::M,
            mask: 0,
            mode: Mode::Byte,
            eci: Some("UTF_8"),
            data: Vec::new(),
        });
        let value = serde_json::to_value(&code).unwrap();
        assert_eq!(value["eci"], serde_json::json!("UTF_8"));
    }
}
