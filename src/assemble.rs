//! Converts engine per-symbol outcomes into the public result list.

use crate::codes::{self, CodeList, CodeResult, DecodedCode, EccLevel, Mode};
use crate::engine::SymbolOutcome;

/// By the time this runs, symbol iteration has already begun: every failure
/// stays in its own slot and the mapping never aborts.
pub(crate) fn assemble(outcomes: Vec<SymbolOutcome>) -> CodeList {
    outcomes.into_iter().map(code_result).collect()
}

fn code_result(outcome: SymbolOutcome) -> CodeResult {
    match outcome {
        SymbolOutcome::Failed(err) => CodeResult::Error { err },
        SymbolOutcome::Decoded(data) => {
            let mode = match data.data_type {
                Some(data_type) => Mode::from_engine_value(data_type as u32),
                // A symbol with no data segment (empty payload) reports no
                // type; byte is the generic mode.
                None => Mode::Byte,
            };
            CodeResult::Code(DecodedCode {
                version: data.version as u16,
                ecc_level: EccLevel::from_engine_value(data.ecc_level as u32),
                mask: data.mask as u8,
                mode,
                eci: data.eci.and_then(|eci| codes::eci_name(eci as u32)),
                data: data.payload,
            })
        }
    }
}
