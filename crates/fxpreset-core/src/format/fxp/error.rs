use thiserror::Error;

use crate::format::common::reader::fourcc;
use crate::instrument::InterfaceFamily;

/// Errors returned while decoding an fxp preset into an instrument.
///
/// # Examples
/// ```
/// use fxpreset_core::format::fxp::error::FxpError;
///
/// let err = FxpError::EmptyChunk;
/// assert!(err.to_string().contains("chunk of 0 bytes"));
/// ```
#[derive(Debug, Error)]
pub enum FxpError {
    #[error("short read at {field}: need {needed} bytes, got {actual}")]
    TruncatedRead {
        field: &'static str,
        needed: usize,
        actual: usize,
    },
    #[error("bad chunk magic: {value:#010x} ('{}')", tag(.value))]
    BadMagic { value: u32 },
    #[error("invalid payload tag: {value:#010x} ('{}')", tag(.value))]
    BadPayloadTag { value: u32 },
    #[error(
        "preset '{preset}' is not compatible with instrument '{instrument}' \
         (preset id '{}', instrument id '{}')",
        tag(.preset_id),
        tag(.instrument_id)
    )]
    IncompatiblePreset {
        preset: String,
        instrument: String,
        preset_id: u32,
        instrument_id: u32,
    },
    #[error("preset declares a chunk of 0 bytes")]
    EmptyChunk,
    #[error("internal error: chunk preset loaded into {family} instrument")]
    UnsupportedTargetKind { family: InterfaceFamily },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FxpError {
    /// Data errors describe the file; internal errors describe the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, FxpError::UnsupportedTargetKind { .. })
    }
}

fn tag(value: &u32) -> String {
    fourcc(*value)
}
