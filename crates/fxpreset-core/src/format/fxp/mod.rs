//! fxp preset container decoding (`CcnK` chunk, `FxCk`/`FPCh` payloads).
//!
//! The parser reads seven big-endian header fields and a 28-byte name, then
//! either applies one `f32` per parameter or hands a length-prefixed blob to
//! the instrument. Reads are sequential over a borrowed stream; truncation at
//! any field is reported with the field name.
//!
//! Field offsets live in `layout`, stream conventions in `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{
    Applied, FxpHeader, LoadedPreset, PayloadKind, VersionMismatch, decode_preset,
};
