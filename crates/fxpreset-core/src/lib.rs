//! fxpreset core library for loading fxp presets into instruments.
//!
//! This crate implements the load pipeline used by the CLI: the preset layer
//! opens the file, the format decoders (layout/reader/parser) validate the
//! container header against the target instrument, and the payload is applied
//! either one parameter at a time or as a single opaque chunk. All file I/O
//! lives in `preset`; decoders only borrow an open stream.
//!
//! Invariants:
//! - Header fields are read in a fixed order and the first bad field aborts.
//! - Regular parameters are applied in index order as they are decoded.
//! - Chunk payloads are applied in one call, and only when complete.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use fxpreset_core::{MemoryInstrument, load_preset_file};
//!
//! let mut synth = MemoryInstrument::new("Vital", 0x5669_7461, 1);
//! let report = load_preset_file(Path::new("lead.fxp"), &mut synth)?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod format;
mod instrument;
mod preset;

pub use format::common::reader::fourcc;
pub use format::fxp::error::FxpError;
pub use format::fxp::{Applied, FxpHeader, LoadedPreset, PayloadKind, VersionMismatch, decode_preset};
pub use instrument::{Instrument, InterfaceFamily, MemoryInstrument};
pub use preset::{FxpPreset, Preset, PresetError, PresetKind, load_preset_file, new_preset};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Description of a preset after it was applied to an instrument.
///
/// # Examples
/// ```
/// use fxpreset_core::{FxpHeader, PayloadKind, make_stub_report};
///
/// let header = FxpHeader {
///     byte_size: 64,
///     payload: PayloadKind::Regular,
///     version: 1,
///     target_id: 0x5669_7461,
///     target_version: 1,
///     parameter_count: 0,
///     name: "Init".to_string(),
/// };
/// let report = make_stub_report("init.fxp", 60, &header);
/// assert_eq!(report.report_version, fxpreset_core::REPORT_VERSION);
/// assert_eq!(report.preset.target_id_fourcc, "Vita");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    pub preset: PresetSummary,
    /// Applied parameter values in index order (regular payloads).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<f32>>,
    /// Size of the applied chunk in bytes (opaque chunk payloads).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u64>,
    /// Non-fatal findings such as a version mismatch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the loader.
    pub path: String,
    pub bytes: u64,
}

/// Header fields of the loaded preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetSummary {
    pub name: String,
    pub payload: PayloadKind,
    pub format_version: u32,
    /// Declared chunk size; not checked against the file length.
    pub byte_size: u32,
    pub target_id: u32,
    /// `target_id` rendered as a four-character code.
    pub target_id_fourcc: String,
    pub target_version: u32,
    pub parameter_count: u32,
}

/// Build a report with header fields filled and no payload details.
pub fn make_stub_report(input_path: &str, input_bytes: u64, header: &FxpHeader) -> PresetReport {
    PresetReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "fxpreset".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        preset: PresetSummary {
            name: header.name.clone(),
            payload: header.payload,
            format_version: header.version,
            byte_size: header.byte_size,
            target_id: header.target_id,
            target_id_fourcc: fourcc(header.target_id),
            target_version: header.target_version,
            parameter_count: header.parameter_count,
        },
        parameters: None,
        chunk_size: None,
        warnings: vec![],
    }
}
