//! Generic preset abstraction.
//!
//! A preset goes through `open` → `load` → `free_extra_data`. Formats are
//! selected by [`PresetKind`]; each kind has one [`Preset`] implementation.

mod fxp;

pub use fxp::FxpPreset;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::error;

use crate::format::fxp::error::FxpError;
use crate::format::fxp::{Applied, LoadedPreset, layout};
use crate::instrument::{Instrument, InterfaceFamily, MemoryInstrument};
use crate::{PresetReport, make_stub_report};

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset '{}' could not be opened for reading", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported preset format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("preset cannot be loaded into a {family} instrument")]
    IncompatibleFamily { family: InterfaceFamily },
    #[error("preset must be opened before it is loaded")]
    NotOpen,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] FxpError),
}

/// Preset container formats known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PresetKind {
    /// VST2-style fxProgram (`.fxp`).
    Fxp,
}

impl PresetKind {
    /// Guess the format from the file extension (case-insensitive).
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use fxpreset_core::PresetKind;
    ///
    /// assert_eq!(PresetKind::from_path(Path::new("pad.FXP")), Some(PresetKind::Fxp));
    /// assert_eq!(PresetKind::from_path(Path::new("pad.vital")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == layout::FILE_EXTENSION {
            Some(PresetKind::Fxp)
        } else {
            None
        }
    }
}

pub trait Preset {
    fn kind(&self) -> PresetKind;
    /// Display name; replaced by the embedded name once a load succeeds.
    fn name(&self) -> &str;
    fn compatible_families(&self) -> &[InterfaceFamily];
    fn is_compatible_with(&self, family: InterfaceFamily) -> bool {
        self.compatible_families().contains(&family)
    }
    fn open(&mut self) -> Result<(), PresetError>;
    fn load(&mut self, instrument: &mut dyn Instrument) -> Result<LoadedPreset, PresetError>;
    /// Release the file handle and any per-format state. Idempotent.
    fn free_extra_data(&mut self);
}

/// Reject instruments outside the preset's declared interface families.
pub(crate) fn ensure_compatible<P: Preset + ?Sized>(
    preset: &P,
    family: InterfaceFamily,
) -> Result<(), PresetError> {
    if preset.is_compatible_with(family) {
        return Ok(());
    }
    error!(preset = preset.name(), "preset cannot be loaded into a {family} instrument");
    Err(PresetError::IncompatibleFamily { family })
}

/// Create the preset record matching the file's format.
pub fn new_preset(path: &Path) -> Result<Box<dyn Preset>, PresetError> {
    match PresetKind::from_path(path) {
        Some(PresetKind::Fxp) => Ok(Box::new(FxpPreset::new(path))),
        None => Err(PresetError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Open, load and release a preset file, then describe the result.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use fxpreset_core::{MemoryInstrument, load_preset_file};
///
/// let mut synth = MemoryInstrument::new("Vital", 0x5669_7461, 1);
/// let report = load_preset_file(Path::new("lead.fxp"), &mut synth)?;
/// println!("loaded: {}", report.preset.name);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_preset_file(
    path: &Path,
    instrument: &mut MemoryInstrument,
) -> Result<PresetReport, PresetError> {
    let mut preset = new_preset(path)?;
    ensure_compatible(preset.as_ref(), instrument.interface_family())?;
    preset.open()?;
    let result = preset.load(instrument);
    preset.free_extra_data();
    let loaded = result?;

    let bytes = fs::metadata(path)?.len();
    let mut report = make_stub_report(&path.display().to_string(), bytes, &loaded.header);

    match loaded.applied {
        Applied::Parameters { count } => {
            report.parameters = Some(instrument.parameters()[..count as usize].to_vec());
        }
        Applied::Chunk { size } => report.chunk_size = Some(size as u64),
    }
    if let Some(mismatch) = loaded.version_mismatch {
        report.warnings.push(format!(
            "instrument has version {}, but preset has version {}",
            mismatch.instrument, mismatch.preset
        ));
    }
    Ok(report)
}
