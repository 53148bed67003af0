use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tracing::{debug, error};

use super::{Preset, PresetError, PresetKind, ensure_compatible};
use crate::format::fxp::{LoadedPreset, decode_preset};
use crate::instrument::{Instrument, InterfaceFamily};

const COMPATIBLE_FAMILIES: &[InterfaceFamily] = &[InterfaceFamily::ChunkCapable];

/// An fxp preset file and the handle it is read through.
pub struct FxpPreset {
    path: PathBuf,
    name: String,
    file: Option<BufReader<File>>,
}

impl FxpPreset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            name,
            file: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Release the file handle. Safe to call repeatedly or after a failed load.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            debug!(preset = %self.path.display(), "closed preset file");
        }
    }
}

impl Preset for FxpPreset {
    fn kind(&self) -> PresetKind {
        PresetKind::Fxp
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn compatible_families(&self) -> &[InterfaceFamily] {
        COMPATIBLE_FAMILIES
    }

    fn open(&mut self) -> Result<(), PresetError> {
        let file = File::open(&self.path).map_err(|source| {
            error!(
                "preset '{}' could not be opened for reading: {source}",
                self.path.display()
            );
            PresetError::Open {
                path: self.path.clone(),
                source,
            }
        })?;
        self.file = Some(BufReader::new(file));
        Ok(())
    }

    fn load(&mut self, instrument: &mut dyn Instrument) -> Result<LoadedPreset, PresetError> {
        ensure_compatible(&*self, instrument.interface_family())?;
        let file = self.file.as_mut().ok_or(PresetError::NotOpen)?;
        let loaded = decode_preset(file, instrument, &self.name)?;
        self.name = loaded.header.name.clone();
        Ok(loaded)
    }

    fn free_extra_data(&mut self) {
        self.close();
    }
}
