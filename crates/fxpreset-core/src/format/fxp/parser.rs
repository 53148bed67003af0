use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::error::FxpError;
use super::layout;
use super::reader::FxpReader;
use crate::format::common::reader::fourcc;
use crate::instrument::{Instrument, InterfaceFamily};

/// Payload encoding selected by the payload tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// `FxCk`: one big-endian `f32` per parameter.
    Regular,
    /// `FPCh`: length-prefixed blob interpreted by the instrument.
    OpaqueChunk,
}

impl PayloadKind {
    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            layout::REGULAR_MAGIC => Some(PayloadKind::Regular),
            layout::OPAQUE_CHUNK_MAGIC => Some(PayloadKind::OpaqueChunk),
            _ => None,
        }
    }

    pub fn magic(self) -> u32 {
        match self {
            PayloadKind::Regular => layout::REGULAR_MAGIC,
            PayloadKind::OpaqueChunk => layout::OPAQUE_CHUNK_MAGIC,
        }
    }
}

/// Fixed header fields of an fxp container.
#[derive(Debug, Clone, PartialEq)]
pub struct FxpHeader {
    /// Declared size of the remaining chunk. Informational only.
    pub byte_size: u32,
    pub payload: PayloadKind,
    pub version: u32,
    pub target_id: u32,
    pub target_version: u32,
    /// Only meaningful for [`PayloadKind::Regular`].
    pub parameter_count: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMismatch {
    pub preset: u32,
    pub instrument: u32,
}

/// What the decoder handed to the instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Parameters { count: u32 },
    Chunk { size: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPreset {
    pub header: FxpHeader,
    pub applied: Applied,
    pub version_mismatch: Option<VersionMismatch>,
}

/// Decode one preset from `stream` and apply it to `instrument`.
///
/// `source` names the preset in diagnostics (usually its path). The stream is
/// borrowed and never closed here.
///
/// Regular parameters are applied as soon as each value is read, so a stream
/// that ends early leaves the instrument holding the values before the cut.
///
/// # Errors
/// Returns [`FxpError`] at the first field that is short or fails validation.
pub fn decode_preset<R, I>(
    stream: &mut R,
    instrument: &mut I,
    source: &str,
) -> Result<LoadedPreset, FxpError>
where
    R: Read + ?Sized,
    I: Instrument + ?Sized,
{
    let mut reader = FxpReader::new(stream);
    decode_fields(&mut reader, instrument, source).inspect_err(|err| {
        if err.is_internal() {
            error!(preset = source, "internal error while loading preset: {err}");
        } else {
            error!(
                preset = source,
                offset = reader.position(),
                "failed to load preset: {err}"
            );
        }
    })
}

fn decode_fields<R, I>(
    reader: &mut FxpReader<'_, R>,
    instrument: &mut I,
    source: &str,
) -> Result<LoadedPreset, FxpError>
where
    R: Read + ?Sized,
    I: Instrument + ?Sized,
{
    let chunk_magic = reader.read_u32_be("chunk magic")?;
    if chunk_magic != layout::CHUNK_MAGIC {
        return Err(FxpError::BadMagic { value: chunk_magic });
    }

    let byte_size = reader.read_u32_be("byte size")?;
    debug!("preset has {byte_size} bytes in main chunk");

    let payload_magic = reader.read_u32_be("payload magic")?;
    let payload = PayloadKind::from_magic(payload_magic)
        .ok_or(FxpError::BadPayloadTag { value: payload_magic })?;

    let version = reader.read_u32_be("version")?;

    let target_id = reader.read_u32_be("target id")?;
    debug!("preset target id is '{}'", fourcc(target_id));
    if target_id != instrument.unique_id() {
        return Err(FxpError::IncompatiblePreset {
            preset: source.to_string(),
            instrument: instrument.name().to_string(),
            preset_id: target_id,
            instrument_id: instrument.unique_id(),
        });
    }

    let target_version = reader.read_u32_be("target version")?;
    let version_mismatch = if target_version != instrument.version() {
        warn!(
            "instrument has version {}, but preset has version {target_version}; \
             loading this preset may result in unexpected behavior",
            instrument.version()
        );
        Some(VersionMismatch {
            preset: target_version,
            instrument: instrument.version(),
        })
    } else {
        debug!("preset version is {target_version}");
        None
    };

    let parameter_count = reader.read_u32_be("parameter count")?;
    debug!("preset has {parameter_count} parameters");

    let name = reader.read_name()?;
    debug!("preset name is '{name}'");

    let header = FxpHeader {
        byte_size,
        payload,
        version,
        target_id,
        target_version,
        parameter_count,
        name,
    };

    let applied = match payload {
        PayloadKind::Regular => apply_parameters(reader, instrument, parameter_count)?,
        PayloadKind::OpaqueChunk => apply_chunk(reader, instrument)?,
    };

    Ok(LoadedPreset {
        header,
        applied,
        version_mismatch,
    })
}

fn apply_parameters<R, I>(
    reader: &mut FxpReader<'_, R>,
    instrument: &mut I,
    count: u32,
) -> Result<Applied, FxpError>
where
    R: Read + ?Sized,
    I: Instrument + ?Sized,
{
    for index in 0..count {
        let value = reader.read_f32_be("parameter data")?;
        instrument.set_parameter(index, value);
    }
    Ok(Applied::Parameters { count })
}

fn apply_chunk<R, I>(reader: &mut FxpReader<'_, R>, instrument: &mut I) -> Result<Applied, FxpError>
where
    R: Read + ?Sized,
    I: Instrument + ?Sized,
{
    let size = reader.read_u32_be("chunk size")? as usize;
    if size == 0 {
        return Err(FxpError::EmptyChunk);
    }
    debug!("preset has chunk of {size} bytes");

    let chunk = reader.read_bytes("chunk", size)?;

    match instrument.interface_family() {
        InterfaceFamily::ChunkCapable => {
            instrument.set_chunk(&chunk);
            Ok(Applied::Chunk { size })
        }
        family => Err(FxpError::UnsupportedTargetKind { family }),
    }
}
