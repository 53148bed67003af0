//! Instrument-hosting interface consumed by preset decoders.
//!
//! The decoder never owns an instrument: it borrows one mutably for the
//! duration of a single load, which serializes loads per instance.

mod memory;

pub use memory::MemoryInstrument;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hosting interface family of a loaded instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceFamily {
    /// Accepts opaque state blobs through [`Instrument::set_chunk`].
    ChunkCapable,
    Other,
}

impl fmt::Display for InterfaceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceFamily::ChunkCapable => write!(f, "chunk-capable"),
            InterfaceFamily::Other => write!(f, "non-chunk"),
        }
    }
}

/// A loaded plugin instance that presets are applied to.
pub trait Instrument {
    fn name(&self) -> &str;
    fn unique_id(&self) -> u32;
    fn version(&self) -> u32;
    /// Out-of-range indices are the instrument's concern.
    fn set_parameter(&mut self, index: u32, value: f32);
    /// Only valid for [`InterfaceFamily::ChunkCapable`] instruments.
    fn set_chunk(&mut self, chunk: &[u8]);
    fn interface_family(&self) -> InterfaceFamily;
}
