use super::{Instrument, InterfaceFamily};

/// In-memory instrument that records whatever a preset applies to it.
///
/// # Examples
/// ```
/// use fxpreset_core::{Instrument, InterfaceFamily, MemoryInstrument};
///
/// let mut synth = MemoryInstrument::new("Vital", 0x5669_7461, 1);
/// synth.set_parameter(2, 0.25);
/// assert_eq!(synth.parameters(), &[0.0, 0.0, 0.25]);
/// assert_eq!(synth.interface_family(), InterfaceFamily::ChunkCapable);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryInstrument {
    name: String,
    unique_id: u32,
    version: u32,
    family: InterfaceFamily,
    parameters: Vec<f32>,
    chunk: Option<Vec<u8>>,
}

impl MemoryInstrument {
    pub fn new(name: impl Into<String>, unique_id: u32, version: u32) -> Self {
        Self {
            name: name.into(),
            unique_id,
            version,
            family: InterfaceFamily::ChunkCapable,
            parameters: Vec::new(),
            chunk: None,
        }
    }

    pub fn with_family(mut self, family: InterfaceFamily) -> Self {
        self.family = family;
        self
    }

    /// Parameter values indexed by parameter number; unset slots are `0.0`.
    pub fn parameters(&self) -> &[f32] {
        &self.parameters
    }

    pub fn chunk(&self) -> Option<&[u8]> {
        self.chunk.as_deref()
    }
}

impl Instrument for MemoryInstrument {
    fn name(&self) -> &str {
        &self.name
    }

    fn unique_id(&self) -> u32 {
        self.unique_id
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_parameter(&mut self, index: u32, value: f32) {
        let index = index as usize;
        if index >= self.parameters.len() {
            self.parameters.resize(index + 1, 0.0);
        }
        self.parameters[index] = value;
    }

    fn set_chunk(&mut self, chunk: &[u8]) {
        self.chunk = Some(chunk.to_vec());
    }

    fn interface_family(&self) -> InterfaceFamily {
        self.family
    }
}
