#![allow(dead_code)]

use fxpreset_core::format::fxp::layout;
use fxpreset_core::{Instrument, InterfaceFamily};

pub const SYNTH_ID: u32 = 0x5669_7461;
pub const SYNTH_VERSION: u32 = 10_105;

/// Hand-written fxp bytes for tests. Nothing in the library writes presets.
#[derive(Debug, Clone)]
pub struct FxpBuilder {
    chunk_magic: u32,
    payload_magic: u32,
    version: u32,
    target_id: u32,
    target_version: u32,
    name: [u8; layout::NAME_LEN],
    payload: Payload,
}

#[derive(Debug, Clone)]
enum Payload {
    Regular(Vec<f32>),
    Chunk { declared: u32, bytes: Vec<u8> },
}

impl FxpBuilder {
    pub fn regular(values: &[f32]) -> Self {
        Self::with_payload(layout::REGULAR_MAGIC, Payload::Regular(values.to_vec()))
    }

    pub fn chunk(bytes: &[u8]) -> Self {
        Self::with_payload(
            layout::OPAQUE_CHUNK_MAGIC,
            Payload::Chunk {
                declared: bytes.len() as u32,
                bytes: bytes.to_vec(),
            },
        )
    }

    fn with_payload(payload_magic: u32, payload: Payload) -> Self {
        let mut name = [0u8; layout::NAME_LEN];
        name[..4].copy_from_slice(b"Init");
        Self {
            chunk_magic: layout::CHUNK_MAGIC,
            payload_magic,
            version: 1,
            target_id: SYNTH_ID,
            target_version: SYNTH_VERSION,
            name,
            payload,
        }
    }

    pub fn chunk_magic(mut self, value: u32) -> Self {
        self.chunk_magic = value;
        self
    }

    pub fn payload_magic(mut self, value: u32) -> Self {
        self.payload_magic = value;
        self
    }

    pub fn target_id(mut self, value: u32) -> Self {
        self.target_id = value;
        self
    }

    pub fn target_version(mut self, value: u32) -> Self {
        self.target_version = value;
        self
    }

    pub fn name_field(mut self, field: [u8; layout::NAME_LEN]) -> Self {
        self.name = field;
        self
    }

    pub fn declared_chunk_len(mut self, declared: u32) -> Self {
        if let Payload::Chunk { bytes, .. } = self.payload {
            self.payload = Payload::Chunk { declared, bytes };
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let (count, body) = match &self.payload {
            Payload::Regular(values) => {
                let body: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
                (values.len() as u32, body)
            }
            Payload::Chunk { declared, bytes } => {
                let mut body = declared.to_be_bytes().to_vec();
                body.extend_from_slice(bytes);
                (0, body)
            }
        };
        // byteSize counts everything after the first two fields.
        let byte_size = (layout::PAYLOAD_OFFSET - 8 + body.len()) as u32;

        let mut out = Vec::with_capacity(layout::PAYLOAD_OFFSET + body.len());
        for field in [
            self.chunk_magic,
            byte_size,
            self.payload_magic,
            self.version,
            self.target_id,
            self.target_version,
            count,
        ] {
            out.extend_from_slice(&field.to_be_bytes());
        }
        out.extend_from_slice(&self.name);
        out.extend_from_slice(&body);
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetParameter(u32, f32),
    SetChunk(Vec<u8>),
}

/// Instrument that records every mutation in call order.
#[derive(Debug)]
pub struct RecordingInstrument {
    pub unique_id: u32,
    pub version: u32,
    pub family: InterfaceFamily,
    pub calls: Vec<Call>,
}

impl RecordingInstrument {
    pub fn new() -> Self {
        Self {
            unique_id: SYNTH_ID,
            version: SYNTH_VERSION,
            family: InterfaceFamily::ChunkCapable,
            calls: Vec::new(),
        }
    }
}

impl Instrument for RecordingInstrument {
    fn name(&self) -> &str {
        "Recording Synth"
    }

    fn unique_id(&self) -> u32 {
        self.unique_id
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_parameter(&mut self, index: u32, value: f32) {
        self.calls.push(Call::SetParameter(index, value));
    }

    fn set_chunk(&mut self, chunk: &[u8]) {
        self.calls.push(Call::SetChunk(chunk.to_vec()));
    }

    fn interface_family(&self) -> InterfaceFamily {
        self.family
    }
}
