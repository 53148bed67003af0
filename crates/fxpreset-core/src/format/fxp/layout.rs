pub const CHUNK_MAGIC_RANGE: std::ops::Range<usize> = 0..4;
pub const BYTE_SIZE_RANGE: std::ops::Range<usize> = 4..8;
pub const PAYLOAD_MAGIC_RANGE: std::ops::Range<usize> = 8..12;
pub const VERSION_RANGE: std::ops::Range<usize> = 12..16;
pub const TARGET_ID_RANGE: std::ops::Range<usize> = 16..20;
pub const TARGET_VERSION_RANGE: std::ops::Range<usize> = 20..24;
pub const PARAMETER_COUNT_RANGE: std::ops::Range<usize> = 24..28;
pub const NAME_RANGE: std::ops::Range<usize> = HEADER_LEN..HEADER_LEN + NAME_LEN;

/// Regular parameters or the opaque chunk length start here.
pub const PAYLOAD_OFFSET: usize = HEADER_LEN + NAME_LEN;

pub const HEADER_LEN: usize = 28;
pub const NAME_LEN: usize = 28;
pub const FIELD_LEN: usize = 4;

/// `CcnK`
pub const CHUNK_MAGIC: u32 = 0x4363_6E4B;
/// `FxCk`
pub const REGULAR_MAGIC: u32 = 0x4678_436B;
/// `FPCh`
pub const OPAQUE_CHUNK_MAGIC: u32 = 0x4650_4368;

pub const FILE_EXTENSION: &str = "fxp";
