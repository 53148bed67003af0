use std::io::{ErrorKind, Read};

use super::error::FxpError;
use super::layout;
use crate::format::common::reader::nul_terminated_string;

/// Sequential big-endian reader over a borrowed preset stream.
///
/// Every read either yields the whole field or fails with
/// [`FxpError::TruncatedRead`] naming the field that came up short.
pub struct FxpReader<'a, R: Read + ?Sized> {
    inner: &'a mut R,
    position: u64,
}

impl<'a, R: Read + ?Sized> FxpReader<'a, R> {
    pub fn new(inner: &'a mut R) -> Self {
        Self { inner, position: 0 }
    }

    /// Bytes consumed from the stream so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn read_u32_be(&mut self, field: &'static str) -> Result<u32, FxpError> {
        let bytes = self.read_array::<{ layout::FIELD_LEN }>(field)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Swaps the bit pattern, the value itself is never re-encoded.
    pub fn read_f32_be(&mut self, field: &'static str) -> Result<f32, FxpError> {
        self.read_u32_be(field).map(f32::from_bits)
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], FxpError> {
        let mut buf = [0u8; N];
        let actual = self.fill(&mut buf)?;
        if actual != N {
            return Err(FxpError::TruncatedRead {
                field,
                needed: N,
                actual,
            });
        }
        Ok(buf)
    }

    /// Read exactly `len` bytes. The buffer grows with the data actually
    /// present, so an oversized declared length fails without allocating it.
    pub fn read_bytes(&mut self, field: &'static str, len: usize) -> Result<Vec<u8>, FxpError> {
        let mut buf = Vec::new();
        let result = (&mut *self.inner).take(len as u64).read_to_end(&mut buf);
        // Bytes read before a failure still count towards the position.
        self.position += buf.len() as u64;
        let actual = result?;
        if actual != len {
            return Err(FxpError::TruncatedRead {
                field,
                needed: len,
                actual,
            });
        }
        Ok(buf)
    }

    pub fn read_name(&mut self) -> Result<String, FxpError> {
        let raw = self.read_array::<{ layout::NAME_LEN }>("preset name")?;
        Ok(nul_terminated_string(&raw))
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, FxpError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FxpError::Io(err)),
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }
}
