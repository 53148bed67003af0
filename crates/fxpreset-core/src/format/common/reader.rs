/// Render a four-character code such as `CcnK`, escaping non-printable bytes.
pub fn fourcc(value: u32) -> String {
    value
        .to_be_bytes()
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                (b as char).to_string()
            } else {
                format!("\\x{:02x}", b)
            }
        })
        .collect()
}

/// Decode a null-padded text field. Bytes after the first NUL are ignored.
pub(crate) fn nul_terminated_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::{fourcc, nul_terminated_string};

    #[test]
    fn fourcc_printable() {
        assert_eq!(fourcc(0x4363_6E4B), "CcnK");
    }

    #[test]
    fn fourcc_escapes_control_bytes() {
        assert_eq!(fourcc(0x0000_4142), "\\x00\\x00AB");
    }

    #[test]
    fn nul_terminated_stops_at_first_nul() {
        let mut field = [0u8; 28];
        field[..8].copy_from_slice(b"MyPreset");
        field[9..12].copy_from_slice(b"xyz");
        assert_eq!(nul_terminated_string(&field), "MyPreset");
    }

    #[test]
    fn nul_terminated_without_nul_takes_all() {
        assert_eq!(nul_terminated_string(b"abcd"), "abcd");
    }
}
