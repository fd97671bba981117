//! CRC32 (IEEE) over serialized containers

use crc32fast::Hasher;

/// CRC32 of a complete buffer
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Info file id derived from a title identifier
pub fn file_id(title_id: &str) -> u32 {
    crc32(title_id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_check_value() {
        // Standard CRC-32 check value
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_file_id_is_stable() {
        assert_eq!(file_id("RSPE"), file_id("RSPE"));
        assert_ne!(file_id("RSPE"), file_id("RSPP"));
    }
}
