//! Fixed-point finalization of size and checksum header fields
//!
//! A container's header carries its own total size and a CRC32 of its own bytes.
//! [`finalize`] serializes the container up to three times until both fields
//! are stable:
//!
//! 1. filesize and CRC zeroed, measure the length and store it as filesize
//! 2. CRC32 over the bytes with the CRC field still zero, store it
//! 3. produce the final bytes
//!
//! The container is consumed so no stage can append after its size was fixed.

use super::checksums::crc32;
use super::codec::ByteWriter;
use crate::exceptions::{ChannelError, Result, to_u32};
use log::{debug, trace};

/// Byte offset of the CRC32 field in checksummed container headers
pub const CRC_FIELD_OFFSET: usize = 8;

/// Byte offset of the filesize field in every container header
pub const FILESIZE_FIELD_OFFSET: usize = 4;

/// A serializable container with self-describing size (and optionally CRC) fields
pub trait Container {
    /// Whether the header has a CRC32 field
    const CHECKSUMMED: bool = true;

    /// Name used in log lines
    fn describe(&self) -> String;

    /// Exact length [`Container::write_all`] will produce
    fn serialized_len(&self) -> usize;

    fn set_filesize(&mut self, filesize: u32);

    fn set_crc32(&mut self, _crc: u32) {}

    /// Serialize the whole container, header first
    fn write_all(&self, w: &mut ByteWriter) -> Result<()>;
}

/// Final bytes of a container plus the header values they carry
#[derive(Debug, Clone)]
pub struct Finalized {
    pub bytes: Vec<u8>,
    pub filesize: u32,
    pub crc32: u32,
}

fn serialize<C: Container>(container: &C) -> Result<Vec<u8>> {
    let mut w = ByteWriter::with_capacity(container.serialized_len());
    container.write_all(&mut w)?;
    Ok(w.into_inner())
}

/// Stabilize filesize and CRC32, returning the bytes to compress and write
pub fn finalize<C: Container>(mut container: C) -> Result<Finalized> {
    let name = container.describe();

    // Pass 1: measure
    container.set_filesize(0);
    container.set_crc32(0);
    let measured = serialize(&container)?;
    let expected = container.serialized_len();
    if measured.len() != expected {
        return Err(ChannelError::Encoding(format!(
            "{name}: serialized {} bytes but offsets account for {expected}",
            measured.len()
        )));
    }
    let filesize = to_u32(measured.len(), "container size")?;
    container.set_filesize(filesize);
    trace!("📏 {name}: filesize {filesize}");

    // Pass 2: checksum with the CRC field zero
    let crc = if C::CHECKSUMMED {
        let sized = serialize(&container)?;
        let crc = crc32(&sized);
        container.set_crc32(crc);
        crc
    } else {
        0
    };

    // Pass 3: final bytes
    let bytes = serialize(&container)?;
    if bytes.len() != measured.len() {
        return Err(ChannelError::Encoding(format!(
            "{name}: size changed between passes ({} -> {})",
            measured.len(),
            bytes.len()
        )));
    }

    debug!("🔒 Finalized {name}: {filesize} bytes, crc32 {crc:#010x}");
    Ok(Finalized {
        bytes,
        filesize,
        crc32: crc,
    })
}

/// Recompute the CRC of finalized bytes with the CRC field zeroed
pub fn verify_crc(bytes: &[u8]) -> Option<u32> {
    let field = bytes.get(CRC_FIELD_OFFSET..CRC_FIELD_OFFSET + 4)?;
    let stored = u32::from_be_bytes([field[0], field[1], field[2], field[3]]);

    let mut zeroed = bytes.to_vec();
    zeroed[CRC_FIELD_OFFSET..CRC_FIELD_OFFSET + 4].fill(0);
    (crc32(&zeroed) == stored).then_some(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Sample {
        filesize: u32,
        crc: u32,
        body: Vec<u8>,
    }

    impl Container for Sample {
        fn describe(&self) -> String {
            "sample".to_string()
        }

        fn serialized_len(&self) -> usize {
            12 + self.body.len()
        }

        fn set_filesize(&mut self, filesize: u32) {
            self.filesize = filesize;
        }

        fn set_crc32(&mut self, crc: u32) {
            self.crc = crc;
        }

        fn write_all(&self, w: &mut ByteWriter) -> Result<()> {
            w.u32(0xFEED_0006);
            w.u32(self.filesize);
            w.u32(self.crc);
            w.bytes(&self.body);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Miscounted;

    impl Container for Miscounted {
        fn describe(&self) -> String {
            "miscounted".to_string()
        }

        fn serialized_len(&self) -> usize {
            3
        }

        fn set_filesize(&mut self, _filesize: u32) {}

        fn write_all(&self, w: &mut ByteWriter) -> Result<()> {
            w.zeros(4);
            Ok(())
        }
    }

    #[test]
    fn test_size_and_crc_reach_fixed_point() {
        let sample = Sample {
            filesize: 99,
            crc: 99,
            body: b"nintendo channel".to_vec(),
        };
        let finalized = finalize(sample).unwrap();

        assert_eq!(finalized.filesize as usize, finalized.bytes.len());
        assert_eq!(
            &finalized.bytes[FILESIZE_FIELD_OFFSET..FILESIZE_FIELD_OFFSET + 4],
            &finalized.filesize.to_be_bytes()
        );
        assert_eq!(verify_crc(&finalized.bytes), Some(finalized.crc32));
    }

    #[test]
    fn test_offset_mismatch_is_an_encoding_error() {
        let err = finalize(Miscounted).unwrap_err();
        assert!(matches!(err, ChannelError::Encoding(_)));
    }

    #[test]
    fn test_tampered_bytes_fail_verification() {
        let finalized = finalize(Sample {
            filesize: 0,
            crc: 0,
            body: vec![1, 2, 3],
        })
        .unwrap();
        let mut bytes = finalized.bytes;
        bytes[12] ^= 0xFF;
        assert_eq!(verify_crc(&bytes), None);
    }
}
