//! Big-endian fixed-layout serialization shared by every container.
//!
//! Each record type knows its exact wire size; [`write_record`] checks that the
//! encoder produced exactly that many bytes so a layout mistake surfaces as an
//! [`ChannelError::Encoding`] instead of a silently shifted offset table.

use crate::exceptions::{ChannelError, Result};

/// A fixed-size record written field by field in declaration order
pub trait Record {
    /// Exact serialized size in bytes
    const SIZE: usize;

    /// Append this record to the writer
    fn encode(&self, w: &mut ByteWriter);
}

/// Growable big-endian output buffer
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Zero-filled reserved range
    pub fn zeros(&mut self, count: usize) {
        self.buf.resize(self.buf.len() + count, 0);
    }

    /// Fixed-length UTF-16 slot, one big-endian code unit at a time
    pub fn utf16(&mut self, units: &[u16]) {
        for unit in units {
            self.u16(*unit);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Write one record and verify its size
pub fn write_record<R: Record>(w: &mut ByteWriter, record: &R) -> Result<()> {
    let start = w.len();
    record.encode(w);
    let written = w.len() - start;
    if written != R::SIZE {
        return Err(ChannelError::Encoding(format!(
            "{} wrote {} bytes, layout requires {}",
            std::any::type_name::<R>(),
            written,
            R::SIZE
        )));
    }
    Ok(())
}

/// Write every record of a table in order
pub fn write_table<R: Record>(w: &mut ByteWriter, records: &[R]) -> Result<()> {
    for record in records {
        write_record(w, record)?;
    }
    Ok(())
}

/// Serialized size of a table
pub fn table_len<R: Record>(records: &[R]) -> usize {
    records.len() * R::SIZE
}

/// A bare u32 offset into another table (new titles, recommendations)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOffset(pub u32);

impl Record for TableOffset {
    const SIZE: usize = 4;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.0);
    }
}
