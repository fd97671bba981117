//! Info file header

use super::super::codec::{ByteWriter, Record};
use super::super::constants::CONTAINER_VERSION;

/// Detailed rating pictures the header has room for
pub const DETAILED_RATING_PICTURES: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoHeader {
    pub filesize: u32,
    pub crc32: u32,
    pub file_id: u32,
    pub title_id: [u8; 4],
    pub country_code: u32,
    pub language_code: u32,
    pub picture_offset: u32,
    pub picture_size: u32,
    pub rating_picture_offset: u32,
    pub rating_picture_size: u32,
    /// (offset, size) of each detailed rating picture
    pub detailed_rating_pictures: [(u32, u32); DETAILED_RATING_PICTURES],
    pub times_played_table_offset: u32,
}

impl Record for InfoHeader {
    const SIZE: usize = 188;

    fn encode(&self, w: &mut ByteWriter) {
        w.u16(0);
        w.u8(CONTAINER_VERSION);
        w.u8(5);
        w.u32(self.filesize);
        w.u32(self.crc32);
        w.u32(self.file_id);
        w.bytes(&self.title_id);
        w.u32(self.country_code);
        w.u32(self.language_code);
        w.zeros(8);
        w.u32(self.picture_offset);
        w.u32(self.picture_size);
        w.u32(self.rating_picture_offset);
        w.u32(self.rating_picture_size);
        for (offset, size) in self.detailed_rating_pictures {
            w.u32(offset);
            w.u32(size);
        }
        w.zeros(8);
        w.u32(self.times_played_table_offset);
        w.zeros(68);
    }
}
