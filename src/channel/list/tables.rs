//! Fixed-size records of the download list tables

use super::super::codec::{ByteWriter, Record};
use super::super::constants::FILLER_BYTE;

/// Age rating with a pointer to its badge in the image blob
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    pub rating_id: u8,
    pub unknown: u8,
    pub age: u8,
    pub jpeg_offset: u32,
    pub jpeg_size: u32,
    pub name: [u16; 11],
}

impl Record for RatingEntry {
    const SIZE: usize = 34;

    fn encode(&self, w: &mut ByteWriter) {
        w.u8(self.rating_id);
        w.u8(self.unknown);
        w.u8(self.age);
        w.u8(FILLER_BYTE);
        w.u32(self.jpeg_offset);
        w.u32(self.jpeg_size);
        w.utf16(&self.name);
    }
}

/// Console / distribution channel of a title
#[derive(Debug, Clone, PartialEq)]
pub struct TitleTypeEntry {
    pub type_id: u8,
    pub console_model: [u8; 3],
    pub console_name: [u16; 102],
    pub group_id: u8,
}

impl Record for TitleTypeEntry {
    const SIZE: usize = 210;

    fn encode(&self, w: &mut ByteWriter) {
        w.u8(self.type_id);
        w.bytes(&self.console_model);
        w.utf16(&self.console_name);
        w.u8(self.group_id);
        w.u8(0);
    }
}

/// Developer and publisher pair referenced by titles and demos
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyEntry {
    pub id: u32,
    pub developer: [u16; 31],
    pub publisher: [u16; 31],
}

impl Record for CompanyEntry {
    const SIZE: usize = 128;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.id);
        w.utf16(&self.developer);
        w.utf16(&self.publisher);
    }
}

/// One game in the catalog listing
#[derive(Debug, Clone, PartialEq)]
pub struct TitleEntry {
    /// Info file id of the title
    pub id: u32,
    pub title_id: [u8; 4],
    pub title_type: u8,
    pub genre: [u8; 3],
    pub company_offset: u32,
    pub release_year: u16,
    pub release_month: u8,
    pub release_day: u8,
    pub rating_id: u8,
    pub title: [u16; 31],
    pub subtitle: [u16; 31],
    pub short_title: [u16; 31],
}

impl Record for TitleEntry {
    const SIZE: usize = 236;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.id);
        w.bytes(&self.title_id);
        w.u8(self.title_type);
        w.bytes(&self.genre);
        w.u32(self.company_offset);
        w.u16(self.release_year);
        w.u8(self.release_month);
        w.u8(self.release_day);
        w.u8(self.rating_id);
        w.zeros(29);
        w.utf16(&self.title);
        w.utf16(&self.subtitle);
        w.utf16(&self.short_title);
    }
}

/// Entry of the "Videos" menu
#[derive(Debug, Clone, PartialEq)]
pub struct VideoEntry {
    pub id: u32,
    pub length: u16,
    pub title_id: u32,
    pub video_type: u8,
    pub rating_id: u8,
    pub is_new: u8,
    /// Zero for the synthetic entry, then 1, 2, ...
    pub video_index: u8,
    pub title: [u16; 123],
}

impl Record for VideoEntry {
    const SIZE: usize = 278;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.id);
        w.u16(self.length);
        w.u32(self.title_id);
        w.u8(self.video_type);
        w.zeros(14);
        w.u8(0);
        w.u8(self.rating_id);
        w.u8(1);
        w.u8(self.is_new);
        w.u8(self.video_index);
        w.bytes(&[FILLER_BYTE, FILLER_BYTE]);
        w.utf16(&self.title);
    }
}

/// Entry of the "New Videos" menu
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideoEntry {
    pub id: u32,
    pub length: u16,
    pub title_id: u32,
    pub rating_id: u8,
    pub title: [u16; 102],
}

impl Record for NewVideoEntry {
    const SIZE: usize = 232;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.id);
        w.u16(self.length);
        w.u32(self.title_id);
        w.u8(8);
        w.u8(1);
        w.zeros(13);
        w.u8(0);
        w.u8(self.rating_id);
        w.u8(1);
        w.utf16(&self.title);
    }
}

/// A downloadable demo
#[derive(Debug, Clone, PartialEq)]
pub struct DemoEntry {
    pub id: u32,
    pub title: [u16; 31],
    pub subtitle: [u16; 31],
    pub title_id: u32,
    pub company_offset: u32,
    pub removal_year: u16,
    pub removal_month: u8,
    pub removal_day: u8,
    pub rating_id: u8,
    pub is_new: u8,
    pub new_id: u8,
}

impl Record for DemoEntry {
    const SIZE: usize = 352;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.id);
        w.utf16(&self.title);
        w.utf16(&self.subtitle);
        w.u32(self.title_id);
        w.u32(self.company_offset);
        w.u16(self.removal_year);
        w.u8(self.removal_month);
        w.u8(self.removal_day);
        w.zeros(4);
        w.u8(self.rating_id);
        w.u8(self.is_new);
        w.u8(self.new_id);
        w.zeros(205);
    }
}

/// Recommended title with its popularity medal
#[derive(Debug, Clone, PartialEq)]
pub struct RecentRecommendationEntry {
    pub title_offset: u32,
    pub medal: u8,
}

impl Record for RecentRecommendationEntry {
    const SIZE: usize = 6;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.title_offset);
        w.u8(self.medal);
        w.u8(FILLER_BYTE);
    }
}

/// Ranked entry of the "Popular Videos" menu
#[derive(Debug, Clone, PartialEq)]
pub struct PopularVideoEntry {
    pub id: u32,
    pub length: u16,
    pub title_id: u32,
    pub bar_color: u8,
    pub rating_id: u8,
    pub video_rank: u8,
    pub title: [u16; 102],
}

impl Record for PopularVideoEntry {
    const SIZE: usize = 234;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.id);
        w.u16(self.length);
        w.u32(self.title_id);
        w.u8(self.bar_color);
        w.zeros(15);
        w.u8(self.rating_id);
        w.u8(1);
        w.u8(self.video_rank);
        w.u8(FILLER_BYTE);
        w.utf16(&self.title);
    }
}

/// Content descriptor text for a rating
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedRatingEntry {
    pub rating_group: u8,
    pub rating_id: u8,
    pub title: [u16; 102],
}

impl Record for DetailedRatingEntry {
    const SIZE: usize = 206;

    fn encode(&self, w: &mut ByteWriter) {
        w.u8(self.rating_group);
        w.u8(self.rating_id);
        w.utf16(&self.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::codec::write_record;

    #[test]
    fn test_title_entry_layout() {
        let entry = TitleEntry {
            id: 0x0102_0304,
            title_id: *b"RSPE",
            title_type: 0,
            genre: [0; 3],
            company_offset: 0x10,
            release_year: 2006,
            release_month: 11,
            release_day: 19,
            rating_id: 9,
            title: [0; 31],
            subtitle: [0; 31],
            short_title: [0; 31],
        };
        let mut w = ByteWriter::new();
        write_record(&mut w, &entry).unwrap();
        let bytes = w.as_slice();

        assert_eq!(bytes.len(), 236);
        assert_eq!(&bytes[4..8], b"RSPE");
        assert_eq!(&bytes[16..18], &2006u16.to_be_bytes());
        assert_eq!(bytes[20], 9);
    }

    #[test]
    fn test_every_record_writes_its_size() {
        let mut w = ByteWriter::new();
        write_record(
            &mut w,
            &RatingEntry {
                rating_id: 8,
                unknown: 0,
                age: 3,
                jpeg_offset: 0,
                jpeg_size: 0,
                name: [0; 11],
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &TitleTypeEntry {
                type_id: 0,
                console_model: *b"RVL",
                console_name: [0; 102],
                group_id: 1,
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &CompanyEntry {
                id: 1,
                developer: [0; 31],
                publisher: [0; 31],
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &VideoEntry {
                id: 1,
                length: 1,
                title_id: 0,
                video_type: 0,
                rating_id: 9,
                is_new: 0,
                video_index: 1,
                title: [0; 123],
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &NewVideoEntry {
                id: 1,
                length: 1,
                title_id: 0,
                rating_id: 9,
                title: [0; 102],
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &DemoEntry {
                id: 1,
                title: [0; 31],
                subtitle: [0; 31],
                title_id: 0,
                company_offset: 0,
                removal_year: 0,
                removal_month: 0,
                removal_day: 0,
                rating_id: 8,
                is_new: 0,
                new_id: 0,
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &RecentRecommendationEntry {
                title_offset: 0,
                medal: 1,
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &PopularVideoEntry {
                id: 1,
                length: 1,
                title_id: 0,
                bar_color: 0,
                rating_id: 9,
                video_rank: 1,
                title: [0; 102],
            },
        )
        .unwrap();
        write_record(
            &mut w,
            &DetailedRatingEntry {
                rating_group: 2,
                rating_id: 8,
                title: [0; 102],
            },
        )
        .unwrap();

        assert_eq!(w.len(), 34 + 210 + 128 + 278 + 232 + 352 + 6 + 234 + 206);
    }
}
