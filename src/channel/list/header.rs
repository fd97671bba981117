//! Download list header

use super::super::codec::{ByteWriter, Record};
use super::super::constants::CONTAINER_VERSION;

/// Element count and byte offset of one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionRef {
    pub count: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListHeader {
    pub filesize: u32,
    pub crc32: u32,
    pub list_id: u32,
    pub country_code: u32,
    pub language_code: u32,
    pub ratings: SectionRef,
    pub title_types: SectionRef,
    pub companies: SectionRef,
    pub titles: SectionRef,
    pub new_titles: SectionRef,
    pub videos: SectionRef,
    pub new_videos: SectionRef,
    pub demos: SectionRef,
    pub recommendations: SectionRef,
    pub recent_recommendations: SectionRef,
    pub popular_videos: SectionRef,
    pub detailed_ratings: SectionRef,
}

impl ListHeader {
    /// Section references in wire order
    pub fn sections(&self) -> [SectionRef; 12] {
        [
            self.ratings,
            self.title_types,
            self.companies,
            self.titles,
            self.new_titles,
            self.videos,
            self.new_videos,
            self.demos,
            self.recommendations,
            self.recent_recommendations,
            self.popular_videos,
            self.detailed_ratings,
        ]
    }
}

impl Record for ListHeader {
    const SIZE: usize = 128;

    fn encode(&self, w: &mut ByteWriter) {
        w.u16(0);
        w.u8(CONTAINER_VERSION);
        w.u8(2);
        w.u32(self.filesize);
        w.u32(self.crc32);
        w.u32(self.list_id);
        w.u32(self.country_code);
        w.u32(self.language_code);
        w.zeros(8);
        for section in self.sections() {
            w.u32(section.count);
            w.u32(section.offset);
        }
    }
}
