//! Video, new video and popular video tables

use super::super::catalog::Catalog;
use super::super::defaults::MAX_LISTED_VIDEOS;
use super::super::text::{encode_fixed, unescape_line_breaks};
use super::header::SectionRef;
use super::tables::{NewVideoEntry, PopularVideoEntry, VideoEntry};
use super::List;
use crate::exceptions::{Result, to_u8, to_u32};
use log::debug;

/// Rating id the channel shows for every video
const VIDEO_RATING_ID: u8 = 9;

/// Entry that points viewers to the "New Videos" menu
const NEW_ARRIVALS_VIDEO_ID: u32 = 2_130_871_958;
const NEW_ARRIVALS_VIDEO_LENGTH: u16 = 280;
const NEW_ARRIVALS_VIDEO_TYPE: u8 = 7;
const NEW_ARRIVALS_TITLE: &str = "Go to \"New Arrivals\" >\n\"New Videos\" to watch\nany video.";

impl List {
    /// Synthetic "New Arrivals" entry followed by the most popular videos
    pub(super) fn make_videos(&mut self, catalog: &Catalog) -> Result<()> {
        let offset = self.current_offset()?;
        let language = self.locale.language;

        let mut table = vec![VideoEntry {
            id: NEW_ARRIVALS_VIDEO_ID,
            length: NEW_ARRIVALS_VIDEO_LENGTH,
            title_id: 0,
            video_type: NEW_ARRIVALS_VIDEO_TYPE,
            rating_id: VIDEO_RATING_ID,
            is_new: 0,
            video_index: 0,
            title: encode_fixed(NEW_ARRIVALS_TITLE),
        }];

        for (index, video) in catalog
            .popular_videos()
            .into_iter()
            .take(MAX_LISTED_VIDEOS)
            .enumerate()
        {
            table.push(VideoEntry {
                id: video.id,
                length: video.length,
                title_id: 0,
                video_type: video.video_type,
                rating_id: VIDEO_RATING_ID,
                is_new: 0,
                video_index: to_u8(index + 1, "video index")?,
                title: encode_fixed(&unescape_line_breaks(video.title_for(language))),
            });
        }

        self.header.videos = SectionRef {
            count: to_u32(table.len(), "video count")?,
            offset,
        };
        self.videos = table;
        Ok(())
    }

    /// Every video in catalog order
    pub(super) fn make_new_videos(&mut self, catalog: &Catalog) -> Result<()> {
        let offset = self.current_offset()?;
        let language = self.locale.language;

        let table: Vec<NewVideoEntry> = catalog
            .videos
            .iter()
            .map(|video| NewVideoEntry {
                id: video.id,
                length: video.length,
                title_id: 0,
                rating_id: VIDEO_RATING_ID,
                title: encode_fixed(&unescape_line_breaks(video.title_for(language))),
            })
            .collect();

        self.header.new_videos = SectionRef {
            count: to_u32(table.len(), "new video count")?,
            offset,
        };
        self.new_videos = table;
        Ok(())
    }

    /// Ranked popular videos; left empty unless ranking is enabled
    pub(super) fn make_popular_videos(&mut self, catalog: &Catalog, ranked: bool) -> Result<()> {
        let offset = self.current_offset()?;
        let language = self.locale.language;

        let mut table = Vec::new();
        if ranked {
            for (index, video) in catalog
                .popular_videos()
                .into_iter()
                .take(MAX_LISTED_VIDEOS)
                .enumerate()
            {
                table.push(PopularVideoEntry {
                    id: video.id,
                    length: video.length,
                    title_id: 0,
                    bar_color: 0,
                    rating_id: VIDEO_RATING_ID,
                    video_rank: to_u8(index + 1, "video rank")?,
                    title: encode_fixed(&unescape_line_breaks(video.title_for(language))),
                });
            }
        }

        debug!("🎬 {}: {} ranked videos", self.locale, table.len());
        self.header.popular_videos = SectionRef {
            count: to_u32(table.len(), "popular video count")?,
            offset,
        };
        self.popular_videos = table;
        Ok(())
    }
}
