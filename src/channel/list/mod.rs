//! Download list (`dllist.bin`) compiler
//!
//! A list is built by running the table stages in physical order. Each stage
//! records the current container size as its table offset before appending, so
//! every offset equals the number of bytes that precede the table. Rating badges
//! go into the trailing image blob last, once every table size is known.

mod header;
mod recommendations;
mod tables;
mod titles;
mod videos;

pub use header::{ListHeader, SectionRef};
pub use recommendations::{MedalThresholds, ranked_votes};
pub use tables::{
    CompanyEntry, DemoEntry, DetailedRatingEntry, NewVideoEntry, PopularVideoEntry, RatingEntry,
    RecentRecommendationEntry, TitleEntry, TitleTypeEntry, VideoEntry,
};

use super::codec::{ByteWriter, Record, TableOffset, table_len, write_record, write_table};
use super::constants::{FIRST_RATING_ID, TITLE_TYPES};
use super::context::JobContext;
use super::finalization::Container;
use super::images::ImagePipeline;
use super::locale::Locale;
use super::records::TitleRecord;
use super::text::encode_fixed;
use crate::exceptions::{ChannelError, Result, to_u32};
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// In-memory download list for one locale
#[derive(Debug, Clone)]
pub struct List {
    pub header: ListHeader,
    pub ratings: Vec<RatingEntry>,
    pub title_types: Vec<TitleTypeEntry>,
    pub companies: Vec<CompanyEntry>,
    pub titles: Vec<TitleEntry>,
    pub new_titles: Vec<TableOffset>,
    pub videos: Vec<VideoEntry>,
    pub new_videos: Vec<NewVideoEntry>,
    pub demos: Vec<DemoEntry>,
    pub recommendations: Vec<TableOffset>,
    pub recent_recommendations: Vec<RecentRecommendationEntry>,
    pub popular_videos: Vec<PopularVideoEntry>,
    pub detailed_ratings: Vec<DetailedRatingEntry>,
    images: Vec<u8>,
    locale: Locale,
    company_index: HashMap<(String, String), usize>,
}

impl List {
    pub fn new(locale: Locale, list_id: u32) -> Self {
        Self {
            header: ListHeader {
                list_id,
                country_code: locale.region.country_code(),
                language_code: locale.language.id(),
                ..Default::default()
            },
            ratings: Vec::new(),
            title_types: Vec::new(),
            companies: Vec::new(),
            titles: Vec::new(),
            new_titles: Vec::new(),
            videos: Vec::new(),
            new_videos: Vec::new(),
            demos: Vec::new(),
            recommendations: Vec::new(),
            recent_recommendations: Vec::new(),
            popular_videos: Vec::new(),
            detailed_ratings: Vec::new(),
            images: Vec::new(),
            locale,
            company_index: HashMap::new(),
        }
    }

    /// Run every stage for the job's locale.
    ///
    /// Returns the list and the titles placed in its title table, in table order.
    pub fn build<'a>(ctx: &JobContext<'a>) -> Result<(List, Vec<&'a TitleRecord>)> {
        let locale = ctx.locale;
        let catalog = ctx.catalog;
        let mut list = List::new(locale, ctx.settings.list_id);

        let placed: Vec<&'a TitleRecord> = catalog
            .titles_for(locale.region)
            .filter(|t| t.text_for(locale.language).is_some())
            .collect();
        debug!("📋 {locale}: {} titles available", placed.len());

        list.make_ratings()?;
        list.make_title_types()?;
        list.make_companies(&placed)?;
        list.make_titles(&placed)?;
        list.make_new_titles(&placed, ctx.settings.new_title_count)?;
        list.make_videos(catalog)?;
        list.make_new_videos(catalog)?;
        list.make_demos(catalog)?;

        let votes = catalog.votes_for(locale.region);
        let ranked = ranked_votes(&votes);
        list.make_recommendations(&ranked)?;
        list.make_recent_recommendations(&ranked, &ctx.settings.medals)?;

        list.make_popular_videos(catalog, ctx.settings.rank_popular_videos)?;
        list.make_detailed_ratings(&placed)?;
        list.write_rating_images(&ctx.images)?;

        info!(
            "📋 {locale}: list compiled ({} titles, {} videos, {} recommendations, {} bytes)",
            list.titles.len(),
            list.videos.len(),
            list.recommendations.len(),
            list.current_size()
        );
        Ok((list, placed))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Byte length the list would serialize to right now, image blob included
    pub fn current_size(&self) -> usize {
        ListHeader::SIZE
            + table_len(&self.ratings)
            + table_len(&self.title_types)
            + table_len(&self.companies)
            + table_len(&self.titles)
            + table_len(&self.new_titles)
            + table_len(&self.videos)
            + table_len(&self.new_videos)
            + table_len(&self.demos)
            + table_len(&self.recommendations)
            + table_len(&self.recent_recommendations)
            + table_len(&self.popular_videos)
            + table_len(&self.detailed_ratings)
            + self.images.len()
    }

    /// [`List::current_size`] as a header offset
    pub(crate) fn current_offset(&self) -> Result<u32> {
        to_u32(self.current_size(), "list offset")
    }

    pub fn image_blob(&self) -> &[u8] {
        &self.images
    }

    /// Offset of the title table record for a four-character identifier
    pub fn title_offset(&self, title_id: &str) -> Result<Option<u32>> {
        let Some(index) = self
            .titles
            .iter()
            .position(|t| t.title_id.as_slice() == title_id.as_bytes())
        else {
            return Ok(None);
        };
        let offset = self.header.titles.offset as usize + TitleEntry::SIZE * index;
        to_u32(offset, "title offset").map(Some)
    }

    fn make_ratings(&mut self) -> Result<()> {
        let offset = self.current_offset()?;
        let group = self.locale.rating_group;

        self.ratings = group
            .ratings()
            .iter()
            .enumerate()
            .map(|(i, rating)| RatingEntry {
                rating_id: FIRST_RATING_ID + i as u8,
                unknown: 0,
                age: rating.age,
                jpeg_offset: 0,
                jpeg_size: 0,
                name: encode_fixed(rating.name),
            })
            .collect();

        self.header.ratings = SectionRef {
            count: to_u32(self.ratings.len(), "rating count")?,
            offset,
        };
        Ok(())
    }

    fn make_title_types(&mut self) -> Result<()> {
        let offset = self.current_offset()?;

        self.title_types = TITLE_TYPES
            .iter()
            .map(|t| TitleTypeEntry {
                type_id: t.type_id,
                console_model: t.console_model,
                console_name: encode_fixed(t.console_name),
                group_id: t.group_id,
            })
            .collect();

        self.header.title_types = SectionRef {
            count: to_u32(self.title_types.len(), "title type count")?,
            offset,
        };
        Ok(())
    }

    /// One record per distinct (rating, descriptor) pair among the listed titles
    fn make_detailed_ratings(&mut self, titles: &[&TitleRecord]) -> Result<()> {
        let offset = self.current_offset()?;
        let group = self.locale.rating_group;

        let mut seen = HashSet::new();
        for title in titles {
            let rating_id = title.rating_id(group);
            for descriptor in title.descriptors(group) {
                if !seen.insert((rating_id, descriptor.as_str())) {
                    continue;
                }
                self.detailed_ratings.push(DetailedRatingEntry {
                    rating_group: group.id(),
                    rating_id,
                    title: encode_fixed(descriptor),
                });
            }
        }

        debug!("🏷️ {}: {} content descriptors", self.locale, self.detailed_ratings.len());
        self.header.detailed_ratings = SectionRef {
            count: to_u32(self.detailed_ratings.len(), "detailed rating count")?,
            offset,
        };
        Ok(())
    }

    /// Append one badge per rating and point the rating records at them
    fn write_rating_images(&mut self, images: &ImagePipeline<'_>) -> Result<()> {
        let group = self.locale.rating_group;
        for index in 0..self.ratings.len() {
            let rating_id = self.ratings[index].rating_id;
            let badge = images.rating_badge(group, rating_id)?;
            let jpeg_offset = self.current_offset()?;
            self.images.extend_from_slice(badge);

            let entry = &mut self.ratings[index];
            entry.jpeg_offset = jpeg_offset;
            entry.jpeg_size = to_u32(badge.len(), "badge size")?;
        }
        Ok(())
    }
}

/// Split a date into the year/month/day fields of a record, zeros when unknown
pub(crate) fn date_fields(date: Option<NaiveDate>) -> Result<(u16, u8, u8)> {
    let Some(date) = date else {
        return Ok((0, 0, 0));
    };
    let year = u16::try_from(date.year())
        .map_err(|_| ChannelError::Encoding(format!("year {} does not fit in u16", date.year())))?;
    Ok((year, date.month() as u8, date.day() as u8))
}

impl Container for List {
    fn describe(&self) -> String {
        format!("list {}", self.locale)
    }

    fn serialized_len(&self) -> usize {
        self.current_size()
    }

    fn set_filesize(&mut self, filesize: u32) {
        self.header.filesize = filesize;
    }

    fn set_crc32(&mut self, crc: u32) {
        self.header.crc32 = crc;
    }

    fn write_all(&self, w: &mut ByteWriter) -> Result<()> {
        write_record(w, &self.header)?;
        write_table(w, &self.ratings)?;
        write_table(w, &self.title_types)?;
        write_table(w, &self.companies)?;
        write_table(w, &self.titles)?;
        write_table(w, &self.new_titles)?;
        write_table(w, &self.videos)?;
        write_table(w, &self.new_videos)?;
        write_table(w, &self.demos)?;
        write_table(w, &self.recommendations)?;
        write_table(w, &self.recent_recommendations)?;
        write_table(w, &self.popular_videos)?;
        write_table(w, &self.detailed_ratings)?;
        w.bytes(&self.images);
        Ok(())
    }
}
