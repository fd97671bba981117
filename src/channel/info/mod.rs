//! Per-title info file compiler
//!
//! An info file is a fixed body of localized text and flags, a play-time table
//! that is always present, and a trailing image blob holding the cover art,
//! the rating badge and up to seven content descriptor pictures.

mod controllers;
mod header;
mod time_played;

pub use controllers::{InputSupport, SupportedControllers, SupportedFeatures, SupportedLanguages};
pub use header::{DETAILED_RATING_PICTURES, InfoHeader};
pub use time_played::TimePlayed;

use super::checksums::file_id;
use super::codec::{ByteWriter, Record, write_record};
use super::compression::compress;
use super::constants::{console_family, title_type_id};
use super::context::JobContext;
use super::finalization::{Container, finalize};
use super::paths::write_output;
use super::records::{PlayTimeRecord, TITLE_ID_LEN, TitleRecord};
use super::text::{
    SynopsisLayout, encode_fixed, fixed_from_units, join_list_field, layout_synopsis,
    peripheral_text, players_text, split_title,
};
use crate::exceptions::{ChannelError, Result, to_u32};
use log::{debug, info, trace};

/// Bytes from the start of the file to the play-time table
pub const INFO_FIXED_SIZE: usize = 6744;

const TEXT_LINE: usize = 41;

/// In-memory info file for one title in one locale
#[derive(Debug, Clone)]
pub struct Info {
    pub header: InfoHeader,
    pub controllers: SupportedControllers,
    pub features: SupportedFeatures,
    pub languages: SupportedLanguages,
    pub title: [u16; 31],
    pub subtitle: [u16; 31],
    pub short_title: [u16; 31],
    pub description: [[u16; TEXT_LINE]; 3],
    pub genre: [u16; 29],
    pub players: [u16; TEXT_LINE],
    pub peripherals: [u16; 44],
    pub disclaimer: Box<[u16; 2400]>,
    pub rating_id: u8,
    pub distribution_date: [u16; TEXT_LINE],
    pub wii_points: [u16; TEXT_LINE],
    pub custom_text: [[u16; TEXT_LINE]; 10],
    pub time_played: TimePlayed,
    images: Vec<u8>,
    name: String,
}

impl Info {
    /// Compile the info file of `title` for the job's locale
    pub fn build(
        ctx: &JobContext<'_>,
        title: &TitleRecord,
        play_time: Option<&PlayTimeRecord>,
    ) -> Result<Info> {
        let locale = ctx.locale;
        let short_id = title.short_id()?;
        let type_id = title_type_id(&title.title_type).ok_or_else(|| {
            ChannelError::SourceData(format!(
                "title {} has unknown title type '{}'",
                title.id, title.title_type
            ))
        })?;

        let mut info = Info {
            header: InfoHeader {
                file_id: file_id(&title.id),
                title_id: short_id,
                country_code: locale.region.country_code(),
                language_code: locale.language.id(),
                ..Default::default()
            },
            controllers: SupportedControllers::default(),
            features: SupportedFeatures::default(),
            languages: SupportedLanguages::from_title(title),
            title: [0; 31],
            subtitle: [0; 31],
            short_title: [0; 31],
            description: [[0; TEXT_LINE]; 3],
            genre: encode_fixed(&join_list_field(&title.genre)),
            players: fixed_from_units(&players_text(title.online_players)),
            peripherals: [0; 44],
            disclaimer: Box::new(encode_fixed(&ctx.settings.disclaimer)),
            rating_id: title.rating_id(locale.rating_group),
            distribution_date: [0; TEXT_LINE],
            wii_points: [0; TEXT_LINE],
            custom_text: [[0; TEXT_LINE]; 10],
            time_played: TimePlayed::default(),
            images: Vec::new(),
            name: format!("info {} {locale}", title.id),
        };

        let support = InputSupport::from_title(title);
        info.controllers = support.controllers;
        info.features = support.features;
        info.peripherals = fixed_from_units(&peripheral_text(&support.peripherals));

        if let Some(text) = title.text_for(locale.language) {
            let lines = split_title(&text.title);
            info.title = encode_fixed(&lines.title);
            info.subtitle = encode_fixed(&lines.subtitle);
            info.short_title = encode_fixed(&lines.title);
            info.set_synopsis(&text.synopsis);
        }

        if let Some(date) = title.release()? {
            info.distribution_date = encode_fixed(&date.format("%Y/%m/%d").to_string());
        }
        if let Some(points) = title.wii_points {
            info.wii_points = encode_fixed(&format!("{points} Wii Points"));
        }

        if let Some(stats) = play_time.and_then(TimePlayed::from_record) {
            info.header.times_played_table_offset = to_u32(INFO_FIXED_SIZE, "play-time offset")?;
            info.time_played = stats;
        }

        let family = console_family(type_id);
        info.header.picture_offset = info.current_offset()?;
        let cover = ctx.images.cover_art(locale.region, family, &title.id)?;
        info.header.picture_size = to_u32(cover.len(), "cover size")?;
        info.images.extend_from_slice(&cover);

        info.header.rating_picture_offset = info.current_offset()?;
        let badge = ctx.images.rating_badge(locale.rating_group, info.rating_id)?;
        info.header.rating_picture_size = to_u32(badge.len(), "badge size")?;
        info.images.extend_from_slice(badge);

        info.add_detailed_rating_pictures(ctx, title)?;

        trace!("📄 {}: {} image bytes", info.name, info.images.len());
        Ok(info)
    }

    /// Fill the descriptor slots in order; descriptors without a picture are skipped
    fn add_detailed_rating_pictures(&mut self, ctx: &JobContext<'_>, title: &TitleRecord) -> Result<()> {
        let group = ctx.locale.rating_group;
        let mut slot = 0;
        for descriptor in title.descriptors(group) {
            if slot == DETAILED_RATING_PICTURES {
                break;
            }
            let Some(picture) = ctx.images.detailed_rating_picture(group, descriptor) else {
                debug!("🏷️ {}: no picture for descriptor {descriptor:?}", self.name);
                continue;
            };
            let offset = self.current_offset()?;
            let size = to_u32(picture.len(), "descriptor picture size")?;
            self.header.detailed_rating_pictures[slot] = (offset, size);
            self.images.extend_from_slice(picture);
            slot += 1;
        }
        Ok(())
    }

    fn set_synopsis(&mut self, synopsis: &str) {
        match layout_synopsis(synopsis) {
            SynopsisLayout::Description(lines) => {
                for (slot, line) in self.description.iter_mut().zip(&lines) {
                    *slot = encode_fixed(line);
                }
            }
            SynopsisLayout::Custom(lines) => {
                for (slot, line) in self.custom_text.iter_mut().zip(&lines) {
                    *slot = encode_fixed(line);
                }
            }
        }
    }

    /// Byte length the info file would serialize to right now
    pub fn current_size(&self) -> usize {
        INFO_FIXED_SIZE + TimePlayed::SIZE + self.images.len()
    }

    fn current_offset(&self) -> Result<u32> {
        to_u32(self.current_size(), "info offset")
    }

    pub fn image_blob(&self) -> &[u8] {
        &self.images
    }
}

impl Container for Info {
    fn describe(&self) -> String {
        self.name.clone()
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
        write_record(w, &self.controllers)?;
        write_record(w, &self.features)?;
        write_record(w, &self.languages)?;
        w.zeros(10);
        w.utf16(&self.title);
        w.utf16(&self.subtitle);
        w.utf16(&self.short_title);
        for line in &self.description {
            w.utf16(line);
        }
        w.utf16(&self.genre);
        w.utf16(&self.players);
        w.utf16(&self.peripherals);
        w.zeros(80);
        w.utf16(self.disclaimer.as_slice());
        w.u8(self.rating_id);
        w.utf16(&self.distribution_date);
        w.utf16(&self.wii_points);
        for line in &self.custom_text {
            w.utf16(line);
        }
        write_record(w, &self.time_played)?;
        w.bytes(&self.images);
        Ok(())
    }
}

/// Outcome of the info fan-out of one locale job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoStats {
    pub written: usize,
    pub skipped: usize,
}

/// Write one compressed info file per listed title.
///
/// Existing files are kept unless the job settings ask for a rewrite.
pub fn write_infos(ctx: &JobContext<'_>, titles: &[&TitleRecord]) -> Result<InfoStats> {
    let play_times = ctx.catalog.play_time_index();
    let mut stats = InfoStats::default();

    for title in titles {
        let path = ctx.paths.info(&ctx.locale, file_id(&title.id));
        if path.exists() && !ctx.settings.overwrite_infos {
            trace!("⏭️ Keeping existing {}", path.display());
            stats.skipped += 1;
            continue;
        }

        let key = title.id.get(..TITLE_ID_LEN).unwrap_or(&title.id);
        let info = Info::build(ctx, title, play_times.get(key).copied())?;
        let finalized = finalize(info)?;
        write_output(&path, &compress(&finalized.bytes)?)?;
        stats.written += 1;
    }

    if stats.skipped > 0 {
        debug!("⏭️ {}: kept {} existing info files", ctx.locale, stats.skipped);
    }
    info!("📄 {}: wrote {} info files", ctx.locale, stats.written);
    Ok(stats)
}
