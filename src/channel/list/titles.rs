//! Company, title, new title and demo tables

use super::super::catalog::Catalog;
use super::super::checksums::file_id;
use super::super::codec::{Record, TableOffset};
use super::super::constants::title_type_id;
use super::super::records::{DEFAULT_RATING_ID, TitleRecord, is_available};
use super::super::text::{encode_fixed, split_title};
use super::header::SectionRef;
use super::tables::{CompanyEntry, DemoEntry, TitleEntry};
use super::{List, date_fields};
use crate::exceptions::{ChannelError, Result, to_u8, to_u32};
use log::{debug, trace};

fn company_key(title: &TitleRecord) -> (String, String) {
    (title.developer.clone(), title.publisher.clone())
}

impl List {
    /// One company record per distinct developer/publisher pair, first seen first
    pub(super) fn make_companies(&mut self, titles: &[&TitleRecord]) -> Result<()> {
        let offset = self.current_offset()?;

        for title in titles {
            let key = company_key(title);
            if self.company_index.contains_key(&key) {
                continue;
            }
            let index = self.companies.len();
            self.companies.push(CompanyEntry {
                id: to_u32(index + 1, "company id")?,
                developer: encode_fixed(&key.0),
                publisher: encode_fixed(&key.1),
            });
            self.company_index.insert(key, index);
        }

        self.header.companies = SectionRef {
            count: to_u32(self.companies.len(), "company count")?,
            offset,
        };
        Ok(())
    }

    fn company_offset(&self, title: &TitleRecord) -> Result<u32> {
        let index = self
            .company_index
            .get(&company_key(title))
            .copied()
            .ok_or_else(|| {
                ChannelError::SourceData(format!("title {} has no company record", title.id))
            })?;
        to_u32(
            self.header.companies.offset as usize + CompanyEntry::SIZE * index,
            "company offset",
        )
    }

    pub(super) fn make_titles(&mut self, titles: &[&TitleRecord]) -> Result<()> {
        let offset = self.current_offset()?;
        let language = self.locale.language;
        let group = self.locale.rating_group;

        let mut table = Vec::with_capacity(titles.len());
        for title in titles {
            let name = title
                .text_for(language)
                .map(|t| t.title.as_str())
                .unwrap_or_default();
            let lines = split_title(name);
            let title_type = title_type_id(&title.title_type).ok_or_else(|| {
                ChannelError::SourceData(format!(
                    "title {} has unknown title type '{}'",
                    title.id, title.title_type
                ))
            })?;
            let (release_year, release_month, release_day) = date_fields(title.release()?)?;

            trace!("🎮 {}: {} -> {:?}", self.locale, title.id, lines);
            table.push(TitleEntry {
                id: file_id(&title.id),
                title_id: title.short_id()?,
                title_type,
                genre: [0; 3],
                company_offset: self.company_offset(title)?,
                release_year,
                release_month,
                release_day,
                rating_id: title.rating_id(group),
                title: encode_fixed(&lines.title),
                subtitle: encode_fixed(&lines.subtitle),
                short_title: encode_fixed(&lines.title),
            });
        }

        self.header.titles = SectionRef {
            count: to_u32(table.len(), "title count")?,
            offset,
        };
        self.titles = table;
        Ok(())
    }

    /// Pointers to the `count` most recently released titles, newest first
    pub(super) fn make_new_titles(&mut self, titles: &[&TitleRecord], count: usize) -> Result<()> {
        let offset = self.current_offset()?;

        let mut dated = Vec::new();
        for (index, title) in titles.iter().enumerate() {
            if let Some(date) = title.release()? {
                dated.push((date, index));
            }
        }
        dated.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let mut table = Vec::new();
        for (_, index) in dated.into_iter().take(count) {
            let title_offset = self.header.titles.offset as usize + TitleEntry::SIZE * index;
            table.push(TableOffset(to_u32(title_offset, "new title offset")?));
        }

        self.header.new_titles = SectionRef {
            count: to_u32(table.len(), "new title count")?,
            offset,
        };
        self.new_titles = table;
        Ok(())
    }

    pub(super) fn make_demos(&mut self, catalog: &Catalog) -> Result<()> {
        let offset = self.current_offset()?;
        let language = self.locale.language;
        let region = self.locale.region;

        let mut table = Vec::new();
        let mut new_demos = 0usize;
        for demo in catalog.demos.iter().filter(|d| is_available(&d.title_id, region)) {
            let lines = split_title(
                demo.text_for(language)
                    .map(|t| t.title.as_str())
                    .unwrap_or_default(),
            );

            // Demos borrow company and rating from their full title when it is listed
            let listed = catalog
                .titles_for(region)
                .find(|t| t.id.get(..4) == demo.title_id.get(..4));
            let (company_offset, rating_id) = match listed {
                Some(title) if self.company_index.contains_key(&company_key(title)) => (
                    self.company_offset(title)?,
                    title.rating_id(self.locale.rating_group),
                ),
                _ => (0, DEFAULT_RATING_ID),
            };

            let new_id = if demo.is_new {
                new_demos += 1;
                new_demos
            } else {
                0
            };
            let (removal_year, removal_month, removal_day) = date_fields(demo.removal()?)?;

            table.push(DemoEntry {
                id: demo.id,
                title: encode_fixed(&lines.title),
                subtitle: encode_fixed(&lines.subtitle),
                title_id: file_id(&demo.title_id),
                company_offset,
                removal_year,
                removal_month,
                removal_day,
                rating_id,
                is_new: u8::from(demo.is_new),
                new_id: to_u8(new_id, "new demo index")?,
            });
        }

        debug!("🕹️ {}: {} demos", self.locale, table.len());
        self.header.demos = SectionRef {
            count: to_u32(table.len(), "demo count")?,
            offset,
        };
        self.demos = table;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::constants::{Language, Region};
    use crate::channel::locale::Locale;
    use crate::channel::records::{DemoRecord, LocalizedText};

    fn title(id: &str, name: &str, developer: &str, date: Option<&str>) -> TitleRecord {
        let mut record = TitleRecord {
            id: id.to_string(),
            title_type: "Wii".to_string(),
            developer: developer.to_string(),
            publisher: "Nintendo".to_string(),
            release_date: date.map(str::to_string),
            ..Default::default()
        };
        record.names.insert(
            "en".to_string(),
            LocalizedText {
                title: name.to_string(),
                synopsis: String::new(),
            },
        );
        record
    }

    fn list() -> List {
        List::new(Locale::new(Region::Ntsc, Language::English).unwrap(), 1)
    }

    #[test]
    fn test_companies_are_deduplicated() {
        let a = title("RSPE", "Wii Sports", "Nintendo EAD", None);
        let b = title("RMCE", "Mario Kart Wii", "Nintendo EAD", None);
        let c = title("RHAE", "Wii Play", "Nintendo EAD Group 1", None);

        let mut list = list();
        list.make_companies(&[&a, &b, &c]).unwrap();
        assert_eq!(list.companies.len(), 2);
        assert_eq!(list.companies[1].id, 2);

        list.make_titles(&[&a, &b, &c]).unwrap();
        let base = list.header.companies.offset;
        assert_eq!(list.titles[0].company_offset, base);
        assert_eq!(list.titles[1].company_offset, base);
        assert_eq!(list.titles[2].company_offset, base + 128);
    }

    #[test]
    fn test_title_names_are_split() {
        let a = title("RZDE", "The Legend of Zelda: Twilight Princess", "Nintendo EAD", None);
        let mut list = list();
        list.make_companies(&[&a]).unwrap();
        list.make_titles(&[&a]).unwrap();

        let entry = &list.titles[0];
        assert_eq!(&entry.title_id, b"RZDE");
        assert_eq!(entry.title, encode_fixed::<31>("The Legend of Zelda"));
        assert_eq!(entry.subtitle, encode_fixed::<31>("Twilight Princess"));
        assert_eq!(entry.id, file_id("RZDE"));
    }

    #[test]
    fn test_unknown_title_type_is_fatal() {
        let mut a = title("RSPE", "Wii Sports", "Nintendo EAD", None);
        a.title_type = "Dreamcast".to_string();
        let mut list = list();
        list.make_companies(&[&a]).unwrap();
        assert!(matches!(
            list.make_titles(&[&a]),
            Err(ChannelError::SourceData(_))
        ));
    }

    #[test]
    fn test_new_titles_point_at_latest_releases() {
        let old = title("RSPE", "Wii Sports", "A", Some("2006-11-19"));
        let undated = title("RHAE", "Wii Play", "A", None);
        let newest = title("RMCE", "Mario Kart Wii", "A", Some("2008-04-27"));
        let middle = title("RSBE", "Super Smash Bros. Brawl", "A", Some("2008-03-09"));
        let titles = [&old, &undated, &newest, &middle];

        let mut list = list();
        list.make_companies(&titles).unwrap();
        list.make_titles(&titles).unwrap();
        list.make_new_titles(&titles, 2).unwrap();

        let base = list.header.titles.offset;
        assert_eq!(
            list.new_titles,
            vec![TableOffset(base + 236 * 2), TableOffset(base + 236 * 3)]
        );
        assert_eq!(list.header.new_titles.count, 2);
    }

    #[test]
    fn test_demos_are_regional_and_numbered() {
        let full = title("RSPE", "Wii Sports", "Nintendo EAD", None);
        let demo = |id: u32, title_id: &str, is_new: bool| DemoRecord {
            id,
            title_id: title_id.to_string(),
            is_new,
            ..Default::default()
        };
        let catalog = Catalog {
            titles: vec![full.clone()],
            demos: vec![demo(1, "RSPE", true), demo(2, "RSPP", true), demo(3, "RMGE", false)],
            ..Default::default()
        };

        let mut list = list();
        list.make_companies(&[&full]).unwrap();
        list.make_titles(&[&full]).unwrap();
        list.make_demos(&catalog).unwrap();

        assert_eq!(list.demos.len(), 2);
        assert_eq!(list.demos[0].new_id, 1);
        assert_eq!(list.demos[0].company_offset, list.header.companies.offset);
        assert_eq!(list.demos[1].new_id, 0);
        assert_eq!(list.demos[1].company_offset, 0);
    }
}
