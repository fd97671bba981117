//! (Region, Language) pairs, the unit of list generation

use super::constants::{Language, REGIONS, RatingGroup, Region, region_meta};
use crate::exceptions::{ChannelError, Result};
use std::fmt;

/// A region together with one of its languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    pub region: Region,
    pub language: Language,
    pub rating_group: RatingGroup,
}

impl Locale {
    /// Pair `language` with `region`; the language must be offered there
    pub fn new(region: Region, language: Language) -> Result<Self> {
        let meta = region_meta(region);
        if !meta.languages.contains(&language) {
            return Err(ChannelError::SourceData(format!(
                "language {language} is not offered in region {region}"
            )));
        }
        Ok(Self {
            region,
            language,
            rating_group: meta.rating_group,
        })
    }

    /// Every locale the channel serves, region by region
    pub fn all() -> Vec<Locale> {
        REGIONS
            .iter()
            .flat_map(|meta| {
                meta.languages.iter().map(move |&language| Locale {
                    region: meta.region,
                    language,
                    rating_group: meta.rating_group,
                })
            })
            .collect()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.region.label(), self.language.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_locales() {
        let locales = Locale::all();
        assert_eq!(locales.len(), 10);
        assert_eq!(locales.iter().filter(|l| l.region == Region::Pal).count(), 6);
        assert!(locales.iter().all(|l| Locale::new(l.region, l.language).is_ok()));
    }

    #[test]
    fn test_foreign_language_is_rejected() {
        let err = Locale::new(Region::Japan, Language::English).unwrap_err();
        assert!(matches!(err, ChannelError::SourceData(_)));
        assert!(Locale::new(Region::Ntsc, Language::German).is_err());
    }

    #[test]
    fn test_rating_group_follows_region() {
        let locale = Locale::new(Region::Pal, Language::Dutch).unwrap();
        assert_eq!(locale.rating_group, RatingGroup::Pegi);
        assert_eq!(locale.to_string(), "GB/nl");
    }
}
