//! Normalized source records the generator consumes
//!
//! These arrive already typed from the catalog files; the generator never talks
//! to a database or metadata service itself.

use super::constants::{Language, Region, RatingGroup, FIRST_RATING_ID, GLOBAL_ID_SUFFIXES};
use crate::exceptions::{ChannelError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Length of the identifier prefix stored in title tables and vote records
pub const TITLE_ID_LEN: usize = 4;

/// Rating id used when a title has no rating for the locale's group
pub const DEFAULT_RATING_ID: u8 = FIRST_RATING_ID;

/// Whether a title identifier is sold in `region`.
///
/// The fourth character encodes the release region: A, B, U and X are
/// available everywhere, the rest only in their own region.
pub fn is_available(title_id: &str, region: Region) -> bool {
    match title_id.chars().nth(3) {
        Some(suffix) => GLOBAL_ID_SUFFIXES.contains(&suffix) || region.id_suffixes().contains(&suffix),
        None => false,
    }
}

/// Localized name and synopsis of a title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
}

/// One game or application in the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleRecord {
    /// Product code, at least four ASCII characters (e.g. `RSPE01`)
    pub id: String,
    /// Title type label (`Wii`, `WiiWare`, `DS`, `3DS`, ...)
    pub title_type: String,
    #[serde(default)]
    pub names: BTreeMap<String, LocalizedText>,
    /// Comma-separated genre list
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub publisher: String,
    /// Release date as `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Rating label per rating group name (`CERO`, `ESRB`, `PEGI`)
    #[serde(default)]
    pub ratings: BTreeMap<String, String>,
    /// Content descriptors per rating group name (`"Mild Cartoon Violence"`, ...)
    #[serde(default)]
    pub rating_descriptors: BTreeMap<String, Vec<String>>,
    /// Controller and peripheral identifiers (`wiimote`, `nunchuk`, `wheel`, `mii`, ...)
    #[serde(default)]
    pub controllers: Vec<String>,
    /// Feature identifiers (`wiiconnect24`, `nintendowifi`, `dlc`, ...)
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub online_players: u8,
    #[serde(default)]
    pub languages: Vec<Language>,
    /// Price in Wii Points for download titles
    #[serde(default)]
    pub wii_points: Option<u32>,
}

impl TitleRecord {
    /// Four-character identifier written into title tables
    pub fn short_id(&self) -> Result<[u8; TITLE_ID_LEN]> {
        let bytes = self.id.as_bytes();
        if bytes.len() < TITLE_ID_LEN || !bytes[..TITLE_ID_LEN].is_ascii() {
            return Err(ChannelError::SourceData(format!(
                "title identifier '{}' is not at least {TITLE_ID_LEN} ASCII characters",
                self.id
            )));
        }
        let mut id = [0u8; TITLE_ID_LEN];
        id.copy_from_slice(&bytes[..TITLE_ID_LEN]);
        Ok(id)
    }

    /// Name in `language`, falling back to English, then to any name
    pub fn text_for(&self, language: Language) -> Option<&LocalizedText> {
        self.names
            .get(language.code())
            .or_else(|| self.names.get(Language::English.code()))
            .or_else(|| self.names.values().next())
    }

    /// Rating id for `group`, [`DEFAULT_RATING_ID`] when unrated
    pub fn rating_id(&self, group: RatingGroup) -> u8 {
        self.ratings
            .get(group.name())
            .and_then(|label| group.rating_id(label))
            .unwrap_or(DEFAULT_RATING_ID)
    }

    /// Content descriptors of `group`, in catalog order
    pub fn descriptors(&self, group: RatingGroup) -> &[String] {
        self.rating_descriptors
            .get(group.name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parsed release date, `None` when unknown
    pub fn release(&self) -> Result<Option<NaiveDate>> {
        self.release_date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    ChannelError::SourceData(format!(
                        "title {} has invalid release date '{raw}': {e}",
                        self.id
                    ))
                })
            })
            .transpose()
    }

    pub fn has_controller(&self, name: &str) -> bool {
        self.controllers.iter().any(|c| c == name)
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f == name)
    }
}

/// A channel video (trailer, developer interview, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: u32,
    /// Title per language code; `\n` escapes mark line breaks
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    /// Length in seconds
    pub length: u16,
    #[serde(default)]
    pub video_type: u8,
    /// Higher is more popular
    #[serde(default)]
    pub popularity: u32,
}

impl VideoRecord {
    pub fn title_for(&self, language: Language) -> &str {
        self.names
            .get(language.code())
            .or_else(|| self.names.get(Language::English.code()))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Aggregated recommendation votes for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub title_id: String,
    pub count: u32,
}

/// Aggregated play-time statistics for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTimeRecord {
    pub title_id: String,
    /// Distinct players who reported play time
    pub players: u32,
    pub times_played: u32,
    /// Total minutes played
    pub time_played: u32,
}

/// A downloadable demo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoRecord {
    pub id: u32,
    /// Identifier of the full title the demo belongs to
    pub title_id: String,
    #[serde(default)]
    pub names: BTreeMap<String, LocalizedText>,
    /// Removal date as `YYYY-MM-DD`
    #[serde(default)]
    pub removal_date: Option<String>,
    #[serde(default)]
    pub is_new: bool,
}

impl DemoRecord {
    pub fn text_for(&self, language: Language) -> Option<&LocalizedText> {
        self.names
            .get(language.code())
            .or_else(|| self.names.get(Language::English.code()))
    }

    pub fn removal(&self) -> Result<Option<NaiveDate>> {
        self.removal_date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    ChannelError::SourceData(format!(
                        "demo {} has invalid removal date '{raw}': {e}",
                        self.id
                    ))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(id: &str) -> TitleRecord {
        TitleRecord {
            id: id.to_string(),
            title_type: "Wii".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_regional_eligibility() {
        assert!(is_available("RSPE", Region::Ntsc));
        assert!(is_available("RSPN", Region::Ntsc));
        assert!(!is_available("RSPE", Region::Pal));
        assert!(is_available("RSPP", Region::Pal));
        assert!(is_available("RSPM", Region::Pal));
        assert!(is_available("RSPJ", Region::Japan));
        assert!(!is_available("RSPJ", Region::Ntsc));
        for global in ["RSPA", "RSPB", "RSPU", "RSPX"] {
            assert!(is_available(global, Region::Japan));
            assert!(is_available(global, Region::Pal));
            assert!(is_available(global, Region::Ntsc));
        }
        assert!(!is_available("RSP", Region::Ntsc));
    }

    #[test]
    fn test_short_id_requires_four_ascii_characters() {
        assert_eq!(&title("RSPE01").short_id().unwrap(), b"RSPE");
        assert!(matches!(title("RSP").short_id(), Err(ChannelError::SourceData(_))));
    }

    #[test]
    fn test_text_falls_back_to_english() {
        let mut record = title("RSPE");
        record.names.insert(
            "en".to_string(),
            LocalizedText {
                title: "Wii Sports".to_string(),
                synopsis: String::new(),
            },
        );
        assert_eq!(record.text_for(Language::French).unwrap().title, "Wii Sports");
    }

    #[test]
    fn test_rating_defaults_when_missing() {
        let mut record = title("RSPE");
        assert_eq!(record.rating_id(RatingGroup::Esrb), DEFAULT_RATING_ID);
        record.ratings.insert("ESRB".to_string(), "T".to_string());
        assert_eq!(record.rating_id(RatingGroup::Esrb), 11);
    }

    #[test]
    fn test_descriptors_per_group() {
        let mut record = title("RSPE");
        assert!(record.descriptors(RatingGroup::Esrb).is_empty());
        record.rating_descriptors.insert(
            "ESRB".to_string(),
            vec!["Mild Cartoon Violence".to_string()],
        );
        assert_eq!(record.descriptors(RatingGroup::Esrb), ["Mild Cartoon Violence"]);
        assert!(record.descriptors(RatingGroup::Pegi).is_empty());
    }

    #[test]
    fn test_release_date_parsing() {
        let mut record = title("RSPE");
        assert_eq!(record.release().unwrap(), None);
        record.release_date = Some("2006-11-19".to_string());
        assert_eq!(
            record.release().unwrap(),
            NaiveDate::from_ymd_opt(2006, 11, 19)
        );
        record.release_date = Some("19/11/2006".to_string());
        assert!(record.release().is_err());
    }
}
