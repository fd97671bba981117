//! Read-only catalog shared by every locale job

use super::constants::Region;
use super::defaults::{DEMOS_FILE, PLAY_TIME_FILE, TITLES_FILE, VIDEOS_FILE, VOTES_FILE};
use super::records::{
    DemoRecord, PlayTimeRecord, TITLE_ID_LEN, TitleRecord, VideoRecord, VoteRecord, is_available,
};
use crate::exceptions::{ChannelError, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Every source record the generator needs, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub titles: Vec<TitleRecord>,
    pub videos: Vec<VideoRecord>,
    pub votes: Vec<VoteRecord>,
    pub play_times: Vec<PlayTimeRecord>,
    pub demos: Vec<DemoRecord>,
}

/// Read a JSON array file; a missing file is an empty list
fn read_records<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    if !path.exists() {
        debug!("📭 {} not present, using no records", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| {
        ChannelError::SourceData(format!("failed to parse {}: {e}", path.display()))
    })
}

impl Catalog {
    /// Load all record files from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ChannelError::Config(format!(
                "catalog directory {} does not exist",
                dir.display()
            )));
        }

        let catalog = Catalog {
            titles: read_records(dir, TITLES_FILE)?,
            videos: read_records(dir, VIDEOS_FILE)?,
            votes: read_records(dir, VOTES_FILE)?,
            play_times: read_records(dir, PLAY_TIME_FILE)?,
            demos: read_records(dir, DEMOS_FILE)?,
        };

        info!(
            "📚 Loaded catalog: {} titles, {} videos, {} votes, {} play-time records, {} demos",
            catalog.titles.len(),
            catalog.videos.len(),
            catalog.votes.len(),
            catalog.play_times.len(),
            catalog.demos.len()
        );
        Ok(catalog)
    }

    /// Titles sold in `region`, in catalog order
    pub fn titles_for(&self, region: Region) -> impl Iterator<Item = &TitleRecord> {
        self.titles
            .iter()
            .filter(move |t| is_available(&t.id, region))
    }

    /// Vote counts eligible for `region`, keyed by four-character title id
    pub fn votes_for(&self, region: Region) -> HashMap<String, u32> {
        let mut votes = HashMap::new();
        for vote in &self.votes {
            if !is_available(&vote.title_id, region) {
                continue;
            }
            let key = vote.title_id.get(..TITLE_ID_LEN).unwrap_or(&vote.title_id);
            let total = votes.entry(key.to_string()).or_insert(0u32);
            *total = total.saturating_add(vote.count);
        }
        votes
    }

    /// Play-time aggregates keyed by four-character title id
    pub fn play_time_index(&self) -> HashMap<&str, &PlayTimeRecord> {
        let mut index = HashMap::new();
        for record in &self.play_times {
            if record.players == 0 {
                warn!("⚠️ Skipping play-time record for {} with no players", record.title_id);
                continue;
            }
            let key = record.title_id.get(..TITLE_ID_LEN).unwrap_or(&record.title_id);
            index.insert(key, record);
        }
        index
    }

    /// Videos in descending popularity, ties in catalog order
    pub fn popular_videos(&self) -> Vec<&VideoRecord> {
        let mut videos: Vec<&VideoRecord> = self.videos.iter().collect();
        videos.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        videos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_are_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(TITLES_FILE),
            r#"[{"id": "RSPE01", "title_type": "Wii"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.titles.len(), 1);
        assert!(catalog.videos.is_empty());
        assert!(catalog.votes.is_empty());
    }

    #[test]
    fn test_missing_directory_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ChannelError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_a_source_data_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(VOTES_FILE), "{not json").unwrap();
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ChannelError::SourceData(_)));
    }

    #[test]
    fn test_votes_are_filtered_by_region() {
        let catalog = Catalog {
            votes: vec![
                VoteRecord {
                    title_id: "RSPE".to_string(),
                    count: 12,
                },
                VoteRecord {
                    title_id: "RSPP".to_string(),
                    count: 40,
                },
                VoteRecord {
                    title_id: "RMGX".to_string(),
                    count: 3,
                },
            ],
            ..Default::default()
        };

        let votes = catalog.votes_for(Region::Ntsc);
        assert_eq!(votes.len(), 2);
        assert_eq!(votes["RSPE"], 12);
        assert_eq!(votes["RMGX"], 3);
    }

    #[test]
    fn test_votes_merge_on_four_character_prefix() {
        let catalog = Catalog {
            votes: vec![
                VoteRecord {
                    title_id: "RMCE01".to_string(),
                    count: 30,
                },
                VoteRecord {
                    title_id: "RMCE".to_string(),
                    count: 5,
                },
                VoteRecord {
                    title_id: "RSPE01".to_string(),
                    count: u32::MAX,
                },
                VoteRecord {
                    title_id: "RSPE".to_string(),
                    count: 7,
                },
            ],
            ..Default::default()
        };

        let votes = catalog.votes_for(Region::Ntsc);
        assert_eq!(votes.len(), 2);
        assert_eq!(votes["RMCE"], 35);
        // Counts saturate instead of wrapping
        assert_eq!(votes["RSPE"], u32::MAX);
    }

    #[test]
    fn test_play_time_skips_records_without_players() {
        let catalog = Catalog {
            play_times: vec![
                PlayTimeRecord {
                    title_id: "RSPE01".to_string(),
                    players: 2,
                    times_played: 10,
                    time_played: 600,
                },
                PlayTimeRecord {
                    title_id: "RMCE".to_string(),
                    players: 0,
                    times_played: 1,
                    time_played: 1,
                },
            ],
            ..Default::default()
        };

        let index = catalog.play_time_index();
        assert!(index.contains_key("RSPE"));
        assert!(!index.contains_key("RMCE"));
    }
}
