//! Generator configuration
//!
//! Read from a JSON file where every field is optional, then overridden by
//! `NCGEN_*` environment variables.

use crate::channel::context::JobSettings;
use crate::channel::defaults::{
    DEFAULT_ART_BASE_URL, DEFAULT_ART_TIMEOUT_SECS, DEFAULT_ASSETS_DIR, DEFAULT_CATALOG_DIR,
    DEFAULT_CLIPS_DIR, DEFAULT_DISCLAIMER, DEFAULT_LIST_ID, DEFAULT_NEW_TITLE_COUNT,
    DEFAULT_OUTPUT_DIR, DEFAULT_WORKERS,
};
use crate::channel::list::MedalThresholds;
use crate::exceptions::{ChannelError, Result};
use crate::utils::{env_usize, is_env_true};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`GeneratorConfig::output_dir`]
pub const ENV_OUTPUT_DIR: &str = "NCGEN_OUTPUT_DIR";
/// Environment variable overriding [`GeneratorConfig::workers`]
pub const ENV_WORKERS: &str = "NCGEN_WORKERS";
/// Truthy value forces [`GeneratorConfig::offline`]
pub const ENV_OFFLINE: &str = "NCGEN_OFFLINE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding the catalog JSON files
    pub catalog_dir: PathBuf,
    /// Directory holding rating badges and cover placeholders
    pub assets_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Directory holding `{video id}.img` preview clips
    pub clips_dir: PathBuf,
    pub workers: usize,
    pub list_id: u32,
    pub new_title_count: usize,
    pub art_base_url: String,
    pub art_timeout_secs: u64,
    /// Never contact the art service; every title gets its placeholder
    pub offline: bool,
    pub rank_popular_videos: bool,
    pub disclaimer: String,
    pub medal_thresholds: MedalThresholds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from(DEFAULT_CATALOG_DIR),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            clips_dir: PathBuf::from(DEFAULT_CLIPS_DIR),
            workers: DEFAULT_WORKERS,
            list_id: DEFAULT_LIST_ID,
            new_title_count: DEFAULT_NEW_TITLE_COUNT,
            art_base_url: DEFAULT_ART_BASE_URL.to_string(),
            art_timeout_secs: DEFAULT_ART_TIMEOUT_SECS,
            offline: false,
            rank_popular_videos: false,
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
            medal_thresholds: MedalThresholds::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load `path` (or the defaults when `None`), apply the environment and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("⚙️ Reading configuration from {}", path.display());
        let data = fs::read_to_string(path).map_err(|e| {
            ChannelError::Config(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_json(&data)
            .map_err(|e| ChannelError::Config(format!("invalid config {}: {e}", path.display())))
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Apply `NCGEN_OUTPUT_DIR`, `NCGEN_WORKERS` and `NCGEN_OFFLINE`
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var(ENV_OUTPUT_DIR) {
            debug!("⚙️ Output directory from {ENV_OUTPUT_DIR}: {dir}");
            self.output_dir = PathBuf::from(dir);
        }
        if env::var_os(ENV_WORKERS).is_some() {
            match env_usize(ENV_WORKERS) {
                Some(workers) => self.workers = workers,
                None => warn!("⚠️ Ignoring unparsable {ENV_WORKERS}"),
            }
        }
        if is_env_true(ENV_OFFLINE) {
            self.offline = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ChannelError::Config("workers must be at least 1".to_string()));
        }
        if self.art_timeout_secs == 0 {
            return Err(ChannelError::Config("art_timeout_secs must be at least 1".to_string()));
        }
        self.medal_thresholds.validate()
    }

    /// Knobs handed to every locale job
    pub fn job_settings(&self, overwrite_infos: bool) -> JobSettings {
        JobSettings {
            list_id: self.list_id,
            new_title_count: self.new_title_count,
            rank_popular_videos: self.rank_popular_videos,
            medals: self.medal_thresholds,
            disclaimer: self.disclaimer.clone(),
            overwrite_infos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.workers, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_medal_thresholds() {
        let config =
            GeneratorConfig::from_json(r#"{"workers": 5, "medal_thresholds": {"platinum": 500}}"#)
                .unwrap();
        assert_eq!(config.workers, 5);
        assert_eq!(config.medal_thresholds.bronze, 10);
        assert_eq!(config.medal_thresholds.platinum, 500);
    }

    #[test]
    fn test_validation() {
        let mut config = GeneratorConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ChannelError::Config(_))));

        config.workers = 1;
        config.medal_thresholds.gold = config.medal_thresholds.silver;
        assert!(matches!(config.validate(), Err(ChannelError::Config(_))));
    }

    #[test]
    fn test_bad_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ncgen.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(GeneratorConfig::from_file(&path), Err(ChannelError::Config(_))));
        assert!(matches!(
            GeneratorConfig::from_file(&dir.path().join("missing.json")),
            Err(ChannelError::Config(_))
        ));
    }

    #[test]
    fn test_job_settings() {
        let config = GeneratorConfig::default();
        let settings = config.job_settings(true);
        assert!(settings.overwrite_infos);
        assert_eq!(settings.list_id, 1);
        assert_eq!(settings.new_title_count, 20);
    }
}
