// src/channel/defaults.rs
// Centralized default values for generation runs

// =================================
// Worker pool defaults
// =================================
pub const DEFAULT_WORKERS: usize = 3; // Concurrent locale jobs

// =================================
// Art service defaults
// =================================
pub const DEFAULT_ART_BASE_URL: &str = "https://art.gametdb.com";
pub const DEFAULT_ART_TIMEOUT_SECS: u64 = 30;
pub const COVER_ART_SIZE: u32 = 384; // Square canvas edge in pixels
pub const COVER_JPEG_QUALITY: u8 = 75;

// =================================
// List defaults
// =================================
pub const DEFAULT_LIST_ID: u32 = 1;
pub const DEFAULT_NEW_TITLE_COUNT: usize = 20;
pub const MAX_LISTED_VIDEOS: usize = 59; // Entries after the synthetic "New Arrivals" video

// =================================
// Medal defaults (minimum vote counts)
// =================================
pub const DEFAULT_BRONZE_VOTES: u32 = 10;
pub const DEFAULT_SILVER_VOTES: u32 = 25;
pub const DEFAULT_GOLD_VOTES: u32 = 50;
pub const DEFAULT_PLATINUM_VOTES: u32 = 100;

// =================================
// Text defaults
// =================================
pub const DEFAULT_DISCLAIMER: &str = "Game information is provided by GameTDB.";

// =================================
// Path constants
// =================================
pub const DEFAULT_CATALOG_DIR: &str = "catalog";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_CLIPS_DIR: &str = "movie/US/en";
pub const LISTS_DIR: &str = "lists";
pub const INFOS_DIR: &str = "infos";
pub const LIST_FILE_NAME: &str = "dllist.bin";
pub const INFO_FILE_SUFFIX: &str = "info";
pub const THUMBNAIL_FILE_NAME: &str = "thumbnail.bin";
pub const CLIP_FILE_SUFFIX: &str = "img";

// =================================
// Catalog file names
// =================================
pub const TITLES_FILE: &str = "titles.json";
pub const VIDEOS_FILE: &str = "videos.json";
pub const VOTES_FILE: &str = "votes.json";
pub const PLAY_TIME_FILE: &str = "play_time.json";
pub const DEMOS_FILE: &str = "demos.json";
