//! Everything one locale job reads: shared catalog, images, settings

use super::catalog::Catalog;
use super::images::ImagePipeline;
use super::locale::Locale;
use super::paths::OutputPaths;
use super::list::MedalThresholds;

/// Per-run knobs that shape list and info contents
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub list_id: u32,
    pub new_title_count: usize,
    pub rank_popular_videos: bool,
    pub medals: MedalThresholds,
    pub disclaimer: String,
    /// Rewrite info files that already exist
    pub overwrite_infos: bool,
}

/// Read-only view handed to one locale job
#[derive(Debug, Clone, Copy)]
pub struct JobContext<'a> {
    pub locale: Locale,
    pub catalog: &'a Catalog,
    pub images: ImagePipeline<'a>,
    pub settings: &'a JobSettings,
    pub paths: &'a OutputPaths,
}
