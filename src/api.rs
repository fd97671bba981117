//! High-level API for generator runs

use crate::channel::assets::ReferenceAssets;
use crate::channel::catalog::Catalog;
use crate::channel::images::{CoverArtSource, HttpArtSource, OfflineArtSource};
use crate::channel::paths::OutputPaths;
use crate::channel::pipeline::{JobReport, LocalePipeline};
use crate::channel::thumbnail::write_thumbnail;
use crate::config::GeneratorConfig;
use crate::exceptions::Result;
use log::info;
use std::time::Duration;

/// Options for a list generation run
#[derive(Debug, Default, Clone)]
pub struct GenerateOptions {
    /// Regenerate info files that already exist
    pub force_infos: bool,
}

/// Summary of a list generation run
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub jobs: Vec<JobReport>,
    pub infos_written: usize,
    pub infos_skipped: usize,
}

/// Generate every locale's download list and the info files it references
pub fn generate_lists(config: &GeneratorConfig, options: &GenerateOptions) -> Result<GenerateSummary> {
    let catalog = Catalog::load(&config.catalog_dir)?;
    let assets = ReferenceAssets::load(&config.assets_dir)?;

    if config.offline {
        info!("📴 Offline mode: using placeholder cover art");
        generate_lists_with(config, options, &catalog, &assets, &OfflineArtSource)
    } else {
        let source = HttpArtSource::new(Duration::from_secs(config.art_timeout_secs))?;
        generate_lists_with(config, options, &catalog, &assets, &source)
    }
}

/// [`generate_lists`] with caller-supplied inputs and art source
pub fn generate_lists_with(
    config: &GeneratorConfig,
    options: &GenerateOptions,
    catalog: &Catalog,
    assets: &ReferenceAssets,
    art_source: &dyn CoverArtSource,
) -> Result<GenerateSummary> {
    let settings = config.job_settings(options.force_infos);
    let paths = OutputPaths::new(&config.output_dir);

    let pipeline = LocalePipeline {
        catalog,
        assets,
        art_source,
        art_base_url: &config.art_base_url,
        settings: &settings,
        paths: &paths,
        workers: config.workers,
    };
    let jobs = pipeline.run()?;

    let infos_written = jobs.iter().map(|j| j.infos.written).sum();
    let infos_skipped = jobs.iter().map(|j| j.infos.skipped).sum();
    info!(
        "📦 Generated {} lists and {infos_written} info files ({infos_skipped} kept)",
        jobs.len()
    );

    Ok(GenerateSummary {
        jobs,
        infos_written,
        infos_skipped,
    })
}

/// Generate the thumbnail pack; returns its size in bytes
pub fn generate_thumbnails(config: &GeneratorConfig) -> Result<usize> {
    let catalog = Catalog::load(&config.catalog_dir)?;
    let paths = OutputPaths::new(&config.output_dir);
    write_thumbnail(&catalog, &config.clips_dir, &paths)
}
