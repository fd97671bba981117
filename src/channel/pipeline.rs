//! Locale job pipeline
//!
//! One job per (region, language) pair. Jobs run on a bounded rayon pool and
//! share only read-only inputs; each job owns its list, its info files and its
//! output directories. The first failing job aborts the run.

use super::assets::ReferenceAssets;
use super::catalog::Catalog;
use super::compression::compress;
use super::context::{JobContext, JobSettings};
use super::finalization::finalize;
use super::images::{CoverArtSource, ImagePipeline};
use super::info::{InfoStats, write_infos};
use super::list::List;
use super::locale::Locale;
use super::paths::{OutputPaths, write_output};
use crate::exceptions::{ChannelError, Result};
use log::{debug, error, info};
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

/// Lifecycle of one locale job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Queued,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobState::Queued => "queued",
            JobState::Running => "running",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// What a finished job produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub locale: Locale,
    pub state: JobState,
    /// Uncompressed list size
    pub list_bytes: usize,
    pub infos: InfoStats,
}

/// Shared read-only inputs of a generation run
#[derive(Debug, Clone, Copy)]
pub struct LocalePipeline<'a> {
    pub catalog: &'a Catalog,
    pub assets: &'a ReferenceAssets,
    pub art_source: &'a dyn CoverArtSource,
    pub art_base_url: &'a str,
    pub settings: &'a JobSettings,
    pub paths: &'a OutputPaths,
    pub workers: usize,
}

impl LocalePipeline<'_> {
    /// Run every locale job; reports come back in job order
    pub fn run(&self) -> Result<Vec<JobReport>> {
        self.run_jobs(&Locale::all())
    }

    /// Run the given jobs on a pool of `workers` threads
    pub fn run_jobs(&self, locales: &[Locale]) -> Result<Vec<JobReport>> {
        if self.workers == 0 {
            return Err(ChannelError::Config("worker count must be at least 1".to_string()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("ncgen-job-{i}"))
            .build()
            .map_err(|e| ChannelError::Generic(format!("failed to start worker pool: {e}")))?;

        for locale in locales {
            debug!("🗂️ {locale}: {}", JobState::Queued);
        }
        info!("🚀 Running {} locale jobs on {} workers", locales.len(), self.workers);

        let started = Instant::now();
        let reports = pool.install(|| {
            locales
                .par_iter()
                .map(|locale| self.run_job(*locale))
                .collect::<Result<Vec<JobReport>>>()
        })?;

        info!(
            "✅ {} locale jobs completed in {:.2?}",
            reports.len(),
            started.elapsed()
        );
        Ok(reports)
    }

    fn run_job(&self, locale: Locale) -> Result<JobReport> {
        debug!("🗂️ {locale}: {}", JobState::Running);
        match self.compile_locale(locale) {
            Ok(report) => {
                debug!("🗂️ {locale}: {}", report.state);
                Ok(report)
            }
            Err(e) => {
                error!("❌ {locale}: {} ({e})", JobState::Failed);
                Err(e)
            }
        }
    }

    fn compile_locale(&self, locale: Locale) -> Result<JobReport> {
        let ctx = JobContext {
            locale,
            catalog: self.catalog,
            images: ImagePipeline::new(self.art_source, self.assets, self.art_base_url),
            settings: self.settings,
            paths: self.paths,
        };

        let (list, placed) = List::build(&ctx)?;
        let infos = write_infos(&ctx, &placed)?;

        let finalized = finalize(list)?;
        let path = self.paths.list(&locale);
        write_output(&path, &compress(&finalized.bytes)?)?;
        info!("💾 {locale}: wrote {}", path.display());

        Ok(JobReport {
            locale,
            state: JobState::Completed,
            list_bytes: finalized.bytes.len(),
            infos,
        })
    }
}
