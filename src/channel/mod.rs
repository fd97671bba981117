//! Nintendo Channel container generation
//!
//! Builds the download lists, per-title info files and the thumbnail pack the
//! channel downloads, from catalog records and reference assets.

pub mod assets;
pub mod catalog;
pub mod checksums;
pub mod codec;
pub mod compression;
pub mod constants;
pub mod context;
pub mod defaults;
pub mod finalization;
pub mod images;
pub mod info;
pub mod list;
pub mod locale;
pub mod paths;
pub mod pipeline;
pub mod records;
pub mod text;
pub mod thumbnail;

// Re-export the container types
pub use info::Info;
pub use list::List;
pub use thumbnail::Thumbnail;

// Re-export pipeline entry points
pub use assets::ReferenceAssets;
pub use catalog::Catalog;
pub use finalization::{Finalized, finalize};
pub use images::{CoverArtSource, HttpArtSource, OfflineArtSource};
pub use locale::Locale;
pub use pipeline::{JobReport, JobState, LocalePipeline};
