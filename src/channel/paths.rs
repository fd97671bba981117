//! Output layout under the configured output directory

use super::defaults::{INFOS_DIR, INFO_FILE_SUFFIX, LIST_FILE_NAME, LISTS_DIR, THUMBNAIL_FILE_NAME};
use super::locale::Locale;
use crate::exceptions::Result;
use log::trace;
use std::fs;
use std::path::{Path, PathBuf};

/// Where every generated file goes
#[derive(Debug, Clone)]
pub struct OutputPaths {
    root: PathBuf,
}

impl OutputPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ==================== Lists ====================

    /// `lists/{region}/{language}/`
    pub fn list_dir(&self, locale: &Locale) -> PathBuf {
        self.root
            .join(LISTS_DIR)
            .join(locale.region.id().to_string())
            .join(locale.language.id().to_string())
    }

    /// `lists/{region}/{language}/dllist.bin`
    pub fn list(&self, locale: &Locale) -> PathBuf {
        self.list_dir(locale).join(LIST_FILE_NAME)
    }

    // ==================== Infos ====================

    /// `infos/{region}/{language}/`
    pub fn info_dir(&self, locale: &Locale) -> PathBuf {
        self.root
            .join(INFOS_DIR)
            .join(locale.region.id().to_string())
            .join(locale.language.id().to_string())
    }

    /// `infos/{region}/{language}/{file_id}.info`
    pub fn info(&self, locale: &Locale, file_id: u32) -> PathBuf {
        self.info_dir(locale)
            .join(format!("{file_id}.{INFO_FILE_SUFFIX}"))
    }

    // ==================== Thumbnails ====================

    pub fn thumbnail(&self) -> PathBuf {
        self.root.join(THUMBNAIL_FILE_NAME)
    }
}

/// Write `bytes` to `path`, creating parent directories
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    trace!("💾 Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::constants::{Language, Region};
    use tempfile::TempDir;

    #[test]
    fn test_paths_structure() {
        let paths = OutputPaths::new("/srv/nc");
        let locale = Locale::new(Region::Ntsc, Language::English).unwrap();

        assert_eq!(paths.list(&locale), PathBuf::from("/srv/nc/lists/2/1/dllist.bin"));
        assert_eq!(
            paths.info(&locale, 3_735_928_559),
            PathBuf::from("/srv/nc/infos/2/1/3735928559.info")
        );
        assert_eq!(paths.thumbnail(), PathBuf::from("/srv/nc/thumbnail.bin"));

        let japan = Locale::new(Region::Japan, Language::Japanese).unwrap();
        assert_eq!(paths.list_dir(&japan), PathBuf::from("/srv/nc/lists/0/0"));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists/1/2/dllist.bin");
        write_output(&path, b"data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"data");
    }
}
