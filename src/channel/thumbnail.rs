//! Thumbnail pack (`thumbnail.bin`) compiler
//!
//! The pack holds the preview clip of every catalog video. The image table
//! lists each clip twice and the blob carries two copies of the clip set.

use super::catalog::Catalog;
use super::codec::{ByteWriter, Record, table_len, write_record, write_table};
use super::constants::CONTAINER_VERSION;
use super::defaults::CLIP_FILE_SUFFIX;
use super::finalization::{Container, finalize};
use super::paths::{OutputPaths, write_output};
use crate::exceptions::{ChannelError, Result, to_u32};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::Path;

/// Every clip starts where `256 + blob length` is a multiple of this
pub const CLIP_ALIGNMENT: usize = 32;

const ALIGNMENT_BIAS: usize = 256;
const PADDING_PATTERN: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

/// Times the clip set is stored in one pack
const CLIP_SET_COPIES: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailHeader {
    pub filesize: u32,
    pub number_of_images: u32,
}

impl Record for ThumbnailHeader {
    const SIZE: usize = 32;

    fn encode(&self, w: &mut ByteWriter) {
        w.u16(0);
        w.u8(CONTAINER_VERSION);
        w.u8(2);
        w.u32(self.filesize);
        w.u32(601_820_255);
        // Language and country are fixed: the pack is shared by every locale
        w.u32(1);
        w.u32(49);
        w.u32(1);
        w.u32(1_252_951_207);
        w.u32(self.number_of_images);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageTableEntry {
    pub image_size: u32,
    pub image_offset: u32,
}

impl Record for ImageTableEntry {
    const SIZE: usize = 8;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.image_size);
        w.u32(self.image_offset);
    }
}

/// In-memory thumbnail pack
#[derive(Debug, Clone, Default)]
pub struct Thumbnail {
    pub header: ThumbnailHeader,
    pub images: Vec<ImageTableEntry>,
    blob: Vec<u8>,
}

impl Thumbnail {
    /// Lay out `clips` twice behind the header and image table
    pub fn build(clips: &[Vec<u8>]) -> Result<Thumbnail> {
        let total = clips.len() * CLIP_SET_COPIES;
        let table_end = ThumbnailHeader::SIZE + ImageTableEntry::SIZE * total;

        let mut pack = Thumbnail {
            header: ThumbnailHeader {
                filesize: 0,
                number_of_images: to_u32(total, "thumbnail image count")?,
            },
            images: Vec::with_capacity(total),
            blob: Vec::new(),
        };

        for _ in 0..CLIP_SET_COPIES {
            for clip in clips {
                pack.images.push(ImageTableEntry {
                    image_size: to_u32(clip.len(), "clip size")?,
                    image_offset: to_u32(table_end + pack.blob.len(), "clip offset")?,
                });
                pack.blob.extend_from_slice(clip);
                pad_clip(&mut pack.blob);
            }
        }
        Ok(pack)
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }
}

/// Pad with the repeating pattern until the next clip is aligned
fn pad_clip(blob: &mut Vec<u8>) {
    let mut pattern = PADDING_PATTERN.iter().cycle();
    while (ALIGNMENT_BIAS + blob.len()) % CLIP_ALIGNMENT != 0 {
        if let Some(byte) = pattern.next() {
            blob.push(*byte);
        }
    }
}

impl Container for Thumbnail {
    const CHECKSUMMED: bool = false;

    fn describe(&self) -> String {
        "thumbnail pack".to_string()
    }

    fn serialized_len(&self) -> usize {
        ThumbnailHeader::SIZE + table_len(&self.images) + self.blob.len()
    }

    fn set_filesize(&mut self, filesize: u32) {
        self.header.filesize = filesize;
    }

    fn write_all(&self, w: &mut ByteWriter) -> Result<()> {
        write_record(w, &self.header)?;
        write_table(w, &self.images)?;
        w.bytes(&self.blob);
        Ok(())
    }
}

/// Read `{clips_dir}/{video id}.img` for every catalog video, in catalog order
pub fn load_clips(catalog: &Catalog, clips_dir: &Path) -> Result<Vec<Vec<u8>>> {
    catalog
        .videos
        .iter()
        .map(|video| {
            let path = clips_dir.join(format!("{}.{CLIP_FILE_SUFFIX}", video.id));
            fs::read(&path).map_err(|e| {
                ChannelError::IoError(io::Error::new(
                    e.kind(),
                    format!("failed to read clip {}: {e}", path.display()),
                ))
            })
        })
        .collect()
}

/// Build the pack from the catalog's clips and write it uncompressed.
///
/// Returns the number of bytes written.
pub fn write_thumbnail(catalog: &Catalog, clips_dir: &Path, paths: &OutputPaths) -> Result<usize> {
    let clips = load_clips(catalog, clips_dir)?;
    debug!("🎞️ Loaded {} clips from {}", clips.len(), clips_dir.display());

    let finalized = finalize(Thumbnail::build(&clips)?)?;
    let path = paths.thumbnail();
    write_output(&path, &finalized.bytes)?;

    info!("🎞️ Wrote {} ({} bytes)", path.display(), finalized.bytes.len());
    Ok(finalized.bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::records::VideoRecord;
    use tempfile::TempDir;

    #[test]
    fn test_header_layout() {
        let pack = Thumbnail::build(&[vec![1, 2, 3]]).unwrap();
        let finalized = finalize(pack).unwrap();
        let bytes = &finalized.bytes;

        assert_eq!(bytes[2], 6);
        assert_eq!(bytes[3], 2);
        assert_eq!(&bytes[4..8], &(bytes.len() as u32).to_be_bytes());
        assert_eq!(&bytes[8..12], &601_820_255u32.to_be_bytes());
        assert_eq!(&bytes[28..32], &2u32.to_be_bytes());
    }

    #[test]
    fn test_clips_are_aligned_and_padded() {
        let clips = vec![vec![0xAA; 5], vec![0xBB; 40]];
        let pack = Thumbnail::build(&clips).unwrap();

        assert_eq!(pack.images.len(), 4);
        let table_end = 32 + 8 * 4;
        let mut blob_len = 0;
        for entry in &pack.images {
            let start = entry.image_offset as usize;
            assert_eq!(start, table_end + blob_len);
            assert_eq!((256 + start - table_end) % CLIP_ALIGNMENT, 0);
            blob_len = start - table_end + entry.image_size as usize;
            blob_len += (CLIP_ALIGNMENT - (256 + blob_len) % CLIP_ALIGNMENT) % CLIP_ALIGNMENT;
        }
        assert_eq!(blob_len, pack.blob().len());

        // Padding restarts the pattern after every clip
        assert_eq!(&pack.blob()[5..9], &PADDING_PATTERN);
        let second = pack.images[1].image_offset as usize - table_end;
        let second_end = second + 40;
        assert_eq!(&pack.blob()[second_end..second_end + 4], &PADDING_PATTERN);
    }

    #[test]
    fn test_clip_set_is_written_twice() {
        let clips = vec![vec![1; 32], vec![2; 7]];
        let pack = Thumbnail::build(&clips).unwrap();
        assert_eq!(pack.images[0].image_size, pack.images[2].image_size);
        assert_eq!(pack.images[1].image_size, pack.images[3].image_size);
        assert!(pack.images[2].image_offset > pack.images[1].image_offset);
    }

    #[test]
    fn test_write_thumbnail_reads_clips_in_catalog_order() {
        let clips = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(clips.path().join("7.img"), [7u8; 3]).unwrap();
        fs::write(clips.path().join("3.img"), [3u8; 3]).unwrap();

        let catalog = Catalog {
            videos: vec![
                VideoRecord { id: 7, ..Default::default() },
                VideoRecord { id: 3, ..Default::default() },
            ],
            ..Default::default()
        };
        let paths = OutputPaths::new(out.path());
        let written = write_thumbnail(&catalog, clips.path(), &paths).unwrap();

        let bytes = fs::read(paths.thumbnail()).unwrap();
        assert_eq!(bytes.len(), written);
        let first = u32::from_be_bytes(bytes[36..40].try_into().unwrap()) as usize;
        assert_eq!(bytes[first], 7);
    }

    #[test]
    fn test_missing_clip_is_an_error() {
        let clips = TempDir::new().unwrap();
        let catalog = Catalog {
            videos: vec![VideoRecord { id: 1, ..Default::default() }],
            ..Default::default()
        };
        let err = load_clips(&catalog, clips.path()).unwrap_err();
        assert!(matches!(err, ChannelError::IoError(_)));
    }
}
