//! Cover art fetching and normalization
//!
//! Covers come from the art service as PNG, get scaled to fit a 384×384 white
//! square and are re-encoded as JPEG. When the service has nothing for a title
//! the console family's placeholder JPEG is used verbatim.

use super::assets::ReferenceAssets;
use super::constants::{ConsoleFamily, RatingGroup, Region};
use super::defaults::{COVER_ART_SIZE, COVER_JPEG_QUALITY};
use crate::exceptions::{ChannelError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use log::{debug, warn};
use std::fmt;
use std::time::Duration;

/// Outcome of asking the art service for one cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtFetch {
    /// Response body of a successful request
    Found(Vec<u8>),
    /// Network failure or non-success status
    Missing,
}

/// Where cover art comes from; shared read-only across worker threads
pub trait CoverArtSource: Send + Sync + fmt::Debug {
    fn fetch(&self, url: &str) -> ArtFetch;
}

/// Blocking HTTP client with a per-request timeout
#[derive(Debug)]
pub struct HttpArtSource {
    client: reqwest::blocking::Client,
}

impl HttpArtSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ncgen/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl CoverArtSource for HttpArtSource {
    fn fetch(&self, url: &str) -> ArtFetch {
        match self.client.get(url).send() {
            Ok(response) if response.status().is_success() => match response.bytes() {
                Ok(body) => ArtFetch::Found(body.to_vec()),
                Err(e) => {
                    warn!("⚠️ Failed to read cover art body from {url}: {e}");
                    ArtFetch::Missing
                }
            },
            Ok(response) => {
                debug!("🖼️ No cover art at {url} ({})", response.status());
                ArtFetch::Missing
            }
            Err(e) => {
                warn!("⚠️ Cover art request to {url} failed: {e}");
                ArtFetch::Missing
            }
        }
    }
}

/// Never contacts the network; every title gets its placeholder
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineArtSource;

impl CoverArtSource for OfflineArtSource {
    fn fetch(&self, _url: &str) -> ArtFetch {
        ArtFetch::Missing
    }
}

/// Region segment of art service URLs
fn region_art_code(region: Region) -> &'static str {
    match region {
        Region::Japan => "JA",
        Region::Pal => "EN",
        Region::Ntsc => "US",
    }
}

/// `{base}/{wii|ds|3ds}/{cover|box}/{JA|EN|US}/{title_id}.png`
pub fn art_url(base_url: &str, family: ConsoleFamily, region: Region, title_id: &str) -> String {
    format!(
        "{}/{}/{}/{}/{}.png",
        base_url.trim_end_matches('/'),
        family.art_path(),
        family.art_kind(),
        region_art_code(region),
        title_id
    )
}

/// Scale `body` to fit the cover square, center it on white and encode as JPEG
pub fn fit_cover(body: &[u8]) -> Result<Vec<u8>> {
    let cover = image::load_from_memory(body)
        .map_err(|e| ChannelError::SourceData(format!("cover art could not be decoded: {e}")))?;

    let resized = cover.resize(COVER_ART_SIZE, COVER_ART_SIZE, FilterType::Lanczos3);
    let x = (COVER_ART_SIZE - resized.width()) / 2;
    let y = (COVER_ART_SIZE - resized.height()) / 2;

    let mut canvas = RgbaImage::from_pixel(COVER_ART_SIZE, COVER_ART_SIZE, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &resized.to_rgba8(), i64::from(x), i64::from(y));
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, COVER_JPEG_QUALITY).encode_image(&rgb)?;
    Ok(jpeg)
}

/// Cover art and rating badges for container image blobs
#[derive(Debug, Clone, Copy)]
pub struct ImagePipeline<'a> {
    source: &'a dyn CoverArtSource,
    assets: &'a ReferenceAssets,
    base_url: &'a str,
}

impl<'a> ImagePipeline<'a> {
    pub fn new(source: &'a dyn CoverArtSource, assets: &'a ReferenceAssets, base_url: &'a str) -> Self {
        Self {
            source,
            assets,
            base_url,
        }
    }

    /// 384×384 JPEG cover for a title, or the family placeholder
    pub fn cover_art(&self, region: Region, family: ConsoleFamily, title_id: &str) -> Result<Vec<u8>> {
        let url = art_url(self.base_url, family, region, title_id);
        match self.source.fetch(&url) {
            ArtFetch::Found(body) => fit_cover(&body),
            ArtFetch::Missing => Ok(self.assets.placeholder(family).to_vec()),
        }
    }

    /// Stock badge for a rating
    pub fn rating_badge(&self, group: RatingGroup, rating_id: u8) -> Result<&'a [u8]> {
        self.assets.badge(group, rating_id)
    }

    /// Content descriptor picture, when the assets carry one
    pub fn detailed_rating_picture(&self, group: RatingGroup, descriptor: &str) -> Option<&'a [u8]> {
        self.assets.descriptor_picture(group, descriptor)
    }

    pub fn assets(&self) -> &'a ReferenceAssets {
        self.assets
    }
}
