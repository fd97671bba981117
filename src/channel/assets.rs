//! Reference images loaded once per run: rating badges, content descriptor
//! pictures and cover placeholders

use super::constants::{ConsoleFamily, FIRST_RATING_ID, RATINGS_PER_GROUP, RatingGroup};
use crate::exceptions::{ChannelError, Result};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const RATING_GROUPS: [RatingGroup; 3] = [RatingGroup::Cero, RatingGroup::Esrb, RatingGroup::Pegi];
const FAMILIES: [ConsoleFamily; 3] = [ConsoleFamily::Wii, ConsoleFamily::Ds, ConsoleFamily::ThreeDs];

/// Badge, descriptor and placeholder JPEGs
#[derive(Debug, Clone)]
pub struct ReferenceAssets {
    badges: HashMap<RatingGroup, Vec<Vec<u8>>>,
    descriptor_pictures: HashMap<RatingGroup, HashMap<String, Vec<u8>>>,
    placeholders: HashMap<ConsoleFamily, Vec<u8>>,
}

/// File stem a descriptor picture is stored under: `Mild Cartoon Violence` -> `mild_cartoon_violence`
pub fn descriptor_key(descriptor: &str) -> String {
    descriptor
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Every `*.jpg` under `dir`, keyed by file stem; a missing directory yields none
fn read_descriptor_dir(dir: &Path) -> Result<HashMap<String, Vec<u8>>> {
    let mut pictures = HashMap::new();
    if !dir.is_dir() {
        return Ok(pictures);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jpg") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            pictures.insert(stem.to_string(), read_asset(&path)?);
        }
    }
    Ok(pictures)
}

fn read_asset(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        ChannelError::Config(format!("missing reference asset {}: {e}", path.display()))
    })
}

impl ReferenceAssets {
    /// Load `ratings/{group}/{0..4}.jpg`, the optional
    /// `ratings/{group}/descriptors/*.jpg` and `placeholders/{family}.jpg` from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let mut badges = HashMap::new();
        let mut descriptor_pictures = HashMap::new();
        for group in RATING_GROUPS {
            let group_dir = dir.join("ratings").join(group.asset_dir());
            let images = (0..RATINGS_PER_GROUP)
                .map(|index| read_asset(&group_dir.join(format!("{index}.jpg"))))
                .collect::<Result<Vec<_>>>()?;
            badges.insert(group, images);
            descriptor_pictures.insert(group, read_descriptor_dir(&group_dir.join("descriptors"))?);
        }

        let mut placeholders = HashMap::new();
        for family in FAMILIES {
            let path = dir.join("placeholders").join(format!("{}.jpg", family.art_path()));
            placeholders.insert(family, read_asset(&path)?);
        }

        debug!("🖼️ Loaded reference assets from {}", dir.display());
        Self::from_parts(badges, descriptor_pictures, placeholders)
    }

    /// Build from in-memory images; every group needs five badges and every family a placeholder
    pub fn from_parts(
        badges: HashMap<RatingGroup, Vec<Vec<u8>>>,
        descriptor_pictures: HashMap<RatingGroup, HashMap<String, Vec<u8>>>,
        placeholders: HashMap<ConsoleFamily, Vec<u8>>,
    ) -> Result<Self> {
        for group in RATING_GROUPS {
            let count = badges.get(&group).map_or(0, Vec::len);
            if count != RATINGS_PER_GROUP {
                return Err(ChannelError::Config(format!(
                    "{} needs {RATINGS_PER_GROUP} rating badges, found {count}",
                    group.name()
                )));
            }
        }
        for family in FAMILIES {
            if !placeholders.contains_key(&family) {
                return Err(ChannelError::Config(format!(
                    "missing cover placeholder for {}",
                    family.art_path()
                )));
            }
        }
        Ok(Self {
            badges,
            descriptor_pictures,
            placeholders,
        })
    }

    /// Badge for a rating id of `group`
    pub fn badge(&self, group: RatingGroup, rating_id: u8) -> Result<&[u8]> {
        let index = usize::from(rating_id.wrapping_sub(FIRST_RATING_ID));
        self.badges
            .get(&group)
            .and_then(|images| images.get(index))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ChannelError::SourceData(format!(
                    "rating id {rating_id} has no {} badge",
                    group.name()
                ))
            })
    }

    /// Picture for a content descriptor of `group`, if one was supplied
    pub fn descriptor_picture(&self, group: RatingGroup, descriptor: &str) -> Option<&[u8]> {
        self.descriptor_pictures
            .get(&group)
            .and_then(|pictures| pictures.get(&descriptor_key(descriptor)))
            .map(Vec::as_slice)
    }

    pub fn placeholder(&self, family: ConsoleFamily) -> &[u8] {
        self.placeholders.get(&family).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct one-byte stand-ins, handy for tests and dry runs
    pub fn synthetic() -> Self {
        let badges = RATING_GROUPS
            .into_iter()
            .map(|group| {
                let images = (0..RATINGS_PER_GROUP as u8)
                    .map(|i| vec![group.id(), i, 0xFF, 0xD9])
                    .collect();
                (group, images)
            })
            .collect();
        let descriptor_pictures = RATING_GROUPS
            .into_iter()
            .map(|group| {
                let pictures = HashMap::from([("violence".to_string(), vec![group.id(), 0xD5, 0xFF, 0xD9])]);
                (group, pictures)
            })
            .collect();
        let placeholders = FAMILIES
            .into_iter()
            .enumerate()
            .map(|(i, family)| (family, vec![0xFF, 0xD8, i as u8]))
            .collect();
        Self {
            badges,
            descriptor_pictures,
            placeholders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_directory_layout() {
        let dir = TempDir::new().unwrap();
        for group in RATING_GROUPS {
            let group_dir = dir.path().join("ratings").join(group.asset_dir());
            fs::create_dir_all(&group_dir).unwrap();
            for i in 0..RATINGS_PER_GROUP {
                fs::write(group_dir.join(format!("{i}.jpg")), [group.id(), i as u8]).unwrap();
            }
        }
        fs::create_dir_all(dir.path().join("placeholders")).unwrap();
        for family in FAMILIES {
            fs::write(
                dir.path().join("placeholders").join(format!("{}.jpg", family.art_path())),
                family.art_path(),
            )
            .unwrap();
        }

        let assets = ReferenceAssets::load(dir.path()).unwrap();
        assert_eq!(assets.badge(RatingGroup::Pegi, 10).unwrap(), &[4, 2]);
        assert_eq!(assets.placeholder(ConsoleFamily::ThreeDs), b"3ds");
        assert_eq!(assets.descriptor_picture(RatingGroup::Esrb, "Violence"), None);
    }

    #[test]
    fn test_descriptor_pictures_are_optional_per_group() {
        let dir = TempDir::new().unwrap();
        for group in RATING_GROUPS {
            let group_dir = dir.path().join("ratings").join(group.asset_dir());
            fs::create_dir_all(&group_dir).unwrap();
            for i in 0..RATINGS_PER_GROUP {
                fs::write(group_dir.join(format!("{i}.jpg")), [i as u8]).unwrap();
            }
        }
        let descriptors = dir.path().join("ratings/esrb/descriptors");
        fs::create_dir_all(&descriptors).unwrap();
        fs::write(descriptors.join("mild_cartoon_violence.jpg"), [0xFF, 0xD8, 1]).unwrap();
        fs::write(descriptors.join("notes.txt"), "ignored").unwrap();
        fs::create_dir_all(dir.path().join("placeholders")).unwrap();
        for family in FAMILIES {
            fs::write(
                dir.path().join("placeholders").join(format!("{}.jpg", family.art_path())),
                [0],
            )
            .unwrap();
        }

        let assets = ReferenceAssets::load(dir.path()).unwrap();
        assert_eq!(
            assets.descriptor_picture(RatingGroup::Esrb, "Mild Cartoon Violence"),
            Some(&[0xFF, 0xD8, 1][..])
        );
        assert_eq!(assets.descriptor_picture(RatingGroup::Pegi, "Mild Cartoon Violence"), None);
        assert_eq!(assets.descriptor_picture(RatingGroup::Esrb, "notes"), None);
    }

    #[test]
    fn test_descriptor_key() {
        assert_eq!(descriptor_key("Mild Cartoon Violence"), "mild_cartoon_violence");
        assert_eq!(descriptor_key(" Use of Alcohol/Tobacco "), "use_of_alcohol_tobacco");
    }

    #[test]
    fn test_missing_badge_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let err = ReferenceAssets::load(dir.path()).unwrap_err();
        assert!(matches!(err, ChannelError::Config(_)));
    }

    #[test]
    fn test_badge_index_out_of_range() {
        let assets = ReferenceAssets::synthetic();
        assert!(assets.badge(RatingGroup::Esrb, 8).is_ok());
        assert!(assets.badge(RatingGroup::Esrb, 12).is_ok());
        assert!(assets.badge(RatingGroup::Esrb, 13).is_err());
        assert!(assets.badge(RatingGroup::Esrb, 7).is_err());
    }
}
