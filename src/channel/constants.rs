// src/channel/constants.rs
// Console-side enumerations and reference tables that never change

use serde::{Deserialize, Serialize};
use std::fmt;

/// Container format version byte shared by every file the channel reads
pub const CONTAINER_VERSION: u8 = 6;

/// Filler byte the console uses for "unknown" single-byte fields
pub const FILLER_BYTE: u8 = 0xDE;

/// Console region as stored in title metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Japan,
    #[serde(rename = "PAL")]
    Pal,
    #[serde(rename = "NTSC")]
    Ntsc,
}

impl Region {
    /// Numeric id used in output paths
    pub fn id(self) -> u32 {
        match self {
            Region::Japan => 0,
            Region::Pal => 1,
            Region::Ntsc => 2,
        }
    }

    /// Console country code written into container headers
    pub fn country_code(self) -> u32 {
        match self {
            Region::Japan => 1,
            Region::Pal => 110,
            Region::Ntsc => 49,
        }
    }

    /// Short label for log lines
    pub fn label(self) -> &'static str {
        match self {
            Region::Japan => "JP",
            Region::Pal => "GB",
            Region::Ntsc => "US",
        }
    }

    /// Title identifier suffixes (4th character) sold in this region only
    pub fn id_suffixes(self) -> &'static [char] {
        match self {
            Region::Japan => &['J'],
            Region::Pal => &['P', 'L', 'M'],
            Region::Ntsc => &['E', 'N'],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Title identifier suffixes available in every region
pub const GLOBAL_ID_SUFFIXES: &[char] = &['A', 'B', 'U', 'X'];

/// Channel display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Japanese,
    English,
    German,
    French,
    Spanish,
    Italian,
    Dutch,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Japanese,
        Language::English,
        Language::German,
        Language::French,
        Language::Spanish,
        Language::Italian,
        Language::Dutch,
    ];

    /// Numeric id used in output paths and headers
    pub fn id(self) -> u32 {
        self as u32
    }

    /// ISO 639-1 code, also the key used by catalog records
    pub fn code(self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Dutch => "nl",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rating organisation for a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingGroup {
    #[serde(rename = "CERO")]
    Cero,
    #[serde(rename = "ESRB")]
    Esrb,
    #[serde(rename = "PEGI")]
    Pegi,
}

impl RatingGroup {
    /// Wire value of the group
    pub fn id(self) -> u8 {
        match self {
            RatingGroup::Cero => 1,
            RatingGroup::Esrb => 2,
            RatingGroup::Pegi => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RatingGroup::Cero => "CERO",
            RatingGroup::Esrb => "ESRB",
            RatingGroup::Pegi => "PEGI",
        }
    }

    /// Directory name of this group's badge images
    pub fn asset_dir(self) -> &'static str {
        match self {
            RatingGroup::Cero => "cero",
            RatingGroup::Esrb => "esrb",
            RatingGroup::Pegi => "pegi",
        }
    }

    /// Ratings of this group, lowest age first
    pub fn ratings(self) -> &'static [RatingData] {
        match self {
            RatingGroup::Cero => CERO_RATINGS,
            RatingGroup::Esrb => ESRB_RATINGS,
            RatingGroup::Pegi => PEGI_RATINGS,
        }
    }

    /// Rating id for a label such as "T" or "12"
    pub fn rating_id(self, label: &str) -> Option<u8> {
        self.ratings()
            .iter()
            .position(|r| r.name == label)
            .map(|i| FIRST_RATING_ID + i as u8)
    }
}

/// Rating ids start at 8; badge images are indexed by `rating_id - FIRST_RATING_ID`
pub const FIRST_RATING_ID: u8 = 8;

/// Rating ids per group
pub const RATINGS_PER_GROUP: usize = 5;

/// Name and minimum age for one rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingData {
    pub name: &'static str,
    pub age: u8,
}

const CERO_RATINGS: &[RatingData] = &[
    RatingData { name: "A", age: 0 },
    RatingData { name: "B", age: 12 },
    RatingData { name: "C", age: 15 },
    RatingData { name: "D", age: 17 },
    RatingData { name: "Z", age: 18 },
];

const ESRB_RATINGS: &[RatingData] = &[
    RatingData { name: "EC", age: 3 },
    RatingData { name: "E", age: 6 },
    RatingData { name: "E10", age: 10 },
    RatingData { name: "T", age: 13 },
    RatingData { name: "M", age: 17 },
];

const PEGI_RATINGS: &[RatingData] = &[
    RatingData { name: "3", age: 3 },
    RatingData { name: "7", age: 7 },
    RatingData { name: "12", age: 12 },
    RatingData { name: "16", age: 16 },
    RatingData { name: "18", age: 18 },
];

/// A region, the languages the channel offers there and its rating body
#[derive(Debug, Clone, Copy)]
pub struct RegionMeta {
    pub region: Region,
    pub languages: &'static [Language],
    pub rating_group: RatingGroup,
}

pub const REGIONS: &[RegionMeta] = &[
    RegionMeta {
        region: Region::Japan,
        languages: &[Language::Japanese],
        rating_group: RatingGroup::Cero,
    },
    RegionMeta {
        region: Region::Ntsc,
        languages: &[Language::English, Language::French, Language::Spanish],
        rating_group: RatingGroup::Esrb,
    },
    RegionMeta {
        region: Region::Pal,
        languages: &[
            Language::English,
            Language::German,
            Language::French,
            Language::Spanish,
            Language::Italian,
            Language::Dutch,
        ],
        rating_group: RatingGroup::Pegi,
    },
];

/// Look up the metadata of a region
pub fn region_meta(region: Region) -> &'static RegionMeta {
    match region {
        Region::Japan => &REGIONS[0],
        Region::Ntsc => &REGIONS[1],
        Region::Pal => &REGIONS[2],
    }
}

/// Three-letter console model codes
pub type ConsoleModel = [u8; 3];

pub const RVL: ConsoleModel = *b"RVL";
pub const NTR: ConsoleModel = *b"NTR";
pub const TWL: ConsoleModel = *b"TWL";
pub const CTR: ConsoleModel = *b"CTR";

/// Console family, selects cover art layout and placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleFamily {
    Wii,
    Ds,
    ThreeDs,
}

impl ConsoleFamily {
    /// Path segment of the art service
    pub fn art_path(self) -> &'static str {
        match self {
            ConsoleFamily::Wii => "wii",
            ConsoleFamily::Ds => "ds",
            ConsoleFamily::ThreeDs => "3ds",
        }
    }

    /// Wii titles have cover scans, handhelds have box fronts
    pub fn art_kind(self) -> &'static str {
        match self {
            ConsoleFamily::Wii => "cover",
            ConsoleFamily::Ds | ConsoleFamily::ThreeDs => "box",
        }
    }

    pub fn from_model(model: ConsoleModel) -> ConsoleFamily {
        match &model {
            b"CTR" => ConsoleFamily::ThreeDs,
            b"NTR" | b"TWL" => ConsoleFamily::Ds,
            _ => ConsoleFamily::Wii,
        }
    }
}

/// Title type group ids
pub mod group {
    pub const DISC: u8 = 1;
    pub const WIIWARE: u8 = 2;
    pub const WII_CHANNELS: u8 = 3;
    pub const DS: u8 = 4;
    pub const VIRTUAL_CONSOLE: u8 = 5;
    pub const DSI: u8 = 6;
    pub const DSIWARE: u8 = 7;
    pub const THREE_DS: u8 = 8;
    pub const THREE_DS_DOWNLOAD: u8 = 9;
    pub const THREE_DS_GAME_BOY: u8 = 10;
    pub const WII_U: u8 = 11;
    pub const SWITCH: u8 = 12;
}

/// One row of the title type table
#[derive(Debug, Clone, Copy)]
pub struct TitleTypeData {
    pub type_id: u8,
    pub console_model: ConsoleModel,
    pub console_name: &'static str,
    pub group_id: u8,
}

const fn tt(type_id: u8, console_model: ConsoleModel, console_name: &'static str, group_id: u8) -> TitleTypeData {
    TitleTypeData {
        type_id,
        console_model,
        console_name,
        group_id,
    }
}

pub const TITLE_TYPES: &[TitleTypeData] = &[
    tt(0, RVL, "Wii", group::DISC),
    tt(1, RVL, "WiiWare", group::WIIWARE),
    tt(2, RVL, "Wii Channels", group::WII_CHANNELS),
    tt(3, RVL, "Wii Virtual Console NES", group::VIRTUAL_CONSOLE),
    tt(4, RVL, "Wii Virtual Console Super NES", group::VIRTUAL_CONSOLE),
    tt(5, RVL, "Wii Virtual Console Nintendo 64", group::VIRTUAL_CONSOLE),
    tt(6, RVL, "Wii Virtual Console TurboGrafx16", group::VIRTUAL_CONSOLE),
    tt(7, RVL, "Wii Virtual Console Sega Genesis", group::VIRTUAL_CONSOLE),
    tt(8, RVL, "Wii Virtual Console Neo Geo", group::VIRTUAL_CONSOLE),
    tt(9, RVL, "Wii Virtual Console Master System", group::VIRTUAL_CONSOLE),
    tt(10, RVL, "Wii Virtual Console Commodore 64", group::VIRTUAL_CONSOLE),
    tt(11, RVL, "Wii Virtual Console Arcade", group::VIRTUAL_CONSOLE),
    tt(12, RVL, "Wii Virtual Console MSX", group::VIRTUAL_CONSOLE),
    tt(13, NTR, "Nintendo DS", group::DS),
    tt(14, TWL, "Nintendo DS", group::DS),
    tt(15, TWL, "Nintendo DSi", group::DSI),
    tt(16, TWL, "Nintendo DSiWare", group::DSIWARE),
    tt(17, CTR, "Nintendo 3DS", group::THREE_DS),
    tt(18, CTR, "Nintendo 3DS Download Software", group::THREE_DS_DOWNLOAD),
    tt(19, CTR, "New Nintendo 3DS", group::THREE_DS),
    tt(20, CTR, "New Nintendo 3DS Download Software", group::THREE_DS_DOWNLOAD),
    tt(21, CTR, "Nintendo 3DS Virtual Console NES", group::THREE_DS_GAME_BOY),
    tt(22, CTR, "Nintendo 3DS Virtual Console Game Boy", group::THREE_DS_GAME_BOY),
    tt(23, CTR, "Nintendo 3DS Virtual Console Game Boy Color", group::THREE_DS_GAME_BOY),
    tt(24, CTR, "Nintendo 3DS Virtual Console Game Boy Advance", group::THREE_DS_GAME_BOY),
    tt(25, CTR, "Nintendo 3DS Virtual Console Game Gear", group::THREE_DS_GAME_BOY),
    tt(26, RVL, "Wii U", group::WII_U),
    tt(27, RVL, "Wii U Download Software", group::WII_U),
    tt(28, RVL, "Wii U Virtual Console NES", group::WII_U),
    tt(29, RVL, "Wii U Virtual Console Super NES", group::WII_U),
    tt(30, RVL, "Wii U Virtual Console Nintendo 64", group::WII_U),
    tt(31, RVL, "Wii U Virtual Console Game Boy Advance", group::WII_U),
    tt(32, RVL, "Wii U Virtual Console Nintendo DS", group::WII_U),
    tt(33, RVL, "Wii U Virtual Console TurboGrafx16", group::WII_U),
    tt(34, RVL, "Wii U Virtual Console MSX", group::WII_U),
    tt(35, RVL, "Wii U Applications", group::WII_U),
    tt(36, NTR, "Nintendo Switch", group::SWITCH),
];

/// Map a catalog title type label onto its title type id
pub fn title_type_id(label: &str) -> Option<u8> {
    let id = match label {
        "Wii" => 0,
        "WiiWare" => 1,
        "Channel" => 2,
        "VC-NES" => 3,
        "VC-SNES" => 4,
        "VC-N64" => 5,
        "VC-PCE" => 6,
        "VC-MD" => 7,
        "VC-NEOGEO" => 8,
        "VC-SMS" => 9,
        "VC-C64" => 10,
        "VC-Arcade" => 11,
        "DS" => 13,
        "DSi" => 15,
        "DSiWare" => 16,
        "3DS" => 17,
        "3DSWare" | "VC-GB" | "VC-GBC" | "VC-GBA" | "VC-GG" => 18,
        "WiiU" => 26,
        "eShop" => 27,
        "Switch" => 36,
        _ => return None,
    };
    Some(id)
}

/// Console family of a title type id
pub fn console_family(type_id: u8) -> ConsoleFamily {
    TITLE_TYPES
        .iter()
        .find(|t| t.type_id == type_id)
        .map(|t| ConsoleFamily::from_model(t.console_model))
        .unwrap_or(ConsoleFamily::Wii)
}

/// Popularity medal shown next to recommended titles
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Medal {
    None = 0,
    Bronze = 1,
    Silver = 2,
    Gold = 3,
    Platinum = 4,
}

// 📺📋🗂️🪄
