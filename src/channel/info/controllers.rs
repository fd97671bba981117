//! Controller, feature and language flags of an info file

use super::super::codec::{ByteWriter, Record};
use super::super::constants::Language;
use super::super::records::TitleRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportedControllers {
    pub wii_remote: u8,
    pub nunchuk: u8,
    pub classic_controller: u8,
    pub gamecube_controller: u8,
}

impl Record for SupportedControllers {
    const SIZE: usize = 4;

    fn encode(&self, w: &mut ByteWriter) {
        w.u8(self.wii_remote);
        w.u8(self.nunchuk);
        w.u8(self.classic_controller);
        w.u8(self.gamecube_controller);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportedFeatures {
    pub wii_connect_24: u8,
    pub nintendo_wifi_connection: u8,
    pub online_players: u8,
    pub wireless_play: u8,
    pub download_play: u8,
    pub dlc: u8,
    pub touch_generations: u8,
    pub miis: u8,
    pub wii_motion_plus: u8,
}

impl Record for SupportedFeatures {
    const SIZE: usize = 10;

    fn encode(&self, w: &mut ByteWriter) {
        w.u8(self.wii_connect_24);
        w.u8(self.nintendo_wifi_connection);
        w.u8(self.online_players);
        w.u8(self.wireless_play);
        w.u8(self.download_play);
        w.u8(self.dlc);
        w.u8(self.touch_generations);
        w.u8(self.miis);
        w.u8(self.wii_motion_plus);
        w.u8(0);
    }
}

/// One flag per language, in language id order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportedLanguages(pub [u8; 7]);

impl Record for SupportedLanguages {
    const SIZE: usize = 7;

    fn encode(&self, w: &mut ByteWriter) {
        w.bytes(&self.0);
    }
}

/// Peripherals shown in the peripherals line, keyed by catalog identifier
const PERIPHERALS: &[(&str, &str)] = &[
    ("wheel", "Wii Wheel"),
    ("balanceboard", "Wii Balance Board"),
    ("wiispeak", "Wii Speak"),
    ("microphone", "Microphone"),
    ("guitar", "Guitar"),
    ("drums", "Drums"),
    ("dancepad", "Dance Pad"),
    ("keyboard", "Keyboard"),
    ("udraw", "uDraw"),
    ("amiibo", "Amiibo"),
];

/// Flags and peripheral labels derived from a title's controller list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSupport {
    pub controllers: SupportedControllers,
    pub features: SupportedFeatures,
    /// Display labels in controller list order
    pub peripherals: Vec<&'static str>,
}

impl InputSupport {
    pub fn from_title(title: &TitleRecord) -> Self {
        let mut support = InputSupport::default();
        let flag = |present: bool| u8::from(present);

        for controller in &title.controllers {
            match controller.as_str() {
                "wiimote" => support.controllers.wii_remote = 1,
                "nunchuk" => support.controllers.nunchuk = 1,
                "classiccontroller" => support.controllers.classic_controller = 1,
                "gamecube" => support.controllers.gamecube_controller = 1,
                // The catalog lists Mii support among controllers
                "mii" => support.features.miis = 1,
                "wiimotionplus" => support.features.wii_motion_plus = 1,
                other => {
                    if let Some((_, label)) = PERIPHERALS.iter().find(|(id, _)| *id == other) {
                        support.peripherals.push(*label);
                    }
                }
            }
        }

        let features = &mut support.features;
        features.wii_connect_24 = flag(title.has_feature("wiiconnect24"));
        features.nintendo_wifi_connection = flag(title.has_feature("nintendowifi"));
        features.online_players = flag(title.online_players > 0);
        features.wireless_play = flag(title.has_feature("wirelessplay"));
        features.download_play = flag(title.has_feature("downloadplay"));
        features.dlc = flag(title.has_feature("dlc"));
        features.touch_generations = flag(title.has_feature("touchgenerations"));
        features.miis |= flag(title.has_feature("mii"));
        features.wii_motion_plus |= flag(title.has_feature("wiimotionplus"));

        support
    }
}

impl SupportedLanguages {
    pub fn from_title(title: &TitleRecord) -> Self {
        let mut flags = [0u8; 7];
        for language in Language::ALL {
            if title.languages.contains(&language) {
                flags[language.id() as usize] = 1;
            }
        }
        SupportedLanguages(flags)
    }
}
