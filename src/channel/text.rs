//! Fixed-width UTF-16 text layout for the channel's text slots.
//!
//! Every text field in a container is a `[u16; N]` slot. Encoding never fails:
//! anything longer than the slot is cut at the slot boundary and the rest of the
//! slot stays zero.

use textwrap::{Options, WordSeparator, WrapAlgorithm};

/// Title and subtitle lines wrap at this many characters
pub const TITLE_WRAP_WIDTH: usize = 31;

/// Synopsis lines wrap at this many characters
pub const SYNOPSIS_WRAP_WIDTH: usize = 40;

/// Synopses up to this many lines use the description slots
pub const DESCRIPTION_LINES: usize = 3;

/// Longer synopses use up to this many custom text slots
pub const CUSTOM_TEXT_LINES: usize = 10;

/// Encode `text` into a zero-padded slot of `N` code units
pub fn encode_fixed<const N: usize>(text: &str) -> [u16; N] {
    let mut slot = [0u16; N];
    for (dst, unit) in slot.iter_mut().zip(text.encode_utf16()) {
        *dst = unit;
    }
    slot
}

/// Copy already-encoded code units into a zero-padded slot of `N` code units
pub fn fixed_from_units<const N: usize>(units: &[u16]) -> [u16; N] {
    let mut slot = [0u16; N];
    let len = units.len().min(N);
    slot[..len].copy_from_slice(&units[..len]);
    slot
}

/// Greedy word wrap on ASCII spaces; words longer than `width` keep their own line
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Title split into the two lines the channel shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitleLines {
    pub title: String,
    pub subtitle: String,
}

/// Split a display name into title and subtitle.
///
/// `": "` wins over `" - "`; names without a separator are wrapped at
/// [`TITLE_WRAP_WIDTH`] and only the first two lines are kept.
pub fn split_title(name: &str) -> TitleLines {
    for separator in [": ", " - "] {
        if name.contains(separator) {
            let mut parts = name.split(separator);
            return TitleLines {
                title: parts.next().unwrap_or_default().to_string(),
                subtitle: parts.next().unwrap_or_default().to_string(),
            };
        }
    }

    if name.chars().count() > TITLE_WRAP_WIDTH {
        let mut lines = word_wrap(name, TITLE_WRAP_WIDTH).into_iter();
        return TitleLines {
            title: lines.next().unwrap_or_default(),
            subtitle: lines.next().unwrap_or_default(),
        };
    }

    TitleLines {
        title: name.to_string(),
        subtitle: String::new(),
    }
}

/// Where a wrapped synopsis goes in an info container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynopsisLayout {
    /// At most [`DESCRIPTION_LINES`] lines for the description slots
    Description(Vec<String>),
    /// At most [`CUSTOM_TEXT_LINES`] lines for the custom text slots
    Custom(Vec<String>),
}

/// Collapse line breaks and repeated spaces, then wrap at [`SYNOPSIS_WRAP_WIDTH`]
pub fn layout_synopsis(synopsis: &str) -> SynopsisLayout {
    let flattened = synopsis.replace(['\r', '\n'], " ");
    let collapsed = flattened
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let lines = word_wrap(&collapsed, SYNOPSIS_WRAP_WIDTH);
    if lines.len() <= DESCRIPTION_LINES {
        return SynopsisLayout::Description(lines);
    }

    let mut custom: Vec<String> = lines.into_iter().take(CUSTOM_TEXT_LINES).collect();
    if custom.len() == CUSTOM_TEXT_LINES {
        let last = &mut custom[CUSTOM_TEXT_LINES - 1];
        *last = first_sentence(last);
    }
    SynopsisLayout::Custom(custom)
}

/// Text up to and including the first period; a period is added if there is none
fn first_sentence(line: &str) -> String {
    match line.find('.') {
        Some(end) => line[..=end].to_string(),
        None => format!("{line}."),
    }
}

/// Title-case every word except "of" and "and"
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| match word {
            "of" | "and" => word.to_string(),
            _ => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join a comma-separated source value as `"Action, Role Playing"`
pub fn join_list_field(value: &str) -> String {
    value
        .split(',')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Two zero code units the console expects before players/peripheral text
const LEADING_FILLER: [u16; 2] = [0, 0];

/// Peripheral labels joined as `"Wii Wheel, Microphone"` behind the leading filler.
///
/// Returns an empty vector when no peripheral is present so the slot stays blank.
pub fn peripheral_text(labels: &[&str]) -> Vec<u16> {
    if labels.is_empty() {
        return Vec::new();
    }
    let mut units = LEADING_FILLER.to_vec();
    units.extend(labels.join(", ").encode_utf16());
    units
}

/// `"N Players (Online)"` behind the leading filler, blank for offline titles
pub fn players_text(online_players: u8) -> Vec<u16> {
    if online_players == 0 {
        return Vec::new();
    }
    let mut units = LEADING_FILLER.to_vec();
    units.extend(format!("{online_players} Players (Online)").encode_utf16());
    units
}

/// Video titles are stored with literal `\n` escapes
pub fn unescape_line_breaks(title: &str) -> String {
    title.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(units: &[u16]) -> String {
        let end = units.iter().position(|u| *u == 0).unwrap_or(units.len());
        String::from_utf16(&units[..end]).unwrap()
    }

    #[test]
    fn test_encode_fixed_truncates_without_overflow() {
        let long = "x".repeat(100);
        let slot: [u16; 31] = encode_fixed(&long);
        assert_eq!(slot.len(), 31);
        assert!(slot.iter().all(|u| *u == u16::from(b'x')));

        let short: [u16; 5] = encode_fixed("ab");
        assert_eq!(short, [0x61, 0x62, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_from_units_truncates() {
        let slot: [u16; 2] = fixed_from_units(&[1, 2, 3]);
        assert_eq!(slot, [1, 2]);
    }

    #[test]
    fn test_split_on_colon() {
        let lines = split_title("Foo: Bar");
        assert_eq!(lines.title, "Foo");
        assert_eq!(lines.subtitle, "Bar");
    }

    #[test]
    fn test_split_on_dash_only_without_colon() {
        let lines = split_title("Foo - Bar");
        assert_eq!(lines.title, "Foo");
        assert_eq!(lines.subtitle, "Bar");

        let both = split_title("Foo - Bar: Baz");
        assert_eq!(both.title, "Foo - Bar");
        assert_eq!(both.subtitle, "Baz");
    }

    #[test]
    fn test_long_title_wraps_to_two_lines() {
        // 40 characters, no separator
        let name = "Legendary Heroes of the Crystal Kingdoms";
        assert_eq!(name.chars().count(), 40);

        let lines = split_title(name);
        assert_eq!(lines.title, "Legendary Heroes of the Crystal");
        assert_eq!(lines.subtitle, "Kingdoms");
    }

    #[test]
    fn test_only_first_two_wrapped_lines_are_used() {
        let name = "Alpha Beta Gamma Delta Epsilon Zeta Eta Theta Iota Kappa Lambda Mu Nu Xi";
        let lines = split_title(name);
        assert_eq!(lines.title, "Alpha Beta Gamma Delta Epsilon");
        assert_eq!(lines.subtitle, "Zeta Eta Theta Iota Kappa");
    }

    #[test]
    fn test_short_title_is_kept_whole() {
        let lines = split_title("Wii Sports");
        assert_eq!(lines.title, "Wii Sports");
        assert!(lines.subtitle.is_empty());
    }

    #[test]
    fn test_short_synopsis_uses_description_slots() {
        let layout = layout_synopsis("Race  karts\nwith friends.");
        assert_eq!(
            layout,
            SynopsisLayout::Description(vec!["Race karts with friends.".to_string()])
        );
    }

    #[test]
    fn test_long_synopsis_uses_custom_text_and_cuts_tenth_line() {
        let sentence = "Explore a vast world full of secrets. ";
        let synopsis = sentence.repeat(20);

        let SynopsisLayout::Custom(lines) = layout_synopsis(&synopsis) else {
            panic!("expected custom text layout");
        };
        assert_eq!(lines.len(), CUSTOM_TEXT_LINES);
        assert!(lines.iter().all(|l| l.chars().count() <= SYNOPSIS_WRAP_WIDTH));
        let last = &lines[CUSTOM_TEXT_LINES - 1];
        assert!(last.ends_with('.'));
        assert_eq!(last.matches('.').count(), 1);
    }

    #[test]
    fn test_genre_is_title_cased_and_joined() {
        assert_eq!(
            join_list_field("action,role playing,sword and sorcery"),
            "Action, Role Playing, Sword and Sorcery"
        );
        assert_eq!(join_list_field("PUZZLE"), "Puzzle");
    }

    #[test]
    fn test_peripheral_text_has_filler_only_when_present() {
        assert!(peripheral_text(&[]).is_empty());

        let units = peripheral_text(&["Wii Wheel", "Microphone"]);
        assert_eq!(&units[..2], &[0, 0]);
        assert_eq!(decode(&units[2..]), "Wii Wheel, Microphone");
    }

    #[test]
    fn test_players_text() {
        assert!(players_text(0).is_empty());
        let units = players_text(4);
        assert_eq!(decode(&units[2..]), "4 Players (Online)");
    }

    #[test]
    fn test_unescape_line_breaks() {
        assert_eq!(unescape_line_breaks("Trailer\\nPart 2"), "Trailer\nPart 2");
    }
}
