use crate::pubg::ModeFamily;

/// Keycap reactions offered on a comparison and the family each one selects.
///
/// Keys are sent fully qualified (with U+FE0F) as most Matrix clients do.
pub const SHORTCUTS: [(&str, ModeFamily); 3] = [
    ("1\u{FE0F}\u{20E3}", ModeFamily::Solo),
    ("2\u{FE0F}\u{20E3}", ModeFamily::Duo),
    ("4\u{FE0F}\u{20E3}", ModeFamily::Squad),
];

/// Mode family selected by a reaction key, with or without the variation selector.
pub fn family_for_key(key: &str) -> Option<ModeFamily> {
    let key: String = key.chars().filter(|c| *c != '\u{FE0F}').collect();
    match key.as_str() {
        "1\u{20E3}" => Some(ModeFamily::Solo),
        "2\u{20E3}" => Some(ModeFamily::Duo),
        "4\u{20E3}" => Some(ModeFamily::Squad),
        _ => None,
    }
}

/// Number on the keycap of a family, as reported to analytics.
pub fn click_number(family: ModeFamily) -> u8 {
    match family {
        ModeFamily::Solo => 1,
        ModeFamily::Duo => 2,
        ModeFamily::Squad => 4,
    }
}
