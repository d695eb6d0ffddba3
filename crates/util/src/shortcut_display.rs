//! Human-readable labels for key combinations.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use storynav_types::{Key, KeyCombo};

/// Platform family that decides how modifiers are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS and iOS, which use modifier glyphs.
    Mac,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) { Self::Mac } else { Self::Other }
    }
}

/// Label for a single key. Keys without a visible label map to an empty string.
pub fn key_to_symbol(key: Key, platform: Platform) -> Cow<'static, str> {
    let mac = platform == Platform::Mac;
    match key {
        Key::Alt if mac => Cow::Borrowed("⌥"),
        Key::Alt => Cow::Borrowed("alt"),
        Key::Control if mac => Cow::Borrowed("⌃"),
        Key::Control => Cow::Borrowed("ctrl"),
        Key::Meta if mac => Cow::Borrowed("⌘"),
        Key::Meta => Cow::Borrowed("meta"),
        Key::Shift if mac => Cow::Borrowed("⇧"),
        Key::Shift => Cow::Borrowed("shift"),
        Key::Enter | Key::Escape | Key::Backspace => Cow::Borrowed(""),
        Key::Space => Cow::Borrowed("SPACE"),
        Key::Tab => Cow::Borrowed("TAB"),
        Key::ArrowUp => Cow::Borrowed("↑"),
        Key::ArrowDown => Cow::Borrowed("↓"),
        Key::ArrowLeft => Cow::Borrowed("←"),
        Key::ArrowRight => Cow::Borrowed("→"),
        Key::Char(c) => Cow::Owned(c.to_uppercase().collect()),
    }
}

/// Renders a combination as space-separated key labels, e.g. `⌥ ↑`.
pub fn shortcut_to_human_string(combo: &KeyCombo, platform: Platform) -> String {
    combo
        .keys()
        .iter()
        .map(|key| key_to_symbol(*key, platform))
        .filter(|symbol| !symbol.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
