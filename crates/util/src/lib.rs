//! Helpers shared by the storynav sidebar and CLI: shortcut display strings,
//! path handling, and the persisted shortcut preferences.

pub mod path_processing;
pub mod preferences;
pub mod shortcut_display;

pub use path_processing::expand_tilde;
pub use preferences::{SHORTCUTS_FILE_NAME, SHORTCUTS_PATH_ENV, ShortcutPreferences, ShortcutPreferencesError};
pub use shortcut_display::{Platform, key_to_symbol, shortcut_to_human_string};
