//! Shared type definitions for the storynav sidebar.
//!
//! The state snapshot, story records, and shortcut bindings live here so the
//! sidebar logic, the preference store, and the CLI agree on one serde model.

pub mod shortcut;
pub mod state;
pub mod story;

pub use shortcut::{Key, KeyCombo, KeyComboParseError, ParseShortcutActionError, ShortcutAction, ShortcutKeys};
pub use state::{Layout, PanelPosition, State, UiConfig, ViewMode};
pub use story::{DOCS_ONLY_PARAMETER, StoriesHash, StoryNode};

/// Settings page routes reachable from the sidebar menu.
pub mod routes {
    pub const ABOUT: &str = "/settings/about";
    pub const SHORTCUTS: &str = "/settings/shortcuts";
}

/// DOM-style identifiers of UI elements that can receive focus.
pub mod focusable {
    pub const STORY_SEARCH_FIELD: &str = "storybook-explorer-searchfield";
    pub const STORY_LIST_MENU: &str = "storybook-explorer-menu";
    pub const STORY_PANEL_ROOT: &str = "storybook-panel-root";
}
