//! Snapshot of the application state consumed by the sidebar.

use serde::{Deserialize, Serialize};

use crate::story::StoriesHash;

/// Where the addon panel is docked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    #[default]
    Bottom,
    Right,
}

impl PanelPosition {
    /// Returns the other docking position.
    pub fn toggled(self) -> Self {
        match self {
            Self::Bottom => Self::Right,
            Self::Right => Self::Bottom,
        }
    }
}

/// What the preview area is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Story,
    Docs,
    Settings,
}

/// Branding of the hosting UI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Layout flags toggled from the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    pub is_fullscreen: bool,
    pub show_panel: bool,
    pub show_nav: bool,
    pub panel_position: PanelPosition,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            is_fullscreen: false,
            show_panel: true,
            show_nav: true,
            panel_position: PanelPosition::Bottom,
        }
    }
}

/// The fields of the global application state the sidebar reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    pub ui: UiConfig,
    pub view_mode: Option<ViewMode>,
    pub story_id: Option<String>,
    pub layout: Layout,
    pub stories_hash: StoriesHash,
    pub stories_configured: bool,
}
