//! Command menu shown in the sidebar header.
//!
//! [`create_menu`] builds the eleven entries from the api handle, the shortcut
//! bindings, and the layout flags. [`MenuCache`] reuses the previous entries
//! when every one of those inputs is unchanged.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use storynav_types::{Layout, ShortcutAction, ShortcutKeys, focusable, routes};
use storynav_util::{Platform, shortcut_to_human_string};
use tracing::trace;

use crate::api::SidebarApi;

/// Visual status of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStatus {
    Positive,
    Negative,
    Neutral,
}

/// Decoration rendered at either end of a menu row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Decoration {
    /// Empty icon slot; occupies the same space as [`Decoration::Check`].
    Placeholder,
    Check,
    Shortcut { label: String },
    Badge { status: BadgeStatus, label: String },
}

impl Decoration {
    fn check_if(checked: bool) -> Self {
        if checked { Self::Check } else { Self::Placeholder }
    }
}

/// The single api call a menu entry performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "argument", rename_all = "camelCase")]
pub enum MenuAction {
    ToggleNav,
    TogglePanel,
    TogglePanelPosition,
    ToggleFullscreen,
    FocusOnUiElement(&'static str),
    JumpToComponent(i32),
    JumpToStory(i32),
    Navigate(&'static str),
}

impl MenuAction {
    pub fn dispatch(self, api: &dyn SidebarApi) {
        match self {
            Self::ToggleNav => api.toggle_nav(),
            Self::TogglePanel => api.toggle_panel(),
            Self::TogglePanelPosition => api.toggle_panel_position(),
            Self::ToggleFullscreen => api.toggle_fullscreen(),
            Self::FocusOnUiElement(element_id) => api.focus_on_ui_element(element_id),
            Self::JumpToComponent(offset) => api.jump_to_component(offset),
            Self::JumpToStory(offset) => api.jump_to_story(offset),
            Self::Navigate(path) => api.navigate(path),
        }
    }
}

/// One row of the sidebar menu.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Short display key, unique within the menu.
    pub id: &'static str,
    pub title: &'static str,
    pub action: MenuAction,
    pub left: Decoration,
    /// `None` leaves the slot empty.
    pub right: Option<Decoration>,
    #[serde(skip)]
    api: Arc<dyn SidebarApi>,
}

impl MenuItem {
    /// Performs the entry's action against the api it was built with.
    pub fn on_click(&self) {
        trace!(id = self.id, action = ?self.action, "menu item activated");
        self.action.dispatch(self.api.as_ref());
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("action", &self.action)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

/// Builds the sidebar menu, always eleven entries in a fixed order.
pub fn create_menu(
    api: &Arc<dyn SidebarApi>,
    shortcut_keys: &ShortcutKeys,
    layout: &Layout,
    platform: Platform,
) -> Vec<MenuItem> {
    let shortcut = |action: ShortcutAction| {
        Some(Decoration::Shortcut {
            label: shortcut_to_human_string(shortcut_keys.get(action), platform),
        })
    };
    let item = |id: &'static str, title: &'static str, action: MenuAction, left: Decoration, right: Option<Decoration>| MenuItem {
        id,
        title,
        action,
        left,
        right,
        api: Arc::clone(api),
    };

    let update_badge = api.version_update_available().then(|| Decoration::Badge {
        status: BadgeStatus::Positive,
        label: "Update".to_string(),
    });

    vec![
        item(
            "S",
            "Show sidebar",
            MenuAction::ToggleNav,
            Decoration::check_if(layout.show_nav),
            shortcut(ShortcutAction::ToggleNav),
        ),
        item(
            "A",
            "Show addons",
            MenuAction::TogglePanel,
            Decoration::check_if(layout.show_panel),
            shortcut(ShortcutAction::TogglePanel),
        ),
        item(
            "D",
            "Change addons orientation",
            MenuAction::TogglePanelPosition,
            Decoration::Placeholder,
            shortcut(ShortcutAction::PanelPosition),
        ),
        item(
            "F",
            "Go full screen",
            MenuAction::ToggleFullscreen,
            Decoration::check_if(layout.is_fullscreen),
            shortcut(ShortcutAction::FullScreen),
        ),
        item(
            "/",
            "Search",
            MenuAction::FocusOnUiElement(focusable::STORY_SEARCH_FIELD),
            Decoration::Placeholder,
            shortcut(ShortcutAction::Search),
        ),
        item(
            "up",
            "Previous component",
            MenuAction::JumpToComponent(-1),
            Decoration::Placeholder,
            shortcut(ShortcutAction::PrevComponent),
        ),
        item(
            "down",
            "Next component",
            MenuAction::JumpToComponent(1),
            Decoration::Placeholder,
            shortcut(ShortcutAction::NextComponent),
        ),
        item(
            "prev",
            "Previous story",
            MenuAction::JumpToStory(-1),
            Decoration::Placeholder,
            shortcut(ShortcutAction::PrevStory),
        ),
        item(
            "next",
            "Next story",
            MenuAction::JumpToStory(1),
            Decoration::Placeholder,
            shortcut(ShortcutAction::NextStory),
        ),
        item(
            "about",
            "About your Storybook",
            MenuAction::Navigate(routes::ABOUT),
            Decoration::Placeholder,
            update_badge,
        ),
        item(
            "shortcuts",
            "Keyboard shortcuts",
            MenuAction::Navigate(routes::SHORTCUTS),
            Decoration::Placeholder,
            shortcut(ShortcutAction::ShortcutsPage),
        ),
    ]
}

/// Everything the menu depends on. The api is compared by identity.
struct MenuKey {
    api: Arc<dyn SidebarApi>,
    shortcut_keys: ShortcutKeys,
    layout: Layout,
    platform: Platform,
    update_available: bool,
}

impl MenuKey {
    fn matches(&self, other: &MenuKey) -> bool {
        Arc::ptr_eq(&self.api, &other.api)
            && self.update_available == other.update_available
            && self.layout == other.layout
            && self.platform == other.platform
            && self.shortcut_keys == other.shortcut_keys
    }
}

/// Single-entry cache for [`create_menu`].
///
/// The entry is reused only when the api handle is the same object and all
/// other inputs compare equal, including the api's update availability.
#[derive(Default)]
pub struct MenuCache {
    entry: Option<(MenuKey, Arc<[MenuItem]>)>,
}

impl MenuCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        api: &Arc<dyn SidebarApi>,
        shortcut_keys: &ShortcutKeys,
        layout: &Layout,
        platform: Platform,
    ) -> Arc<[MenuItem]> {
        let key = MenuKey {
            api: Arc::clone(api),
            shortcut_keys: shortcut_keys.clone(),
            layout: *layout,
            platform,
            update_available: api.version_update_available(),
        };
        if let Some((cached_key, menu)) = &self.entry
            && cached_key.matches(&key)
        {
            trace!("reusing cached sidebar menu");
            return Arc::clone(menu);
        }

        let menu: Arc<[MenuItem]> = create_menu(api, shortcut_keys, layout, platform).into();
        self.entry = Some((key, Arc::clone(&menu)));
        menu
    }

    /// Drops the cached entry so the next call rebuilds.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

impl fmt::Debug for MenuCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuCache").field("cached", &self.entry.is_some()).finish()
    }
}
