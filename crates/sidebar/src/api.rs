//! The imperative API the sidebar drives.
//!
//! [`SidebarApi`] is implemented by whatever hosts the sidebar. Menu entries
//! hold a shared handle and call exactly one method when activated.
//! [`InMemoryApi`] is a self-contained implementation that applies layout
//! toggles to its own state and records every call.

use std::sync::Mutex;

use serde::Serialize;
use storynav_types::{Layout, ShortcutKeys};
use tracing::trace;

/// Actions and queries the sidebar needs from its host.
pub trait SidebarApi: Send + Sync {
    fn toggle_nav(&self);
    fn toggle_panel(&self);
    fn toggle_panel_position(&self);
    fn toggle_fullscreen(&self);
    /// Moves keyboard focus to the element with `element_id`.
    fn focus_on_ui_element(&self, element_id: &str);
    /// Selects the component `offset` positions away from the current one.
    fn jump_to_component(&self, offset: i32);
    /// Selects the story `offset` positions away from the current one.
    fn jump_to_story(&self, offset: i32);
    fn navigate(&self, path: &str);
    fn version_update_available(&self) -> bool;
    fn shortcut_keys(&self) -> ShortcutKeys;
}

/// A call recorded by [`InMemoryApi`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", content = "argument", rename_all = "camelCase")]
pub enum ApiCall {
    ToggleNav,
    TogglePanel,
    TogglePanelPosition,
    ToggleFullscreen,
    FocusOnUiElement(String),
    JumpToComponent(i32),
    JumpToStory(i32),
    Navigate(String),
}

#[derive(Debug)]
struct InMemoryState {
    layout: Layout,
    update_available: bool,
    shortcut_keys: ShortcutKeys,
    calls: Vec<ApiCall>,
}

/// [`SidebarApi`] backed by plain in-process state.
#[derive(Debug)]
pub struct InMemoryApi {
    state: Mutex<InMemoryState>,
}

impl InMemoryApi {
    pub fn new(layout: Layout, shortcut_keys: ShortcutKeys) -> Self {
        Self {
            state: Mutex::new(InMemoryState {
                layout,
                update_available: false,
                shortcut_keys,
                calls: Vec::new(),
            }),
        }
    }

    pub fn with_update_available(self, available: bool) -> Self {
        self.set_update_available(available);
        self
    }

    pub fn set_update_available(&self, available: bool) {
        self.lock().update_available = available;
    }

    pub fn set_shortcut_keys(&self, shortcut_keys: ShortcutKeys) {
        self.lock().shortcut_keys = shortcut_keys;
    }

    /// Layout after every toggle received so far.
    pub fn layout(&self) -> Layout {
        self.lock().layout
    }

    /// Every action call in the order it was received.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state.lock().expect("in-memory api lock poisoned")
    }

    fn record(&self, call: ApiCall, apply: impl FnOnce(&mut Layout)) {
        let mut state = self.lock();
        trace!(?call, "sidebar api call");
        apply(&mut state.layout);
        state.calls.push(call);
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new(Layout::default(), ShortcutKeys::default())
    }
}

impl SidebarApi for InMemoryApi {
    fn toggle_nav(&self) {
        self.record(ApiCall::ToggleNav, |layout| layout.show_nav = !layout.show_nav);
    }

    fn toggle_panel(&self) {
        self.record(ApiCall::TogglePanel, |layout| layout.show_panel = !layout.show_panel);
    }

    fn toggle_panel_position(&self) {
        self.record(ApiCall::TogglePanelPosition, |layout| {
            layout.panel_position = layout.panel_position.toggled()
        });
    }

    fn toggle_fullscreen(&self) {
        self.record(ApiCall::ToggleFullscreen, |layout| layout.is_fullscreen = !layout.is_fullscreen);
    }

    fn focus_on_ui_element(&self, element_id: &str) {
        self.record(ApiCall::FocusOnUiElement(element_id.to_string()), |_| {});
    }

    fn jump_to_component(&self, offset: i32) {
        self.record(ApiCall::JumpToComponent(offset), |_| {});
    }

    fn jump_to_story(&self, offset: i32) {
        self.record(ApiCall::JumpToStory(offset), |_| {});
    }

    fn navigate(&self, path: &str) {
        self.record(ApiCall::Navigate(path.to_string()), |_| {});
    }

    fn version_update_available(&self) -> bool {
        self.lock().update_available
    }

    fn shortcut_keys(&self) -> ShortcutKeys {
        self.lock().shortcut_keys.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storynav_types::PanelPosition;

    #[test]
    fn toggles_update_layout_and_are_recorded() {
        let api = InMemoryApi::default();
        api.toggle_nav();
        api.toggle_panel_position();
        api.toggle_fullscreen();
        api.jump_to_story(-1);
        api.navigate("/settings/about");

        let layout = api.layout();
        assert!(!layout.show_nav);
        assert!(layout.show_panel);
        assert!(layout.is_fullscreen);
        assert_eq!(layout.panel_position, PanelPosition::Right);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::ToggleNav,
                ApiCall::TogglePanelPosition,
                ApiCall::ToggleFullscreen,
                ApiCall::JumpToStory(-1),
                ApiCall::Navigate("/settings/about".into()),
            ]
        );
    }

    #[test]
    fn update_flag_is_queryable() {
        let api = InMemoryApi::default().with_update_available(true);
        assert!(api.version_update_available());
        api.set_update_available(false);
        assert!(!api.version_update_available());
        assert!(api.calls().is_empty());
    }
}
