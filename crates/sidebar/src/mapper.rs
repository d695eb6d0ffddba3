//! Maps an application state snapshot to the props the sidebar renders.

use std::sync::Arc;

use serde::Serialize;
use storynav_types::{State, StoriesHash, ViewMode};
use storynav_util::Platform;
use tracing::debug;

use crate::api::SidebarApi;
use crate::collapse::collapse_docs_only_stories;
use crate::menu::{MenuCache, MenuItem};

/// Everything the sidebar needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarProps {
    /// True until the stories have been configured.
    pub loading: bool,
    pub title: Option<String>,
    pub url: Option<String>,
    /// Story tree with docs-only stories collapsed.
    pub stories: StoriesHash,
    pub story_id: Option<String>,
    pub view_mode: Option<ViewMode>,
    pub menu: Arc<[MenuItem]>,
    /// Whether the menu button should draw attention (an update is available).
    pub menu_highlighted: bool,
}

/// Turns state snapshots into [`SidebarProps`], reusing the menu between
/// snapshots whose menu inputs did not change.
#[derive(Debug)]
pub struct SidebarMapper {
    platform: Platform,
    menu_cache: MenuCache,
}

impl SidebarMapper {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            menu_cache: MenuCache::new(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Produces props for one state-change notification.
    pub fn map(&mut self, state: &State, api: &Arc<dyn SidebarApi>) -> SidebarProps {
        let stories = collapse_docs_only_stories(&state.stories_hash);
        debug!(
            before = state.stories_hash.len(),
            after = stories.len(),
            story_id = state.story_id.as_deref().unwrap_or_default(),
            "mapped sidebar stories"
        );

        let shortcut_keys = api.shortcut_keys();
        let menu = self
            .menu_cache
            .get_or_build(api, &shortcut_keys, &state.layout, self.platform);

        SidebarProps {
            loading: !state.stories_configured,
            title: state.ui.name.clone(),
            url: state.ui.url.clone(),
            stories,
            story_id: state.story_id.clone(),
            view_mode: state.view_mode,
            menu,
            menu_highlighted: api.version_update_available(),
        }
    }
}

impl Default for SidebarMapper {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryApi;
    use crate::menu::Decoration;
    use serde_json::json;

    fn state() -> State {
        serde_json::from_value(json!({
            "ui": { "name": "Acme UI", "url": "https://acme.example" },
            "viewMode": "story",
            "storyId": "button--primary",
            "layout": { "isFullscreen": false, "showPanel": true, "showNav": true, "panelPosition": "bottom" },
            "storiesHash": {
                "intro": { "id": "intro", "isComponent": true, "children": ["intro--page"] },
                "intro--page": { "id": "intro--page", "isLeaf": true, "parent": "intro", "parameters": { "docsOnly": true } },
                "button": { "id": "button", "isComponent": true, "children": ["button--primary"] },
                "button--primary": { "id": "button--primary", "isLeaf": true, "parent": "button" }
            },
            "storiesConfigured": true
        }))
        .expect("valid state")
    }

    #[test]
    fn maps_state_fields_to_props() {
        let api: Arc<dyn SidebarApi> = Arc::new(InMemoryApi::default());
        let mut mapper = SidebarMapper::new(Platform::Other);
        let props = mapper.map(&state(), &api);

        assert!(!props.loading);
        assert_eq!(props.title.as_deref(), Some("Acme UI"));
        assert_eq!(props.url.as_deref(), Some("https://acme.example"));
        assert_eq!(props.story_id.as_deref(), Some("button--primary"));
        assert_eq!(props.view_mode, Some(ViewMode::Story));
        assert_eq!(
            props.stories.keys().collect::<Vec<_>>(),
            vec!["intro--page", "button", "button--primary"]
        );
        assert_eq!(props.menu.len(), 11);
        assert!(!props.menu_highlighted);
    }

    #[test]
    fn unconfigured_stories_mean_loading() {
        let api: Arc<dyn SidebarApi> = Arc::new(InMemoryApi::default());
        let mut snapshot = state();
        snapshot.stories_configured = false;
        let props = SidebarMapper::new(Platform::Other).map(&snapshot, &api);
        assert!(props.loading);
    }

    #[test]
    fn menu_highlight_tracks_update_availability() {
        let in_memory = Arc::new(InMemoryApi::default().with_update_available(true));
        let api: Arc<dyn SidebarApi> = in_memory.clone();
        let mut mapper = SidebarMapper::new(Platform::Other);

        let props = mapper.map(&state(), &api);
        assert!(props.menu_highlighted);
        assert!(matches!(props.menu[9].right, Some(Decoration::Badge { .. })));

        in_memory.set_update_available(false);
        let props = mapper.map(&state(), &api);
        assert!(!props.menu_highlighted);
        assert_eq!(props.menu[9].right, None);
    }

    #[test]
    fn layout_changes_reach_the_menu() {
        let api: Arc<dyn SidebarApi> = Arc::new(InMemoryApi::default());
        let mut mapper = SidebarMapper::new(Platform::Other);
        let mut snapshot = state();

        let first = mapper.map(&snapshot, &api);
        let again = mapper.map(&snapshot, &api);
        assert!(Arc::ptr_eq(&first.menu, &again.menu));

        snapshot.layout.show_nav = false;
        let toggled = mapper.map(&snapshot, &api);
        assert_eq!(toggled.menu[0].left, Decoration::Placeholder);
    }
}
