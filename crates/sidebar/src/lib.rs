//! # Storynav sidebar
//!
//! Builds the navigation model of the story explorer sidebar from a snapshot
//! of the application state:
//!
//! - [`menu`]: the command menu with shortcut labels, and its cache
//! - [`collapse`]: removal of docs-only stories from the story tree
//! - [`mapper`]: the state-to-props mapping that ties both together
//!
//! Rendering is left to the host. The host also implements [`SidebarApi`],
//! which menu entries call when activated.

pub mod api;
pub mod collapse;
pub mod mapper;
pub mod menu;

pub use api::{ApiCall, InMemoryApi, SidebarApi};
pub use collapse::collapse_docs_only_stories;
pub use mapper::{SidebarMapper, SidebarProps};
pub use menu::{BadgeStatus, Decoration, MenuAction, MenuCache, MenuItem, create_menu};
