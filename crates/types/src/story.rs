//! Story tree records as delivered by the application state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat mapping from story id to its record, kept in insertion order.
pub type StoriesHash = IndexMap<String, StoryNode>;

/// Parameter key marking a story that only exists to render documentation.
pub const DOCS_ONLY_PARAMETER: &str = "docsOnly";

/// A single entry of the stories hash.
///
/// Leaves are runnable stories; components group stories or further groups.
/// Fields this crate does not interpret (`name`, `kind`, `depth`, ...) are kept
/// in `extra` so they survive any transformation untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryNode {
    /// Unique identifier, also the key of the node in the stories hash.
    pub id: String,
    /// Whether the node is a runnable story.
    #[serde(default)]
    pub is_leaf: bool,
    /// Whether the node groups stories.
    #[serde(default)]
    pub is_component: bool,
    /// Id of the owning node, absent for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Ordered child ids; only present on non-leaf nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    /// Arbitrary story metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    /// Uninterpreted fields carried through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoryNode {
    /// Creates a leaf story with the given id.
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_leaf: true,
            ..Self::default()
        }
    }

    /// Creates a component node owning `children`.
    pub fn component<I, S>(id: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            is_component: true,
            children: Some(children.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Creates a plain group node (neither leaf nor component) owning `children`.
    pub fn group<I, S>(id: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            children: Some(children.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }

    /// Marks the node as a docs-only story.
    pub fn docs_only(self) -> Self {
        self.with_parameter(DOCS_ONLY_PARAMETER, Value::Bool(true))
    }

    /// True for leaves whose parameters carry `docsOnly: true`.
    pub fn is_docs_only(&self) -> bool {
        self.is_leaf
            && self
                .parameters
                .as_ref()
                .and_then(|parameters| parameters.get(DOCS_ONLY_PARAMETER))
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }
}
