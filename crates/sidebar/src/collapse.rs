//! Removal of docs-only stories from the story tree.
//!
//! Docs-only stories exist to render generated documentation and are not
//! navigable. They are dropped from the sidebar tree; a component whose only
//! child was such a story collapses into a single leaf that takes the story's
//! id, and every reference to the component is re-linked to that id.
//!
//! Input that references unknown ids is tolerated: unknown child ids pass
//! through untouched and are only reported at debug level.

use std::collections::{HashMap, HashSet};

use storynav_types::{StoriesHash, StoryNode};
use tracing::debug;

/// Result of the first pass over the stories hash.
struct Partition<'a> {
    /// Nodes that survive, in input order.
    kept: Vec<&'a StoryNode>,
    /// Ids of the docs-only leaves that were dropped.
    removed: HashSet<&'a str>,
    /// Parent id to the docs-only leaf it owned; the last leaf wins.
    parent_to_leaf: HashMap<&'a str, &'a str>,
}

fn partition(stories: &StoriesHash) -> Partition<'_> {
    let mut partition = Partition {
        kept: Vec::with_capacity(stories.len()),
        removed: HashSet::new(),
        parent_to_leaf: HashMap::new(),
    };
    for node in stories.values() {
        if node.is_docs_only() {
            partition.removed.insert(node.id.as_str());
            if let Some(parent) = node.parent.as_deref() {
                partition.parent_to_leaf.insert(parent, node.id.as_str());
            }
        } else {
            partition.kept.push(node);
        }
    }
    partition
}

/// Components that wrap exactly one child and lost a docs-only leaf, mapped
/// to the id they are promoted to.
fn promotions<'a>(partition: &Partition<'a>) -> HashMap<&'a str, &'a str> {
    partition
        .kept
        .iter()
        .copied()
        .filter(|node| node.is_component && node.children.as_ref().is_some_and(|children| children.len() == 1))
        .filter_map(|node| {
            let component_id = node.id.as_str();
            partition
                .parent_to_leaf
                .get(component_id)
                .map(|leaf_id| (component_id, *leaf_id))
        })
        .collect()
}

/// Applies promotions and drops references to removed leaves.
///
/// A promoted component becomes a leaf under the promoted id. It keeps its
/// other fields but is no longer flagged as a component, so hosts render it
/// as a plain story.
fn rewrite(node: &StoryNode, promoted: &HashMap<&str, &str>, removed: &HashSet<&str>) -> StoryNode {
    if let Some(leaf_id) = promoted.get(node.id.as_str()) {
        return StoryNode {
            id: (*leaf_id).to_string(),
            is_leaf: true,
            is_component: false,
            children: None,
            ..node.clone()
        };
    }

    match &node.children {
        Some(children) => {
            let children = children
                .iter()
                .filter(|child| !removed.contains(child.as_str()))
                .map(|child| {
                    promoted
                        .get(child.as_str())
                        .map_or_else(|| child.clone(), |leaf_id| (*leaf_id).to_string())
                })
                .collect();
            StoryNode {
                children: Some(children),
                ..node.clone()
            }
        }
        None => node.clone(),
    }
}

/// Drops docs-only leaves and collapses the components they leave behind.
///
/// The output is keyed by each node's possibly new id, in the order the
/// surviving nodes appear in `stories`.
pub fn collapse_docs_only_stories(stories: &StoriesHash) -> StoriesHash {
    let partition = partition(stories);
    let promoted = promotions(&partition);

    let collapsed: StoriesHash = partition
        .kept
        .iter()
        .map(|node| rewrite(node, &promoted, &partition.removed))
        .map(|node| (node.id.clone(), node))
        .collect();

    report_dangling_children(&collapsed);
    debug!(
        input = stories.len(),
        removed = partition.removed.len(),
        collapsed = promoted.len(),
        output = collapsed.len(),
        "collapsed docs-only stories"
    );
    collapsed
}

fn report_dangling_children(stories: &StoriesHash) {
    for node in stories.values() {
        for child in node.children.iter().flatten() {
            if !stories.contains_key(child) {
                debug!(parent = %node.id, child = %child, "story references an unknown child id");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hash(nodes: Vec<StoryNode>) -> StoriesHash {
        nodes.into_iter().map(|node| (node.id.clone(), node)).collect()
    }

    #[test]
    fn tree_without_docs_only_stories_is_unchanged() {
        let stories = hash(vec![
            StoryNode::group("ui", ["ui-button"]),
            StoryNode::component("ui-button", ["ui-button--primary", "ui-button--secondary"]).with_parent("ui"),
            StoryNode::leaf("ui-button--primary").with_parent("ui-button"),
            StoryNode::leaf("ui-button--secondary")
                .with_parent("ui-button")
                .with_parameter("docsOnly", json!(false)),
        ]);
        assert_eq!(collapse_docs_only_stories(&stories), stories);
    }

    #[test]
    fn single_docs_only_child_collapses_component() {
        let stories: StoriesHash = serde_json::from_value(json!({
            "A": { "id": "A", "isComponent": true, "children": ["B"] },
            "B": { "id": "B", "isLeaf": true, "parent": "A", "parameters": { "docsOnly": true } }
        }))
        .unwrap();

        let collapsed = collapse_docs_only_stories(&stories);
        assert_eq!(collapsed.keys().collect::<Vec<_>>(), vec!["B"]);
        let node = &collapsed["B"];
        assert_eq!(node.id, "B");
        assert!(node.is_leaf);
        assert!(!node.is_component);
        assert!(node.children.is_none());
    }

    #[test]
    fn collapsed_node_keeps_component_fields() {
        let mut component = StoryNode::component("intro", ["intro--page"]).with_parent("docs");
        component.extra.insert("name".into(), json!("Intro"));
        let stories = hash(vec![
            StoryNode::group("docs", ["intro"]),
            component,
            StoryNode::leaf("intro--page").with_parent("intro").docs_only(),
        ]);

        let collapsed = collapse_docs_only_stories(&stories);
        let node = &collapsed["intro--page"];
        assert_eq!(node.parent.as_deref(), Some("docs"));
        assert_eq!(node.extra.get("name"), Some(&json!("Intro")));
        assert_eq!(collapsed["docs"].children, Some(vec!["intro--page".to_string()]));
    }

    #[test]
    fn component_with_two_children_is_not_collapsed() {
        let stories = hash(vec![
            StoryNode::group("root", ["button"]),
            StoryNode::component("button", ["button--docs", "button--primary"]).with_parent("root"),
            StoryNode::leaf("button--docs").with_parent("button").docs_only(),
            StoryNode::leaf("button--primary").with_parent("button"),
        ]);

        let collapsed = collapse_docs_only_stories(&stories);
        assert_eq!(collapsed.keys().collect::<Vec<_>>(), vec!["root", "button", "button--primary"]);
        let button = &collapsed["button"];
        assert!(button.is_component);
        assert_eq!(button.children, Some(vec!["button--primary".to_string()]));
        assert_eq!(collapsed["root"].children, Some(vec!["button".to_string()]));
    }

    #[test]
    fn single_child_that_is_not_docs_only_is_kept() {
        let stories = hash(vec![
            StoryNode::component("card", ["card--default"]),
            StoryNode::leaf("card--default").with_parent("card"),
        ]);
        assert_eq!(collapse_docs_only_stories(&stories), stories);
    }

    #[test]
    fn every_reference_to_a_collapsed_component_is_rewritten() {
        let stories = hash(vec![
            StoryNode::group("atoms", ["atoms-intro", "atoms-icon"]),
            StoryNode::group("overview", ["atoms-intro"]),
            StoryNode::component("atoms-intro", ["atoms-intro--page"]).with_parent("atoms"),
            StoryNode::leaf("atoms-intro--page").with_parent("atoms-intro").docs_only(),
            StoryNode::component("atoms-icon", ["atoms-icon--small"]).with_parent("atoms"),
            StoryNode::leaf("atoms-icon--small").with_parent("atoms-icon"),
        ]);

        let collapsed = collapse_docs_only_stories(&stories);
        assert_eq!(
            collapsed.keys().collect::<Vec<_>>(),
            vec!["atoms", "overview", "atoms-intro--page", "atoms-icon", "atoms-icon--small"]
        );
        assert_eq!(
            collapsed["atoms"].children,
            Some(vec!["atoms-intro--page".to_string(), "atoms-icon".to_string()])
        );
        assert_eq!(collapsed["overview"].children, Some(vec!["atoms-intro--page".to_string()]));
    }

    #[test]
    fn last_docs_only_leaf_of_a_parent_wins() {
        let stories = hash(vec![
            StoryNode::group("root", ["solo"]),
            StoryNode::component("solo", ["solo--first"]).with_parent("root"),
            StoryNode::leaf("solo--first").with_parent("solo").docs_only(),
            StoryNode::leaf("solo--second").with_parent("solo").docs_only(),
        ]);

        let collapsed = collapse_docs_only_stories(&stories);
        assert_eq!(collapsed.keys().collect::<Vec<_>>(), vec!["root", "solo--second"]);
        assert_eq!(collapsed["root"].children, Some(vec!["solo--second".to_string()]));
    }

    #[test]
    fn component_losing_all_docs_only_children_keeps_an_empty_list() {
        let stories = hash(vec![
            StoryNode::component("c", ["c--a", "c--b"]),
            StoryNode::leaf("c--a").with_parent("c").docs_only(),
            StoryNode::leaf("c--b").with_parent("c").docs_only(),
        ]);

        let collapsed = collapse_docs_only_stories(&stories);
        assert_eq!(collapsed.keys().collect::<Vec<_>>(), vec!["c"]);
        assert!(collapsed["c"].is_component);
        assert_eq!(collapsed["c"].children, Some(Vec::new()));
    }

    #[test]
    fn docs_only_root_leaf_is_dropped() {
        let stories = hash(vec![
            StoryNode::leaf("welcome").docs_only(),
            StoryNode::component("card", ["card--default"]),
            StoryNode::leaf("card--default").with_parent("card"),
        ]);

        let collapsed = collapse_docs_only_stories(&stories);
        assert_eq!(collapsed.keys().collect::<Vec<_>>(), vec!["card", "card--default"]);
        assert_eq!(collapsed["card"], stories["card"]);
    }

    #[test]
    fn unknown_child_ids_pass_through() {
        let stories = hash(vec![
            StoryNode::component("lonely", ["missing--story"]),
            StoryNode::group("root", ["lonely", "ghost"]),
        ]);
        assert_eq!(collapse_docs_only_stories(&stories), stories);
    }

    #[test]
    fn component_without_children_field_is_not_collapsed() {
        let mut component = StoryNode::component("broken", Vec::<String>::new());
        component.children = None;
        let stories = hash(vec![component, StoryNode::leaf("broken--docs").with_parent("broken").docs_only()]);

        let collapsed = collapse_docs_only_stories(&stories);
        assert_eq!(collapsed.keys().collect::<Vec<_>>(), vec!["broken"]);
        assert!(collapsed["broken"].is_component);
    }
}
