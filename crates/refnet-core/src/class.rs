//! Network classes
//!
//! A member's class is its depth below the root: the root is class
//! `start_class` (normally 1), its invitees one more, and so on. Classes
//! are structural only and are recomputed whenever a tree is rebuilt. They
//! are unrelated to the permission role on the member's account.

use crate::expansion::ExpansionState;
use crate::id::NodeId;
use crate::node::NetworkNode;
use crate::path::find_path_to_node;
use std::collections::{BTreeMap, HashSet};

/// Class of a root when none is configured
pub const DEFAULT_START_CLASS: u32 = 1;

/// Copy of the tree with `network_class` set on every node
///
/// Ids, fields and child order are preserved. Any class already present
/// on the input is overwritten. A repeated id is dropped from the copy
/// together with its subtree.
#[must_use]
pub fn assign_classes(root: &NetworkNode, start_class: u32) -> NetworkNode {
    let mut seen = HashSet::new();
    classify(root, start_class, &mut seen)
}

fn classify<'a>(node: &'a NetworkNode, class: u32, seen: &mut HashSet<&'a NodeId>) -> NetworkNode {
    seen.insert(&node.id);
    let mut out = node.detached();
    out.network_class = Some(class);
    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        if seen.contains(&child.id) {
            tracing::warn!(id = %child.id, "repeated node id, dropped from classified tree");
            continue;
        }
        children.push(classify(child, class.saturating_add(1), seen));
    }
    out.children = children;
    out
}

/// Whether the node or any descendant has the given class
#[must_use]
pub fn contains_class(node: &NetworkNode, target_class: u32) -> bool {
    node.iter().any(|n| n.network_class == Some(target_class))
}

/// Ids of every node in the subtree with the given class, pre-order
#[must_use]
pub fn find_nodes_with_class(node: &NetworkNode, target_class: u32) -> Vec<NodeId> {
    node.iter()
        .filter(|n| n.network_class == Some(target_class))
        .map(|n| n.id.clone())
        .collect()
}

/// Member count per class; unclassified nodes are not counted
#[must_use]
pub fn class_distribution(node: &NetworkNode) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for class in node.iter().filter_map(|n| n.network_class) {
        *counts.entry(class).or_insert(0) += 1;
    }
    counts
}

/// Highest class in the subtree
#[must_use]
pub fn max_class(node: &NetworkNode) -> Option<u32> {
    node.iter().filter_map(|n| n.network_class).max()
}

/// Expansion state revealing every node of the given class
///
/// The union of the root paths to each match, or the root alone when
/// nothing matches.
#[must_use]
pub fn expand_for_class(root: &NetworkNode, target_class: u32) -> ExpansionState {
    let matches = find_nodes_with_class(root, target_class);
    if matches.is_empty() {
        return ExpansionState::collapse_all(&root.id);
    }
    matches
        .iter()
        .flat_map(|id| find_path_to_node(root, id))
        .collect()
}
