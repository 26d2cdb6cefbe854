//! Expansion state of a tree view
//!
//! The set of node ids whose children are shown. It is a persistent value:
//! every operation returns a new state and leaves its input untouched, so
//! the hosting view can compare old and new states to decide on a redraw.
//! Ids need not be present in the tree currently displayed; a filter may
//! hide a node and bring it back later with its open/closed state intact.

use crate::id::NodeId;
use crate::node::NetworkNode;
use crate::path::find_path_to_node;
use im::OrdSet;
use serde::{Deserialize, Serialize};

/// Set of expanded node ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState(OrdSet<NodeId>);

impl ExpansionState {
    /// Nothing expanded
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(OrdSet::new())
    }

    /// State with exactly the given ids expanded
    #[must_use]
    pub fn from_ids<I: IntoIterator<Item = NodeId>>(ids: I) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Every node of the tree expanded
    #[must_use]
    pub fn expand_all(root: &NetworkNode) -> Self {
        Self(root.iter().map(|node| node.id.clone()).collect())
    }

    /// Only the root expanded
    #[inline]
    #[must_use]
    pub fn collapse_all(root_id: &NodeId) -> Self {
        Self(OrdSet::unit(root_id.clone()))
    }

    /// The ancestors of `target` and `target` itself expanded
    ///
    /// Falls back to the root alone when `target` is not in the tree.
    #[must_use]
    pub fn expand_path_to(root: &NetworkNode, target: &NodeId) -> Self {
        let path = find_path_to_node(root, target);
        if path.is_empty() {
            tracing::debug!(%target, root = %root.id, "target not in tree, expanding root only");
            return Self::collapse_all(&root.id);
        }
        Self::from_ids(path)
    }

    /// New state with `id` flipped
    #[must_use]
    pub fn toggle(&self, id: &NodeId) -> Self {
        if self.0.contains(id) {
            Self(self.0.without(id))
        } else {
            Self(self.0.update(id.clone()))
        }
    }

    /// New state with `id` expanded
    #[must_use]
    pub fn expand(&self, id: &NodeId) -> Self {
        Self(self.0.update(id.clone()))
    }

    /// New state with `id` collapsed
    #[must_use]
    pub fn collapse(&self, id: &NodeId) -> Self {
        Self(self.0.without(id))
    }

    /// New state expanding everything expanded in either state
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.clone().union(other.0.clone()))
    }

    /// Whether `id` is expanded
    #[inline]
    #[must_use]
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.0.contains(id)
    }

    /// Number of expanded ids
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is expanded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expanded ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.0.iter()
    }
}

impl FromIterator<NodeId> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::roles;

    fn scenario() -> NetworkNode {
        NetworkNode::new(1, roles::ADMIN)
            .with_child(NetworkNode::new(2, roles::USER).with_child(NetworkNode::new(3, roles::USER)))
            .with_child(NetworkNode::new(4, roles::USER))
    }

    fn state(ids: &[i32]) -> ExpansionState {
        ids.iter().copied().map(NodeId::from).collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let one = state(&[1]);
        let both = one.toggle(&NodeId::from(2));
        assert_eq!(both, state(&[1, 2]));
        assert_eq!(both.toggle(&NodeId::from(2)), state(&[1]));
        // input untouched
        assert_eq!(one, state(&[1]));
    }

    #[test]
    fn expand_all_covers_tree() {
        assert_eq!(ExpansionState::expand_all(&scenario()), state(&[1, 2, 3, 4]));
    }

    #[test]
    fn collapse_all_keeps_root() {
        let collapsed = ExpansionState::collapse_all(&NodeId::from(1));
        assert_eq!(collapsed, state(&[1]));
        assert!(!collapsed.is_empty());
    }

    #[test]
    fn expand_path_to_present_and_missing() {
        let root = scenario();
        assert_eq!(ExpansionState::expand_path_to(&root, &NodeId::from(3)), state(&[1, 2, 3]));
        assert_eq!(ExpansionState::expand_path_to(&root, &NodeId::from(77)), state(&[1]));
    }

    #[test]
    fn ids_outside_tree_are_kept() {
        let s = state(&[1]).expand(&NodeId::from("gone"));
        assert!(s.is_expanded(&NodeId::from("gone")));
        assert_eq!(s.collapse(&NodeId::from("gone")), state(&[1]));
    }

    #[test]
    fn union_and_serialization() {
        let merged = state(&[1, 3]).union(&state(&[2, 3]));
        assert_eq!(merged.len(), 3);
        assert_eq!(serde_json::to_string(&merged).unwrap(), "[1,2,3]");
    }
}
