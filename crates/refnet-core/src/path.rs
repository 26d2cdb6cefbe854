//! Root-to-node paths
//!
//! Used to auto-expand the ancestors of a member (typically the signed-in
//! user) in a tree view.

use crate::id::NodeId;
use crate::node::NetworkNode;
use std::collections::HashSet;

/// Ids from `root` to `target`, both inclusive
///
/// Children are searched in order and the first match wins. Returns an
/// empty path when `target` is not in the tree.
#[must_use]
pub fn find_path_to_node(root: &NetworkNode, target: &NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut seen = HashSet::new();
    if search(root, target, &mut seen, &mut path) {
        path
    } else {
        Vec::new()
    }
}

fn search<'a>(
    node: &'a NetworkNode,
    target: &NodeId,
    seen: &mut HashSet<&'a NodeId>,
    path: &mut Vec<NodeId>,
) -> bool {
    if !seen.insert(&node.id) {
        return false;
    }
    path.push(node.id.clone());
    if &node.id == target {
        return true;
    }
    for child in &node.children {
        if search(child, target, seen, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Union of the root paths of every target, skipping targets not in the tree
#[must_use]
pub fn find_paths_to_nodes<'a, I>(root: &NetworkNode, targets: I) -> Vec<Vec<NodeId>>
where
    I: IntoIterator<Item = &'a NodeId>,
{
    targets
        .into_iter()
        .map(|target| find_path_to_node(root, target))
        .filter(|path| !path.is_empty())
        .collect()
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

    fn ids(path: &[NodeId]) -> Vec<&str> {
        path.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn path_to_grandchild() {
        let path = find_path_to_node(&scenario(), &NodeId::from(3));
        assert_eq!(ids(&path), ["1", "2", "3"]);
    }

    #[test]
    fn path_to_root_is_singleton() {
        let path = find_path_to_node(&scenario(), &NodeId::from(1));
        assert_eq!(ids(&path), ["1"]);
    }

    #[test]
    fn path_to_missing_is_empty() {
        assert!(find_path_to_node(&scenario(), &NodeId::from(42)).is_empty());
    }

    #[test]
    fn string_target_matches_numeric_id() {
        let path = find_path_to_node(&scenario(), &NodeId::from("4"));
        assert_eq!(ids(&path), ["1", "4"]);
    }

    #[test]
    fn multiple_targets() {
        let root = scenario();
        let targets = [NodeId::from(3), NodeId::from(99), NodeId::from(4)];
        let paths = find_paths_to_nodes(&root, &targets);
        assert_eq!(paths.len(), 2);
        assert_eq!(ids(&paths[1]), ["1", "4"]);
    }

    fn repeated() -> NetworkNode {
        // 3 occurs twice; the second copy carries 9 below it
        NetworkNode::new(1, roles::ADMIN)
            .with_child(NetworkNode::new(2, roles::USER).with_child(NetworkNode::new(3, roles::USER)))
            .with_child(
                NetworkNode::new(3, roles::USER)
                    .with_campaign("camp-A")
                    .with_child(NetworkNode::new(9, roles::USER).with_campaign("camp-A")),
            )
    }

    #[test]
    fn repeated_id_follows_first_occurrence() {
        let root = repeated();
        assert_eq!(ids(&find_path_to_node(&root, &NodeId::from(3))), ["1", "2", "3"]);
        assert!(find_path_to_node(&root, &NodeId::from(9)).is_empty());
    }
}
