//! Node lookup

use crate::id::NodeId;
use crate::node::NetworkNode;

/// Pre-order search for the node with the given id
#[must_use]
pub fn find_by_id<'a>(root: &'a NetworkNode, id: &NodeId) -> Option<&'a NetworkNode> {
    root.iter().find(|node| &node.id == id)
}

/// Whether the tree contains the given id
#[inline]
#[must_use]
pub fn contains_id(root: &NetworkNode, id: &NodeId) -> bool {
    find_by_id(root, id).is_some()
}

/// The node whose children include `id`, if `id` is in the tree below the root
#[must_use]
pub fn find_parent<'a>(root: &'a NetworkNode, id: &NodeId) -> Option<&'a NetworkNode> {
    root.iter()
        .find(|node| node.children.iter().any(|child| &child.id == id))
}

/// Every id in the tree, pre-order
#[must_use]
pub fn collect_ids(root: &NetworkNode) -> Vec<NodeId> {
    root.iter().map(|node| node.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::roles;

    fn scenario() -> NetworkNode {
        NetworkNode::new(1, roles::ADMIN)
            .with_child(
                NetworkNode::new(2, roles::USER)
                    .with_name("Bo")
                    .with_child(NetworkNode::new(3, roles::USER)),
            )
            .with_child(NetworkNode::new(4, roles::USER))
    }

    #[test]
    fn finds_nested_node() {
        let root = scenario();
        let found = find_by_id(&root, &NodeId::from(2)).unwrap();
        assert_eq!(found.name, "Bo");
        assert_eq!(found.children.len(), 1);
    }

    #[test]
    fn miss_is_none() {
        assert!(find_by_id(&scenario(), &NodeId::from("nobody")).is_none());
        assert!(!contains_id(&scenario(), &NodeId::from(5)));
    }

    #[test]
    fn parent_lookup() {
        let root = scenario();
        assert_eq!(find_parent(&root, &NodeId::from(3)).map(|n| n.id.to_string()), Some("2".into()));
        assert!(find_parent(&root, &NodeId::from(1)).is_none());
    }

    #[test]
    fn ids_in_preorder() {
        let ids: Vec<_> = collect_ids(&scenario()).into_iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }
}
