//! Network node model
//!
//! [`NetworkNode`] is the tree shape the fetch layer returns for "network
//! rooted at member X": a member plus the members it invited, nested.
//! Nesting is the structure; `invited_by` is a redundant back-reference
//! kept for display and consistency checks (see [`crate::validate`]).

use crate::id::{text_key, NodeId};
use crate::record::{CampaignRecord, UserRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Well-known role tags
///
/// Roles are open strings compared for equality only; these are the ones
/// the dashboard reports on by default.
pub mod roles {
    /// Platform-wide administrator
    pub const SUPER: &str = "super";
    /// Campaign administrator
    pub const ADMIN: &str = "admin";
    /// Campaign manager
    pub const MANAGER: &str = "manager";
    /// Regular member
    pub const USER: &str = "user";
}

/// One participant in a referral network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    /// Member id, unique within one tree
    pub id: NodeId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Display email
    #[serde(default)]
    pub email: String,
    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Role tag (`super`, `admin`, `manager`, `user`, or anything else)
    #[serde(default)]
    pub role: String,
    /// Campaign the member belongs to
    #[serde(default, deserialize_with = "text_key::deserialize_option")]
    pub campaign_id: Option<String>,
    /// Id of the inviting member
    #[serde(default)]
    pub invited_by: Option<NodeId>,
    /// Invited members, in insertion order
    #[serde(default)]
    pub children: Vec<NetworkNode>,
    /// Depth-derived class, set by [`crate::class::assign_classes`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_class: Option<u32>,
    /// Resolved user record, set by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
    /// Resolved campaign record, set by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignRecord>,
}

impl NetworkNode {
    /// Create a childless node with the given id and role
    #[must_use]
    pub fn new(id: impl Into<NodeId>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            email: String::new(),
            phone: None,
            role: role.into(),
            campaign_id: None,
            invited_by: None,
            children: Vec::new(),
            network_class: None,
            user: None,
            campaign: None,
        }
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// With display email
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// With campaign membership
    #[inline]
    #[must_use]
    pub fn with_campaign(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    /// With explicit inviter id
    #[inline]
    #[must_use]
    pub fn with_invited_by(mut self, inviter: impl Into<NodeId>) -> Self {
        self.invited_by = Some(inviter.into());
        self
    }

    /// Append a child, recording this node as its inviter
    #[must_use]
    pub fn with_child(mut self, mut child: NetworkNode) -> Self {
        child.invited_by = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Number of direct invites
    #[inline]
    #[must_use]
    pub fn direct_invites(&self) -> usize {
        self.children.len()
    }

    /// Whether the node invited nobody
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether the node belongs to the given campaign
    #[inline]
    #[must_use]
    pub fn in_campaign(&self, campaign_id: &str) -> bool {
        self.campaign_id.as_deref() == Some(campaign_id)
    }

    /// Copy of this node with no children, keeping every other field
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role.clone(),
            campaign_id: self.campaign_id.clone(),
            invited_by: self.invited_by.clone(),
            children: Vec::new(),
            network_class: self.network_class,
            user: self.user.clone(),
            campaign: self.campaign.clone(),
        }
    }

    /// Pre-order walk reporting the depth of each node (root is 1)
    ///
    /// A repeated id is treated as already visited: it is neither yielded
    /// again nor descended into.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 1)],
            seen: HashSet::new(),
        }
    }

    /// Pre-order iterator over the subtree, root first
    pub fn iter(&self) -> impl Iterator<Item = &NetworkNode> + '_ {
        self.walk().map(|visit| visit.node)
    }
}

/// A node reached by [`Walk`]
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// The node
    pub node: &'a NetworkNode,
    /// Depth from the walk's root, counting nodes (root is 1)
    pub depth: usize,
}

/// Cycle-guarded pre-order traversal, see [`NetworkNode::walk`]
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(&'a NetworkNode, usize)>,
    seen: HashSet<&'a NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            if !self.seen.insert(&node.id) {
                tracing::warn!(id = %node.id, "repeated node id, skipping subtree");
                continue;
            }
            self.stack
                .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
            return Some(Visit { node, depth });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NetworkNode {
        NetworkNode::new(1, roles::ADMIN)
            .with_child(NetworkNode::new(2, roles::USER).with_child(NetworkNode::new(3, roles::USER)))
            .with_child(NetworkNode::new(4, roles::USER))
    }

    #[test]
    fn with_child_sets_inviter() {
        let root = sample();
        assert_eq!(root.invited_by, None);
        assert_eq!(root.children[0].invited_by, Some(NodeId::from(1)));
        assert_eq!(root.children[0].children[0].invited_by, Some(NodeId::from(2)));
    }

    #[test]
    fn walk_is_preorder_with_depth() {
        let root = sample();
        let visits: Vec<_> = root
            .walk()
            .map(|v| (v.node.id.as_str().to_string(), v.depth))
            .collect();
        assert_eq!(
            visits,
            vec![
                ("1".to_string(), 1),
                ("2".to_string(), 2),
                ("3".to_string(), 3),
                ("4".to_string(), 2),
            ]
        );
    }

    #[test]
    fn walk_skips_repeated_ids() {
        // 2 appears twice; second occurrence and its subtree are skipped
        let root = NetworkNode::new(1, roles::ADMIN)
            .with_child(NetworkNode::new(2, roles::USER))
            .with_child(NetworkNode::new(2, roles::USER).with_child(NetworkNode::new(9, roles::USER)));

        let ids: Vec<_> = root.iter().map(|n| n.id.to_string()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn detached_drops_children_only() {
        let root = sample().with_campaign("camp-A");
        let bare = root.detached();
        assert!(bare.is_leaf());
        assert_eq!(bare.campaign_id.as_deref(), Some("camp-A"));
        assert_eq!(bare.id, root.id);
    }

    #[test]
    fn deserializes_dto_shape() {
        let json = r#"{
            "id": 1, "name": "Ana", "email": "ana@example.org", "role": "admin",
            "campaignId": null, "invitedBy": null,
            "children": [
                { "id": "2", "name": "Bo", "email": "bo@example.org", "phone": "555",
                  "role": "user", "campaignId": "camp-A", "invitedBy": 1, "children": [] }
            ]
        }"#;
        let root: NetworkNode = serde_json::from_str(json).unwrap();
        assert_eq!(root.children.len(), 1);
        let child = &root.children[0];
        assert_eq!(child.invited_by.as_ref(), Some(&root.id));
        assert!(child.in_campaign("camp-A"));
        assert_eq!(child.phone.as_deref(), Some("555"));
        assert_eq!(child.network_class, None);
    }
}
