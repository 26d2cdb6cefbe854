//! Testing utilities for refnet workspace
//!
//! Shared fixtures and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use proptest::sample::Index;
use refnet_core::{assemble_forest, roles, NetworkNode, NodeId};

pub const CAMPAIGNS: [&str; 3] = ["camp-A", "camp-B", "camp-C"];

pub fn member(id: i32, role: &str) -> NetworkNode {
    NetworkNode::new(id, role)
        .with_name(format!("Member {id}"))
        .with_email(format!("member{id}@example.org"))
}

/// 1(admin) -> [2(user) -> [3(user, camp-A)], 4(user)]
pub fn scenario_tree() -> NetworkNode {
    member(1, roles::ADMIN)
        .with_child(member(2, roles::USER).with_child(member(3, roles::USER).with_campaign("camp-A")))
        .with_child(member(4, roles::USER))
}

pub fn single_node() -> NetworkNode {
    member(5, roles::MANAGER)
}

/// Straight line of `len` members, ids 1..=len
pub fn chain(len: i32) -> NetworkNode {
    let mut node = member(len, roles::USER);
    for id in (1..len).rev() {
        node = member(id, roles::USER).with_child(node);
    }
    node
}

pub fn id(value: i32) -> NodeId {
    NodeId::from(value)
}

pub fn ids(node: &NetworkNode) -> Vec<String> {
    node.iter().map(|n| n.id.to_string()).collect()
}

/// Clear `network_class` everywhere
pub fn strip_classes(node: &NetworkNode) -> NetworkNode {
    let mut out = node.detached();
    out.network_class = None;
    out.children = node.children.iter().map(strip_classes).collect();
    out
}

pub fn role_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(roles::SUPER.to_string()),
        Just(roles::ADMIN.to_string()),
        Just(roles::MANAGER.to_string()),
        Just(roles::USER.to_string()),
    ]
}

pub fn campaign_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(CAMPAIGNS.to_vec()).prop_map(str::to_string))
}

/// Well-formed trees of 1..`max_members` members with unique ids 1..=n
///
/// Member `i` is invited by a uniformly chosen earlier member, so every
/// shape from a chain to a star can come up.
pub fn tree_strategy(max_members: usize) -> impl Strategy<Value = NetworkNode> {
    (1..=max_members.max(1)).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<Index>(), n - 1),
            prop::collection::vec(role_strategy(), n),
            prop::collection::vec(campaign_strategy(), n),
        )
            .prop_map(|(parents, roles, campaigns)| build_tree(&parents, roles, campaigns))
    })
}

fn build_tree(parents: &[Index], roles: Vec<String>, campaigns: Vec<Option<String>>) -> NetworkNode {
    let records: Vec<NetworkNode> = roles
        .into_iter()
        .zip(campaigns)
        .enumerate()
        .map(|(position, (role, campaign))| {
            let id = i64::try_from(position + 1).unwrap();
            let mut node = NetworkNode::new(id, role);
            node.campaign_id = campaign;
            if position > 0 {
                let parent = parents[position - 1].index(position);
                node.invited_by = Some(NodeId::from(i64::try_from(parent + 1).unwrap()));
            }
            node
        })
        .collect();
    assemble_forest(&records).unwrap().remove(0)
}
