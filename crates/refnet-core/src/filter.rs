//! Attribute filtering
//!
//! Filtering keeps every node that matches plus the ancestors needed to
//! reach it from the root. A node survives iff it matches or at least one
//! of its children survived; pruning therefore propagates upward and the
//! root survives whenever anything below it matches.

use crate::id::NodeId;
use crate::node::NetworkNode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Value selecting every campaign unless configured otherwise
pub const ALL_CAMPAIGNS: &str = "all";

/// Campaign selection of a network view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CampaignFilter {
    /// No filtering
    #[default]
    All,
    /// Members of one campaign and their ancestors
    Campaign(String),
}

impl CampaignFilter {
    /// Parse a selection, treating `sentinel` as "all campaigns"
    #[must_use]
    pub fn parse(value: &str, sentinel: &str) -> Self {
        if value == sentinel {
            Self::All
        } else {
            Self::Campaign(value.to_string())
        }
    }

    /// Whether this is the passthrough selection
    #[inline]
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for CampaignFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s, ALL_CAMPAIGNS))
    }
}

impl Display for CampaignFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CAMPAIGNS),
            Self::Campaign(id) => f.write_str(id),
        }
    }
}

/// Keep matching nodes and their ancestors
///
/// Returns `None` when nothing in the tree matches. The result is always
/// a freshly built tree. Repeated ids are dropped with their subtree.
pub fn prune<F>(root: &NetworkNode, mut keep: F) -> Option<NetworkNode>
where
    F: FnMut(&NetworkNode) -> bool,
{
    let mut seen = HashSet::new();
    prune_node(root, &mut keep, &mut seen)
}

fn prune_node<'a, F>(
    node: &'a NetworkNode,
    keep: &mut F,
    seen: &mut HashSet<&'a NodeId>,
) -> Option<NetworkNode>
where
    F: FnMut(&NetworkNode) -> bool,
{
    if !seen.insert(&node.id) {
        tracing::warn!(id = %node.id, "repeated node id, dropped from filtered tree");
        return None;
    }

    let matched = keep(node);
    let children: Vec<_> = node
        .children
        .iter()
        .filter_map(|child| prune_node(child, keep, seen))
        .collect();

    if !matched && children.is_empty() {
        return None;
    }

    let mut out = node.detached();
    out.children = children;
    Some(out)
}

/// Restrict the tree to one campaign
///
/// [`CampaignFilter::All`] rebuilds the whole tree without pruning.
#[must_use]
pub fn filter_by_campaign(root: &NetworkNode, filter: &CampaignFilter) -> Option<NetworkNode> {
    let filtered = match filter {
        CampaignFilter::All => prune(root, |_| true),
        CampaignFilter::Campaign(campaign_id) => prune(root, |node| node.in_campaign(campaign_id)),
    };
    tracing::debug!(
        root = %root.id,
        %filter,
        kept = filtered.is_some(),
        "filtered network by campaign"
    );
    filtered
}

/// Restrict the tree to members with the given role and their ancestors
#[must_use]
pub fn filter_by_role(root: &NetworkNode, role: &str) -> Option<NetworkNode> {
    prune(root, |node| node.role == role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::roles;
    use crate::stats::total_members;

    fn scenario() -> NetworkNode {
        NetworkNode::new(1, roles::ADMIN)
            .with_child(
                NetworkNode::new(2, roles::USER)
                    .with_child(NetworkNode::new(3, roles::USER).with_campaign("camp-A")),
            )
            .with_child(NetworkNode::new(4, roles::USER))
    }

    fn ids(node: &NetworkNode) -> Vec<String> {
        node.iter().map(|n| n.id.to_string()).collect()
    }

    #[test]
    fn keeps_chain_to_matching_member() {
        let filtered = filter_by_campaign(&scenario(), &CampaignFilter::Campaign("camp-A".into())).unwrap();
        assert_eq!(ids(&filtered), ["1", "2", "3"]);
        assert_eq!(total_members(&filtered), 3);
    }

    #[test]
    fn no_match_is_none() {
        assert!(filter_by_campaign(&scenario(), &CampaignFilter::Campaign("camp-Z".into())).is_none());
    }

    #[test]
    fn all_passes_everything_through() {
        let root = scenario();
        let filtered = filter_by_campaign(&root, &CampaignFilter::All).unwrap();
        assert_eq!(filtered, root);
    }

    #[test]
    fn matching_root_alone_survives() {
        let root = NetworkNode::new(1, roles::ADMIN)
            .with_campaign("camp-A")
            .with_child(NetworkNode::new(2, roles::USER));
        let filtered = filter_by_campaign(&root, &"camp-A".parse().unwrap()).unwrap();
        assert_eq!(ids(&filtered), ["1"]);
    }

    #[test]
    fn parse_with_custom_sentinel() {
        assert!(CampaignFilter::parse("*", "*").is_all());
        assert_eq!(CampaignFilter::parse("all", "*"), CampaignFilter::Campaign("all".into()));
        assert!("all".parse::<CampaignFilter>().unwrap().is_all());
        assert_eq!(CampaignFilter::All.to_string(), "all");
    }

    #[test]
    fn role_filter() {
        let root = NetworkNode::new(1, roles::ADMIN)
            .with_child(NetworkNode::new(2, roles::USER).with_child(NetworkNode::new(3, roles::MANAGER)))
            .with_child(NetworkNode::new(4, roles::USER));
        let filtered = filter_by_role(&root, roles::MANAGER).unwrap();
        assert_eq!(ids(&filtered), ["1", "2", "3"]);
        assert!(filter_by_role(&root, roles::SUPER).is_none());
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
    fn repeated_subtree_is_dropped() {
        let root = repeated();
        let all = filter_by_campaign(&root, &CampaignFilter::All).unwrap();
        assert_eq!(ids(&all), ["1", "2", "3"]);
        assert_eq!(all.children.len(), 1);
        assert!(all.children[0].children[0].campaign_id.is_none());

        // only the repeated copy and its subtree are in camp-A
        assert!(filter_by_campaign(&root, &CampaignFilter::Campaign("camp-A".into())).is_none());
    }
}
