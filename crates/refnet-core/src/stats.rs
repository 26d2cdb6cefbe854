//! Network statistics
//!
//! All aggregates are computed over a single cycle-guarded walk:
//! - total members (root included)
//! - direct invites of the root
//! - member count per role tag
//! - network depth, counted in nodes
//! - average invites per member, rounded to one decimal

use crate::node::{roles, NetworkNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated statistics for one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    /// Members in the subtree, root included
    pub total_members: usize,
    /// Children of the root
    pub direct_invites: usize,
    /// Members with role `admin`
    pub admin_count: usize,
    /// Members with role `user`
    pub user_count: usize,
    /// Longest root-to-leaf path, counted in nodes
    pub network_depth: usize,
    /// Mean number of direct invites per member
    pub average_invites: f64,
    /// Member count for every role tag seen
    pub role_counts: BTreeMap<String, usize>,
}

impl NetworkStats {
    /// Statistics of an absent network
    ///
    /// Differs from a single-member network by `network_depth == 0`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_members: 0,
            direct_invites: 0,
            admin_count: 0,
            user_count: 0,
            network_depth: 0,
            average_invites: 0.0,
            role_counts: BTreeMap::new(),
        }
    }

    /// Whether these are the statistics of an absent network
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.network_depth == 0
    }

    /// Members carrying the given role tag
    #[inline]
    #[must_use]
    pub fn count_by_role(&self, role: &str) -> usize {
        self.role_counts.get(role).copied().unwrap_or(0)
    }

    /// Make sure each listed role has an entry in `role_counts`, even at zero
    #[must_use]
    pub fn with_reported_roles<S: AsRef<str>>(mut self, report_roles: &[S]) -> Self {
        for role in report_roles {
            self.role_counts.entry(role.as_ref().to_string()).or_insert(0);
        }
        self
    }
}

impl Default for NetworkStats {
    fn default() -> Self {
        Self::empty()
    }
}

/// Compute statistics for a network, or the empty record when absent
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_stats(root: Option<&NetworkNode>) -> NetworkStats {
    let Some(root) = root else {
        return NetworkStats::empty();
    };

    let mut total_members = 0usize;
    let mut total_invites = 0usize;
    let mut network_depth = 0usize;
    let mut role_counts = BTreeMap::new();

    for visit in root.walk() {
        total_members += 1;
        // Every member past the root was reached over exactly one invite edge
        if visit.depth > 1 {
            total_invites += 1;
        }
        network_depth = network_depth.max(visit.depth);
        *role_counts.entry(visit.node.role.clone()).or_insert(0) += 1;
    }

    let average_invites = round_one_decimal(total_invites as f64 / total_members as f64);

    tracing::debug!(
        root = %root.id,
        total_members,
        network_depth,
        average_invites,
        "computed network stats"
    );

    NetworkStats {
        total_members,
        direct_invites: root.direct_invites(),
        admin_count: role_counts.get(roles::ADMIN).copied().unwrap_or(0),
        user_count: role_counts.get(roles::USER).copied().unwrap_or(0),
        network_depth,
        average_invites,
        role_counts,
    }
}

/// Members in the subtree, root included
#[must_use]
pub fn total_members(root: &NetworkNode) -> usize {
    root.iter().count()
}

/// Members in the subtree carrying the given role tag
#[must_use]
pub fn count_by_role(root: &NetworkNode, role: &str) -> usize {
    root.iter().filter(|node| node.role == role).count()
}

/// Length of the longest root-to-leaf path, counted in nodes
///
/// A leaf has depth 1.
#[must_use]
pub fn calculate_depth(node: &NetworkNode) -> usize {
    if node.is_leaf() {
        return 1;
    }
    node.walk().map(|visit| visit.depth).max().unwrap_or(1)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
