//! Dashboard network view
//!
//! Every page showing a network needs the same derived data: the tree
//! restricted to the selected campaign, classes, stats over what is
//! visible and an initial expansion state. [`NetworkView::build`] computes
//! all of it in one place.

use crate::class::{assign_classes, class_distribution, contains_class, expand_for_class};
use crate::config::NetworkConfig;
use crate::expansion::ExpansionState;
use crate::filter::{filter_by_campaign, CampaignFilter};
use crate::id::NodeId;
use crate::node::NetworkNode;
use crate::stats::{compute_stats, NetworkStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Selections applied to a view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Campaign selection
    pub campaign: CampaignFilter,
    /// Only show the network if it has members of this class
    pub class: Option<u32>,
    /// Member whose ancestors start expanded
    pub current_user: Option<NodeId>,
}

impl ViewOptions {
    /// No filters, nobody highlighted
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With campaign selection
    #[inline]
    #[must_use]
    pub fn with_campaign(mut self, campaign: CampaignFilter) -> Self {
        self.campaign = campaign;
        self
    }

    /// With class filter
    #[inline]
    #[must_use]
    pub fn with_class(mut self, class: u32) -> Self {
        self.class = Some(class);
        self
    }

    /// With current user
    #[inline]
    #[must_use]
    pub fn with_current_user(mut self, user: impl Into<NodeId>) -> Self {
        self.current_user = Some(user.into());
        self
    }
}

/// Derived data for a network that has something to show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSnapshot {
    /// Filtered tree with classes assigned
    pub tree: NetworkNode,
    /// Statistics of the visible tree
    pub stats: NetworkStats,
    /// Members per class
    pub class_counts: BTreeMap<u32, usize>,
    /// Initial expansion state
    pub expansion: ExpansionState,
}

/// Outcome of building a view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum NetworkView {
    /// Nothing matches the selections
    Empty,
    /// Something to show
    Ready(Box<NetworkSnapshot>),
}

impl NetworkView {
    /// Build the view for `root` under the given selections
    ///
    /// Expansion starts with the paths to every member of the selected
    /// class, otherwise the path to the current user, otherwise the root
    /// alone.
    #[must_use]
    pub fn build(root: &NetworkNode, options: &ViewOptions, config: &NetworkConfig) -> Self {
        let Some(filtered) = filter_by_campaign(root, &options.campaign) else {
            tracing::debug!(root = %root.id, campaign = %options.campaign, "no members in campaign");
            return Self::Empty;
        };
        let tree = assign_classes(&filtered, config.start_class);

        let expansion = match (options.class, &options.current_user) {
            (Some(class), _) => {
                if !contains_class(&tree, class) {
                    tracing::debug!(root = %root.id, class, "no members in class");
                    return Self::Empty;
                }
                expand_for_class(&tree, class)
            }
            (None, Some(user)) => ExpansionState::expand_path_to(&tree, user),
            (None, None) => ExpansionState::collapse_all(&tree.id),
        };

        let stats = compute_stats(Some(&tree)).with_reported_roles(&config.report_roles);
        let class_counts = class_distribution(&tree);

        Self::Ready(Box::new(NetworkSnapshot {
            tree,
            stats,
            class_counts,
            expansion,
        }))
    }

    /// The snapshot, if there is one
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<&NetworkSnapshot> {
        match self {
            Self::Empty => None,
            Self::Ready(snapshot) => Some(&**snapshot),
        }
    }

    /// Stats of the view; the empty record when nothing is shown
    #[must_use]
    pub fn stats(&self) -> NetworkStats {
        self.snapshot()
            .map_or_else(NetworkStats::empty, |snapshot| snapshot.stats.clone())
    }

    /// Whether nothing matches the selections
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
