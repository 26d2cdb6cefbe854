//! refnet Core
//!
//! Referral-network tree model and the pure operations dashboards derive
//! from it.
//!
//! # Core Concepts
//!
//! - [`NetworkNode`]: one member and the members it invited, nested
//! - [`NetworkStats`]: member counts, role counts, depth, average invites
//! - [`ExpansionState`]: persistent set of expanded node ids
//! - network classes: depth-from-root labels, see [`class`]
//! - [`CampaignFilter`]: campaign-scoped pruning that keeps ancestor chains
//! - [`NetworkView`]: all of the above combined for one dashboard page
//!
//! Every operation takes a tree by reference and returns a new value; no
//! input is mutated. Traversals treat a repeated id as already visited, so
//! malformed server data cannot make them loop.
//!
//! # Example
//!
//! ```rust
//! use refnet_core::{compute_stats, find_path_to_node, NetworkNode, NodeId};
//!
//! let root = NetworkNode::new(1, "admin")
//!     .with_child(NetworkNode::new(2, "user").with_child(NetworkNode::new(3, "user")))
//!     .with_child(NetworkNode::new(4, "user"));
//!
//! let stats = compute_stats(Some(&root));
//! assert_eq!(stats.total_members, 4);
//! assert_eq!(stats.network_depth, 3);
//!
//! let path = find_path_to_node(&root, &NodeId::from(3));
//! assert_eq!(path, [NodeId::from(1), NodeId::from(2), NodeId::from(3)]);
//! ```

#![warn(missing_docs)]

pub mod assemble;
pub mod class;
pub mod config;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod id;
pub mod lookup;
pub mod node;
pub mod path;
pub mod record;
pub mod stats;
pub mod validate;
pub mod view;

// Re-exports
pub use assemble::{assemble_forest, assemble_tree};
pub use class::{
    assign_classes, class_distribution, contains_class, expand_for_class, find_nodes_with_class,
    max_class, DEFAULT_START_CLASS,
};
pub use config::NetworkConfig;
pub use error::{ConfigError, NetworkError};
pub use expansion::ExpansionState;
pub use filter::{filter_by_campaign, filter_by_role, prune, CampaignFilter, ALL_CAMPAIGNS};
pub use id::NodeId;
pub use lookup::{collect_ids, contains_id, find_by_id, find_parent};
pub use node::{roles, NetworkNode, Visit, Walk};
pub use path::{find_path_to_node, find_paths_to_nodes};
pub use record::{CampaignRecord, UserRecord};
pub use stats::{calculate_depth, compute_stats, count_by_role, total_members, NetworkStats};
pub use validate::{validate_tree, Inconsistency, ValidationReport};
pub use view::{NetworkSnapshot, NetworkView, ViewOptions};

use serde::Deserialize;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for network operations
    pub use crate::{
        assign_classes, compute_stats, filter_by_campaign, find_by_id, find_path_to_node,
        CampaignFilter, ExpansionState, NetworkConfig, NetworkNode, NetworkStats, NetworkView,
        NodeId, ViewOptions,
    };
}

/// Parse a tree DTO from JSON
///
/// Every level of a tree nests two JSON values (the node and its
/// `children` array), so the parser runs without serde_json's recursion
/// limit and grows the stack on demand instead.
///
/// # Errors
/// Returns [`NetworkError::Json`] if the input does not have the node shape
pub fn parse_tree(json: &str) -> Result<NetworkNode, NetworkError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let root = NetworkNode::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(root)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn parse_then_view() {
        let json = r#"{
            "id": 1, "name": "Root", "email": "r@example.org", "role": "admin",
            "campaignId": null, "invitedBy": null,
            "children": [
                {"id": 2, "name": "A", "email": "a@example.org", "role": "user",
                 "campaignId": "camp-A", "invitedBy": 1, "children": []},
                {"id": 3, "name": "B", "email": "b@example.org", "role": "user",
                 "campaignId": "camp-B", "invitedBy": 1, "children": []}
            ]
        }"#;
        let root = parse_tree(json).unwrap();
        assert!(validate_tree(&root).is_consistent());

        let config = NetworkConfig::default();
        let options = ViewOptions::new().with_campaign(config.campaign_filter("camp-B"));
        let view = NetworkView::build(&root, &options, &config);
        let snapshot = view.snapshot().unwrap();
        assert_eq!(snapshot.stats.total_members, 2);
        assert_eq!(collect_ids(&snapshot.tree), [NodeId::from(1), NodeId::from(3)]);
    }

    #[test]
    fn trailing_input_is_error() {
        let json = r#"{"id": 1, "role": "admin"} {"id": 2}"#;
        assert!(matches!(parse_tree(json), Err(NetworkError::Json(_))));
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(parse_tree("{\"name\": 1}"), Err(NetworkError::Json(_))));
    }
}
