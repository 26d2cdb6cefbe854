//! Consistency checks between nesting and `invited_by`
//!
//! Nesting is authoritative. The `invited_by` field is server-supplied and
//! redundant; these checks report where it disagrees, and where the tree
//! repeats an id (which the traversals treat as already visited).

use crate::id::NodeId;
use crate::lookup::contains_id;
use crate::node::NetworkNode;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// One disagreement found by [`validate_tree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Inconsistency {
    /// A child's `invited_by` is not its parent's id
    InviterMismatch {
        /// The child
        id: NodeId,
        /// Parent by nesting
        parent: NodeId,
        /// Value of `invited_by`
        invited_by: Option<NodeId>,
    },
    /// The root claims an inviter inside its own network, itself included
    RootInvitedFromInside {
        /// The root
        id: NodeId,
        /// Its claimed inviter
        invited_by: NodeId,
    },
    /// An id occurs more than once
    RepeatedId {
        /// The repeated id
        id: NodeId,
    },
}

impl Display for Inconsistency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InviterMismatch { id, parent, invited_by: Some(inviter) } => {
                write!(f, "{id}: nested under {parent} but invited by {inviter}")
            }
            Self::InviterMismatch { id, parent, invited_by: None } => {
                write!(f, "{id}: nested under {parent} but has no inviter")
            }
            Self::RootInvitedFromInside { id, invited_by } => {
                write!(f, "{id}: root invited from inside its own network by {invited_by}")
            }
            Self::RepeatedId { id } => write!(f, "{id}: appears more than once"),
        }
    }
}

/// Result of [`validate_tree`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Every inconsistency, in pre-order
    pub issues: Vec<Inconsistency>,
}

impl ValidationReport {
    /// Whether nothing was found
    #[inline]
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check `invited_by` against nesting and look for repeated ids
#[must_use]
pub fn validate_tree(root: &NetworkNode) -> ValidationReport {
    let mut issues = Vec::new();
    let mut seen: HashSet<&NodeId> = HashSet::new();
    let mut stack: Vec<(&NetworkNode, Option<&NodeId>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        if !seen.insert(&node.id) {
            issues.push(Inconsistency::RepeatedId { id: node.id.clone() });
            continue;
        }
        if let Some(parent) = parent {
            if node.invited_by.as_ref() != Some(parent) {
                issues.push(Inconsistency::InviterMismatch {
                    id: node.id.clone(),
                    parent: parent.clone(),
                    invited_by: node.invited_by.clone(),
                });
            }
        }
        stack.extend(node.children.iter().rev().map(|child| (child, Some(&node.id))));
    }

    if let Some(inviter) = &root.invited_by {
        if contains_id(root, inviter) {
            issues.push(Inconsistency::RootInvitedFromInside {
                id: root.id.clone(),
                invited_by: inviter.clone(),
            });
        }
    }

    if !issues.is_empty() {
        tracing::warn!(root = %root.id, issues = issues.len(), "network failed consistency check");
    }
    ValidationReport { issues }
}
