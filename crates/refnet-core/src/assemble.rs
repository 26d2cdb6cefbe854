//! Tree assembly from flat member lists
//!
//! Some endpoints return members as a flat list where only `invited_by`
//! links a member to its inviter. Assembly nests them, keeping list order
//! among siblings. Members without an inviter, or whose inviter is not in
//! the list, become roots.

use crate::error::NetworkError;
use crate::id::NodeId;
use crate::lookup::find_by_id;
use crate::node::NetworkNode;
use std::collections::HashMap;

/// Nest a flat member list into a forest
///
/// Any `children` already present on the records are ignored.
///
/// # Errors
/// - [`NetworkError::DuplicateId`] if an id occurs twice
/// - [`NetworkError::CycleDetected`] if some members cannot be reached from
///   any root because their inviter chain loops
pub fn assemble_forest(records: &[NetworkNode]) -> Result<Vec<NetworkNode>, NetworkError> {
    let mut index: HashMap<&NodeId, usize> = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if index.insert(&record.id, position).is_some() {
            return Err(NetworkError::DuplicateId(record.id.clone()));
        }
    }

    let mut invitees: HashMap<&NodeId, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (position, record) in records.iter().enumerate() {
        match record.invited_by.as_ref().filter(|inviter| index.contains_key(inviter)) {
            Some(inviter) => invitees.entry(inviter).or_default().push(position),
            None => roots.push(position),
        }
    }

    let mut placed = vec![false; records.len()];
    let forest: Vec<_> = roots
        .into_iter()
        .map(|position| nest(records, position, &invitees, &mut placed))
        .collect();

    let stranded: Vec<NodeId> = records
        .iter()
        .zip(&placed)
        .filter(|(_, placed)| !**placed)
        .map(|(record, _)| record.id.clone())
        .collect();
    if !stranded.is_empty() {
        tracing::warn!(count = stranded.len(), "members unreachable from any root");
        return Err(NetworkError::CycleDetected { members: stranded });
    }

    tracing::debug!(members = records.len(), roots = forest.len(), "assembled network forest");
    Ok(forest)
}

fn nest(
    records: &[NetworkNode],
    position: usize,
    invitees: &HashMap<&NodeId, Vec<usize>>,
    placed: &mut [bool],
) -> NetworkNode {
    placed[position] = true;
    let record = &records[position];
    let mut node = record.detached();
    if let Some(children) = invitees.get(&record.id) {
        node.children = children
            .iter()
            .map(|&child| nest(records, child, invitees, placed))
            .collect();
    }
    node
}

/// Nest a flat member list and return the tree rooted at `root_id`
///
/// `root_id` need not be a root of the whole forest; the subtree below it
/// is returned.
///
/// # Errors
/// Same as [`assemble_forest`], plus [`NetworkError::NodeNotFound`] when
/// `root_id` is not in the list
pub fn assemble_tree(records: &[NetworkNode], root_id: &NodeId) -> Result<NetworkNode, NetworkError> {
    let forest = assemble_forest(records)?;
    forest
        .iter()
        .find_map(|tree| find_by_id(tree, root_id))
        .cloned()
        .ok_or_else(|| NetworkError::NodeNotFound(root_id.clone()))
}
