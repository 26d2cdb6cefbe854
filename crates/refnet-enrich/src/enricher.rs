//! Tree enrichment
//!
//! Enrichment resolves each distinct member and campaign id once, then
//! rebuilds the tree with `user` and `campaign` set. Tree shape, ids and
//! every other field are left exactly as they were, so the result can be
//! fed to any tree operation whether it was enriched or not.

use crate::directory::Directory;
use crate::error::EnrichError;
use futures::stream::{self, StreamExt, TryStreamExt};
use refnet_core::{CampaignRecord, NetworkNode, NodeId, UserRecord};
use std::collections::{BTreeSet, HashMap};

/// How directory lookups are issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichMode {
    /// One lookup at a time
    #[default]
    Sequential,
    /// Up to `limit` lookups in flight
    Concurrent {
        /// Maximum lookups in flight
        limit: usize,
    },
}

/// Resolved records keyed by id
#[derive(Debug, Clone, Default)]
pub struct ResolvedRecords {
    /// Users by member id
    pub users: HashMap<NodeId, UserRecord>,
    /// Campaigns by campaign id
    pub campaigns: HashMap<String, CampaignRecord>,
}

/// Enriches trees from a [`Directory`]
#[derive(Debug, Clone)]
pub struct Enricher<D> {
    directory: D,
    mode: EnrichMode,
}

impl<D: Directory> Enricher<D> {
    /// Sequential enricher over a directory
    #[inline]
    #[must_use]
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            mode: EnrichMode::Sequential,
        }
    }

    /// With lookup mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: EnrichMode) -> Self {
        self.mode = mode;
        self
    }

    /// Underlying directory
    #[inline]
    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Copy of the tree with records attached
    ///
    /// # Errors
    /// Propagates the first directory error
    pub async fn enrich(&self, root: &NetworkNode) -> Result<NetworkNode, EnrichError> {
        let records = self.resolve(root).await?;
        tracing::debug!(
            root = %root.id,
            users = records.users.len(),
            campaigns = records.campaigns.len(),
            mode = ?self.mode,
            "resolved enrichment records"
        );
        Ok(annotate(root, &records))
    }

    /// Look up every distinct member and campaign referenced by the tree
    ///
    /// # Errors
    /// Propagates the first directory error
    pub async fn resolve(&self, root: &NetworkNode) -> Result<ResolvedRecords, EnrichError> {
        let user_ids: BTreeSet<&NodeId> = root.iter().map(|node| &node.id).collect();
        let campaign_ids: BTreeSet<&str> = root
            .iter()
            .filter_map(|node| node.campaign_id.as_deref())
            .collect();

        let (users, campaigns) = match self.mode {
            EnrichMode::Sequential => {
                let mut users = Vec::with_capacity(user_ids.len());
                for id in &user_ids {
                    users.push(self.directory.user(id).await?);
                }
                let mut campaigns = Vec::with_capacity(campaign_ids.len());
                for id in &campaign_ids {
                    campaigns.push(self.directory.campaign(id).await?);
                }
                (users, campaigns)
            }
            EnrichMode::Concurrent { limit } => {
                let limit = limit.max(1);
                let users: Vec<_> = stream::iter(&user_ids)
                    .map(|id| self.directory.user(id))
                    .buffer_unordered(limit)
                    .try_collect()
                    .await?;
                let campaigns: Vec<_> = stream::iter(&campaign_ids)
                    .map(|id| self.directory.campaign(id))
                    .buffer_unordered(limit)
                    .try_collect()
                    .await?;
                (users, campaigns)
            }
        };

        Ok(ResolvedRecords {
            users: users
                .into_iter()
                .flatten()
                .map(|user| (user.id.clone(), user))
                .collect(),
            campaigns: campaigns
                .into_iter()
                .flatten()
                .map(|campaign| (campaign.id.clone(), campaign))
                .collect(),
        })
    }
}

/// Copy of the tree with records attached where found
///
/// Nodes without a record keep whatever annotation they already had.
#[must_use]
pub fn annotate(node: &NetworkNode, records: &ResolvedRecords) -> NetworkNode {
    let mut out = node.detached();
    if let Some(user) = records.users.get(&node.id) {
        out.user = Some(user.clone());
    }
    if let Some(campaign) = node
        .campaign_id
        .as_deref()
        .and_then(|id| records.campaigns.get(id))
    {
        out.campaign = Some(campaign.clone());
    }
    out.children = node
        .children
        .iter()
        .map(|child| annotate(child, records))
        .collect();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MemoryDirectory;
    use refnet_core::roles;

    fn tree() -> NetworkNode {
        NetworkNode::new(1, roles::ADMIN)
            .with_child(NetworkNode::new(2, roles::USER).with_campaign("camp-A"))
            .with_child(NetworkNode::new(3, roles::USER).with_campaign("camp-A"))
    }

    fn directory() -> MemoryDirectory {
        MemoryDirectory::new()
            .with_user(UserRecord::new(1, "Ana"))
            .with_user(UserRecord::new(2, "Bo"))
            .with_campaign(CampaignRecord::new("camp-A", "Spring drive"))
    }

    #[tokio::test]
    async fn sequential_enrichment() {
        let enriched = Enricher::new(directory()).enrich(&tree()).await.unwrap();
        assert_eq!(enriched.user.as_ref().map(|u| u.name.as_str()), Some("Ana"));
        assert_eq!(enriched.children[0].user.as_ref().map(|u| u.name.as_str()), Some("Bo"));
        assert!(enriched.children[1].user.is_none());
        assert_eq!(
            enriched.children[1].campaign.as_ref().map(|c| c.name.as_str()),
            Some("Spring drive")
        );
        assert!(enriched.campaign.is_none());
    }

    #[tokio::test]
    async fn concurrent_matches_sequential() {
        let sequential = Enricher::new(directory()).enrich(&tree()).await.unwrap();
        let concurrent = Enricher::new(directory())
            .with_mode(EnrichMode::Concurrent { limit: 4 })
            .enrich(&tree())
            .await
            .unwrap();
        assert_eq!(sequential, concurrent);
    }

    #[test]
    fn annotate_with_nothing_is_identity() {
        let root = tree();
        assert_eq!(annotate(&root, &ResolvedRecords::default()), root);
    }
}
