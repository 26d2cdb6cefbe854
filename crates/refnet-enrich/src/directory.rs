//! Record directories
//!
//! A [`Directory`] resolves the user and campaign records a tree node
//! refers to. Production directories sit on top of the REST client; the
//! in-memory one here serves tests and the CLI.

use crate::error::EnrichError;
use refnet_core::{CampaignRecord, NodeId, UserRecord};
use std::collections::HashMap;
use std::path::Path;

/// Source of user and campaign records
///
/// A missing record is `Ok(None)`, not an error.
#[async_trait::async_trait]
pub trait Directory: Send + Sync {
    /// Resolve a user record by member id
    async fn user(&self, id: &NodeId) -> Result<Option<UserRecord>, EnrichError>;

    /// Resolve a campaign record by campaign id
    async fn campaign(&self, id: &str) -> Result<Option<CampaignRecord>, EnrichError>;
}

/// Directory backed by in-memory maps
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    users: HashMap<NodeId, UserRecord>,
    campaigns: HashMap<String, CampaignRecord>,
}

impl MemoryDirectory {
    /// Empty directory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a user record, replacing any with the same id
    #[must_use]
    pub fn with_user(mut self, user: UserRecord) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    /// With a campaign record, replacing any with the same id
    #[must_use]
    pub fn with_campaign(mut self, campaign: CampaignRecord) -> Self {
        self.campaigns.insert(campaign.id.clone(), campaign);
        self
    }

    /// Add user records from a JSON array
    ///
    /// # Errors
    /// Returns [`EnrichError::Json`] if the input is not an array of users
    pub fn with_users_json(mut self, json: &str) -> Result<Self, EnrichError> {
        let users: Vec<UserRecord> = serde_json::from_str(json)?;
        self.users
            .extend(users.into_iter().map(|user| (user.id.clone(), user)));
        Ok(self)
    }

    /// Add campaign records from a JSON array
    ///
    /// # Errors
    /// Returns [`EnrichError::Json`] if the input is not an array of campaigns
    pub fn with_campaigns_json(mut self, json: &str) -> Result<Self, EnrichError> {
        let campaigns: Vec<CampaignRecord> = serde_json::from_str(json)?;
        self.campaigns
            .extend(campaigns.into_iter().map(|campaign| (campaign.id.clone(), campaign)));
        Ok(self)
    }

    /// Add user records from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub async fn load_users(self, path: impl AsRef<Path>) -> Result<Self, EnrichError> {
        let json = tokio::fs::read_to_string(path).await?;
        self.with_users_json(&json)
    }

    /// Add campaign records from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub async fn load_campaigns(self, path: impl AsRef<Path>) -> Result<Self, EnrichError> {
        let json = tokio::fs::read_to_string(path).await?;
        self.with_campaigns_json(&json)
    }

    /// Number of user records
    #[inline]
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of campaign records
    #[inline]
    #[must_use]
    pub fn campaign_count(&self) -> usize {
        self.campaigns.len()
    }
}

#[async_trait::async_trait]
impl Directory for MemoryDirectory {
    async fn user(&self, id: &NodeId) -> Result<Option<UserRecord>, EnrichError> {
        Ok(self.users.get(id).cloned())
    }

    async fn campaign(&self, id: &str) -> Result<Option<CampaignRecord>, EnrichError> {
        Ok(self.campaigns.get(id).cloned())
    }
}
