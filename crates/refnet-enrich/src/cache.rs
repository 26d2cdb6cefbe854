//! Record cache using moka
//!
//! Trees are refetched on every page load while the records they point at
//! change rarely. [`CachedDirectory`] remembers answers, including misses,
//! for a bounded time.

use crate::directory::Directory;
use crate::error::EnrichError;
use moka::future::Cache;
use refnet_core::{CampaignRecord, NodeId, UserRecord};
use std::time::Duration;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Cached user lookups
    pub users: u64,
    /// Cached campaign lookups
    pub campaigns: u64,
}

/// Directory wrapper caching lookups
///
/// Errors are not cached.
#[derive(Debug)]
pub struct CachedDirectory<D> {
    inner: D,
    users: Cache<NodeId, Option<UserRecord>>,
    campaigns: Cache<String, Option<CampaignRecord>>,
}

impl<D: Directory> CachedDirectory<D> {
    /// Wrap a directory with the given capacity per record kind
    #[must_use]
    pub fn new(inner: D, max_capacity: u64) -> Self {
        Self {
            inner,
            users: Cache::new(max_capacity),
            campaigns: Cache::new(max_capacity),
        }
    }

    /// Wrap a directory with capacity and time-based expiration
    #[must_use]
    pub fn with_ttl(inner: D, max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            users: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            campaigns: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Wrapped directory
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Drop every cached answer
    #[inline]
    pub fn invalidate_all(&self) {
        self.users.invalidate_all();
        self.campaigns.invalidate_all();
    }

    /// Drop the cached answer for one user
    #[inline]
    pub async fn invalidate_user(&self, id: &NodeId) {
        self.users.invalidate(id).await;
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            users: self.users.entry_count(),
            campaigns: self.campaigns.entry_count(),
        }
    }
}

#[async_trait::async_trait]
impl<D: Directory> Directory for CachedDirectory<D> {
    async fn user(&self, id: &NodeId) -> Result<Option<UserRecord>, EnrichError> {
        if let Some(cached) = self.users.get(id).await {
            return Ok(cached);
        }
        let found = self.inner.user(id).await?;
        self.users.insert(id.clone(), found.clone()).await;
        Ok(found)
    }

    async fn campaign(&self, id: &str) -> Result<Option<CampaignRecord>, EnrichError> {
        if let Some(cached) = self.campaigns.get(id).await {
            return Ok(cached);
        }
        let found = self.inner.campaign(id).await?;
        self.campaigns.insert(id.to_string(), found.clone()).await;
        Ok(found)
    }
}
