//! Network view configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! all_campaigns = "all"
//! start_class = 1
//! report_roles = ["admin", "user"]
//! ```

use crate::class::DEFAULT_START_CLASS;
use crate::error::ConfigError;
use crate::filter::{CampaignFilter, ALL_CAMPAIGNS};
use crate::node::roles;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for views over referral networks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Campaign selection meaning "no filter"
    pub all_campaigns: String,
    /// Class given to the root of every view
    pub start_class: u32,
    /// Roles always present in stats reports
    pub report_roles: Vec<String>,
}

impl NetworkConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With root class
    #[inline]
    #[must_use]
    pub fn with_start_class(mut self, start_class: u32) -> Self {
        self.start_class = start_class;
        self
    }

    /// With reported roles
    #[must_use]
    pub fn with_report_roles<S: Into<String>>(mut self, report_roles: impl IntoIterator<Item = S>) -> Self {
        self.report_roles = report_roles.into_iter().map(Into::into).collect();
        self
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or a value is out of range
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), ?config, "loaded network config");
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_class < 1 {
            return Err(ConfigError::Invalid {
                field: "start_class",
                reason: "must be at least 1".into(),
            });
        }
        if self.all_campaigns.is_empty() {
            return Err(ConfigError::Invalid {
                field: "all_campaigns",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Interpret a campaign selection against the configured sentinel
    #[inline]
    #[must_use]
    pub fn campaign_filter(&self, value: &str) -> CampaignFilter {
        CampaignFilter::parse(value, &self.all_campaigns)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            all_campaigns: ALL_CAMPAIGNS.to_string(),
            start_class: DEFAULT_START_CLASS,
            report_roles: vec![roles::ADMIN.to_string(), roles::USER.to_string()],
        }
    }
}
