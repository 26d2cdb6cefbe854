//! Error types for refnet core
//!
//! The tree operations themselves never fail: lookups miss with `None` or
//! an empty path, and absent networks have explicit zero values. Errors
//! only arise at the edges:
//! - assembling trees from flat member lists
//! - loading configuration
//! - decoding tree JSON

use crate::id::NodeId;

/// Main refnet error type
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The same member id appears more than once
    #[error("duplicate member id: {0}")]
    DuplicateId(NodeId),

    /// Members whose inviter chain loops back on itself
    #[error("invite cycle among members: {}", join_ids(.members))]
    CycleDetected {
        /// Members on or below the cycle
        members: Vec<NodeId>,
    },

    /// Requested root is not in the member list
    #[error("member not found: {0}")]
    NodeNotFound(NodeId),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed tree JSON
    #[error("malformed network json: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetworkError {
    /// Check if the error is caused by the data rather than the caller
    #[inline]
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId(_) | Self::CycleDetected { .. } | Self::Json(_)
        )
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema
    #[error("invalid config toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// A field has an unusable value
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter().map(NodeId::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_members() {
        let err = NetworkError::CycleDetected {
            members: vec![NodeId::from(1), NodeId::from("b")],
        };
        assert_eq!(err.to_string(), "invite cycle among members: 1, b");
        assert!(err.is_data_error());
    }

    #[test]
    fn config_errors_convert() {
        let err: NetworkError = ConfigError::Invalid {
            field: "start_class",
            reason: "must be at least 1".into(),
        }
        .into();
        assert!(!err.is_data_error());
        assert!(err.to_string().contains("start_class"));
    }
}
