//! Display records attached to nodes by enrichment
//!
//! These come from the user and campaign endpoints, not from the tree
//! endpoint. Fields the dashboard does not interpret are kept in `extra`
//! so they survive a round trip.

use crate::id::{text_key, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Account id, same key space as [`crate::NetworkNode::id`]
    pub id: NodeId,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Permission role of the account
    ///
    /// This is the account's access role, independent of the member's
    /// position in any network.
    #[serde(default)]
    pub role: String,
    /// Campaign the account belongs to
    #[serde(default, deserialize_with = "text_key::deserialize_option")]
    pub campaign_id: Option<String>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Create record with id and name
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            role: String::new(),
            campaign_id: None,
            extra: Map::new(),
        }
    }
}

/// Campaign record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    /// Campaign id; numeric ids are read as their decimal text
    #[serde(deserialize_with = "text_key::deserialize")]
    pub id: String,
    /// Campaign name
    #[serde(default)]
    pub name: String,
    /// Whether the campaign is currently active
    #[serde(default)]
    pub active: bool,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CampaignRecord {
    /// Create record with id and name
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: false,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_kept() {
        let json = r#"{"id": 3, "name": "Cy", "avatarUrl": "/a/3.png"}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, NodeId::from(3));
        assert_eq!(user.extra.get("avatarUrl").and_then(Value::as_str), Some("/a/3.png"));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["avatarUrl"], "/a/3.png");
    }

    #[test]
    fn campaign_defaults_inactive() {
        let campaign: CampaignRecord = serde_json::from_str(r#"{"id": "camp-A"}"#).unwrap();
        assert!(!campaign.active);
        assert!(campaign.name.is_empty());
    }

    #[test]
    fn numeric_campaign_ids_read_as_text() {
        let campaign: CampaignRecord =
            serde_json::from_str(r#"{"id": 5, "name": "Autumn", "active": true}"#).unwrap();
        assert_eq!(campaign.id, "5");

        let user: UserRecord = serde_json::from_str(r#"{"id": "u-1", "campaignId": 5}"#).unwrap();
        assert_eq!(user.campaign_id.as_deref(), Some(campaign.id.as_str()));
    }
}
