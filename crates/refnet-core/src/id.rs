//! Opaque node identifiers
//!
//! The fetch layer hands out ids as JSON numbers in some responses and as
//! strings in others. [`NodeId`] accepts both and treats `1` and `"1"` as
//! the same member.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Identifier of a member in a referral network
///
/// Equality, hashing and ordering only look at the textual key. Whether
/// the id arrived as a number is remembered so it serializes back the
/// same way.
#[derive(Debug, Clone)]
pub struct NodeId {
    key: String,
    numeric: bool,
}

impl NodeId {
    /// Create id from a string key
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            numeric: false,
        }
    }

    /// Create id from a number
    #[inline]
    #[must_use]
    pub fn numeric(value: i64) -> Self {
        Self {
            key: value.to_string(),
            numeric: true,
        }
    }

    /// Textual key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Whether the id was supplied as a JSON number
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    fn as_integer(&self) -> Option<i128> {
        self.key.parse().ok()
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NodeId {}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Ord for NodeId {
    /// Integer-looking keys sort numerically and before everything else;
    /// ties fall back to the raw key so `Ord` agrees with `Eq`.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.key.cmp(&other.key)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.key.cmp(&other.key),
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<&str> for NodeId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for NodeId {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self::numeric(i64::from(value))
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::numeric(value)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self::numeric(i64::from(value))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(n) = self.key.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
            if let Ok(n) = self.key.parse::<u64>() {
                return serializer.serialize_u64(n);
            }
        }
        serializer.serialize_str(&self.key)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl RawId {
    fn into_key(self) -> String {
        match self {
            Self::Signed(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawId::deserialize(deserializer)?;
        let numeric = !matches!(raw, RawId::Text(_));
        Ok(Self {
            key: raw.into_key(),
            numeric,
        })
    }
}

/// `deserialize_with` helpers for string keys that may arrive as numbers
///
/// Campaign ids share the backend's mixed number/string encoding; these
/// read either form into the textual key.
pub mod text_key {
    use super::RawId;
    use serde::{Deserialize, Deserializer};

    /// Read a required key
    ///
    /// # Errors
    /// Fails when the value is neither a number nor a string
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        RawId::deserialize(deserializer).map(RawId::into_key)
    }

    /// Read an optional key; `null` is `None`
    ///
    /// # Errors
    /// Fails when the value is neither null, a number nor a string
    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(RawId::into_key))
    }
}
