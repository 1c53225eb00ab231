// ── Core identity type ──
//
// The backend assigns integer primary keys to its own resources; the
// Rotem integration addresses controllers by gateway name. EntityId
// unifies both behind one ergonomic interface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for any flocklink entity.
///
/// Transparently wraps either an integer pk (backend-owned resources) or
/// a string key (Rotem gateway names). Consumers never care which.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Key(String),
}

impl EntityId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(s) => Some(s),
            Self::Int(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Key(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>().map_or_else(|_| Self::Key(s.to_owned()), Self::Int))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::Key(s.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_ids() {
        let id: EntityId = "42".parse().unwrap();
        assert_eq!(id.as_int(), Some(42));
    }

    #[test]
    fn falls_back_to_key() {
        let id: EntityId = "gateway-7".parse().unwrap();
        assert_eq!(id.as_key(), Some("gateway-7"));
    }

    #[test]
    fn display_roundtrip() {
        assert_eq!(EntityId::from(7).to_string(), "7");
        assert_eq!(EntityId::from("barn-a").to_string(), "barn-a");
    }

    #[test]
    fn serde_untagged() {
        let int: EntityId = serde_json::from_str("5").unwrap();
        assert_eq!(int, EntityId::Int(5));
        let key: EntityId = serde_json::from_str(r#""gw-1""#).unwrap();
        assert_eq!(key, EntityId::Key("gw-1".into()));
    }
}
