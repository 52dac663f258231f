//! Component identifiers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Immutable, cheaply clonable name of a lifecycle-managed component
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentKey(Arc<str>);

impl ComponentKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ComponentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ComponentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl From<&str> for ComponentKey {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for ComponentKey {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&ComponentKey> for ComponentKey {
    fn from(key: &ComponentKey) -> Self {
        key.clone()
    }
}

impl Borrow<str> for ComponentKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ComponentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_key_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ComponentKey::from("db"), 1);
        assert_eq!(map.get("db"), Some(&1));
        assert_eq!(map.get("cache"), None);
    }

    #[test]
    fn test_key_serializes_as_string() {
        let key = ComponentKey::new("db");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"db\"");

        let parsed: ComponentKey = serde_json::from_str("\"cache\"").unwrap();
        assert_eq!(parsed.as_str(), "cache");
    }
}
