//! Entity - Identity and Field Access Shared by All Records

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::DeserializeOwned;

use crate::view::FieldValue;

/// Stable identifier of a record in the backing store
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct EntityId(pub Arc<str>);

impl EntityId {
    /// Create a new id from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh time-ordered id
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::now_v7().to_string())
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Backends hand out both uuid strings and serial integers.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => EntityId::new(s),
            Raw::Number(n) => EntityId::new(n.to_string()),
        })
    }
}

/// A record the list-view engine can read fields from
pub trait Entity {
    /// Stable identifier
    fn id(&self) -> EntityId;

    /// Read a named field. Unknown or absent fields are `FieldValue::Null`.
    fn field(&self, name: &str) -> FieldValue;
}

/// A record persisted in a backend table
pub trait Record: Entity + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create/update payload collected by the entity modal
    type Draft: Serialize + Clone + Send + Sync;

    /// Backend table name
    const TABLE: &'static str;

    /// Human name used in logs and errors
    const LABEL: &'static str;

    /// Build a record from a draft, used by stores that assign ids themselves
    fn from_draft(id: EntityId, draft: &Self::Draft) -> Self;

    /// Apply a draft on top of an existing record
    fn apply_draft(&mut self, draft: &Self::Draft);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_and_numeric_ids() {
        let a: EntityId = serde_json::from_str("\"abc\"").unwrap();
        let b: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(a.as_str(), "abc");
        assert_eq!(b.as_str(), "42");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EntityId::from("p-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-1\"");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }
}
