//! Document identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-generated document identifier.
///
/// Identifiers are time-ordered (UUID v7), so sorting by id yields insertion
/// order. This is the default order of every list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse() {
        let id = DocumentId::generate();
        let parsed: DocumentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_malformed_rejected() {
        assert!("abc".parse::<DocumentId>().is_err());
        assert!("".parse::<DocumentId>().is_err());
        assert!("6650f1c2a1b2c3d4e5f60718".parse::<DocumentId>().is_err());
    }

    #[test]
    fn test_generated_ids_are_ordered() {
        let first = DocumentId::generate();
        let second = DocumentId::generate();
        assert!(first < second);
        assert_eq!(first.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_serializes_as_string() {
        let id = DocumentId::generate();
        let value = serde_json::to_value(id).unwrap();
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
