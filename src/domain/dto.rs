//! Data Transfer Objects for store acknowledgements and error bodies.

use serde::{Deserialize, Serialize};

use crate::domain::DocumentId;

/// Acknowledgement of a partial update.
///
/// Reports how many records matched the id and how many actually changed,
/// without returning the records themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Whether the store accepted the write.
    pub acknowledged: bool,

    /// Number of records matching the filter.
    pub matched_count: u64,

    /// Number of records whose stored values changed.
    pub modified_count: u64,

    /// Number of records inserted by the update (always 0, no upserts).
    pub upserted_count: u64,

    /// Identifier of an upserted record (always `null`).
    pub upserted_id: Option<DocumentId>,
}

impl UpdateResult {
    /// Create an acknowledgement.
    #[must_use]
    pub const fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    /// Acknowledgement for an id that matched nothing.
    #[must_use]
    pub const fn unmatched() -> Self {
        Self::new(0, 0)
    }
}

/// Acknowledgement of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Whether the store accepted the write.
    pub acknowledged: bool,

    /// Number of records removed.
    pub deleted_count: u64,
}

impl DeleteResult {
    /// Create an acknowledgement.
    #[must_use]
    pub const fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_result_wire_format() {
        let value = serde_json::to_value(UpdateResult::new(1, 1)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 1,
                "upsertedCount": 0,
                "upsertedId": null
            })
        );
    }

    #[test]
    fn test_delete_result_wire_format() {
        let value = serde_json::to_value(DeleteResult::new(0)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "acknowledged": true, "deletedCount": 0 })
        );
    }
}
