//! Publication and tracking models

use crate::domain::ids::{ItemId, Pmid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A publication row selected from the source repository.
///
/// One record corresponds to one qualifying PMID; a publication carrying
/// several PMIDs in its local ids appears once per PMID. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// The repository's own id for the publication
    pub item_id: ItemId,

    /// The PubMed identifier attached to the publication
    pub pmid: Pmid,

    /// Secondary id from the Elements reporting database, when the
    /// selection query joins through it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_id: Option<String>,
}

impl PublicationRecord {
    /// Creates a record with no secondary id
    pub fn new(item_id: ItemId, pmid: Pmid) -> Self {
        Self {
            item_id,
            pmid,
            secondary_id: None,
        }
    }
}

/// A row in the tracking store's `linkout_items` table.
///
/// Entries are append-only. `submitted_at` and `output_filename` start NULL
/// and are set together once the file containing this entry has been
/// delivered. There is no state below file granularity: a crash between
/// delivery and the update re-delivers the file, which LinkOut treats as an
/// idempotent replace-by-id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEntry {
    pub item_id: ItemId,
    pub pmid: Pmid,
    pub submitted_at: Option<DateTime<Utc>>,
    pub output_filename: Option<String>,
}

impl TrackingEntry {
    /// True while the entry is enqueued but not yet delivered
    pub fn is_pending(&self) -> bool {
        self.submitted_at.is_none()
    }
}

/// Aggregate counts over the tracking store, for the `status` command
#[derive(Debug, Clone, Default)]
pub struct TrackingStats {
    pub total: i64,
    pub pending: i64,
    pub submitted: i64,
    pub last_submitted_at: Option<DateTime<Utc>>,
    pub last_output_filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item: &str, pmid: &str) -> PublicationRecord {
        PublicationRecord::new(ItemId::new(item).unwrap(), Pmid::new(pmid).unwrap())
    }

    #[test]
    fn test_record_creation() {
        let r = record("qt001", "123");
        assert_eq!(r.item_id.as_str(), "qt001");
        assert_eq!(r.pmid.as_str(), "123");
        assert!(r.secondary_id.is_none());
    }

    #[test]
    fn test_tracking_entry_pending() {
        let entry = TrackingEntry {
            item_id: ItemId::new("qt001").unwrap(),
            pmid: Pmid::new("123").unwrap(),
            submitted_at: None,
            output_filename: None,
        };
        assert!(entry.is_pending());

        let delivered = TrackingEntry {
            submitted_at: Some(Utc::now()),
            output_filename: Some("2025-01-01_linkout_resource.xml".to_string()),
            ..entry
        };
        assert!(!delivered.is_pending());
    }
}
