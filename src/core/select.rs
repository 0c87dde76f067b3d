//! Candidate selection
//!
//! Decides which source records actually get enqueued: records already in
//! the tracking store are excluded (item ids never repeat across
//! submissions, even after the original submission completed), and
//! nothing is submitted until enough entries have accumulated to be
//! worth PubMed's while.

use crate::domain::PublicationRecord;
use std::collections::HashSet;

/// Filters out records whose item id has ever been tracked
///
/// Source order is preserved. A record is excluded if its item id
/// appears in `tracked`, regardless of whether that tracking entry was
/// ever marked submitted.
pub fn exclude_tracked(
    records: Vec<PublicationRecord>,
    tracked: &HashSet<String>,
) -> Vec<PublicationRecord> {
    records
        .into_iter()
        .filter(|r| !tracked.contains(r.item_id.as_str()))
        .collect()
}

/// Whether the accumulated pending count justifies a submission run
///
/// `pending` is the count after the current batch of new records has
/// been added to the tracking store.
pub fn threshold_met(pending: u64, threshold: u64) -> bool {
    pending >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ItemId, Pmid};
    use test_case::test_case;

    fn record(item: &str, pmid: &str) -> PublicationRecord {
        PublicationRecord::new(
            ItemId::new(item.to_string()).unwrap(),
            Pmid::new(pmid.to_string()).unwrap(),
        )
    }

    #[test]
    fn test_exclude_tracked_preserves_order() {
        let records = vec![
            record("qt1", "100"),
            record("qt2", "200"),
            record("qt3", "300"),
            record("qt4", "400"),
        ];
        let tracked: HashSet<String> = ["qt2".to_string(), "qt4".to_string()].into();

        let remaining = exclude_tracked(records, &tracked);

        let ids: Vec<_> = remaining.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["qt1", "qt3"]);
    }

    #[test]
    fn test_exclude_tracked_empty_tracking_store() {
        let records = vec![record("qt1", "100"), record("qt2", "200")];
        let remaining = exclude_tracked(records.clone(), &HashSet::new());
        assert_eq!(remaining, records);
    }

    #[test]
    fn test_exclude_tracked_all_tracked() {
        let records = vec![record("qt1", "100")];
        let tracked: HashSet<String> = ["qt1".to_string()].into();
        assert!(exclude_tracked(records, &tracked).is_empty());
    }

    // A store holding 950 pending entries plus 49 new records stays
    // below a threshold of 1000; one more record tips it over.
    #[test_case(950 + 49, 1000, false)]
    #[test_case(950 + 50, 1000, true)]
    #[test_case(0, 1000, false)]
    #[test_case(1000, 1000, true)]
    #[test_case(9, 10, false)]
    #[test_case(10, 10, true)]
    fn test_threshold_met(pending: u64, threshold: u64, expected: bool) {
        assert_eq!(threshold_met(pending, threshold), expected);
    }
}
