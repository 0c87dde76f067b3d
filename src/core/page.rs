//! Record pagination
//!
//! Splits a batch of publication records into fixed-size pages, one
//! resource file per page. PubMed rejects oversized resource files, so
//! the page size is capped in configuration rather than in code.

use crate::domain::PublicationRecord;

/// Splits records into pages of at most `page_size` records
///
/// Every page except possibly the last holds exactly `page_size`
/// records; the last holds the remainder. Record order is preserved
/// across pages, and an empty input yields no pages.
///
/// # Panics
///
/// Panics if `page_size` is zero. Configuration validation rejects a
/// zero page size before the pipeline runs.
pub fn pages(records: &[PublicationRecord], page_size: usize) -> Vec<&[PublicationRecord]> {
    assert!(page_size > 0, "page_size must be > 0");
    records.chunks(page_size).collect()
}

/// Number of pages `records` will split into
pub fn page_count(record_count: usize, page_size: usize) -> usize {
    record_count.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ItemId, Pmid};
    use test_case::test_case;

    fn records(n: usize) -> Vec<PublicationRecord> {
        (0..n)
            .map(|i| {
                PublicationRecord::new(
                    ItemId::new(format!("qt{i:08}")).unwrap(),
                    Pmid::new(format!("{}", 10000 + i)).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_pages_empty_input() {
        let recs = records(0);
        assert!(pages(&recs, 1000).is_empty());
    }

    #[test]
    fn test_pages_preserve_order_and_content() {
        let recs = records(25);
        let paged = pages(&recs, 10);

        assert_eq!(paged.len(), 3);
        assert_eq!(paged[0].len(), 10);
        assert_eq!(paged[1].len(), 10);
        assert_eq!(paged[2].len(), 5);

        // Concatenating the pages restores the original sequence
        let rejoined: Vec<_> = paged.into_iter().flatten().cloned().collect();
        assert_eq!(rejoined, recs);
    }

    #[test]
    fn test_pages_exact_multiple() {
        let recs = records(30);
        let paged = pages(&recs, 10);
        assert_eq!(paged.len(), 3);
        assert!(paged.iter().all(|p| p.len() == 10));
    }

    #[test]
    fn test_pages_single_page_when_under_limit() {
        let recs = records(7);
        let paged = pages(&recs, 1000);
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].len(), 7);
    }

    #[test_case(0, 1000, 0)]
    #[test_case(1, 1000, 1)]
    #[test_case(1000, 1000, 1)]
    #[test_case(1001, 1000, 2)]
    #[test_case(45000, 15000, 3)]
    #[test_case(45001, 15000, 4)]
    fn test_page_count(record_count: usize, page_size: usize, expected: usize) {
        assert_eq!(page_count(record_count, page_size), expected);
    }
}
