//! End-to-end tests for selection, pagination, and resource-file output
//!
//! Exercises the pure pipeline stages together: raw source rows through
//! PMID validation, the tracked-id diff, pagination, and LinkSet
//! rendering down to the bytes written on disk.

use linkout::config::LinkSetConfig;
use linkout::core::linkset::{page_filename, LinkSetBuilder, RunStamp};
use linkout::core::page::pages;
use linkout::core::select::{exclude_tracked, threshold_met};
use linkout::domain::ids::{ItemId, Pmid};
use linkout::domain::PublicationRecord;
use std::collections::HashSet;
use tempfile::TempDir;

fn linkset_config() -> LinkSetConfig {
    LinkSetConfig {
        provider_id: "7383".to_string(),
        icon_url: "https://escholarship.org/images/pubmed_linkback.png".to_string(),
        base_url: "https://escholarship.org/uc/item/".to_string(),
        url_name: "Full text from University of California eScholarship".to_string(),
        attribute: "full-text PDF".to_string(),
        target_database: "PubMed".to_string(),
    }
}

/// Mimics the selection stage: parse raw rows, dropping invalid PMIDs
fn select(rows: &[(&str, &str)]) -> Vec<PublicationRecord> {
    rows.iter()
        .filter_map(|(item, pmid)| {
            let item = ItemId::new(item.to_string()).ok()?;
            let pmid = Pmid::new(pmid.to_string()).ok()?;
            Some(PublicationRecord::new(item, pmid))
        })
        .collect()
}

#[test]
fn test_selection_to_rendered_file() {
    // "789X" fails the digits-only predicate and never reaches the builder
    let records = select(&[("qtaaa00001", "123"), ("qtbbb00002", "456"), ("qtccc00003", "789X")]);
    assert_eq!(records.len(), 2);

    let paged = pages(&records, 1000);
    assert_eq!(paged.len(), 1);

    let builder = LinkSetBuilder::new(linkset_config(), 0);
    let document = builder.render_page(paged[0]).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let stamp = RunStamp::now();
    let filename = page_filename(&stamp.date(), "eschol_linkout", 0, paged.len());
    let path = temp_dir.path().join(&filename);
    std::fs::write(&path, &document).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let written = String::from_utf8(bytes).unwrap();

    assert_eq!(written.matches("<Link>").count(), 2);
    assert!(written.contains("<ObjId>123</ObjId>"));
    assert!(written.contains("<ObjId>456</ObjId>"));
    assert!(!written.contains("789X"));

    // Entity references are literal in the output bytes
    assert!(written.contains("<IconUrl>&icon.url;</IconUrl>"));
    assert!(written.contains("<Base>&base.url;</Base>"));
    assert!(!written.contains("&amp;icon.url;"));
    assert!(!written.contains("&amp;base.url;"));

    // Header declares both entities
    assert!(written.starts_with("<?xml version=\"1.0\" ?>\n"));
    assert!(written.contains("<!DOCTYPE LinkSet PUBLIC \"-//NLM//DTD LinkOut 1.0//EN\""));
    assert!(written.contains("<!ENTITY icon.url"));
    assert!(written.contains("<!ENTITY base.url"));
}

#[test]
fn test_incremental_diff_is_idempotent() {
    let source = select(&[("qt1", "100"), ("qt2", "200"), ("qt3", "300")]);

    // First run: nothing tracked yet, everything selected
    let tracked = HashSet::new();
    let first = exclude_tracked(source.clone(), &tracked);
    assert_eq!(first.len(), 3);

    // Tracked ids now include the first run's selection
    let tracked: HashSet<String> = first
        .iter()
        .map(|r| r.item_id.as_str().to_string())
        .collect();

    // Second run over unchanged source yields nothing
    let second = exclude_tracked(source, &tracked);
    assert!(second.is_empty());
}

#[test]
fn test_multi_page_run_filenames() {
    let rows: Vec<(String, String)> = (0..25)
        .map(|i| (format!("qt{i:08}"), format!("{}", 90000 + i)))
        .collect();
    let borrowed: Vec<(&str, &str)> = rows
        .iter()
        .map(|(a, b)| (a.as_str(), b.as_str()))
        .collect();
    let records = select(&borrowed);

    let paged = pages(&records, 10);
    assert_eq!(paged.len(), 3);

    let stamp = RunStamp::now();
    let date = stamp.date();
    let filenames: Vec<String> = (0..paged.len())
        .map(|i| page_filename(&date, "eschol_linkout", i, paged.len()))
        .collect();

    assert!(filenames[0].ends_with("_eschol_linkout_00000.xml"));
    assert!(filenames[2].ends_with("_eschol_linkout_00002.xml"));

    // Page contents concatenate back to the input
    let rejoined: Vec<&PublicationRecord> = paged.iter().flat_map(|p| p.iter()).collect();
    assert_eq!(rejoined.len(), records.len());

    // Run directory name is filesystem safe
    assert!(!stamp.run_dir_name().contains(':'));
}

#[test]
fn test_threshold_gates_submission() {
    // 950 already pending, 49 newly added: below a threshold of 1000
    assert!(!threshold_met(950 + 49, 1000));
    // One more and the batch goes out
    assert!(threshold_met(950 + 50, 1000));
}

#[test]
fn test_prefix_strip_in_rendered_output() {
    let records = select(&[("qt5xy00042", "555")]);
    let builder = LinkSetBuilder::new(linkset_config(), 2);
    let document = builder.render_page(&records).unwrap();

    assert!(document.contains("<LinkId>5xy00042</LinkId>"));
    assert!(document.contains("<Rule>5xy00042</Rule>"));
}
