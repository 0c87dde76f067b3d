//! Pipeline coordinator
//!
//! Orchestrates the four run modes: enqueue (incremental select into the
//! tracking store, then submit if the threshold is met), submit (deliver
//! everything pending), resubmit (regenerate and redeliver the full
//! holdings), and export (one-shot source-to-FTP run). Each mode is a
//! run-to-completion sequence; re-entrancy is the external scheduler's
//! responsibility.

use crate::adapters::ftp::FtpDelivery;
use crate::adapters::mail::Notifier;
use crate::adapters::source::SourceClient;
use crate::adapters::tracking::TrackingStore;
use crate::config::{LinkoutConfig, SubmissionConfig};
use crate::core::linkset::{page_filename, LinkSetBuilder, RunStamp};
use crate::core::page::pages;
use crate::core::select::{exclude_tracked, threshold_met};
use crate::domain::{LinkoutError, PublicationRecord, Result, TrackingEntry};
use std::path::PathBuf;

/// How a pipeline run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run did its work
    Completed,
    /// Early exit with nothing to act on (not an error)
    NothingToDo,
}

/// What a pipeline run accomplished
#[derive(Debug)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// New tracking entries inserted this run
    pub new_entries: u64,
    /// Pending entries after any inserts
    pub pending: u64,
    /// Records covered by the generated resource files
    pub records: usize,
    /// Base filenames of the generated resource files
    pub files: Vec<String>,
    /// Whether files were actually uploaded (false for dry runs and
    /// below-threshold enqueues)
    pub uploaded: bool,
}

impl RunSummary {
    fn nothing_to_do() -> Self {
        Self {
            outcome: RunOutcome::NothingToDo,
            new_entries: 0,
            pending: 0,
            records: 0,
            files: Vec::new(),
            uploaded: false,
        }
    }
}

/// One generated resource file, ready for delivery
struct GeneratedPage {
    path: PathBuf,
    filename: String,
    item_ids: Vec<String>,
}

/// The linkout pipeline
pub struct Pipeline {
    source: SourceClient,
    tracking: TrackingStore,
    ftp: FtpDelivery,
    notifier: Option<Notifier>,
    builder: LinkSetBuilder,
    submission: SubmissionConfig,
    dry_run: bool,
}

impl Pipeline {
    /// Builds the pipeline and connects both database pools
    pub async fn new(config: LinkoutConfig) -> Result<Self> {
        let builder = LinkSetBuilder::new(config.linkset.clone(), config.source.strip_prefix_len);
        let ftp = FtpDelivery::new(&config.ftp);
        let notifier = Notifier::from_config(&config.email)?;
        let submission = config.submission.clone();
        let dry_run = config.application.dry_run;

        let source = SourceClient::new(config.source).await?;
        let tracking = TrackingStore::new(config.tracking).await?;

        // Idempotent: CREATE IF NOT EXISTS throughout
        tracking.ensure_schema().await?;

        Ok(Self {
            source,
            tracking,
            ftp,
            notifier,
            builder,
            submission,
            dry_run,
        })
    }

    /// Verifies both databases answer before any work starts
    pub async fn check_connections(&self) -> Result<()> {
        self.source.test_connection().await?;
        self.tracking.test_connection().await?;
        Ok(())
    }

    /// Incremental enqueue: select new records, track them, and submit
    /// once enough entries have accumulated
    pub async fn run_enqueue(&self, no_submit: bool) -> Result<RunSummary> {
        let qualifying = self.source.fetch_qualifying_records().await?;
        let tracked = self.tracking.tracked_ids().await?;
        let new_records = exclude_tracked(qualifying, &tracked);

        if new_records.is_empty() {
            tracing::info!("No new qualifying records found");
            return Ok(RunSummary::nothing_to_do());
        }

        if self.dry_run {
            // Nothing was inserted, so the pending query cannot see the new
            // records; report the would-be state directly instead of routing
            // through submit_pending
            let pending_before = self.tracking.pending_count().await?;
            let (pending, would_submit) =
                preview_decision(pending_before, new_records.len(), self.submission.threshold);
            tracing::info!(
                count = new_records.len(),
                pending,
                would_submit = would_submit && !no_submit,
                "Dry run: skipping tracking insert and submission"
            );
            return Ok(RunSummary {
                outcome: RunOutcome::Completed,
                new_entries: new_records.len() as u64,
                pending,
                records: 0,
                files: Vec::new(),
                uploaded: false,
            });
        }

        let new_entries = self.tracking.insert_new(&new_records).await?;
        let pending = self.tracking.pending_count().await?;

        if no_submit {
            tracing::info!(pending, "Enqueue complete, submission skipped");
            return Ok(RunSummary {
                outcome: RunOutcome::Completed,
                new_entries,
                pending,
                records: 0,
                files: Vec::new(),
                uploaded: false,
            });
        }

        if !threshold_met(pending, self.submission.threshold) {
            tracing::info!(
                pending,
                threshold = self.submission.threshold,
                "Below submission threshold, holding entries for a later run"
            );
            return Ok(RunSummary {
                outcome: RunOutcome::Completed,
                new_entries,
                pending,
                records: 0,
                files: Vec::new(),
                uploaded: false,
            });
        }

        let mut summary = self.submit_pending().await?;
        summary.new_entries = new_entries;
        Ok(summary)
    }

    /// Submit everything pending in the tracking store
    pub async fn run_submit(&self) -> Result<RunSummary> {
        self.submit_pending().await
    }

    /// Regenerate and redeliver resource files for the full holdings
    ///
    /// PubMed treats resubmission as a replace-by-id, so redelivering
    /// already-submitted links is safe; any entries still pending get
    /// marked submitted along the way.
    pub async fn run_resubmit(&self) -> Result<RunSummary> {
        let entries = self.tracking.all_entries().await?;
        if entries.is_empty() {
            tracing::info!("Tracking store is empty, nothing to resubmit");
            return Ok(RunSummary::nothing_to_do());
        }

        let records: Vec<PublicationRecord> = entries.into_iter().map(entry_to_record).collect();
        self.deliver(records, true).await
    }

    /// One-shot export from the source database straight to the FTP drop
    ///
    /// With `incremental`, only untracked records are exported and the
    /// exported records are inserted into the tracking store after the
    /// upload completes.
    pub async fn run_export(&self, incremental: bool) -> Result<RunSummary> {
        let mut records = self.source.fetch_qualifying_records().await?;

        if incremental {
            let tracked = self.tracking.tracked_ids().await?;
            records = exclude_tracked(records, &tracked);
        }

        if records.is_empty() {
            tracing::info!("No qualifying records to export");
            return Ok(RunSummary::nothing_to_do());
        }

        if incremental && !self.dry_run {
            // Delivery marks these submitted once the upload completes
            let mut summary = self.deliver_with_insert(records).await?;
            summary.outcome = RunOutcome::Completed;
            return Ok(summary);
        }

        self.deliver(records, false).await
    }

    async fn submit_pending(&self) -> Result<RunSummary> {
        let entries = self.tracking.pending_entries().await?;
        if entries.is_empty() {
            tracing::info!("No pending entries to submit");
            return Ok(RunSummary::nothing_to_do());
        }

        let records: Vec<PublicationRecord> = entries.into_iter().map(entry_to_record).collect();
        self.deliver(records, true).await
    }

    async fn deliver_with_insert(&self, records: Vec<PublicationRecord>) -> Result<RunSummary> {
        let generated = self.generate_pages(&records)?;
        self.upload(&generated).await?;
        self.tracking.insert_new(&records).await?;
        self.mark_pages_submitted(&generated).await?;
        self.notify(&generated, records.len()).await;

        Ok(RunSummary {
            outcome: RunOutcome::Completed,
            new_entries: records.len() as u64,
            pending: self.tracking.pending_count().await?,
            records: records.len(),
            files: generated.into_iter().map(|p| p.filename).collect(),
            uploaded: true,
        })
    }

    /// Generates, uploads, and (when `mark` is set) acknowledges a batch
    async fn deliver(&self, records: Vec<PublicationRecord>, mark: bool) -> Result<RunSummary> {
        let generated = self.generate_pages(&records)?;

        if self.dry_run {
            tracing::info!(
                files = generated.len(),
                records = records.len(),
                "Dry run: resource files written, skipping upload"
            );
            return Ok(RunSummary {
                outcome: RunOutcome::Completed,
                new_entries: 0,
                pending: 0,
                records: records.len(),
                files: generated.into_iter().map(|p| p.filename).collect(),
                uploaded: false,
            });
        }

        self.upload(&generated).await?;

        if mark {
            self.mark_pages_submitted(&generated).await?;
        }

        self.notify(&generated, records.len()).await;

        let pending = self.tracking.pending_count().await?;
        Ok(RunSummary {
            outcome: RunOutcome::Completed,
            new_entries: 0,
            pending,
            records: records.len(),
            files: generated.into_iter().map(|p| p.filename).collect(),
            uploaded: true,
        })
    }

    /// Writes one resource file per page into a fresh per-run directory
    fn generate_pages(&self, records: &[PublicationRecord]) -> Result<Vec<GeneratedPage>> {
        let stamp = RunStamp::now();
        let run_dir = PathBuf::from(&self.submission.output_dir).join(stamp.run_dir_name());
        std::fs::create_dir_all(&run_dir).map_err(|e| {
            LinkoutError::Io(format!(
                "Failed to create output directory {}: {}",
                run_dir.display(),
                e
            ))
        })?;

        let paged = pages(records, self.submission.page_size);
        let total = paged.len();
        let date = stamp.date();

        let mut generated = Vec::with_capacity(total);
        for (index, page) in paged.into_iter().enumerate() {
            let filename = page_filename(&date, &self.submission.filename_stub, index, total);
            let path = run_dir.join(&filename);

            let document = self.builder.render_page(page)?;
            std::fs::write(&path, document).map_err(|e| {
                LinkoutError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;

            tracing::info!(file = %filename, records = page.len(), "Wrote resource file");

            generated.push(GeneratedPage {
                path,
                filename,
                item_ids: page.iter().map(|r| r.item_id.as_str().to_string()).collect(),
            });
        }

        Ok(generated)
    }

    async fn upload(&self, generated: &[GeneratedPage]) -> Result<()> {
        // Readiness check in place of the original fixed pre-upload delay
        self.tracking.test_connection().await?;

        let paths: Vec<PathBuf> = generated.iter().map(|p| p.path.clone()).collect();
        self.ftp.deliver(paths).await?;
        Ok(())
    }

    async fn mark_pages_submitted(&self, generated: &[GeneratedPage]) -> Result<()> {
        for page in generated {
            self.tracking
                .mark_submitted(&page.item_ids, &page.filename)
                .await?;
        }
        Ok(())
    }

    async fn notify(&self, generated: &[GeneratedPage], record_count: usize) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        let filenames: Vec<String> = generated.iter().map(|p| p.filename.clone()).collect();
        if let Err(e) = notifier.send_submission_notice(&filenames, record_count).await {
            tracing::warn!(error = %e, "Notification email failed, run result unaffected");
        }
    }
}

fn entry_to_record(entry: TrackingEntry) -> PublicationRecord {
    PublicationRecord::new(entry.item_id, entry.pmid)
}

/// Pending count and submission decision an enqueue would reach after
/// inserting `new_count` entries onto `pending_before` already pending
fn preview_decision(pending_before: u64, new_count: usize, threshold: u64) -> (u64, bool) {
    let pending = pending_before + new_count as u64;
    (pending, threshold_met(pending, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 50, 10 => (50, true) ; "new records alone clear the threshold on an empty store")]
    #[test_case(950, 49, 1000 => (999, false) ; "one short of the threshold holds")]
    #[test_case(950, 50, 1000 => (1000, true) ; "exactly at the threshold submits")]
    #[test_case(0, 1, 1000 => (1, false) ; "single record stays well below")]
    fn test_preview_decision(pending_before: u64, new_count: usize, threshold: u64) -> (u64, bool) {
        preview_decision(pending_before, new_count, threshold)
    }

    #[test]
    fn test_preview_decision_counts_uninserted_records() {
        // New records found this run must count toward the preview even
        // though they were never written to the tracking store
        let (pending, would_submit) = preview_decision(0, 50, 10);
        assert_eq!(pending, 50);
        assert!(would_submit);
    }

    #[test]
    fn test_nothing_to_do_summary_is_empty() {
        let summary = RunSummary::nothing_to_do();
        assert_eq!(summary.outcome, RunOutcome::NothingToDo);
        assert_eq!(summary.new_entries, 0);
        assert!(summary.files.is_empty());
        assert!(!summary.uploaded);
    }
}
