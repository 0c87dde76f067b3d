//! Tracking store
//!
//! Append-only submission log. Rows are inserted when an item is first
//! selected for submission and updated with a timestamp and output
//! filename once its resource file has been delivered; rows are never
//! deleted. There is deliberately no uniqueness constraint on item_id:
//! the selector enforces the no-resubmission invariant by excluding
//! every previously tracked id.

use crate::adapters::source::client::{build_pool, redact_connection_string};
use crate::config::schema::TrackingConfig;
use crate::domain::ids::{ItemId, Pmid};
use crate::domain::{LinkoutError, PublicationRecord, Result, TrackingEntry, TrackingStats};
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use secrecy::ExposeSecret;
use std::collections::HashSet;

/// Client for the tracking store database
pub struct TrackingStore {
    pool: Pool,
    config: TrackingConfig,
}

impl TrackingStore {
    /// Create a new tracking store client
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool
    /// cannot be created.
    pub async fn new(config: TrackingConfig) -> Result<Self> {
        let pool = build_pool(
            config.connection_string.expose_secret().as_ref(),
            config.max_connections,
            config.connection_timeout_seconds,
        )?;

        Ok(Self { pool, config })
    }

    /// Test the connection to the tracking store
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| LinkoutError::Database(format!("Connection test failed: {}", e)))?;

        tracing::info!("Tracking store connection test successful");
        Ok(())
    }

    /// Ensure the tracking schema exists
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.get_connection().await?;

        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");

        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to execute migration: {}", e)))?;

        tracing::info!("Tracking store schema initialized successfully");
        Ok(())
    }

    /// Every item id ever inserted, regardless of submission status
    pub async fn tracked_ids(&self) -> Result<HashSet<String>> {
        let client = self.get_connection().await?;

        let rows = client
            .query("SELECT item_id FROM linkout_items", &[])
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to read tracked ids: {}", e)))?;

        let ids: HashSet<String> = rows.iter().map(|row| row.get("item_id")).collect();

        tracing::debug!(count = ids.len(), "Loaded previously tracked ids");
        Ok(ids)
    }

    /// Entries inserted but not yet marked submitted, in insertion order
    pub async fn pending_entries(&self) -> Result<Vec<TrackingEntry>> {
        let client = self.get_connection().await?;

        let rows = client
            .query(
                "SELECT item_id, pmid, submitted_at, output_filename \
                 FROM linkout_items \
                 WHERE submitted_at IS NULL \
                 ORDER BY id",
                &[],
            )
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to read pending entries: {}", e)))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Every entry ever tracked, in insertion order
    pub async fn all_entries(&self) -> Result<Vec<TrackingEntry>> {
        let client = self.get_connection().await?;

        let rows = client
            .query(
                "SELECT item_id, pmid, submitted_at, output_filename \
                 FROM linkout_items \
                 ORDER BY id",
                &[],
            )
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to read tracking entries: {}", e)))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Number of entries not yet marked submitted
    pub async fn pending_count(&self) -> Result<u64> {
        let client = self.get_connection().await?;

        let row = client
            .query_one(
                "SELECT COUNT(*) FROM linkout_items WHERE submitted_at IS NULL",
                &[],
            )
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to count pending entries: {}", e)))?;

        let count: i64 = row.get(0);
        Ok(count as u64)
    }

    /// Inserts newly selected records as pending entries
    pub async fn insert_new(&self, records: &[PublicationRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let client = self.get_connection().await?;

        let statement = client
            .prepare("INSERT INTO linkout_items (item_id, pmid) VALUES ($1, $2)")
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to prepare insert: {}", e)))?;

        let mut inserted = 0u64;
        for record in records {
            client
                .execute(&statement, &[&record.item_id.as_str(), &record.pmid.as_str()])
                .await
                .map_err(|e| {
                    LinkoutError::Database(format!(
                        "Failed to insert tracking entry for {}: {}",
                        record.item_id, e
                    ))
                })?;
            inserted += 1;
        }

        tracing::info!(count = inserted, "Inserted new tracking entries");
        Ok(inserted)
    }

    /// Marks the given pending entries submitted under `output_filename`
    ///
    /// Only rows still pending are touched, so a crash-and-retry never
    /// rewrites the filename of an earlier successful run.
    pub async fn mark_submitted(&self, item_ids: &[String], output_filename: &str) -> Result<u64> {
        if item_ids.is_empty() {
            return Ok(0);
        }

        let client = self.get_connection().await?;

        let updated = client
            .execute(
                "UPDATE linkout_items \
                 SET submitted_at = now(), output_filename = $2 \
                 WHERE item_id = ANY($1) AND submitted_at IS NULL",
                &[&item_ids, &output_filename],
            )
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to mark entries submitted: {}", e)))?;

        tracing::info!(
            count = updated,
            filename = output_filename,
            "Marked tracking entries submitted"
        );
        Ok(updated)
    }

    /// Summary counts for the status command
    pub async fn stats(&self) -> Result<TrackingStats> {
        let client = self.get_connection().await?;

        let row = client
            .query_one(
                "SELECT COUNT(*) AS total, \
                        COUNT(*) FILTER (WHERE submitted_at IS NULL) AS pending, \
                        COUNT(*) FILTER (WHERE submitted_at IS NOT NULL) AS submitted, \
                        MAX(submitted_at) AS last_submitted_at \
                 FROM linkout_items",
                &[],
            )
            .await
            .map_err(|e| LinkoutError::Database(format!("Failed to read stats: {}", e)))?;

        let last_submitted_at: Option<DateTime<Utc>> = row.get("last_submitted_at");

        let last_output_filename: Option<String> = match last_submitted_at {
            Some(at) => {
                let row = client
                    .query_opt(
                        "SELECT output_filename FROM linkout_items \
                         WHERE submitted_at = $1 \
                         LIMIT 1",
                        &[&at],
                    )
                    .await
                    .map_err(|e| {
                        LinkoutError::Database(format!("Failed to read last filename: {}", e))
                    })?;
                row.and_then(|r| r.get("output_filename"))
            }
            None => None,
        };

        Ok(TrackingStats {
            total: row.get("total"),
            pending: row.get("pending"),
            submitted: row.get("submitted"),
            last_submitted_at,
            last_output_filename,
        })
    }

    /// Get the connection string (without password)
    pub fn connection_string_safe(&self) -> String {
        redact_connection_string(self.config.connection_string.expose_secret().as_ref())
    }

    async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        let client = self.pool.get().await.map_err(|e| {
            LinkoutError::Database(format!("Failed to get connection from pool: {}", e))
        })?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client.execute(&timeout_query, &[]).await.map_err(|e| {
            LinkoutError::Database(format!("Failed to set statement timeout: {}", e))
        })?;

        Ok(client)
    }
}

fn row_to_entry(row: &tokio_postgres::Row) -> Result<TrackingEntry> {
    let item_id: String = row.get("item_id");
    let pmid: String = row.get("pmid");

    Ok(TrackingEntry {
        item_id: ItemId::new(item_id)
            .map_err(|e| LinkoutError::Database(format!("Corrupt tracking row: {}", e)))?,
        pmid: Pmid::new(pmid)
            .map_err(|e| LinkoutError::Database(format!("Corrupt tracking row: {}", e)))?,
        submitted_at: row.get("submitted_at"),
        output_filename: row.get("output_filename"),
    })
}
