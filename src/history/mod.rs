//! Persisted history of past analyses, newest first.
//!
//! The whole sequence lives as one JSON array in the storage slot
//! [`HISTORY_SLOT`]. Every mutation writes the new sequence first and only
//! then replaces the in-memory copy, so a failed write leaves both sides as
//! they were.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::AnalysisResult;
use crate::error::StorageResult;
use crate::storage::Storage;

/// Name of the durable slot holding the serialized history.
pub const HISTORY_SLOT: &str = "ge_detective_history";

/// One persisted analysis: the input text and the result it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Time-derived identifier, unique within the store.
    pub id: String,
    /// Submission time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Submitted text.
    pub text: String,
    /// Result the text produced.
    pub result: AnalysisResult,
}

impl HistoryEntry {
    /// Create an entry submitted at `submitted_at`.
    pub fn new(
        id: impl Into<String>,
        submitted_at: DateTime<Utc>,
        text: impl Into<String>,
        result: AnalysisResult,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: submitted_at.timestamp_millis(),
            text: text.into(),
            result,
        }
    }

    /// Submission time. Out-of-range timestamps fall back to the epoch.
    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or_default()
    }
}

/// Ordered, durable list of [`HistoryEntry`] values.
pub struct HistoryStore {
    storage: Arc<dyn Storage>,
    entries: Vec<HistoryEntry>,
    max_entries: Option<usize>,
}

impl HistoryStore {
    /// Read the history from `storage`.
    ///
    /// Never fails: an absent, unreadable or unparseable slot yields an
    /// empty history.
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let entries = match storage.read_slot(HISTORY_SLOT).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, "Stored history is unparseable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored history, starting empty");
                Vec::new()
            }
        };

        info!(entries = entries.len(), "History loaded");

        Self {
            storage,
            entries,
            max_entries: None,
        }
    }

    /// Keep at most `max_entries` (newest) entries on subsequent appends.
    /// `None` keeps everything.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|&n| n > 0);
        self
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Identifier for an entry created at `now`: its epoch milliseconds,
    /// bumped until it is not already taken.
    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Insert `entry` at the head and persist.
    pub async fn append(&mut self, entry: HistoryEntry) -> StorageResult<()> {
        let mut updated = Vec::with_capacity(self.entries.len() + 1);
        updated.push(entry);
        updated.extend(self.entries.iter().cloned());

        if let Some(max) = self.max_entries {
            if updated.len() > max {
                debug!(dropped = updated.len() - max, "History cap reached");
                updated.truncate(max);
            }
        }

        self.persist(updated).await
    }

    /// Delete the entry with `id` and persist. Returns whether one was removed.
    pub async fn remove(&mut self, id: &str) -> StorageResult<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let updated: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();

        self.persist(updated).await?;
        Ok(true)
    }

    async fn persist(&mut self, updated: Vec<HistoryEntry>) -> StorageResult<()> {
        let raw = serde_json::to_string(&updated)?;
        self.storage.write_slot(HISTORY_SLOT, &raw).await?;
        self.entries = updated;
        debug!(entries = self.entries.len(), "History persisted");
        Ok(())
    }
}
