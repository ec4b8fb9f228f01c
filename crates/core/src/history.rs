//! Rolling history of triage checks.
//!
//! Each analysis produces one [`HistoryEntry`]. Entries are prepended to a log stored as a
//! JSON array in a single key-value slot and the log is truncated to the configured capacity
//! (20 by default). Entries are never edited or removed individually; the only other write is
//! a bulk [`HistoryRecorder::clear`].
//!
//! ## Persisted format
//!
//! ```json
//! [
//!   {
//!     "time": "2026-10-19T09:30:00Z",
//!     "symptoms": ["fever", "dry cough"],
//!     "age": 34, "duration": null, "temp": 38.4, "hr": null,
//!     "triage": "OK",
//!     "top": [
//!       { "condition": "Influenza (Flu)", "confidence": 40 },
//!       { "condition": "COVID-19", "confidence": 31 },
//!       { "condition": "Acute Gastroenteritis (Stomach Bug)", "confidence": 8 }
//!     ]
//!   }
//! ]
//! ```
//!
//! Reading is best-effort: an absent slot, a storage failure or a slot that is not a JSON array
//! all read as an empty log. Individual entries that do not match the format are skipped.

use crate::config::CoreConfig;
use crate::red_flags::Triage;
use crate::storage::KeyValueStore;
use crate::{TriageError, TriageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use triage_types::SymptomLabel;

/// Name and confidence of a ranked condition at the time of a check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCondition {
    pub condition: String,
    pub confidence: u8,
}

/// One persisted triage check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub time: DateTime<Utc>,
    pub symptoms: Vec<SymptomLabel>,
    pub age: Option<f64>,
    pub duration: Option<f64>,
    pub temp: Option<f64>,
    pub hr: Option<f64>,
    pub triage: Triage,
    pub top: Vec<TopCondition>,
}

/// Records, lists and clears the history log in a key-value store.
#[derive(Debug)]
pub struct HistoryRecorder<S> {
    cfg: Arc<CoreConfig>,
    store: S,
}

impl<S: KeyValueStore> HistoryRecorder<S> {
    pub fn new(cfg: Arc<CoreConfig>, store: S) -> Self {
        Self { cfg, store }
    }

    /// Prepends `entry` and truncates the log to the configured capacity.
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error if the log cannot be written. A corrupt
    /// existing log is not an error; it is replaced.
    pub fn record(&self, entry: HistoryEntry) -> TriageResult<()> {
        let mut log = self.list();
        log.insert(0, entry);
        log.truncate(self.cfg.history_capacity());

        let json = serde_json::to_string(&log).map_err(TriageError::Serialization)?;
        self.store.set(self.cfg.history_key(), &json)?;

        tracing::info!(entries = log.len(), "recorded triage check");
        Ok(())
    }

    /// Returns the log, most recent first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(self.cfg.history_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read history, treating as empty: {}", e);
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("malformed history, treating as empty: {}", e);
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<HistoryEntry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("skipping malformed history entry {}: {}", index, e);
                    None
                }
            })
            .collect()
    }

    /// Removes the whole log.
    pub fn clear(&self) -> TriageResult<()> {
        self.store.remove(self.cfg.history_key())?;
        tracing::info!("cleared triage history");
        Ok(())
    }
}
