//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Services never read environment variables themselves, which keeps
//! behaviour identical between the binary and the test harness.

use crate::constants::{
    ADVICE_SOURCE_COUNT, DEFAULT_DATA_DIR, HISTORY_CAPACITY, HISTORY_KEY, MAX_RANKED_CONDITIONS,
    SUGGESTION_LIMIT,
};
use crate::{TriageError, TriageResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    history_key: String,
    history_capacity: usize,
    max_ranked_conditions: usize,
    advice_source_count: usize,
    suggestion_limit: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with the default limits.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if `history_key` is empty or whitespace.
    pub fn new(data_dir: PathBuf, history_key: impl Into<String>) -> TriageResult<Self> {
        let history_key = history_key.into();
        if history_key.trim().is_empty() {
            return Err(TriageError::InvalidInput(
                "history_key cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_dir,
            history_key,
            history_capacity: HISTORY_CAPACITY,
            max_ranked_conditions: MAX_RANKED_CONDITIONS,
            advice_source_count: ADVICE_SOURCE_COUNT,
            suggestion_limit: SUGGESTION_LIMIT,
        })
    }

    /// Override the ranking and retention limits.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if any limit is zero.
    pub fn with_limits(
        mut self,
        history_capacity: usize,
        max_ranked_conditions: usize,
        advice_source_count: usize,
        suggestion_limit: usize,
    ) -> TriageResult<Self> {
        for (name, value) in [
            ("history_capacity", history_capacity),
            ("max_ranked_conditions", max_ranked_conditions),
            ("advice_source_count", advice_source_count),
            ("suggestion_limit", suggestion_limit),
        ] {
            if value == 0 {
                return Err(TriageError::InvalidInput(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        self.history_capacity = history_capacity;
        self.max_ranked_conditions = max_ranked_conditions;
        self.advice_source_count = advice_source_count;
        self.suggestion_limit = suggestion_limit;
        Ok(self)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn history_key(&self) -> &str {
        &self.history_key
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    pub fn max_ranked_conditions(&self) -> usize {
        self.max_ranked_conditions
    }

    pub fn advice_source_count(&self) -> usize {
        self.advice_source_count
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }
}

/// Resolve the data directory from an optional override value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
