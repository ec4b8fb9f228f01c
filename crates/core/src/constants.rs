//! Constants used throughout the triage core crate.
//!
//! Defaults for [`crate::config::CoreConfig`] and fixed user-facing text live here so the
//! binary and the tests agree on them.

/// Default directory for durable key-value storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "triage_data";

/// Storage key under which the rolling history log is persisted.
pub const HISTORY_KEY: &str = "ht_history";

/// File extension used by the file-backed key-value store.
pub const STORE_FILE_EXTENSION: &str = "json";

/// Maximum number of history entries retained.
pub const HISTORY_CAPACITY: usize = 20;

/// Maximum number of ranked conditions surfaced per analysis.
pub const MAX_RANKED_CONDITIONS: usize = 4;

/// Number of top-ranked conditions whose advice is merged.
pub const ADVICE_SOURCE_COUNT: usize = 2;

/// Maximum number of dictionary suggestions returned for a query.
pub const SUGGESTION_LIMIT: usize = 12;

/// Guidance shown when no condition has a non-zero confidence.
pub const NO_MATCH_GUIDANCE: &str = "No strong matches. Consider rest, fluids, and monitoring. \
If symptoms persist or worsen, seek medical advice.";
