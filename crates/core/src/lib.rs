//! # Triage Core
//!
//! Core logic for the symptom triage demo.
//!
//! This crate contains the scoring and triage engine plus its persistence:
//! - A static knowledge base of red flags, weighted conditions and a symptom dictionary
//! - Red-flag detection producing an `Urgent`/`OK` verdict
//! - Weighted condition scoring, ranking and advice merging
//! - A bounded rolling history log in a key-value store
//!
//! **No presentation concerns**: rendering, prompting and argument parsing belong in
//! `triage-cli` or any other caller.
//!
//! This is not a diagnostic system and makes no claim of medical validity.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use triage_core::{
//!     CoreConfig, FileStore, HistoryRecorder, KnowledgeBase, SymptomSelection, TriageService,
//!     Vitals,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Arc::new(CoreConfig::new(PathBuf::from("triage_data"), "ht_history")?);
//! let kb = Arc::new(KnowledgeBase::standard()?);
//! let service = TriageService::new(cfg.clone(), kb);
//!
//! let symptoms: SymptomSelection = ["fever", "dry cough"].into_iter().collect();
//! let result = service.analyze(&symptoms, Vitals::from_raw("34", "", "38.4", ""));
//!
//! let history = HistoryRecorder::new(cfg.clone(), FileStore::new(cfg.data_dir()));
//! history.record(result.to_history_entry(chrono::Utc::now()))?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod knowledge_base;
pub mod red_flags;
pub mod scoring;
pub mod selection;
pub mod storage;
pub mod suggestions;
pub mod vitals;

pub use analysis::{AnalysisResult, TriageService};
pub use config::CoreConfig;
pub use error::{TriageError, TriageResult};
pub use history::{HistoryEntry, HistoryRecorder, TopCondition};
pub use knowledge_base::{ConditionId, KnowledgeBase};
pub use red_flags::{RedFlag, Triage};
pub use scoring::ScoredCondition;
pub use selection::SymptomSelection;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use vitals::{parse_vital, VitalSign, Vitals};

pub use triage_types::{NonEmptyText, SymptomLabel, TextError};
