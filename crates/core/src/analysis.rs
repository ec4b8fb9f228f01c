//! Triage analysis.
//!
//! [`TriageService`] runs the red-flag detector and the condition scorer over the same input
//! and combines them into one [`AnalysisResult`]:
//!
//! - triage verdict and the human-readable reasons behind it
//! - ranked conditions (descending confidence, non-zero only, capped)
//! - advice merged from the top-ranked conditions, or fixed guidance when nothing ranks
//!
//! The service holds no mutable state; the same input always yields the same result.

use crate::config::CoreConfig;
use crate::constants::NO_MATCH_GUIDANCE;
use crate::history::{HistoryEntry, TopCondition};
use crate::knowledge_base::KnowledgeBase;
use crate::red_flags::{self, Triage};
use crate::scoring::{self, ScoredCondition};
use crate::selection::SymptomSelection;
use crate::vitals::Vitals;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use triage_types::SymptomLabel;

/// Outcome of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub symptoms: Vec<SymptomLabel>,
    pub vitals: Vitals,
    pub triage: Triage,
    pub reasons: Vec<String>,
    pub ranked: Vec<ScoredCondition>,
    pub advice: Vec<String>,
}

impl AnalysisResult {
    pub fn is_urgent(&self) -> bool {
        self.triage == Triage::Urgent
    }

    /// Advice to show: the merged advice, or the no-match guidance when nothing ranked.
    pub fn guidance(&self) -> Vec<&str> {
        if self.ranked.is_empty() {
            vec![NO_MATCH_GUIDANCE]
        } else {
            self.advice.iter().map(String::as_str).collect()
        }
    }

    /// Summarises this result for the history log.
    pub fn to_history_entry(&self, time: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            time,
            symptoms: self.symptoms.clone(),
            age: self.vitals.age,
            duration: self.vitals.duration,
            temp: self.vitals.temp,
            hr: self.vitals.hr,
            triage: self.triage,
            top: self
                .ranked
                .iter()
                .map(|s| TopCondition {
                    condition: s.condition.clone(),
                    confidence: s.confidence,
                })
                .collect(),
        }
    }
}

/// Stateless analysis over a shared knowledge base.
#[derive(Clone, Debug)]
pub struct TriageService {
    cfg: Arc<CoreConfig>,
    kb: Arc<KnowledgeBase>,
}

impl TriageService {
    pub fn new(cfg: Arc<CoreConfig>, kb: Arc<KnowledgeBase>) -> Self {
        Self { cfg, kb }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn analyze(&self, symptoms: &SymptomSelection, vitals: Vitals) -> AnalysisResult {
        let flags = red_flags::detect(&self.kb, symptoms, &vitals);
        let triage = Triage::from_red_flags(&flags);

        let scores = scoring::score(&self.kb, symptoms, &vitals);
        let ranked = scoring::rank(scores, self.cfg.max_ranked_conditions());
        let advice = scoring::merge_advice(&ranked, self.cfg.advice_source_count());

        tracing::debug!(
            symptoms = symptoms.len(),
            %triage,
            ranked = ranked.len(),
            "analysed symptom check"
        );

        AnalysisResult {
            symptoms: symptoms.as_slice().to_vec(),
            vitals,
            triage,
            reasons: flags.iter().map(ToString::to_string).collect(),
            ranked,
            advice,
        }
    }

    /// Dictionary suggestions for partially typed input, limited by configuration.
    pub fn suggest<'a>(&'a self, query: &str, selection: &SymptomSelection) -> Vec<&'a str> {
        crate::suggestions::suggest(&self.kb, query, selection, self.cfg.suggestion_limit())
    }
}
