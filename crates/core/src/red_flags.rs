//! Red-flag detection.
//!
//! Any single triggered rule marks the whole check urgent; rules are OR'd. An empty result
//! only means none of these specific heuristics fired, not that there is no risk.

use crate::knowledge_base::KnowledgeBase;
use crate::selection::SymptomSelection;
use crate::vitals::Vitals;
use serde::{Deserialize, Serialize};
use triage_types::SymptomLabel;

/// Binary triage verdict derived solely from red-flag detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Triage {
    Urgent,
    #[serde(rename = "OK")]
    Ok,
}

impl Triage {
    pub fn from_red_flags(flags: &[RedFlag]) -> Self {
        if flags.is_empty() {
            Triage::Ok
        } else {
            Triage::Urgent
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Triage::Urgent => "Urgent",
            Triage::Ok => "OK",
        }
    }
}

impl std::fmt::Display for Triage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triggered red-flag rule.
#[derive(Clone, Debug, PartialEq)]
pub enum RedFlag {
    Symptom(SymptomLabel),
    Vital { reason: String },
}

impl std::fmt::Display for RedFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedFlag::Symptom(label) => write!(f, "Red-flag symptom: {label}"),
            RedFlag::Vital { reason } => f.write_str(reason),
        }
    }
}

/// Returns every triggered red flag.
///
/// Literal symptoms are reported first, in knowledge-base order, followed by the vital rules
/// in knowledge-base order (temperature, then heart rate). Absent vitals never trigger.
pub fn detect(kb: &KnowledgeBase, symptoms: &SymptomSelection, vitals: &Vitals) -> Vec<RedFlag> {
    let mut flags: Vec<RedFlag> = kb
        .red_flag_symptoms()
        .iter()
        .filter(|flag| symptoms.contains(flag))
        .cloned()
        .map(RedFlag::Symptom)
        .collect();

    flags.extend(
        kb.vital_red_flags()
            .iter()
            .filter(|flag| flag.rule.matches(vitals))
            .map(|flag| RedFlag::Vital {
                reason: flag.reason(),
            }),
    );

    flags
}
