//! Static triage knowledge base.
//!
//! The knowledge base holds everything the detector and scorer consult:
//!
//! - literal red-flag symptoms, in the order their reasons are reported
//! - vital-sign red-flag rules, expressed as `(vital, comparison, threshold)` data
//! - candidate conditions, each with a symptom weight table and advice list
//! - condition-specific score modifiers, keyed by [`ConditionId`]
//! - the flat symptom dictionary used for input suggestions
//!
//! It is built once at startup with [`KnowledgeBase::standard`] and then shared read-only
//! (typically behind an `Arc`). Nothing in it is mutated after construction.
//!
//! This is demo content and carries no medical validity.

use crate::vitals::{VitalSign, Vitals};
use crate::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use triage_types::{NonEmptyText, SymptomLabel};

// ============================================================================
// RULE PRIMITIVES
// ============================================================================

/// How a vital reading is compared against a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    Above,
    AtMost,
    Below,
}

impl Comparison {
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => value >= threshold,
            Comparison::Above => value > threshold,
            Comparison::AtMost => value <= threshold,
            Comparison::Below => value < threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::AtLeast => "≥",
            Comparison::Above => ">",
            Comparison::AtMost => "≤",
            Comparison::Below => "<",
        }
    }
}

/// A threshold test over one vital sign.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VitalThreshold {
    pub sign: VitalSign,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl VitalThreshold {
    pub const fn new(sign: VitalSign, comparison: Comparison, threshold: f64) -> Self {
        Self {
            sign,
            comparison,
            threshold,
        }
    }

    /// Returns `true` only when the vital is present and satisfies the comparison.
    pub fn matches(&self, vitals: &Vitals) -> bool {
        vitals
            .get(self.sign)
            .is_some_and(|value| self.comparison.holds(value, self.threshold))
    }
}

/// A vital-sign rule whose match alone makes a check urgent.
#[derive(Clone, Debug, PartialEq)]
pub struct VitalRedFlag {
    pub label: NonEmptyText,
    pub rule: VitalThreshold,
}

impl VitalRedFlag {
    /// Human-readable reason, e.g. `Very high fever (≥ 40°C)`.
    pub fn reason(&self) -> String {
        format!(
            "{} ({} {}{})",
            self.label,
            self.rule.comparison.symbol(),
            self.rule.threshold,
            self.rule.sign.unit()
        )
    }
}

// ============================================================================
// CONDITIONS
// ============================================================================

/// Stable identifier for a candidate condition, independent of its display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionId {
    CommonCold,
    Influenza,
    Covid19,
    Gastroenteritis,
    AllergicRhinitis,
    Migraine,
}

/// A candidate condition with its symptom weights and self-care advice.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    id: ConditionId,
    name: NonEmptyText,
    weights: Vec<(SymptomLabel, u32)>,
    advice: Vec<String>,
}

impl Condition {
    /// Creates a condition, validating its weight table.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the table is empty, a weight is zero, or a symptom
    /// appears twice. Returns `TriageError::Text` for an empty name or symptom label.
    pub fn new(
        id: ConditionId,
        name: &str,
        weights: &[(&str, u32)],
        advice: &[&str],
    ) -> TriageResult<Self> {
        let name = NonEmptyText::new(name)?;
        if weights.is_empty() {
            return Err(TriageError::InvalidInput(format!(
                "condition '{name}' has no symptom weights"
            )));
        }

        let mut seen = HashSet::new();
        let mut table = Vec::with_capacity(weights.len());
        for (symptom, weight) in weights {
            let label = SymptomLabel::new(symptom)?;
            if *weight == 0 {
                return Err(TriageError::InvalidInput(format!(
                    "condition '{name}' has a zero weight for '{label}'"
                )));
            }
            if !seen.insert(label.clone()) {
                return Err(TriageError::InvalidInput(format!(
                    "condition '{name}' lists '{label}' more than once"
                )));
            }
            table.push((label, *weight));
        }

        Ok(Self {
            id,
            name,
            weights: table,
            advice: advice.iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn id(&self) -> ConditionId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn weights(&self) -> &[(SymptomLabel, u32)] {
        &self.weights
    }

    pub fn advice(&self) -> &[String] {
        &self.advice
    }

    /// Sum of every weight in the table; the denominator of the confidence.
    pub fn max_score(&self) -> u32 {
        self.weights.iter().map(|(_, w)| *w).sum()
    }
}

/// What has to hold for a score modifier to apply.
#[derive(Clone, Debug, PartialEq)]
pub enum ModifierTrigger {
    Vital(VitalThreshold),
    SymptomPresent(SymptomLabel),
}

/// A fixed score adjustment applied to one condition.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreModifier {
    pub condition: ConditionId,
    pub adjustment: i64,
    pub trigger: ModifierTrigger,
}

// ============================================================================
// STANDARD TABLES
// ============================================================================

const RED_FLAG_SYMPTOMS: &[&str] = &[
    "severe chest pain",
    "difficulty breathing",
    "blue lips or face",
    "severe bleeding",
    "unconsciousness",
    "seizure",
    "stiff neck with fever",
    "confusion",
    "one-sided weakness",
    "stroke symptoms",
    "severe dehydration",
];

const VITAL_RED_FLAGS: &[(&str, VitalThreshold)] = &[
    (
        "Very high fever",
        VitalThreshold::new(VitalSign::Temperature, Comparison::AtLeast, 40.0),
    ),
    (
        "Very high heart rate",
        VitalThreshold::new(VitalSign::HeartRate, Comparison::AtLeast, 130.0),
    ),
];

struct ConditionTable {
    id: ConditionId,
    name: &'static str,
    weights: &'static [(&'static str, u32)],
    advice: &'static [&'static str],
}

const CONDITIONS: &[ConditionTable] = &[
    ConditionTable {
        id: ConditionId::CommonCold,
        name: "Common Cold (Viral URI)",
        weights: &[
            ("runny nose", 2),
            ("stuffy nose", 2),
            ("sore throat", 2),
            ("sneezing", 2),
            ("cough", 1),
            ("low-grade fever", 1),
            ("fatigue", 1),
            ("headache", 1),
        ],
        advice: &[
            "Rest, fluids, warm soups/tea.",
            "Salt-water gargles for sore throat.",
            "Consider OTC pain/fever reducer as directed.",
        ],
    },
    ConditionTable {
        id: ConditionId::Influenza,
        name: "Influenza (Flu)",
        weights: &[
            ("fever", 3),
            ("chills", 2),
            ("body aches", 3),
            ("headache", 2),
            ("dry cough", 2),
            ("fatigue", 2),
            ("sore throat", 1),
        ],
        advice: &[
            "Hydrate well and rest.",
            "If high risk or severe, contact a clinician—antivirals work best early.",
        ],
    },
    ConditionTable {
        id: ConditionId::Covid19,
        name: "COVID-19",
        weights: &[
            ("fever", 2),
            ("dry cough", 3),
            ("loss of taste or smell", 4),
            ("fatigue", 2),
            ("shortness of breath", 2),
            ("sore throat", 1),
            ("headache", 1),
            ("body aches", 1),
        ],
        advice: &[
            "Consider testing and follow local guidance.",
            "Isolate if positive; hydrate and rest.",
        ],
    },
    ConditionTable {
        id: ConditionId::Gastroenteritis,
        name: "Acute Gastroenteritis (Stomach Bug)",
        weights: &[
            ("nausea", 2),
            ("vomiting", 3),
            ("diarrhea", 3),
            ("abdominal cramps", 2),
            ("fever", 1),
            ("fatigue", 1),
        ],
        advice: &[
            "Small, frequent sips of oral rehydration solution.",
            "Seek care if unable to keep fluids, bloody stool, or signs of dehydration.",
        ],
    },
    ConditionTable {
        id: ConditionId::AllergicRhinitis,
        name: "Allergic Rhinitis",
        weights: &[
            ("sneezing", 2),
            ("itchy eyes", 3),
            ("runny nose", 2),
            ("stuffy nose", 2),
            ("clear nasal discharge", 2),
            ("post-nasal drip", 1),
            ("cough", 1),
        ],
        advice: &[
            "Reduce exposure to triggers; consider antihistamines as directed.",
            "Saline rinses can help.",
        ],
    },
    ConditionTable {
        id: ConditionId::Migraine,
        name: "Migraine",
        weights: &[
            ("unilateral headache", 3),
            ("throbbing headache", 3),
            ("nausea", 1),
            ("vomiting", 1),
            ("light sensitivity", 2),
            ("sound sensitivity", 2),
            ("aura", 2),
        ],
        advice: &[
            "Rest in a dark, quiet room; hydrate.",
            "If frequent/severe, talk to a clinician about treatment options.",
        ],
    },
];

const SYMPTOM_DICTIONARY: &[&str] = &[
    "fever",
    "low-grade fever",
    "chills",
    "body aches",
    "headache",
    "unilateral headache",
    "throbbing headache",
    "dry cough",
    "cough",
    "runny nose",
    "stuffy nose",
    "sore throat",
    "sneezing",
    "fatigue",
    "loss of taste or smell",
    "nausea",
    "vomiting",
    "diarrhea",
    "abdominal cramps",
    "itchy eyes",
    "clear nasal discharge",
    "post-nasal drip",
    "light sensitivity",
    "sound sensitivity",
    "aura",
    "shortness of breath",
    "severe chest pain",
    "difficulty breathing",
    "blue lips or face",
    "severe bleeding",
    "unconsciousness",
    "seizure",
    "stiff neck with fever",
    "confusion",
    "one-sided weakness",
    "stroke symptoms",
    "severe dehydration",
];

// ============================================================================
// KNOWLEDGE BASE
// ============================================================================

/// Immutable triage knowledge base.
#[derive(Clone, Debug)]
pub struct KnowledgeBase {
    red_flag_symptoms: Vec<SymptomLabel>,
    vital_red_flags: Vec<VitalRedFlag>,
    conditions: Vec<Condition>,
    modifiers: Vec<ScoreModifier>,
    dictionary: Vec<SymptomLabel>,
}

impl KnowledgeBase {
    /// Assembles a knowledge base from its parts.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if two conditions share an id, or a modifier
    /// targets a condition that is not present.
    pub fn new(
        red_flag_symptoms: Vec<SymptomLabel>,
        vital_red_flags: Vec<VitalRedFlag>,
        conditions: Vec<Condition>,
        modifiers: Vec<ScoreModifier>,
        dictionary: Vec<SymptomLabel>,
    ) -> TriageResult<Self> {
        let mut ids = HashSet::new();
        for condition in &conditions {
            if !ids.insert(condition.id()) {
                return Err(TriageError::InvalidInput(format!(
                    "duplicate condition id {:?}",
                    condition.id()
                )));
            }
        }

        if let Some(orphan) = modifiers.iter().find(|m| !ids.contains(&m.condition)) {
            return Err(TriageError::InvalidInput(format!(
                "modifier targets unknown condition {:?}",
                orphan.condition
            )));
        }

        Ok(Self {
            red_flag_symptoms,
            vital_red_flags,
            conditions,
            modifiers,
            dictionary,
        })
    }

    /// Builds the standard demo knowledge base.
    pub fn standard() -> TriageResult<Self> {
        let red_flag_symptoms = RED_FLAG_SYMPTOMS
            .iter()
            .map(SymptomLabel::new)
            .collect::<Result<Vec<_>, _>>()?;

        let vital_red_flags = VITAL_RED_FLAGS
            .iter()
            .map(|(label, rule)| -> TriageResult<VitalRedFlag> {
                Ok(VitalRedFlag {
                    label: NonEmptyText::new(label)?,
                    rule: *rule,
                })
            })
            .collect::<TriageResult<Vec<_>>>()?;

        let conditions = CONDITIONS
            .iter()
            .map(|c| Condition::new(c.id, c.name, c.weights, c.advice))
            .collect::<TriageResult<Vec<_>>>()?;

        let modifiers = vec![
            ScoreModifier {
                condition: ConditionId::CommonCold,
                adjustment: -1,
                trigger: ModifierTrigger::Vital(VitalThreshold::new(
                    VitalSign::Duration,
                    Comparison::Above,
                    10.0,
                )),
            },
            ScoreModifier {
                condition: ConditionId::Influenza,
                adjustment: 1,
                trigger: ModifierTrigger::Vital(VitalThreshold::new(
                    VitalSign::Temperature,
                    Comparison::AtLeast,
                    38.0,
                )),
            },
            ScoreModifier {
                condition: ConditionId::Covid19,
                adjustment: 1,
                trigger: ModifierTrigger::SymptomPresent(SymptomLabel::new(
                    "loss of taste or smell",
                )?),
            },
        ];

        let dictionary = SYMPTOM_DICTIONARY
            .iter()
            .map(SymptomLabel::new)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            red_flag_symptoms,
            vital_red_flags,
            conditions,
            modifiers,
            dictionary,
        )
    }

    pub fn red_flag_symptoms(&self) -> &[SymptomLabel] {
        &self.red_flag_symptoms
    }

    pub fn vital_red_flags(&self) -> &[VitalRedFlag] {
        &self.vital_red_flags
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn condition(&self, id: ConditionId) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id() == id)
    }

    /// Modifiers for one condition, in declaration order.
    pub fn modifiers_for(&self, id: ConditionId) -> impl Iterator<Item = &ScoreModifier> {
        self.modifiers.iter().filter(move |m| m.condition == id)
    }

    pub fn dictionary(&self) -> &[SymptomLabel] {
        &self.dictionary
    }
}
