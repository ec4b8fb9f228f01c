//! Weighted condition scoring.
//!
//! For each condition the scorer sums the weights of the selected symptoms that appear in the
//! condition's table, applies that condition's modifiers, clamps at zero and converts the
//! result to an integer percentage of the table's total weight.
//!
//! ## Rounding
//!
//! Confidence is rounded half-up, computed exactly in integer arithmetic as
//! `(200 * score + max) / (2 * max)`. Scores are never negative, so this is the same as
//! rounding half away from zero. For example `2/16` is `12.5%` and rounds to `13`.
//!
//! Ranking and advice merging are layered on top of [`score`] and do not change its output.

use crate::knowledge_base::{ConditionId, KnowledgeBase, ModifierTrigger, ScoreModifier};
use crate::selection::SymptomSelection;
use crate::vitals::Vitals;
use serde::Serialize;

/// A condition's confidence for one input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoredCondition {
    pub id: ConditionId,
    pub condition: String,
    /// Integer percentage in `0..=100`.
    pub confidence: u8,
    pub advice: Vec<String>,
}

/// Scores every condition in knowledge-base order.
///
/// Empty selections, absent vitals and unknown symptoms all contribute nothing; none of
/// them is an error.
pub fn score(kb: &KnowledgeBase, symptoms: &SymptomSelection, vitals: &Vitals) -> Vec<ScoredCondition> {
    kb.conditions()
        .iter()
        .map(|condition| {
            let max = u64::from(condition.max_score());
            let matched: u64 = condition
                .weights()
                .iter()
                .filter(|(symptom, _)| symptoms.contains(symptom))
                .map(|(_, weight)| u64::from(*weight))
                .sum();

            let adjustment: i64 = kb
                .modifiers_for(condition.id())
                .filter(|m| modifier_applies(m, symptoms, vitals))
                .map(|m| m.adjustment)
                .sum();

            let raw = i64::try_from(matched).unwrap_or(i64::MAX).saturating_add(adjustment);
            let clamped = u64::try_from(raw.max(0)).unwrap_or(0);

            ScoredCondition {
                id: condition.id(),
                condition: condition.name().to_string(),
                confidence: confidence(clamped, max),
                advice: condition.advice().to_vec(),
            }
        })
        .collect()
}

fn modifier_applies(modifier: &ScoreModifier, symptoms: &SymptomSelection, vitals: &Vitals) -> bool {
    match &modifier.trigger {
        ModifierTrigger::Vital(rule) => rule.matches(vitals),
        ModifierTrigger::SymptomPresent(label) => symptoms.contains(label),
    }
}

/// Converts a clamped score into a percentage of `max`, rounded half-up.
///
/// Returns 0 when `max` is 0. Modifiers can push `score` above `max`; the result is capped
/// at 100.
pub fn confidence(score: u64, max: u64) -> u8 {
    if max == 0 {
        return 0;
    }
    let percent = (200 * score + max) / (2 * max);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Orders scores for display.
///
/// Stable sort by descending confidence (ties keep knowledge-base order), then keeps at most
/// `limit` conditions with a confidence above zero.
pub fn rank(mut scores: Vec<ScoredCondition>, limit: usize) -> Vec<ScoredCondition> {
    scores.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    scores
        .into_iter()
        .filter(|s| s.confidence > 0)
        .take(limit)
        .collect()
}

/// Concatenates the advice of the first `sources` ranked conditions in rank order, keeping
/// only the first occurrence of each exact string.
pub fn merge_advice(ranked: &[ScoredCondition], sources: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for advice in ranked.iter().take(sources).flat_map(|s| s.advice.iter()) {
        if !merged.contains(advice) {
            merged.push(advice.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::standard().unwrap()
    }

    fn select(symptoms: &[&str]) -> SymptomSelection {
        symptoms.iter().collect()
    }

    fn confidence_of(scores: &[ScoredCondition], id: ConditionId) -> u8 {
        scores.iter().find(|s| s.id == id).unwrap().confidence
    }

    #[test]
    fn test_covid_example_outranks_influenza() {
        let scores = score(
            &kb(),
            &select(&["fever", "dry cough", "loss of taste or smell"]),
            &Vitals::default(),
        );
        // 2 + 3 + 4 matched, +1 modifier for loss of taste or smell: 10 of 16.
        assert_eq!(confidence_of(&scores, ConditionId::Covid19), 63);
        // fever 3 + dry cough 2 of 15.
        assert_eq!(confidence_of(&scores, ConditionId::Influenza), 33);

        let ranked = rank(scores, 4);
        assert_eq!(ranked[0].id, ConditionId::Covid19);
        assert_eq!(ranked[1].id, ConditionId::Influenza);
    }

    #[test]
    fn test_empty_selection_scores_zero() {
        let scores = score(&kb(), &SymptomSelection::new(), &Vitals::default());
        assert_eq!(scores.len(), 6);
        assert!(scores.iter().all(|s| s.confidence == 0));
        assert!(rank(scores, 4).is_empty());
    }

    #[test]
    fn test_influenza_fever_modifier_on_empty_selection() {
        let vitals = Vitals::new(None, None, Some(40.5), None);
        let scores = score(&kb(), &SymptomSelection::new(), &vitals);
        // 1 of 15 rounds to 7.
        assert_eq!(confidence_of(&scores, ConditionId::Influenza), 7);
        assert!(scores
            .iter()
            .filter(|s| s.id != ConditionId::Influenza)
            .all(|s| s.confidence == 0));
    }

    #[test]
    fn test_influenza_modifier_threshold_is_inclusive() {
        let symptoms = select(&["fever"]);
        let at = score(&kb(), &symptoms, &Vitals::new(None, None, Some(38.0), None));
        let below = score(&kb(), &symptoms, &Vitals::new(None, None, Some(37.9), None));
        assert_eq!(confidence_of(&at, ConditionId::Influenza), 27);
        assert_eq!(confidence_of(&below, ConditionId::Influenza), 20);
    }

    #[test]
    fn test_cold_duration_penalty() {
        let symptoms = select(&["runny nose", "sneezing"]);
        let short = score(&kb(), &symptoms, &Vitals::new(None, Some(10.0), None, None));
        let long = score(&kb(), &symptoms, &Vitals::new(None, Some(11.0), None, None));
        assert_eq!(confidence_of(&short, ConditionId::CommonCold), 33);
        assert_eq!(confidence_of(&long, ConditionId::CommonCold), 25);
    }

    #[test]
    fn test_penalty_clamps_at_zero() {
        let scores = score(
            &kb(),
            &SymptomSelection::new(),
            &Vitals::new(None, Some(30.0), None, None),
        );
        assert_eq!(confidence_of(&scores, ConditionId::CommonCold), 0);
    }

    #[test]
    fn test_modifier_can_push_above_max_but_confidence_caps() {
        let kb = kb();
        let all: SymptomSelection = kb
            .condition(ConditionId::Covid19)
            .unwrap()
            .weights()
            .iter()
            .map(|(s, _)| s.as_str())
            .collect();
        let scores = score(&kb, &all, &Vitals::default());
        assert_eq!(confidence_of(&scores, ConditionId::Covid19), 100);
    }

    #[test]
    fn test_unknown_symptoms_contribute_nothing() {
        let scores = score(&kb(), &select(&["glowing skin"]), &Vitals::default());
        assert!(scores.iter().all(|s| s.confidence == 0));
    }

    #[test]
    fn test_adding_weighted_symptom_never_decreases() {
        let kb = kb();
        let base = score(&kb, &select(&["nausea"]), &Vitals::default());
        let more = score(&kb, &select(&["nausea", "vomiting"]), &Vitals::default());
        for (a, b) in base.iter().zip(more.iter()) {
            assert!(b.confidence >= a.confidence, "{} decreased", a.condition);
        }
    }

    #[test]
    fn test_score_is_pure() {
        let kb = kb();
        let symptoms = select(&["headache", "aura", "nausea"]);
        let vitals = Vitals::new(Some(30.0), Some(2.0), Some(37.0), Some(80.0));
        assert_eq!(score(&kb, &symptoms, &vitals), score(&kb, &symptoms, &vitals));
    }

    #[test]
    fn test_confidence_rounding() {
        assert_eq!(confidence(9, 16), 56);
        assert_eq!(confidence(2, 16), 13);
        assert_eq!(confidence(1, 15), 7);
        assert_eq!(confidence(0, 15), 0);
        assert_eq!(confidence(5, 0), 0);
        assert_eq!(confidence(20, 16), 100);
    }

    #[test]
    fn test_rank_is_stable_and_limited() {
        // Cold and allergic rhinitis both match; headache adds cold, influenza, covid.
        let scores = score(
            &kb(),
            &select(&["sneezing", "runny nose", "headache"]),
            &Vitals::default(),
        );
        let ranked = rank(scores.clone(), 4);
        assert_eq!(ranked.len(), 4);
        assert!(ranked.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        assert_eq!(ranked[0].id, ConditionId::CommonCold);

        let tied = rank(
            vec![
                ScoredCondition {
                    id: ConditionId::Influenza,
                    condition: "a".into(),
                    confidence: 10,
                    advice: vec![],
                },
                ScoredCondition {
                    id: ConditionId::Migraine,
                    condition: "b".into(),
                    confidence: 10,
                    advice: vec![],
                },
            ],
            4,
        );
        assert_eq!(tied[0].id, ConditionId::Influenza);
        assert_eq!(tied[1].id, ConditionId::Migraine);
        assert_eq!(rank(scores, 1).len(), 1);
    }

    #[test]
    fn test_merge_advice_dedupes_in_rank_order() {
        let entry = |id, advice: &[&str]| ScoredCondition {
            id,
            condition: String::new(),
            confidence: 50,
            advice: advice.iter().map(|a| a.to_string()).collect(),
        };
        let ranked = vec![
            entry(ConditionId::Influenza, &["rest", "fluids"]),
            entry(ConditionId::Covid19, &["test", "rest"]),
            entry(ConditionId::Migraine, &["dark room"]),
        ];
        assert_eq!(merge_advice(&ranked, 2), vec!["rest", "fluids", "test"]);
        assert!(merge_advice(&[], 2).is_empty());
    }
}
