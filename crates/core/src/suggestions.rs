//! Dictionary lookups for symptom entry.

use crate::knowledge_base::KnowledgeBase;
use crate::selection::SymptomSelection;

/// Returns dictionary symptoms containing `query`, in dictionary order.
///
/// The query is trimmed and lower-cased; an empty query matches every entry. Symptoms that
/// are already selected are skipped, and at most `limit` results are returned.
pub fn suggest<'kb>(
    kb: &'kb KnowledgeBase,
    query: &str,
    selection: &SymptomSelection,
    limit: usize,
) -> Vec<&'kb str> {
    let query = query.trim().to_lowercase();
    kb.dictionary()
        .iter()
        .filter(|symptom| symptom.as_str().contains(query.as_str()))
        .filter(|symptom| !selection.contains(symptom))
        .take(limit)
        .map(|symptom| symptom.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_lists_dictionary_head() {
        let kb = KnowledgeBase::standard().unwrap();
        let results = suggest(&kb, "", &SymptomSelection::new(), 12);
        assert_eq!(results.len(), 12);
        assert_eq!(results[0], "fever");
        assert_eq!(results[11], "sore throat");
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let kb = KnowledgeBase::standard().unwrap();
        let results = suggest(&kb, "  HEADACHE ", &SymptomSelection::new(), 12);
        assert_eq!(
            results,
            vec!["headache", "unilateral headache", "throbbing headache"]
        );
    }

    #[test]
    fn test_excludes_selected() {
        let kb = KnowledgeBase::standard().unwrap();
        let selection: SymptomSelection = ["fever"].into_iter().collect();
        let results = suggest(&kb, "fever", &selection, 12);
        assert_eq!(results, vec!["low-grade fever", "stiff neck with fever"]);
    }

    #[test]
    fn test_no_match() {
        let kb = KnowledgeBase::standard().unwrap();
        assert!(suggest(&kb, "xyz", &SymptomSelection::new(), 12).is_empty());
    }
}
