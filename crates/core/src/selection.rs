//! The active symptom selection.
//!
//! A set of normalized symptom labels that keeps insertion order for display and history,
//! while scoring and detection only ever test membership.

use triage_types::SymptomLabel;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymptomSelection {
    symptoms: Vec<SymptomLabel>,
}

impl SymptomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `raw` and adds it.
    ///
    /// Returns `false` when the input is empty after trimming or is already selected.
    /// Unknown symptoms are accepted.
    pub fn add(&mut self, raw: &str) -> bool {
        match SymptomLabel::new(raw) {
            Ok(label) => self.insert(label),
            Err(_) => false,
        }
    }

    /// Adds an already-normalized label. Returns `false` for a duplicate.
    pub fn insert(&mut self, label: SymptomLabel) -> bool {
        if self.symptoms.contains(&label) {
            return false;
        }
        self.symptoms.push(label);
        true
    }

    /// Removes a symptom by (normalized) text. Returns `true` if it was selected.
    pub fn remove(&mut self, raw: &str) -> bool {
        let Ok(label) = SymptomLabel::new(raw) else {
            return false;
        };
        let before = self.symptoms.len();
        self.symptoms.retain(|s| s != &label);
        self.symptoms.len() != before
    }

    pub fn clear(&mut self) {
        self.symptoms.clear();
    }

    pub fn contains(&self, label: &SymptomLabel) -> bool {
        self.symptoms.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomLabel> {
        self.symptoms.iter()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Symptoms in insertion order.
    pub fn as_slice(&self) -> &[SymptomLabel] {
        &self.symptoms
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for raw in iter {
            selection.add(raw.as_ref());
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_normalizes_and_dedupes() {
        let mut selection = SymptomSelection::new();
        assert!(selection.add("  Fever "));
        assert!(!selection.add("FEVER"));
        assert!(!selection.add("   "));
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&SymptomLabel::new("fever").unwrap()));
    }

    #[test]
    fn test_keeps_insertion_order() {
        let selection: SymptomSelection = ["chills", "fever", "aura"].into_iter().collect();
        let order: Vec<&str> = selection.iter().map(|s| s.as_str()).collect();
        assert_eq!(order, vec!["chills", "fever", "aura"]);
    }

    #[test]
    fn test_accepts_unknown_symptoms() {
        let mut selection = SymptomSelection::new();
        assert!(selection.add("purple toenails"));
        assert_eq!(selection.as_slice()[0].as_str(), "purple toenails");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut selection: SymptomSelection = ["fever", "cough"].into_iter().collect();
        assert!(selection.remove("Fever"));
        assert!(!selection.remove("fever"));
        assert_eq!(selection.len(), 1);
        selection.clear();
        assert!(selection.is_empty());
    }
}
