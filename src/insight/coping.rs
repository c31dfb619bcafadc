//! Coping suggestion selector.
//!
//! Suggestions come from a [`CopingCatalog`] keyed by lower-case mood label.
//! Every catalog carries a `neutral` entry, which is what unknown moods get.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::types::{CopingSuggestion, MoodRecord};

/// Catalog key used for moods without a dedicated entry.
pub const DEFAULT_MOOD: &str = "neutral";

/// Rejected catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Coping catalog has no 'neutral' entry")]
    MissingDefault,
}

/// Immutable mood → suggestions table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopingCatalog {
    entries: HashMap<String, Vec<CopingSuggestion>>,
}

impl CopingCatalog {
    /// Build a catalog from `(mood, suggestions)` pairs. Mood keys are
    /// lower-cased; a `neutral` entry is required.
    pub fn new<I, K>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, Vec<CopingSuggestion>)>,
        K: AsRef<str>,
    {
        let entries: HashMap<String, Vec<CopingSuggestion>> = entries
            .into_iter()
            .map(|(mood, suggestions)| (mood.as_ref().to_lowercase(), suggestions))
            .collect();
        if !entries.contains_key(DEFAULT_MOOD) {
            return Err(CatalogError::MissingDefault);
        }
        Ok(Self { entries })
    }

    /// Suggestions for `mood` (already lower-cased), or the neutral set.
    pub fn lookup(&self, mood: &str) -> &[CopingSuggestion] {
        self.entries
            .get(mood)
            .or_else(|| self.entries.get(DEFAULT_MOOD))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Mood labels with a dedicated entry.
    pub fn moods(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for CopingCatalog {
    fn default() -> Self {
        let entries = HashMap::from([
            (
                "anxious".to_string(),
                vec![
                    CopingSuggestion::new(
                        "Deep Breathing",
                        "Breathing",
                        "Try the 4-7-8 technique: Inhale for 4, hold for 7, exhale for 8",
                    ),
                    CopingSuggestion::new(
                        "Grounding Exercise",
                        "Mindfulness",
                        "Name 5 things you see, 4 you hear, 3 you touch, 2 you smell, 1 you taste",
                    ),
                    CopingSuggestion::new(
                        "Progressive Muscle Relaxation",
                        "Relaxation",
                        "Tense and relax each muscle group for 5 seconds",
                    ),
                ],
            ),
            (
                "sad".to_string(),
                vec![
                    CopingSuggestion::new(
                        "Gratitude Journal",
                        "Journaling",
                        "Write down 3 things you're grateful for today",
                    ),
                    CopingSuggestion::new(
                        "Reach Out",
                        "Social",
                        "Connect with a friend or loved one",
                    ),
                    CopingSuggestion::new(
                        "Gentle Movement",
                        "Physical",
                        "Take a short walk or do light stretching",
                    ),
                ],
            ),
            (
                "stressed".to_string(),
                vec![
                    CopingSuggestion::new(
                        "Time Management",
                        "Productivity",
                        "Break tasks into smaller, manageable steps",
                    ),
                    CopingSuggestion::new(
                        "Mindful Break",
                        "Mindfulness",
                        "Take a 5-minute break to focus on your breath",
                    ),
                    CopingSuggestion::new(
                        "Physical Activity",
                        "Physical",
                        "Exercise can help reduce stress hormones",
                    ),
                ],
            ),
            (
                "happy".to_string(),
                vec![
                    CopingSuggestion::new(
                        "Savor the Moment",
                        "Mindfulness",
                        "Take time to fully appreciate this positive feeling",
                    ),
                    CopingSuggestion::new(
                        "Share Joy",
                        "Social",
                        "Share your happiness with others",
                    ),
                ],
            ),
            (
                DEFAULT_MOOD.to_string(),
                vec![
                    CopingSuggestion::new(
                        "Mindfulness Check-in",
                        "Mindfulness",
                        "Take a moment to check in with how you're feeling",
                    ),
                    CopingSuggestion::new(
                        "Self-Care Activity",
                        "Self-Care",
                        "Do something kind for yourself today",
                    ),
                ],
            ),
        ]);
        Self { entries }
    }
}

/// Picks coping strategies for a mood.
#[derive(Debug, Clone, Default)]
pub struct CopingSelector {
    catalog: Arc<CopingCatalog>,
}

impl CopingSelector {
    pub fn new(catalog: CopingCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &CopingCatalog {
        &self.catalog
    }

    /// Ranked suggestions for `mood`, case-insensitive.
    ///
    /// `recent_history` is accepted for future personalization and does not
    /// change the result today.
    pub fn generate_coping_suggestions(
        &self,
        mood: &str,
        recent_history: Option<&[MoodRecord]>,
    ) -> &[CopingSuggestion] {
        if let Some(history) = recent_history {
            log::trace!("Coping lookup for '{}' with {} history records", mood, history.len());
        }
        self.catalog.lookup(&mood.trim().to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn names(suggestions: &[CopingSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.strategy_name.as_str()).collect()
    }

    #[test]
    fn test_known_moods_return_curated_lists() {
        let selector = CopingSelector::default();
        assert_eq!(
            names(selector.generate_coping_suggestions("anxious", None)),
            vec!["Deep Breathing", "Grounding Exercise", "Progressive Muscle Relaxation"]
        );
        assert_eq!(
            names(selector.generate_coping_suggestions("happy", None)),
            vec!["Savor the Moment", "Share Joy"]
        );
        for mood in ["anxious", "sad", "stressed", "happy", "neutral"] {
            let n = selector.generate_coping_suggestions(mood, None).len();
            assert!((2..=3).contains(&n), "{mood} has {n} entries");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let selector = CopingSelector::default();
        assert_eq!(
            selector.generate_coping_suggestions("ANXIOUS", None),
            selector.generate_coping_suggestions("anxious", None)
        );
        assert_eq!(
            selector.generate_coping_suggestions("Sad", None),
            selector.generate_coping_suggestions("sad", None)
        );
    }

    #[test]
    fn test_unknown_mood_gets_neutral_entry() {
        let selector = CopingSelector::default();
        assert_eq!(
            selector.generate_coping_suggestions("unknown-mood", None),
            selector.catalog().lookup(DEFAULT_MOOD)
        );
        assert_eq!(
            names(selector.generate_coping_suggestions("", None)),
            vec!["Mindfulness Check-in", "Self-Care Activity"]
        );
    }

    #[test]
    fn test_history_does_not_change_result() {
        let selector = CopingSelector::default();
        let history = vec![
            MoodRecord::new("u1", "sad", 8),
            MoodRecord::new("u1", "sad", 9),
        ];
        assert_eq!(
            selector.generate_coping_suggestions("stressed", Some(&history)),
            selector.generate_coping_suggestions("stressed", None)
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let selector = CopingSelector::default();
        let first = selector.generate_coping_suggestions("stressed", None).to_vec();
        for _ in 0..5 {
            assert_eq!(selector.generate_coping_suggestions("stressed", None), first.as_slice());
        }
    }

    #[test]
    fn test_catalog_requires_neutral_entry() {
        let err = CopingCatalog::new([("happy", vec![])]).unwrap_err();
        assert_eq!(err, CatalogError::MissingDefault);

        let catalog = CopingCatalog::new([
            ("Neutral", vec![CopingSuggestion::new("Rest", "Self-Care", "Take a nap")]),
        ])
        .unwrap();
        let selector = CopingSelector::new(catalog);
        assert_eq!(names(selector.generate_coping_suggestions("angry", None)), vec!["Rest"]);
    }
}
