//! Mood pipeline: ties analysis, storage and suggestions together.
//!
//! ```text
//! NewMoodEntry
//!   → validate, normalize the mood label (trimmed, lower-case)
//!   → analyze note (remote classifier, keyword fallback)   [only if a note is present]
//!   → persist record + analysis
//!   → select coping suggestions for the mood label
//!   → MoodLogOutcome
//!
//! insight request
//!   → fetch ≤30 most recent records (newest first)
//!   → pattern analyzer
//!   → PatternOutcome
//! ```

use std::sync::Arc;

use serde::Serialize;

use super::coping::CopingSelector;
use super::error::PipelineError;
use super::patterns::{analyze_user_patterns, INSIGHT_WINDOW};
use super::sentiment::{BatchAnalysisItem, SentimentAnalyzer};
use super::types::{CopingSuggestion, MoodRecord, NewMoodEntry, PatternOutcome, SentimentResult};
use crate::storage::MoodStore;

/// What a caller gets back after logging a mood.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodLogOutcome {
    pub record: MoodRecord,
    pub analysis: Option<SentimentResult>,
    pub suggestions: Vec<CopingSuggestion>,
}

/// Orchestrates the mood-insight components over a store.
#[derive(Clone)]
pub struct MoodPipeline {
    analyzer: Arc<dyn SentimentAnalyzer>,
    selector: CopingSelector,
    store: Arc<dyn MoodStore>,
}

impl MoodPipeline {
    pub fn new(
        analyzer: Arc<dyn SentimentAnalyzer>,
        selector: CopingSelector,
        store: Arc<dyn MoodStore>,
    ) -> Self {
        Self {
            analyzer,
            selector,
            store,
        }
    }

    pub fn selector(&self) -> &CopingSelector {
        &self.selector
    }

    /// Log a mood for `user_id`.
    pub async fn log_mood(
        &self,
        user_id: &str,
        mut entry: NewMoodEntry,
    ) -> Result<MoodLogOutcome, PipelineError> {
        entry.validate()?;
        // Stored labels must match the coping catalog and the insight rules.
        entry.mood = entry.mood.trim().to_lowercase();

        let analysis = match entry.analyzable_note() {
            Some(note) => Some(self.analyzer.analyze_sentiment(note).await),
            None => None,
        };

        let store = Arc::clone(&self.store);
        let owner = user_id.to_string();
        let to_save = analysis.clone();
        let record = tokio::task::spawn_blocking(move || {
            store.save_mood(&owner, &entry, to_save.as_ref())
        })
        .await??;

        let suggestions = self
            .selector
            .generate_coping_suggestions(&record.mood, None)
            .to_vec();

        log::info!(
            "Logged mood '{}' ({}) for user {}{}",
            record.mood,
            record.intensity,
            user_id,
            match &analysis {
                Some(a) if a.is_fallback => " [fallback analysis]",
                Some(_) => " [classifier analysis]",
                None => "",
            }
        );

        Ok(MoodLogOutcome {
            record,
            analysis,
            suggestions,
        })
    }

    /// Pattern insight over the user's most recent mood window.
    pub async fn user_insights(&self, user_id: &str) -> Result<PatternOutcome, PipelineError> {
        let store = Arc::clone(&self.store);
        let owner = user_id.to_string();
        let records =
            tokio::task::spawn_blocking(move || store.recent_moods(&owner, INSIGHT_WINDOW)).await??;

        log::debug!("Analyzing {} mood records for user {}", records.len(), user_id);
        Ok(analyze_user_patterns(&records))
    }

    /// Analyze free text without persisting anything.
    pub async fn analyze_text(&self, text: &str) -> SentimentResult {
        self.analyzer.analyze_sentiment(text).await
    }

    pub async fn analyze_batch(&self, texts: &[String]) -> Vec<BatchAnalysisItem> {
        self.analyzer.analyze_batch(texts).await
    }

    pub fn coping_suggestions(&self, mood: &str) -> &[CopingSuggestion] {
        self.selector.generate_coping_suggestions(mood, None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
