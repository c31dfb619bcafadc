//! Mood-insight pipeline.
//!
//! ```text
//! note text ──► SentimentClient ──(any failure)──► FallbackAnalyzer
//!                     │
//!                     ▼
//!               SentimentResult
//!
//! mood label ──► CopingSelector ──► [CopingSuggestion]
//!
//! recent MoodRecords ──► analyze_user_patterns ──► PatternOutcome
//! ```
//!
//! [`pipeline::MoodPipeline`] wires the pieces to a [`crate::storage::MoodStore`].

pub mod coping;
pub mod error;
pub mod fallback;
pub mod patterns;
pub mod pipeline;
pub mod sentiment;
pub mod types;

pub use coping::{CopingCatalog, CopingSelector};
pub use error::{ClassifierError, PipelineError, ValidationError};
pub use fallback::{FallbackAnalyzer, KeywordLexicon};
pub use patterns::{analyze_user_patterns, INSIGHT_WINDOW};
pub use pipeline::{MoodLogOutcome, MoodPipeline};
pub use sentiment::{BatchAnalysisItem, SentimentAnalyzer, SentimentClient};
pub use types::{
    CopingSuggestion, MoodRecord, NewMoodEntry, PatternInsight, PatternOutcome, RiskLevel,
    Sentiment, SentimentResult,
};
