//! Value types shared by the mood-insight pipeline.
//!
//! Everything here is plain data: produced fresh per call, never mutated
//! after construction, and serialized straight into HTTP responses.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationError;

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Coarse polarity of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// Urgency indicator attached to a sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// Outcome of analyzing one piece of free text.
///
/// Either mapped from the remote classifier (`is_fallback == false`) or
/// computed by the keyword fallback (`is_fallback == true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    /// Deduplicated, in the order first detected.
    pub detected_emotions: Vec<String>,
    pub risk_level: RiskLevel,
    pub insights: Vec<String>,
    /// Raw classifier scores, passed through untouched.
    pub emotion_scores: Vec<Value>,
    pub is_fallback: bool,
}

impl SentimentResult {
    /// First detected emotion, if any.
    pub fn primary_emotion(&self) -> Option<&str> {
        self.detected_emotions.first().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Mood records
// ---------------------------------------------------------------------------

/// Lowest accepted mood intensity.
pub const MIN_INTENSITY: u8 = 1;
/// Highest accepted mood intensity.
pub const MAX_INTENSITY: u8 = 10;

/// A mood log as submitted by a user, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMoodEntry {
    pub mood: String,
    pub intensity: u8,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewMoodEntry {
    pub fn new(mood: impl Into<String>, intensity: u8, note: Option<String>) -> Self {
        Self {
            mood: mood.into(),
            intensity,
            note,
        }
    }

    /// Boundary checks applied before an entry reaches the pipeline.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.mood.trim().is_empty() {
            return Err(ValidationError::MissingMood);
        }
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity) {
            return Err(ValidationError::IntensityOutOfRange(self.intensity));
        }
        Ok(())
    }

    /// The note, if it carries any non-whitespace text.
    pub fn analyzable_note(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// A persisted mood log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodRecord {
    pub id: String,
    pub user_id: String,
    pub mood: String,
    pub intensity: u8,
    pub note: Option<String>,
    pub analysis: Option<SentimentResult>,
    pub created_at: DateTime<Utc>,
}

impl MoodRecord {
    /// Minimal record, mostly useful when feeding the pattern analyzer.
    pub fn new(user_id: impl Into<String>, mood: impl Into<String>, intensity: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            mood: mood.into(),
            intensity,
            note: None,
            analysis: None,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Coping suggestions
// ---------------------------------------------------------------------------

/// One self-help strategy from the coping catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopingSuggestion {
    pub strategy_name: String,
    pub category: String,
    pub description: String,
}

impl CopingSuggestion {
    pub fn new(
        strategy_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            category: category.into(),
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern insights
// ---------------------------------------------------------------------------

/// Aggregate view over a user's recent mood window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInsight {
    /// Rounded to two decimals.
    pub average_intensity: f64,
    pub dominant_mood: String,
    pub mood_distribution: HashMap<String, usize>,
    pub total_entries: usize,
    pub insight_text: String,
}

/// Message returned alongside [`PatternOutcome::NotEnoughData`].
pub const NOT_ENOUGH_DATA_MESSAGE: &str = "Not enough data yet. Keep logging your moods!";

/// Result of a pattern analysis: an insight, or a marker that the user has
/// no history yet.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternOutcome {
    Insight(PatternInsight),
    NotEnoughData,
}

impl PatternOutcome {
    pub fn insight(&self) -> Option<&PatternInsight> {
        match self {
            Self::Insight(insight) => Some(insight),
            Self::NotEnoughData => None,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum PatternOutcomeWire<'a> {
    Ok(&'a PatternInsight),
    NotEnoughData { message: &'static str },
}

impl Serialize for PatternOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Insight(insight) => PatternOutcomeWire::Ok(insight),
            Self::NotEnoughData => PatternOutcomeWire::NotEnoughData {
                message: NOT_ENOUGH_DATA_MESSAGE,
            },
        };
        wire.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
