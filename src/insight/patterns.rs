//! Longitudinal mood pattern analysis.
//!
//! Aggregates a user's recent mood window into an average intensity, a
//! per-mood distribution and a dominant mood, then picks one insight text.
//!
//! Ties for the dominant mood go to the label seen first in the input. The
//! input is ordered newest first, so in practice the most recent of the tied
//! labels wins.

use std::collections::HashMap;

use super::types::{MoodRecord, PatternInsight, PatternOutcome};

/// Number of most-recent records considered for an insight.
pub const INSIGHT_WINDOW: usize = 30;

pub(crate) const HIGH_STRESS_INSIGHT: &str =
    "Your stress levels have been high. Consider talking to someone or trying relaxation exercises.";
const MODERATE_STRESS_INSIGHT: &str =
    "You've been experiencing some stress. Regular breaks and self-care can help.";
const LOW_MOOD_INSIGHT: &str =
    "You've been feeling down lately. Remember, it's okay to reach out for support.";
const POSITIVE_INSIGHT: &str = "Great to see positive moods! Keep doing what works for you.";
const BALANCED_INSIGHT: &str =
    "Your mood has been fairly balanced. Keep tracking to maintain awareness.";

/// Summarize `records` (newest first). Empty input yields
/// [`PatternOutcome::NotEnoughData`].
pub fn analyze_user_patterns(records: &[MoodRecord]) -> PatternOutcome {
    if records.is_empty() {
        return PatternOutcome::NotEnoughData;
    }

    let mut distribution: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    let mut intensity_sum: u64 = 0;

    for record in records {
        intensity_sum += u64::from(record.intensity);
        let count = distribution.entry(record.mood.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(&record.mood);
        }
        *count += 1;
    }

    let total = records.len();
    let average_intensity = round2(intensity_sum as f64 / total as f64);

    // Strict `>` keeps the earliest label on ties.
    let mut dominant_mood = first_seen[0];
    let mut dominant_count = 0;
    for &mood in &first_seen {
        let count = distribution[mood];
        if count > dominant_count {
            dominant_mood = mood;
            dominant_count = count;
        }
    }

    let insight_text = insight_text(dominant_mood, average_intensity).to_string();

    PatternOutcome::Insight(PatternInsight {
        average_intensity,
        dominant_mood: dominant_mood.to_string(),
        mood_distribution: distribution,
        total_entries: total,
        insight_text,
    })
}

/// First matching rule wins.
fn insight_text(dominant_mood: &str, average_intensity: f64) -> &'static str {
    match dominant_mood {
        "anxious" | "stressed" if average_intensity > 7.0 => HIGH_STRESS_INSIGHT,
        "anxious" | "stressed" => MODERATE_STRESS_INSIGHT,
        "sad" if average_intensity > 6.0 => LOW_MOOD_INSIGHT,
        "happy" => POSITIVE_INSIGHT,
        _ => BALANCED_INSIGHT,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
