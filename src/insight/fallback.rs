//! Keyword fallback analyzer.
//!
//! A deterministic, rule-based substitute for the remote classifier. It is
//! used whenever the classifier is unreachable or misbehaves, and on its own
//! when the service runs in offline mode.
//!
//! Matching is plain substring containment on the lower-cased text, so
//! "sadness" counts as "sad". Each keyword contributes at most once.

use std::sync::Arc;

use super::types::{RiskLevel, Sentiment, SentimentResult};

/// Keywords that push the score up.
const POSITIVE_KEYWORDS: &[&str] = &[
    "happy",
    "great",
    "good",
    "excellent",
    "wonderful",
    "joy",
    "excited",
    "love",
];

/// Keywords that push the score down.
const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad",
    "bad",
    "terrible",
    "awful",
    "depressed",
    "anxious",
    "worried",
    "stressed",
    "hate",
    "angry",
];

/// Confidence reported for every fallback result.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Insight attached to every fallback result.
pub const FALLBACK_INSIGHT: &str = "Using fallback analysis. AI service unavailable.";

/// Read-only keyword configuration for the fallback analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordLexicon {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl KeywordLexicon {
    /// Build a lexicon from custom word lists. Keywords are lower-cased.
    pub fn new<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            positive: positive.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            negative: negative.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        Self::new(POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS)
    }
}

/// Rule-based sentiment analyzer.
#[derive(Debug, Clone, Default)]
pub struct FallbackAnalyzer {
    lexicon: Arc<KeywordLexicon>,
}

impl FallbackAnalyzer {
    pub fn new(lexicon: KeywordLexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    /// Score `text` against the lexicon. Total over any input.
    pub fn analyze_fallback(&self, text: &str) -> SentimentResult {
        let text_lower = text.to_lowercase();
        let mut score: i32 = 0;
        let mut detected: Vec<String> = Vec::new();

        for keyword in &self.lexicon.positive {
            if text_lower.contains(keyword.as_str()) {
                score += 1;
                push_unique(&mut detected, keyword);
            }
        }
        for keyword in &self.lexicon.negative {
            if text_lower.contains(keyword.as_str()) {
                score -= 1;
                push_unique(&mut detected, keyword);
            }
        }

        let (sentiment, risk_level) = classify(score);

        SentimentResult {
            sentiment,
            confidence: FALLBACK_CONFIDENCE,
            detected_emotions: detected,
            risk_level,
            insights: vec![FALLBACK_INSIGHT.to_string()],
            emotion_scores: Vec::new(),
            is_fallback: true,
        }
    }
}

/// Map a net keyword score to sentiment and risk. Order matters.
fn classify(score: i32) -> (Sentiment, RiskLevel) {
    if score > 0 {
        (Sentiment::Positive, RiskLevel::Low)
    } else if score < -2 {
        (Sentiment::Negative, RiskLevel::High)
    } else if score < 0 {
        (Sentiment::Negative, RiskLevel::Medium)
    } else {
        (Sentiment::Neutral, RiskLevel::Low)
    }
}

fn push_unique(detected: &mut Vec<String>, keyword: &str) {
    if !detected.iter().any(|k| k == keyword) {
        detected.push(keyword.to_string());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> FallbackAnalyzer {
        FallbackAnalyzer::default()
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let result = analyzer().analyze_fallback("");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.confidence, 0.5);
        assert!(result.detected_emotions.is_empty());
        assert!(result.is_fallback);
        assert_eq!(result.insights, vec![FALLBACK_INSIGHT.to_string()]);
    }

    #[test]
    fn test_positive_words_only() {
        for text in [
            "happy",
            "Great and GOOD",
            "so much joy and love",
            "excited, wonderful, excellent",
        ] {
            let result = analyzer().analyze_fallback(text);
            assert_eq!(result.sentiment, Sentiment::Positive, "text: {text}");
            assert_eq!(result.risk_level, RiskLevel::Low, "text: {text}");
        }
    }

    #[test]
    fn test_one_or_two_negatives_are_medium_risk() {
        let result = analyzer().analyze_fallback("I feel sad");
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.risk_level, RiskLevel::Medium);

        let result = analyzer().analyze_fallback("sad and worried");
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_three_negatives_are_high_risk() {
        let result = analyzer().analyze_fallback("Anxious, stressed and worried all week");
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.detected_emotions, vec!["anxious", "worried", "stressed"]);
    }

    #[test]
    fn test_substring_matching() {
        let result = analyzer().analyze_fallback("Overwhelming sadness");
        assert_eq!(result.detected_emotions, vec!["sad"]);
        assert_eq!(result.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let result = analyzer().analyze_fallback("sad sad sad");
        assert_eq!(result.detected_emotions, vec!["sad"]);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_mixed_text_cancels_out() {
        let result = analyzer().analyze_fallback("a good day after a bad night");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.detected_emotions, vec!["good", "bad"]);
    }

    #[test]
    fn test_custom_lexicon() {
        let analyzer = FallbackAnalyzer::new(KeywordLexicon::new(["Calm"], ["tired"]));
        assert_eq!(analyzer.lexicon().positive(), ["calm".to_string()]);
        let result = analyzer.analyze_fallback("calm but a little TIRED, mostly calm");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.detected_emotions, vec!["calm", "tired"]);
    }
}
