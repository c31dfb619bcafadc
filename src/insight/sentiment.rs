//! Remote sentiment client.
//!
//! Sends note text to the external classification service and maps its
//! answer into a [`SentimentResult`]. Any failure (transport error, timeout,
//! non-success status, unparsable body) is logged and replaced by the
//! keyword fallback. There is exactly one attempt per call.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::error::ClassifierError;
use super::fallback::FallbackAnalyzer;
use super::types::{RiskLevel, Sentiment, SentimentResult};

/// Default request timeout for the classifier call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of texts processed by one batch call.
pub const MAX_BATCH_SIZE: usize = 50;

/// Texts shorter than this (in chars, after trimming) are too short to classify.
pub const MIN_TEXT_LEN: usize = 3;

/// Single-text analysis only looks at this many leading chars.
pub const MAX_TEXT_LEN: usize = 1000;

const PREVIEW_LEN: usize = 100;

/// Anything that can turn text into a [`SentimentResult`] without failing.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Analyze a single piece of text.
    async fn analyze_sentiment(&self, text: &str) -> SentimentResult;

    /// Analyze up to [`MAX_BATCH_SIZE`] texts, skipping ones that are too
    /// short to classify.
    async fn analyze_batch(&self, texts: &[String]) -> Vec<BatchAnalysisItem> {
        let mut results = Vec::new();
        for text in texts.iter().take(MAX_BATCH_SIZE) {
            if text.trim().chars().count() < MIN_TEXT_LEN {
                continue;
            }
            let analysis = self.analyze_sentiment(text).await;
            results.push(BatchAnalysisItem::new(text, &analysis));
        }
        results
    }
}

#[async_trait]
impl SentimentAnalyzer for FallbackAnalyzer {
    async fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        self.analyze_fallback(text)
    }
}

/// Condensed per-text result of a batch analysis.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalysisItem {
    /// The text, shortened to a preview when long.
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub primary_emotion: String,
    pub risk_level: RiskLevel,
    pub is_fallback: bool,
}

impl BatchAnalysisItem {
    fn new(text: &str, analysis: &SentimentResult) -> Self {
        Self {
            text: preview(text),
            sentiment: analysis.sentiment,
            confidence: analysis.confidence,
            primary_emotion: analysis.primary_emotion().unwrap_or("neutral").to_string(),
            risk_level: analysis.risk_level,
            is_fallback: analysis.is_fallback,
        }
    }
}

/// The first [`MAX_TEXT_LEN`] chars of `text`.
pub fn clip_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_TEXT_LEN) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_LEN {
        let head: String = text.chars().take(PREVIEW_LEN).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Success body of `POST /analyze` on the classifier.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassifierResponse {
    sentiment: Sentiment,
    confidence: f64,
    #[serde(default)]
    detected_emotions: Vec<String>,
    risk_level: RiskLevel,
    #[serde(default)]
    insights: Vec<String>,
    #[serde(default)]
    emotion_scores: Vec<Value>,
}

impl ClassifierResponse {
    fn into_result(self) -> Result<SentimentResult, ClassifierError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ClassifierError::Malformed(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        let mut detected_emotions: Vec<String> = Vec::with_capacity(self.detected_emotions.len());
        for emotion in self.detected_emotions {
            if !detected_emotions.contains(&emotion) {
                detected_emotions.push(emotion);
            }
        }
        Ok(SentimentResult {
            sentiment: self.sentiment,
            confidence: self.confidence,
            detected_emotions,
            risk_level: self.risk_level,
            insights: self.insights,
            emotion_scores: self.emotion_scores,
            is_fallback: false,
        })
    }
}

// ---------------------------------------------------------------------------
// SentimentClient
// ---------------------------------------------------------------------------

/// HTTP client for the external classification service.
///
/// # Example
///
/// ```ignore
/// let client = SentimentClient::new("http://localhost:8000", Duration::from_secs(10))?;
/// let result = client.analyze_sentiment("I feel great today").await;
/// ```
#[derive(Debug, Clone)]
pub struct SentimentClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
    fallback: FallbackAnalyzer,
}

impl SentimentClient {
    /// Create a client for the classifier at `base_url`, using the default
    /// keyword lexicon for fallbacks.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_fallback(base_url, timeout, FallbackAnalyzer::default())
    }

    pub fn with_fallback(
        base_url: impl Into<String>,
        timeout: Duration,
        fallback: FallbackAnalyzer,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            timeout,
            http,
            fallback,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url.trim_end_matches('/'))
    }

    /// Single classifier round trip, without any fallback.
    async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError> {
        let url = self.analyze_url();
        log::debug!("Requesting sentiment analysis from: {}", url);

        let resp = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifierError::Status { status, body });
        }

        let body = resp.bytes().await?;
        let parsed: ClassifierResponse = serde_json::from_slice(&body)
            .map_err(|e| ClassifierError::Malformed(e.to_string()))?;
        parsed.into_result()
    }
}

/// Classifier error text followed by each underlying cause.
fn failure_report(err: ClassifierError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

#[async_trait]
impl SentimentAnalyzer for SentimentClient {
    async fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        match self.classify(text).await {
            Ok(result) => {
                log::debug!(
                    "Classifier result: {} ({} risk, confidence {:.2})",
                    result.sentiment,
                    result.risk_level,
                    result.confidence
                );
                result
            }
            Err(e) => {
                log::warn!(
                    "Sentiment service at {} failed, using fallback analysis: {}",
                    self.base_url,
                    failure_report(e)
                );
                self.fallback.analyze_fallback(text)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
