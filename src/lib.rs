//! # MindEase
//!
//! Mood-insight backend for a mental-wellness tracker.
//!
//! The core is the mood-insight pipeline: sentiment analysis of mood notes
//! (remote classifier with a deterministic keyword fallback), coping
//! suggestions keyed by mood, and a pattern analyzer that turns a user's
//! recent mood history into a short trend summary. Storage and the HTTP
//! surface are thin layers around it.

pub mod config;
pub mod insight;
pub mod server;
pub mod storage;

pub use config::MindEaseConfig;
pub use insight::{
    analyze_user_patterns, CopingSelector, FallbackAnalyzer, MoodPipeline, PatternOutcome,
    SentimentAnalyzer, SentimentClient, SentimentResult,
};
pub use storage::{InMemoryMoodStore, MoodStore, SqliteMoodStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
