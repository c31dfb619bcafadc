//! Mood record storage.
//!
//! The insight pipeline only needs two things from storage: persist a new
//! mood log, and read back a user's most recent records, newest first.

pub mod memory;
pub mod sqlite;

use thiserror::Error;

use crate::insight::types::{MoodRecord, NewMoodEntry, SentimentResult};

pub use memory::InMemoryMoodStore;
pub use sqlite::SqliteMoodStore;

/// Errors from a mood store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record {id}: {message}")]
    Corrupt { id: String, message: String },
}

/// Storage backend for mood records.
pub trait MoodStore: Send + Sync {
    /// Persist a new mood log with its optional analysis.
    fn save_mood(
        &self,
        user_id: &str,
        entry: &NewMoodEntry,
        analysis: Option<&SentimentResult>,
    ) -> Result<MoodRecord, StoreError>;

    /// Up to `limit` records for `user_id`, newest first.
    fn recent_moods(&self, user_id: &str, limit: usize) -> Result<Vec<MoodRecord>, StoreError>;
}
