//! In-process mood store.

use chrono::Utc;
use parking_lot::RwLock;

use super::{MoodStore, StoreError};
use crate::insight::types::{MoodRecord, NewMoodEntry, SentimentResult};

/// Keeps every record in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMoodStore {
    records: RwLock<Vec<MoodRecord>>,
}

impl InMemoryMoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-built record, e.g. to seed history.
    pub fn insert(&self, record: MoodRecord) {
        self.records.write().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl MoodStore for InMemoryMoodStore {
    fn save_mood(
        &self,
        user_id: &str,
        entry: &NewMoodEntry,
        analysis: Option<&SentimentResult>,
    ) -> Result<MoodRecord, StoreError> {
        let record = MoodRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            mood: entry.mood.clone(),
            intensity: entry.intensity,
            note: entry.note.clone(),
            analysis: analysis.cloned(),
            created_at: Utc::now(),
        };
        self.records.write().push(record.clone());
        Ok(record)
    }

    fn recent_moods(&self, user_id: &str, limit: usize) -> Result<Vec<MoodRecord>, StoreError> {
        let records = self.records.read();
        let mut matching: Vec<&MoodRecord> = records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .collect();
        // Stable sort: equal timestamps keep newest-inserted first.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching.into_iter().take(limit).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_recent_moods_newest_first_and_limited() {
        let store = InMemoryMoodStore::new();
        let base = Utc::now();
        for (i, mood) in ["sad", "happy", "stressed"].iter().enumerate() {
            let mut record = MoodRecord::new("alice", *mood, 5);
            record.created_at = base + Duration::minutes(i as i64);
            store.insert(record);
        }
        store.insert(MoodRecord::new("bob", "happy", 3));

        let recent = store.recent_moods("alice", 2).unwrap();
        let moods: Vec<&str> = recent.iter().map(|r| r.mood.as_str()).collect();
        assert_eq!(moods, vec!["stressed", "happy"]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_out_of_order_inserts_are_sorted() {
        let store = InMemoryMoodStore::new();
        let base = Utc::now();
        let mut late = MoodRecord::new("alice", "happy", 5);
        late.created_at = base + Duration::hours(1);
        let mut early = MoodRecord::new("alice", "sad", 5);
        early.created_at = base;
        store.insert(late);
        store.insert(early);

        let recent = store.recent_moods("alice", 10).unwrap();
        assert_eq!(recent[0].mood, "happy");
        assert_eq!(recent[1].mood, "sad");
    }

    #[test]
    fn test_save_mood_keeps_analysis() {
        let store = InMemoryMoodStore::new();
        let analysis =
            crate::insight::fallback::FallbackAnalyzer::default().analyze_fallback("sad");
        let entry = NewMoodEntry::new("sad", 6, Some("sad".into()));
        let saved = store.save_mood("alice", &entry, Some(&analysis)).unwrap();

        assert_eq!(saved.user_id, "alice");
        assert_eq!(saved.analysis.as_ref(), Some(&analysis));
        assert_eq!(store.recent_moods("alice", 30).unwrap(), vec![saved]);
        assert!(store.recent_moods("nobody", 30).unwrap().is_empty());
    }
}
