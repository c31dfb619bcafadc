//! SQLite-backed mood store.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text so that string
//! ordering matches chronological ordering. Analyses are stored as JSON.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use super::{MoodStore, StoreError};
use crate::insight::types::{MoodRecord, NewMoodEntry, SentimentResult};

/// Mood store persisted in a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteMoodStore {
    db_path: PathBuf,
}

type RawRow = (String, String, String, i64, Option<String>, Option<String>, String);

impl SqliteMoodStore {
    /// Open (and if needed create) the database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { db_path };
        store.initialize_db()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.db_path).inspect_err(|e| {
            log::error!("Failed to open mood database {}: {}", self.db_path.display(), e);
        })?;
        Ok(conn)
    }

    fn initialize_db(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS mood_entries (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                user_id TEXT NOT NULL,
                mood TEXT NOT NULL,
                intensity INTEGER NOT NULL,
                note TEXT,
                analysis TEXT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_mood_entries_user_time
                ON mood_entries (user_id, created_at);",
        )?;
        Ok(())
    }

    /// Insert an already-built record, e.g. to seed history.
    pub fn insert(&self, record: &MoodRecord) -> Result<(), StoreError> {
        let analysis_json = record
            .analysis
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO mood_entries (id, user_id, mood, intensity, note, analysis, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.user_id,
                record.mood,
                i64::from(record.intensity),
                record.note,
                analysis_json,
                format_timestamp(&record.created_at),
            ],
        )?;
        Ok(())
    }
}

impl MoodStore for SqliteMoodStore {
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
        self.insert(&record)?;
        log::debug!("Saved mood entry {} for user {}", record.id, user_id);
        Ok(record)
    }

    fn recent_moods(&self, user_id: &str, limit: usize) -> Result<Vec<MoodRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, mood, intensity, note, analysis, created_at
             FROM mood_entries
             WHERE user_id = ?1
             ORDER BY created_at DESC, seq DESC
             LIMIT ?2",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![user_id, limit], |row| -> rusqlite::Result<RawRow> {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(record_from_row(row?)?);
        }
        Ok(records)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn record_from_row(row: RawRow) -> Result<MoodRecord, StoreError> {
    let (id, user_id, mood, intensity, note, analysis, created_at) = row;

    let intensity = u8::try_from(intensity).map_err(|_| StoreError::Corrupt {
        id: id.clone(),
        message: format!("intensity {} out of range", intensity),
    })?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| StoreError::Corrupt {
            id: id.clone(),
            message: format!("bad timestamp '{}': {}", created_at, e),
        })?
        .with_timezone(&Utc);
    let analysis = analysis
        .map(|json| serde_json::from_str::<SentimentResult>(&json))
        .transpose()?;

    Ok(MoodRecord {
        id,
        user_id,
        mood,
        intensity,
        note,
        analysis,
        created_at,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqliteMoodStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteMoodStore::new(dir.path().join("nested").join("moods.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_and_read_back() {
        let (_dir, store) = temp_store();
        let analysis = crate::insight::fallback::FallbackAnalyzer::default()
            .analyze_fallback("worried and stressed");
        let entry = NewMoodEntry::new("stressed", 8, Some("worried and stressed".into()));

        let saved = store.save_mood("alice", &entry, Some(&analysis)).unwrap();
        let loaded = store.recent_moods("alice", 30).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, saved.id);
        assert_eq!(loaded[0].mood, "stressed");
        assert_eq!(loaded[0].intensity, 8);
        assert_eq!(loaded[0].note.as_deref(), Some("worried and stressed"));
        assert_eq!(loaded[0].analysis.as_ref(), Some(&analysis));
        assert_eq!(
            format_timestamp(&loaded[0].created_at),
            format_timestamp(&saved.created_at)
        );
    }

    #[test]
    fn test_recent_moods_ordering_limit_and_user_filter() {
        let (_dir, store) = temp_store();
        let base = Utc::now();
        for i in 0..35 {
            let mut record = MoodRecord::new("alice", format!("mood-{i}"), 5);
            record.created_at = base + Duration::seconds(i);
            store.insert(&record).unwrap();
        }
        store.insert(&MoodRecord::new("bob", "happy", 2)).unwrap();

        let recent = store.recent_moods("alice", 30).unwrap();
        assert_eq!(recent.len(), 30);
        assert_eq!(recent[0].mood, "mood-34");
        assert_eq!(recent[29].mood, "mood-5");
        assert!(recent.iter().all(|r| r.user_id == "alice"));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("moods.db");
        {
            let store = SqliteMoodStore::new(&path).unwrap();
            store
                .save_mood("alice", &NewMoodEntry::new("happy", 4, None), None)
                .unwrap();
        }
        let store = SqliteMoodStore::new(&path).unwrap();
        let recent = store.recent_moods("alice", 30).unwrap();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].analysis.is_none());
    }
}
