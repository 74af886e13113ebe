//! High score leaderboard
//!
//! Every finished run is recorded; the leaderboard is a query over all runs.
//! Timestamps are SQLite `datetime('now')` strings (UTC, `YYYY-MM-DD HH:MM:SS`),
//! which sort correctly as text.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Number of scores shown on the game-over screen
pub const DEFAULT_TOP_SCORES: usize = 5;

/// Placeholder timestamp for an empty store
pub const NO_TIMESTAMP: &str = "N/A";

/// A single recorded run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u64,
    pub timestamp: String,
}

/// Persistence contract for finished runs
pub trait ScoreStore {
    /// Record a run's score with the current wall-clock time
    fn insert(&mut self, score: u64) -> Result<(), StoreError>;

    /// Up to `n` entries, highest score first
    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>, StoreError>;

    /// Best score ever, 0 if empty
    fn max_score(&self) -> Result<u64, StoreError>;

    /// Best entry, or `(0, "N/A")` if empty
    fn top_one(&self) -> Result<ScoreEntry, StoreError> {
        Ok(self
            .top_n(1)?
            .into_iter()
            .next()
            .unwrap_or_else(|| ScoreEntry {
                score: 0,
                timestamp: NO_TIMESTAMP.to_string(),
            }))
    }
}

/// SQLite-backed score store
pub struct SqliteScoreStore {
    conn: Connection,
}

impl SqliteScoreStore {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::init(conn)?;
        log::info!("Score store opened at {}", path.display());
        Ok(store)
    }

    /// Throwaway store (tests, or when the on-disk store is unavailable)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS high_scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                score INTEGER NOT NULL,
                date TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Record a score with an explicit timestamp
    pub fn insert_with_timestamp(&mut self, score: u64, timestamp: &str) -> Result<(), StoreError> {
        let score = to_column(score)?;
        self.conn.execute(
            "INSERT INTO high_scores (score, date) VALUES (?1, ?2)",
            params![score, timestamp],
        )?;
        Ok(())
    }

    /// Number of recorded runs
    pub fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM high_scores", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ScoreStore for SqliteScoreStore {
    fn insert(&mut self, score: u64) -> Result<(), StoreError> {
        let score = to_column(score)?;
        self.conn.execute(
            "INSERT INTO high_scores (score, date) VALUES (?1, datetime('now'))",
            params![score],
        )?;
        log::debug!("Recorded score {score}");
        Ok(())
    }

    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        // Ties resolve by insertion order so repeated reads are identical
        let mut stmt = self
            .conn
            .prepare("SELECT score, date FROM high_scores ORDER BY score DESC, id ASC LIMIT ?1")?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (score, timestamp) = row?;
            entries.push(ScoreEntry {
                score: from_column(score)?,
                timestamp,
            });
        }
        Ok(entries)
    }

    fn max_score(&self) -> Result<u64, StoreError> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(score) FROM high_scores", [], |row| row.get(0))
            .optional()?
            .flatten();
        max.map(from_column).transpose().map(|m| m.unwrap_or(0))
    }
}

fn to_column(score: u64) -> Result<i64, StoreError> {
    i64::try_from(score).map_err(|_| StoreError::ScoreOutOfRange(score))
}

fn from_column(score: i64) -> Result<u64, StoreError> {
    u64::try_from(score).map_err(|_| StoreError::CorruptScore(score))
}

/// Trim a stored timestamp to minutes for display (`YYYY-MM-DD HH:MM`)
///
/// Anything that isn't a full timestamp (such as "N/A") passes through.
pub fn format_timestamp(timestamp: &str) -> String {
    let bytes = timestamp.as_bytes();
    let looks_like_datetime = bytes.len() >= 16
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[10] == b' '
        && bytes[13] == b':';
    match timestamp.get(..16) {
        Some(minutes) if looks_like_datetime => minutes.to_string(),
        _ => timestamp.to_string(),
    }
}

/// One leaderboard line: `1.   300 - 2024-05-01 12:30`
pub fn format_entry(rank: usize, entry: &ScoreEntry) -> String {
    format!(
        "{rank}. {:5} - {}",
        entry.score,
        format_timestamp(&entry.timestamp)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn memory_store() -> SqliteScoreStore {
        SqliteScoreStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = memory_store();
        assert!(store.is_empty().unwrap());
        assert!(store.top_n(5).unwrap().is_empty());
        assert_eq!(store.max_score().unwrap(), 0);
        let top = store.top_one().unwrap();
        assert_eq!(top.score, 0);
        assert_eq!(top.timestamp, NO_TIMESTAMP);
    }

    #[test]
    fn test_top_five_descending() {
        let mut store = memory_store();
        for score in [100, 200, 150, 300, 250] {
            store.insert(score).unwrap();
        }
        let scores: Vec<u64> = store.top_n(5).unwrap().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 250, 200, 150, 100]);
        assert_eq!(store.max_score().unwrap(), 300);

        let top = store.top_one().unwrap();
        assert_eq!(top.score, 300);
        assert_eq!(top.timestamp.len(), "2024-01-01 00:00:00".len());
    }

    #[test]
    fn test_every_run_is_kept() {
        let mut store = memory_store();
        for score in [10, 0, 30, 20, 50, 40, 5] {
            store.insert(score).unwrap();
        }
        assert_eq!(store.len().unwrap(), 7);
        assert!(!store.is_empty().unwrap());
        let scores: Vec<u64> = store.top_n(5).unwrap().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 40, 30, 20, 10]);
    }

    #[test]
    fn test_repeated_reads_identical() {
        let mut store = memory_store();
        store.insert_with_timestamp(70, "2024-01-01 10:00:00").unwrap();
        store.insert_with_timestamp(70, "2024-01-02 10:00:00").unwrap();
        store.insert_with_timestamp(90, "2024-01-03 10:00:00").unwrap();
        let first = store.top_n(5).unwrap();
        let second = store.top_n(5).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].score, 90);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.db");
        {
            let mut store = SqliteScoreStore::open(&path).unwrap();
            store.insert(42).unwrap();
        }
        let store = SqliteScoreStore::open(&path).unwrap();
        assert_eq!(store.max_score().unwrap(), 42);
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("scores.db");
        let err = SqliteScoreStore::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Open { .. }));
    }

    #[test]
    fn test_oversized_score_rejected() {
        let mut store = memory_store();
        let err = store.insert(u64::MAX).unwrap_err();
        assert!(matches!(err, StoreError::ScoreOutOfRange(_)));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-05-01 12:30:45"), "2024-05-01 12:30");
        assert_eq!(format_timestamp(NO_TIMESTAMP), "N/A");
        let entry = ScoreEntry {
            score: 300,
            timestamp: "2024-05-01 12:30:45".into(),
        };
        assert_eq!(format_entry(1, &entry), "1.   300 - 2024-05-01 12:30");
    }
}
