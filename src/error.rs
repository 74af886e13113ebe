use std::fmt;
use std::path::PathBuf;

/// Failures from the score store
///
/// None of these are fatal to gameplay; the session logs them and moves on.
#[derive(Debug)]
pub enum StoreError {
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    Query(rusqlite::Error),
    /// Score does not fit the store's integer column
    ScoreOutOfRange(u64),
    /// A stored score is negative (corrupt row)
    CorruptScore(i64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open score store {}: {source}", path.display())
            }
            Self::Query(e) => write!(f, "score store query failed: {e}"),
            Self::ScoreOutOfRange(score) => write!(f, "score {score} is too large to store"),
            Self::CorruptScore(score) => write!(f, "corrupt score row: {score}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Query(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Query(e)
    }
}
