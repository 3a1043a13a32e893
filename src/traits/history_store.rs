use thiserror::Error;

use crate::models::history::HistoryEntry;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to access history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persistent list of solved equations, read and written as a whole
pub trait HistoryStore {
    /// All entries, oldest first
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError>;

    fn clear(&self) -> Result<(), HistoryError>;
}
