use std::fs;
use std::path::{ Path, PathBuf };

use log::{ debug, info };

use crate::models::history::HistoryEntry;
use crate::traits::history_store::{ HistoryError, HistoryStore };

/// History kept as one JSON array in a file
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        debug!("Wrote {} history entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.write_all(&entries)?;
        info!("Saved solution to history ({} entries)", entries.len());
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.write_all(&[])?;
        info!("Cleared history at {}", self.path.display());
        Ok(())
    }
}
