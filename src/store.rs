//! Record store
//!
//! Owns the canonical collection semantics (upsert-by-date, replace-all import) and the
//! persistence seam. Persistence is an injected `RecordStore`; the metric calculators
//! never touch storage themselves.

use crate::error::{JournalError, Result};
use crate::types::DailyRecord;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Insert or replace the record for `record.date`, returning a date-sorted collection
pub fn upsert(collection: &[DailyRecord], record: DailyRecord) -> Vec<DailyRecord> {
    let mut next: Vec<DailyRecord> = collection
        .iter()
        .filter(|r| r.date != record.date)
        .cloned()
        .collect();
    next.push(record);
    next.sort_by(|a, b| a.date.cmp(&b.date));
    next
}

/// Bulk import: the imported records replace the collection outright (no merge)
pub fn replace_all(_collection: &[DailyRecord], records: Vec<DailyRecord>) -> Vec<DailyRecord> {
    records
}

/// Serialize a collection in its export/persisted shape
pub fn export_json(collection: &[DailyRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// Persistence boundary for the canonical collection
pub trait RecordStore {
    /// Read the last complete write, or an empty collection if nothing was saved
    fn load(&self) -> Result<Vec<DailyRecord>>;

    /// Replace the persisted collection
    fn save(&self, records: &[DailyRecord]) -> Result<()>;
}

/// Stores the collection as one JSON array file.
///
/// Writes go to a sibling temp file that is renamed over the target, so a reader sees
/// either the previous array or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "records.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Vec<DailyRecord>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no saved collection");
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let records: Vec<DailyRecord> = serde_json::from_str(&data).map_err(|e| {
            JournalError::StoreError(format!("{}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded collection");
        Ok(records)
    }

    fn save(&self, records: &[DailyRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, export_json(records)?)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), count = records.len(), "saved collection");
        Ok(())
    }
}

/// In-memory store, used by tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<DailyRecord>>,
}

impl MemoryStore {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }

    /// Snapshot of what was last saved
    pub fn snapshot(&self) -> Vec<DailyRecord> {
        self.records.borrow().clone()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Vec<DailyRecord>> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[DailyRecord]) -> Result<()> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}
