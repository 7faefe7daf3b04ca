//! Local filesystem history storage
//!
//! Stores each record as a JSON file in the user's data directory.

use super::{HistoryError, HistoryFilter, HistoryResult, HistoryStore};
use crate::HistoryRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Records kept when no limit is configured
pub const DEFAULT_MAX_RECORDS: usize = 50;

/// Local filesystem history storage
///
/// Records are stored as JSON files in:
/// - `~/.expertosy/history/` (default)
/// - Custom path if specified
pub struct LocalHistoryStore {
    /// Base directory for record files
    base_path: PathBuf,
    /// Oldest records beyond this count are pruned on append
    max_records: usize,
}

impl LocalHistoryStore {
    /// Create storage with default path (~/.expertosy/history)
    pub fn new() -> HistoryResult<Self> {
        let base_path = dirs::home_dir()
            .ok_or(HistoryError::PathUnavailable)?
            .join(".expertosy")
            .join("history");

        Ok(Self::with_path(base_path))
    }

    /// Create storage with custom base path
    pub fn with_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    /// Keep at most `max_records` records (at least one)
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records.max(1);
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_dir(&self) -> HistoryResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }

    /// Map a full or abbreviated ID to a stored record ID
    async fn resolve_id(&self, id: &str) -> HistoryResult<String> {
        let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(HistoryError::InvalidId(id.to_string()));
        }

        if self.record_path(id).exists() {
            return Ok(id.to_string());
        }
        if !self.base_path.exists() {
            return Err(HistoryError::NotFound(id.to_string()));
        }

        let mut matches = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem.starts_with(id) {
                    matches.push(stem.to_string());
                }
            }
        }

        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(HistoryError::NotFound(id.to_string())),
            n => Err(HistoryError::InvalidId(format!(
                "'{}' matches {} records, use a longer id",
                id, n
            ))),
        }
    }

    async fn read_record(&self, path: &Path) -> HistoryResult<HistoryRecord> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Every readable record with the file it was read from, newest first
    async fn read_all(&self) -> HistoryResult<Vec<(PathBuf, HistoryRecord)>> {
        self.ensure_dir().await?;

        let mut entries = fs::read_dir(&self.base_path).await?;
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            match self.read_record(&path).await {
                Ok(record) => records.push((path, record)),
                Err(e) => {
                    warn!("Failed to read history record from {:?}: {}", path, e);
                }
            }
        }

        records.sort_by(|(_, a), (_, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }

    async fn prune(&self) -> HistoryResult<()> {
        let records = self.read_all().await?;
        for (path, record) in records.iter().skip(self.max_records) {
            fs::remove_file(path).await?;
            debug!("Pruned history record {} at {:?}", record.id, path);
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for LocalHistoryStore {
    async fn append(&self, record: &HistoryRecord) -> HistoryResult<()> {
        self.ensure_dir().await?;

        let path = self.record_path(&record.id);
        let content = serde_json::to_string_pretty(record)?;

        fs::write(&path, content).await?;
        debug!("Saved history record {} to {:?}", record.id, path);

        self.prune().await
    }

    async fn load(&self, id: &str) -> HistoryResult<HistoryRecord> {
        let id = self.resolve_id(id).await?;
        let path = self.record_path(&id);

        let record = self.read_record(&path).await?;
        debug!("Loaded history record {} from {:?}", id, path);
        Ok(record)
    }

    async fn list(&self, filter: &HistoryFilter) -> HistoryResult<Vec<HistoryRecord>> {
        let mut records: Vec<HistoryRecord> = self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, record)| record)
            .filter(|r| filter.matches(r))
            .collect();

        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }

        Ok(records)
    }

    async fn delete(&self, id: &str) -> HistoryResult<()> {
        let id = self.resolve_id(id).await?;
        let path = self.record_path(&id);

        fs::remove_file(&path).await?;
        debug!("Deleted history record {} at {:?}", id, path);

        Ok(())
    }

    async fn clear(&self) -> HistoryResult<usize> {
        let records = self.read_all().await?;
        for (path, _) in &records {
            fs::remove_file(path).await?;
        }
        debug!("Cleared {} history records", records.len());
        Ok(records.len())
    }
}
