//! History storage abstraction and implementations
//!
//! Provides trait-based storage for recommendation history with a local
//! filesystem implementation.

mod local;

pub use local::LocalHistoryStore;

use crate::HistoryRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History record not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid record id: {0}")]
    InvalidId(String),

    #[error("History path not available")]
    PathUnavailable,
}

/// Result type for storage operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Filter criteria for history listing
#[derive(Debug, Default, Clone)]
pub struct HistoryFilter {
    /// Case-insensitive text search in the query
    pub query_contains: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search by query text
    pub fn with_query(mut self, search: impl Into<String>) -> Self {
        self.query_contains = Some(search.into());
        self
    }

    /// Limit results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check if a record matches this filter
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        match &self.query_contains {
            Some(search) => record
                .query
                .to_lowercase()
                .contains(&search.to_lowercase()),
            None => true,
        }
    }
}

/// Persistence for finished recommendations
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Store a record
    async fn append(&self, record: &HistoryRecord) -> HistoryResult<()>;

    /// Load a record by ID
    async fn load(&self, id: &str) -> HistoryResult<HistoryRecord>;

    /// Records matching the filter, newest first
    async fn list(&self, filter: &HistoryFilter) -> HistoryResult<Vec<HistoryRecord>>;

    /// Delete a record by ID
    async fn delete(&self, id: &str) -> HistoryResult<()>;

    /// Delete every record, returning how many were removed
    async fn clear(&self) -> HistoryResult<usize>;

    /// The most recent record, if any
    async fn latest(&self) -> HistoryResult<Option<HistoryRecord>> {
        let records = self.list(&HistoryFilter::new().with_limit(1)).await?;
        Ok(records.into_iter().next())
    }
}
