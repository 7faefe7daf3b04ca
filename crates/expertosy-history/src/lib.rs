//! Recommendation history for Expertosy
//!
//! This crate keeps a record of finished recommendations:
//! - History records with the answers that led to them
//! - Listing with text search and limits
//! - Local file storage with pruning of old records

pub mod record;
pub mod storage;

pub use record::HistoryRecord;
pub use storage::{
    HistoryError, HistoryFilter, HistoryResult, HistoryStore, LocalHistoryStore,
};
