//! History record data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One finished recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Unique record identifier
    pub id: String,

    /// What the user searched for
    pub query: String,

    /// When the recommendation finished
    pub created_at: DateTime<Utc>,

    /// Preference prompt -> chosen option
    #[serde(default)]
    pub preferences: HashMap<String, String>,

    /// Ranking prompt -> chosen option
    #[serde(default)]
    pub ranking_answers: HashMap<String, String>,

    /// Product lines, best first
    #[serde(default)]
    pub ranked_products: Vec<String>,
}

impl HistoryRecord {
    /// Create a record with a generated ID, stamped now
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            query: query.into(),
            created_at: Utc::now(),
            preferences: HashMap::new(),
            ranking_answers: HashMap::new(),
            ranked_products: Vec::new(),
        }
    }

    pub fn with_preferences(mut self, preferences: HashMap<String, String>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_ranking_answers(mut self, answers: HashMap<String, String>) -> Self {
        self.ranking_answers = answers;
        self
    }

    pub fn with_ranked_products(mut self, products: Vec<String>) -> Self {
        self.ranked_products = products;
        self
    }

    /// Best ranked product, if any
    pub fn top_product(&self) -> Option<&str> {
        self.ranked_products.first().map(String::as_str)
    }

    /// First eight characters of the ID, for listings
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map_or(self.id.len(), |(i, _)| i);
        &self.id[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = HistoryRecord::new("laptop")
            .with_ranked_products(vec!["1. Dell XPS 15 - $1,499".into(), "2. MacBook".into()]);
        assert_eq!(record.query, "laptop");
        assert_eq!(record.top_product(), Some("1. Dell XPS 15 - $1,499"));
        assert_eq!(record.short_id().len(), 8);
        assert!(record.id.starts_with(record.short_id()));
    }

    #[test]
    fn test_missing_collections_default() {
        let json = r#"{"id":"abc","query":"tv","created_at":"2024-05-01T10:00:00Z"}"#;
        let record: HistoryRecord = serde_json::from_str(json).unwrap();
        assert!(record.preferences.is_empty());
        assert!(record.top_product().is_none());
        assert_eq!(record.short_id(), "abc");
    }
}
