//! History persistence across store instances

use expertosy::history::{HistoryFilter, HistoryRecord, HistoryStore, LocalHistoryStore};
use std::collections::HashMap;
use tempfile::TempDir;

fn finished(query: &str, top: &str) -> HistoryRecord {
    HistoryRecord::new(query)
        .with_preferences(HashMap::from([(
            "What is your budget?".to_string(),
            "$1000-$1500".to_string(),
        )]))
        .with_ranked_products(vec![format!("1. {}", top)])
}

#[tokio::test]
async fn test_records_survive_a_new_store() {
    let temp = TempDir::new().unwrap();

    let record = finished("gaming laptop", "Lenovo Legion 5 - $1,299");
    LocalHistoryStore::with_path(temp.path())
        .append(&record)
        .await
        .unwrap();

    let reopened = LocalHistoryStore::with_path(temp.path());
    let latest = reopened.latest().await.unwrap().expect("record should exist");
    assert_eq!(latest, record);
    assert_eq!(latest.top_product(), Some("1. Lenovo Legion 5 - $1,299"));

    let file = temp.path().join(format!("{}.json", record.id));
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap();
    assert_eq!(raw["query"], "gaming laptop");
    assert_eq!(raw["preferences"]["What is your budget?"], "$1000-$1500");
}

#[tokio::test]
async fn test_search_and_prune() {
    let temp = TempDir::new().unwrap();
    let store = LocalHistoryStore::with_path(temp.path()).with_max_records(3);

    for (query, top) in [
        ("gaming laptop", "Lenovo Legion 5"),
        ("office chair", "Herman Miller Aeron"),
        ("travel laptop", "MacBook Air M3"),
        ("espresso machine", "Breville Barista Express"),
    ] {
        store.append(&finished(query, top)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let all = store.list(&HistoryFilter::new()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].query, "espresso machine");
    assert!(all.iter().all(|r| r.query != "gaming laptop"));

    let laptops = store
        .list(&HistoryFilter::new().with_query("laptop"))
        .await
        .unwrap();
    assert_eq!(laptops.len(), 1);
    assert_eq!(laptops[0].query, "travel laptop");
}
