//! Integration tests for the [`storage::KvStore`] backends.
//!
//! Each backend must honour the same get/put/delete contract.

use serde::{Deserialize, Serialize};
use storage::{get_json, put_json, FileKvStore, InMemoryKvStore, KvStore, SqliteKvStore};
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    version: String,
    ids: Vec<i32>,
}

async fn exercise_contract(store: &dyn KvStore) {
    assert_eq!(store.get("latest_version").await.unwrap(), None);

    store.put("latest_version", "2.0.1").await.unwrap();
    assert_eq!(
        store.get("latest_version").await.unwrap().as_deref(),
        Some("2.0.1")
    );

    store.put("latest_version", "2.0.2").await.unwrap();
    assert_eq!(
        store.get("latest_version").await.unwrap().as_deref(),
        Some("2.0.2")
    );

    assert!(store.delete("latest_version").await.unwrap());
    assert!(!store.delete("latest_version").await.unwrap());
    assert_eq!(store.get("latest_version").await.unwrap(), None);
}

/// **Test: File store round-trips values, overwrites, and deletes.**
#[tokio::test]
async fn test_file_store_contract() {
    let dir = TempDir::new().unwrap();
    let store = FileKvStore::new(dir.path().join("output"));
    exercise_contract(&store).await;
}

/// **Test: SQLite store (in-memory) honours the contract.**
#[tokio::test]
async fn test_sqlite_memory_store_contract() {
    let store = SqliteKvStore::new("sqlite::memory:").await.unwrap();
    exercise_contract(&store).await;
}

/// **Test: SQLite store persists across reopen when file-backed.**
#[tokio::test]
async fn test_sqlite_file_store_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.db");
    let path = path.to_str().unwrap().to_string();
    {
        let store = SqliteKvStore::new(&path).await.unwrap();
        store.put("codex_latest_version.txt", "rust-v0.5.0").await.unwrap();
    }
    let store = SqliteKvStore::new(&path).await.unwrap();
    assert_eq!(
        store.get("codex_latest_version.txt").await.unwrap().as_deref(),
        Some("rust-v0.5.0")
    );
}

/// **Test: In-memory store honours the contract.**
#[tokio::test]
async fn test_memory_store_contract() {
    let store = InMemoryKvStore::new();
    exercise_contract(&store).await;
    assert!(store.is_empty().await);
}

/// **Test: JSON helpers store structured records.**
#[tokio::test]
async fn test_json_helpers() {
    let store = InMemoryKvStore::new();
    let record = Record {
        version: "1.0.0".into(),
        ids: vec![1, 2],
    };
    put_json(&store, "state.json", &record).await.unwrap();
    let loaded: Option<Record> = get_json(&store, "state.json").await.unwrap();
    assert_eq!(loaded, Some(record));
}

/// **Test: Corrupt JSON surfaces as a serialization error instead of a panic.**
#[tokio::test]
async fn test_json_helpers_reject_corrupt_value() {
    let store = InMemoryKvStore::new();
    store.put("state.json", "{not json").await.unwrap();
    let loaded: Result<Option<Record>, _> = get_json(&store, "state.json").await;
    assert!(loaded.is_err());
}
