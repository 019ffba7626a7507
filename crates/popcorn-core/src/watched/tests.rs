use super::*;
use crate::store::MemoryStore;
use crate::testing::{entry, FlakyStore};

fn stored_ids(store: &MemoryStore) -> Vec<String> {
    let raw = store.get("watched").unwrap().unwrap();
    let entries: Vec<WatchedEntry> = serde_json::from_str(&raw).unwrap();
    entries.into_iter().map(|e| e.id).collect()
}

#[test]
fn test_hydrate_missing_snapshot() {
    let mut watched = WatchedListStore::new(Box::new(MemoryStore::new()), "watched");
    assert_eq!(watched.hydrate(), 0);
    assert!(watched.is_empty());
}

#[test]
fn test_hydrate_invalid_json_yields_empty_list() {
    let store = MemoryStore::with_value("watched", "[{\"imdbID\": ");
    let watched = WatchedListStore::open(Box::new(store), "watched");
    assert!(watched.is_empty());
}

#[test]
fn test_malformed_snapshot_survives_next_write() {
    // One out-of-range rating makes the whole snapshot unreadable
    let raw = r#"[{"imdbID":"tt1","title":"Kept","year":"2001","userRating":8},{"imdbID":"tt2","title":"Bad","year":"2002","userRating":0}]"#;
    let store = MemoryStore::with_value("watched", raw);
    let mut watched = WatchedListStore::open(Box::new(store.clone()), "watched");
    assert!(watched.is_empty());

    watched.add(entry("tt3", 5)).unwrap();

    assert_eq!(stored_ids(&store), vec!["tt3"]);
    assert_eq!(watched.backup_key(), "watched.bak");
    assert_eq!(store.get("watched.bak").unwrap().as_deref(), Some(raw));
}

#[test]
fn test_valid_snapshot_is_not_backed_up() {
    let snapshot = serde_json::to_string(&vec![entry("tt1", 7)]).unwrap();
    let store = MemoryStore::with_value("watched", &snapshot);
    WatchedListStore::open(Box::new(store.clone()), "watched");
    assert_eq!(store.get("watched.bak").unwrap(), None);
}

#[test]
fn test_hydrate_null_snapshot() {
    // What the browser stored when the list had never been initialised
    let store = MemoryStore::with_value("watched", "null");
    let watched = WatchedListStore::open(Box::new(store), "watched");
    assert!(watched.is_empty());
}

#[test]
fn test_hydrate_existing_snapshot() {
    let snapshot = serde_json::to_string(&vec![entry("tt1", 7), entry("tt2", 9)]).unwrap();
    let store = MemoryStore::with_value("watched", &snapshot);

    let watched = WatchedListStore::open(Box::new(store), "watched");
    assert_eq!(watched.len(), 2);
    assert_eq!(watched.entries()[0].id, "tt1");
    assert_eq!(watched.user_rating("tt2").map(|r| r.value()), Some(9));
}

#[test]
fn test_add_persists_full_list() {
    let store = MemoryStore::new();
    let mut watched = WatchedListStore::open(Box::new(store.clone()), "watched");

    watched.add(entry("tt1", 7)).unwrap();
    watched.add(entry("tt2", 8)).unwrap();

    assert_eq!(stored_ids(&store), vec!["tt1", "tt2"]);
    assert!(watched.contains("tt2"));
}

#[test]
fn test_add_rejects_duplicate_id() {
    let store = MemoryStore::new();
    let mut watched = WatchedListStore::open(Box::new(store.clone()), "watched");
    watched.add(entry("tt1", 7)).unwrap();

    let err = watched.add(entry("tt1", 3)).unwrap_err();
    assert!(matches!(err, WatchedError::AlreadyWatched(id) if id == "tt1"));
    assert_eq!(watched.len(), 1);
    assert_eq!(watched.user_rating("tt1").map(|r| r.value()), Some(7));
    assert_eq!(stored_ids(&store), vec!["tt1"]);
}

#[test]
fn test_add_then_remove_round_trip() {
    let snapshot = serde_json::to_string(&vec![entry("tt1", 7), entry("tt2", 9)]).unwrap();
    let store = MemoryStore::with_value("watched", &snapshot);
    let mut watched = WatchedListStore::open(Box::new(store.clone()), "watched");
    let before = watched.entries().to_vec();

    watched.add(entry("tt3", 5)).unwrap();
    assert_eq!(watched.remove("tt3").unwrap(), 1);

    assert_eq!(watched.entries(), &before[..]);
    assert_eq!(stored_ids(&store), vec!["tt1", "tt2"]);
}

#[test]
fn test_remove_unknown_id() {
    let store = MemoryStore::new();
    let mut watched = WatchedListStore::open(Box::new(store.clone()), "watched");
    watched.add(entry("tt1", 7)).unwrap();

    assert_eq!(watched.remove("tt404").unwrap(), 0);
    assert_eq!(watched.len(), 1);
    assert_eq!(stored_ids(&store), vec!["tt1"]);
}

#[test]
fn test_failed_write_leaves_list_unchanged() {
    let store = FlakyStore::default();
    let mut watched = WatchedListStore::open(Box::new(store.clone()), "watched");
    watched.add(entry("tt1", 7)).unwrap();

    store.set_failing(true);
    assert!(matches!(watched.add(entry("tt2", 8)), Err(WatchedError::Store(_))));
    assert!(matches!(watched.remove("tt1"), Err(WatchedError::Store(_))));
    assert_eq!(watched.len(), 1);

    // Memory and store still agree
    let reloaded = WatchedListStore::open(Box::new(store.clone()), "watched");
    assert_eq!(reloaded.entries(), watched.entries());
}

#[test]
fn test_clear() {
    let store = MemoryStore::new();
    let mut watched = WatchedListStore::open(Box::new(store.clone()), "watched");
    watched.add(entry("tt1", 7)).unwrap();
    watched.add(entry("tt2", 8)).unwrap();

    assert_eq!(watched.clear().unwrap(), 2);
    assert!(watched.is_empty());
    assert_eq!(store.get("watched").unwrap(), Some("[]".to_string()));
}

#[test]
fn test_survives_restart_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = crate::store::FileStore::open(&path).unwrap();
        let mut watched = WatchedListStore::open(Box::new(store), "watched");
        watched.add(entry("tt0372784", 8)).unwrap();
    }

    let store = crate::store::FileStore::open(&path).unwrap();
    let watched = WatchedListStore::open(Box::new(store), "watched");
    assert_eq!(watched.len(), 1);
    assert_eq!(watched.user_rating("tt0372784").map(|r| r.value()), Some(8));
}
