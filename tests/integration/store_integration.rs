//! Integration tests for the sled-backed fold state store

use foldtree::store::FOLD_STATE_KEY;
use foldtree::{FoldError, FoldTree, FoldTreeStore, KeyValueStore, MemoryKeyValueStore, SledKeyValueStore};
use std::sync::Arc;
use tempfile::TempDir;

/// Paths set on one store are observed identically after reloading from storage
#[test]
fn test_round_trip_through_sled() {
    let temp_dir = TempDir::new().unwrap();
    let folded_paths: [&[&str]; 3] = [&["info"], &["paths", "/pets"], &["definitions", "Pet"]];

    let expected = {
        let mut store = FoldTreeStore::new(SledKeyValueStore::open(temp_dir.path()).unwrap()).unwrap();
        // First reference materializes the child, second one addresses it.
        for path in folded_paths {
            store.resolve(path).unwrap();
            store.fold(path).unwrap();
        }
        store.toggle_fold(&["paths"]).unwrap();
        store.tree().clone()
    };

    let mut reloaded = FoldTreeStore::new(SledKeyValueStore::open(temp_dir.path()).unwrap()).unwrap();
    assert_eq!(reloaded.tree(), &expected);
    for path in folded_paths {
        assert!(reloaded.is_folded(path).unwrap(), "{path:?}");
    }
    assert!(reloaded.is_folded(&["paths"]).unwrap());
}

/// Every mutation writes the complete tree
#[test]
fn test_each_mutation_is_written_through() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let mut store = FoldTreeStore::new(Arc::clone(&storage)).unwrap();
    assert!(storage.get(FOLD_STATE_KEY).unwrap().is_none());

    store.fold(&["info"]).unwrap();
    let after_fold = storage.get(FOLD_STATE_KEY).unwrap().unwrap();
    assert!(FoldTree::from_json(&after_fold).unwrap().root().child("info").unwrap().folded);

    store.toggle_fold_all(&["*"]).unwrap();
    let after_bulk = FoldTree::from_json(&storage.get(FOLD_STATE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(&after_bulk, store.tree());
    assert!(!after_bulk.root().child("info").unwrap().folded);
    assert!(after_bulk.root().child("paths").unwrap().folded);
}

/// Persisted state in the serialized form is picked up at construction
#[test]
fn test_loads_flat_marker_format() {
    let raw = r#"{"info":{"folded":true},"paths":{"folded":false,"/pets":{"folded":true}}}"#;
    let storage = MemoryKeyValueStore::with_entry(FOLD_STATE_KEY, raw);
    let mut store = FoldTreeStore::new(storage).unwrap();

    assert!(store.is_folded(&["info"]).unwrap());
    assert!(!store.is_folded(&["paths"]).unwrap());
    assert!(store.is_folded(&["paths", "/pets"]).unwrap());
    assert!(store.tree().root().child("definitions").is_none());
}

/// Unparsable persisted state falls back to the default tree without an error
#[test]
fn test_malformed_state_falls_back_to_defaults() {
    for raw in ["", "null", "[]", r#"{"info":{"folded":"yes"}}"#, r#"{"info":7}"#] {
        let storage = MemoryKeyValueStore::with_entry(FOLD_STATE_KEY, raw);
        let store = FoldTreeStore::new(storage).unwrap();
        assert_eq!(store.tree(), &store.default_tree(), "{raw:?}");
    }
}

/// Reset rewrites storage with the default tree regardless of in-memory state
#[test]
fn test_reset_rewrites_persisted_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FoldTreeStore::new(SledKeyValueStore::open(temp_dir.path()).unwrap()).unwrap();
    store.fold(&["info"]).unwrap();
    store.toggle_fold_all(&["*"]).unwrap();
    store.reset().unwrap();
    drop(store);

    let store = FoldTreeStore::new(SledKeyValueStore::open(temp_dir.path()).unwrap()).unwrap();
    let root = store.tree().root();
    assert_eq!(root.children.len(), 5);
    for section in ["info", "securityDefinitions", "paths", "definitions", "parameters"] {
        assert!(!root.child(section).unwrap().folded, "{section}");
    }
}

/// A store cannot be built without its persistence collaborator
#[test]
fn test_missing_storage_is_fatal() {
    let err = FoldTreeStore::builder().default_sections(["info"]).build().unwrap_err();
    assert!(matches!(err, FoldError::MissingDependency(_)));
}

/// Nesting deeper than the JSON parser's default limit still reloads
#[test]
fn test_deep_fold_state_survives_reload() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let mut path = vec!["paths".to_string()];
    path.extend((0..130).map(|i| format!("/level{}", i)));

    {
        let mut store = FoldTreeStore::new(Arc::clone(&storage)).unwrap();
        for _ in 0..path.len() {
            store.resolve(&path).unwrap();
        }
        store.fold(&path).unwrap();
    }

    let mut reloaded = FoldTreeStore::new(Arc::clone(&storage)).unwrap();
    assert_eq!(reloaded.tree().root().children["paths"].children.len(), 1);
    assert!(reloaded.is_folded(&path).unwrap());
}
