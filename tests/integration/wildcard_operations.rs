//! Integration tests for wildcard bulk operations and change notification

use foldtree::{fold_subscriber, FoldChange, FoldError, FoldTreeStore, MemoryKeyValueStore};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

fn store_with_grid() -> FoldTreeStore {
    // a: {x: {p, q}, y: {p, q}}
    let raw = json!({
        "a": {
            "folded": false,
            "x": {"folded": false, "p": {"folded": false}, "q": {"folded": false}},
            "y": {"folded": false, "p": {"folded": false}, "q": {"folded": false}}
        }
    })
    .to_string();
    FoldTreeStore::new(MemoryKeyValueStore::with_entry("foldState", raw)).unwrap()
}

#[test]
fn test_chained_wildcards_flip_all_grandchildren() {
    let mut store = store_with_grid();
    let flipped = store.toggle_fold_all(&["a", "*", "*"]).unwrap();
    assert_eq!(flipped, 4);

    for leaf in [["a", "x", "p"], ["a", "x", "q"], ["a", "y", "p"], ["a", "y", "q"]] {
        assert!(store.is_folded(&leaf).unwrap(), "{leaf:?}");
    }
    assert!(!store.is_folded(&["a", "x"]).unwrap());
    assert!(!store.is_folded(&["a", "y"]).unwrap());
}

#[test]
fn test_toggle_all_twice_restores() {
    let mut store = store_with_grid();
    let before = store.tree().clone();
    store.toggle_fold_all(&["a", "*"]).unwrap();
    assert_ne!(store.tree(), &before);
    store.toggle_fold_all(&["a", "*"]).unwrap();
    assert_eq!(store.tree(), &before);
}

#[test]
fn test_toggle_all_without_wildcard_flips_one_node() {
    let mut store = store_with_grid();
    let flipped = store.toggle_fold_all(&["a", "x"]).unwrap();
    assert_eq!(flipped, 1);
    assert!(store.is_folded(&["a", "x"]).unwrap());
}

#[test]
fn test_toggle_all_rejects_inner_wildcard_with_concrete_tail() {
    let mut store = store_with_grid();
    let before = store.tree().clone();
    let err = store.toggle_fold_all(&["a", "*", "p"]).unwrap_err();
    assert!(matches!(err, FoldError::InvalidArgument(_)));
    assert_eq!(store.tree(), &before);
}

#[test]
fn test_toggle_all_on_missing_prefix_still_notifies_once() {
    let mut store = store_with_grid();
    let events = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&events);
    store.on_fold_changed(fold_subscriber(move |change| {
        assert!(matches!(change, FoldChange::Bulk));
        *sink.lock() += 1;
        Ok(())
    }));

    assert_eq!(store.toggle_fold_all(&["nothing", "*"]).unwrap(), 0);
    assert_eq!(*events.lock(), 1);
    assert!(store.tree().root().child("nothing").is_none());
}

#[test]
fn test_is_all_folded_tracks_unfolded_children() {
    let mut store = store_with_grid();
    assert!(store.is_all_folded(&["a", "*"]).unwrap());
    assert!(store.is_all_folded(&["a", "*", "*"]).unwrap());

    store.fold(&["a", "y", "q"]).unwrap();
    assert!(store.is_all_folded(&["a", "*"]).unwrap());
    assert!(!store.is_all_folded(&["a", "*", "*"]).unwrap());

    store.toggle_fold_all(&["a", "*", "*"]).unwrap();
    // three leaves are now folded, one unfolded
    assert!(!store.is_all_folded(&["a", "*", "*"]).unwrap());
}

#[test]
fn test_is_all_folded_vacuous_missing_and_misuse() {
    let store = store_with_grid();
    assert!(store.is_all_folded(&["a", "x", "p", "*"]).unwrap());
    assert!(!store.is_all_folded(&["paths", "*"]).unwrap());
    assert!(matches!(
        store.is_all_folded(&["a", "*", "p"]),
        Err(FoldError::InvalidUsage(_))
    ));
}

#[test]
fn test_subscribers_run_in_registration_order() {
    let mut store = store_with_grid();
    let order = Arc::new(Mutex::new(Vec::new()));
    for id in 0..3 {
        let sink = Arc::clone(&order);
        store.on_fold_changed(fold_subscriber(move |_| {
            sink.lock().push(id);
            Ok(())
        }));
    }

    store.toggle_fold(&["a"]).unwrap();
    store.toggle_fold_all(&["a", "*"]).unwrap();
    assert_eq!(*order.lock(), vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_json_path_input() {
    let mut store = store_with_grid();
    store.fold(&json!(["a", "x"])).unwrap();
    assert!(store.is_folded(&json!(["a", "x"])).unwrap());
    assert!(matches!(
        store.toggle_fold_all(&json!({"path": ["a", "*"]})),
        Err(FoldError::InvalidArgument(_))
    ));
}
