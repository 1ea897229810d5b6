mod common;

use common::{Entity, Operation};
use planwright_core::{CategoryStore, DetachedCategory, EntityStore, OperationStore};
use std::sync::Arc;

#[test]
fn entity_store_keeps_insertion_order() {
    let store = EntityStore::new();
    store.insert(Entity("a".into()));
    store.insert(Entity("b".into()));
    store.insert(Entity("c".into()));

    let names: Vec<String> = store.snapshot().iter().map(|e| e.0.clone()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(store.len(), 3);
    assert!(!store.is_empty());
}

#[test]
fn clear_drops_store_references() {
    let store = EntityStore::new();
    let kept = store.insert(Entity("kept".into()));
    assert_eq!(Arc::strong_count(&kept), 2);

    store.clear();
    assert!(store.is_empty());
    assert_eq!(Arc::strong_count(&kept), 1);
}

#[test]
fn snapshot_is_unaffected_by_later_inserts() {
    let store = EntityStore::new();
    store.insert(Operation::named("one"));
    let snapshot = store.all();
    store.insert(Operation::named("two"));

    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.all().len(), 2);
}

#[test]
fn operation_store_marks_through_trait_objects() {
    let store = EntityStore::new();
    let op = store.insert(Operation::named("op"));
    for entry in store.all() {
        entry.mark_changed();
    }
    assert_eq!(op.marks(), 1);
}

#[test]
fn detached_category_is_always_empty() {
    let detached = DetachedCategory;
    assert_eq!(detached.len(), 0);
    assert!(detached.is_empty());
    detached.clear();
    assert!(detached.all().is_empty());
}

#[test]
fn store_is_shared_across_threads() {
    let store = Arc::new(EntityStore::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..25 {
                    store.insert(Operation::named(&format!("{t}-{i}")));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len(), 100);
}
