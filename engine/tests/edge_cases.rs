//! Edge case tests for localsync-engine
//!
//! These tests cover boundary conditions and unusual inputs.

use localsync_engine::{
    Collection, CollectionSnapshot, Document, Error, FileStorage, MemoryStorage, Model, Storage,
    Store,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// String Edge Cases
// ============================================================================

#[test]
fn empty_attribute_set() {
    let storage = MemoryStorage::new();
    let mut store = Store::open("items", &storage).unwrap();
    let mut doc = Document::default();

    store.create(&mut doc).unwrap();

    let body = store.find(&doc).unwrap().unwrap();
    assert_eq!(body, format!(r#"{{"id":"{}"}}"#, doc.id().unwrap()));
}

#[test]
fn unicode_bodies() {
    let storage = MemoryStorage::new();
    let mut store = Store::open("items", &storage).unwrap();

    let names = vec![
        "日本語テスト",
        "Привет мир",
        "🎉🚀💯",
        "Hello\nWorld\tTab",
        "Null\0Test",
        "comma, separated",
    ];

    for name in &names {
        let mut doc = Document::new(json!({ "name": name }));
        store.create(&mut doc).unwrap();

        let parsed = Document::from_json(&store.find(&doc).unwrap().unwrap()).unwrap();
        assert_eq!(parsed.get("name"), Some(&json!(name)), "failed for {name}");
    }
    assert_eq!(store.find_all().unwrap().len(), names.len());
}

#[test]
fn very_long_body() {
    let storage = MemoryStorage::new();
    let mut store = Store::open("items", &storage).unwrap();

    // 1MB string
    let long_string = "x".repeat(1024 * 1024);
    let mut doc = Document::new(json!({ "name": long_string }));
    store.create(&mut doc).unwrap();

    let body = store.find(&doc).unwrap().unwrap();
    assert!(body.len() > 1024 * 1024);
}

#[test]
fn unicode_collection_name() {
    let storage = MemoryStorage::new();
    let mut store = Store::open("заметки", &storage).unwrap();
    let mut doc = Document::with_id("1", json!({}));

    store.create(&mut doc).unwrap();

    assert_eq!(storage.get("заметки").unwrap().as_deref(), Some("1"));
    assert!(storage.get("заметки-1").unwrap().is_some());
}

// ============================================================================
// Identifier Edge Cases
// ============================================================================

#[test]
fn hyphenated_ids_and_prefix_collections() {
    // "a-b" record "c" and "a" record "b-c" share a flat key
    let storage = MemoryStorage::new();
    let mut ab = Store::open("a-b", &storage).unwrap();
    let mut a = Store::open("a", &storage).unwrap();

    let mut first = Document::with_id("c", json!({"from": "a-b"}));
    ab.create(&mut first).unwrap();
    assert_eq!(a.find_by_id("b-c").unwrap(), ab.find(&first).unwrap());

    let mut second = Document::with_id("b-c", json!({"from": "a"}));
    a.create(&mut second).unwrap();
    assert_eq!(ab.find(&first).unwrap(), Some(second.to_json().unwrap()));
}

#[test]
fn uuid_style_ids() {
    let storage = MemoryStorage::new();
    let mut store = Store::open("items", &storage).unwrap();

    let ids = [
        "550e8400-e29b-41d4-a716-446655440000",
        "user_123",
        "a.b.c",
        "with space",
    ];
    for id in ids {
        let mut doc = Document::with_id(id, json!({}));
        store.create(&mut doc).unwrap();
    }

    let reopened = Store::open("items", &storage).unwrap();
    assert_eq!(reopened.ids(), ids);
}

#[test]
fn numeric_id_survives_create_and_reload() {
    let storage = MemoryStorage::new();
    let mut store = Store::open("todos", &storage).unwrap();
    let mut todo = Document::new(json!({"id": 5, "title": "a"}));
    store.create(&mut todo).unwrap();
    assert_eq!(todo.id(), Some("5"));
    assert_eq!(storage.get("todos").unwrap().as_deref(), Some("5"));

    // written by another client with a numeric id
    storage.set("todos", "5,7").unwrap();
    storage.set("todos-7", r#"{"id":7,"title":"b"}"#).unwrap();

    let mut todos = Collection::open("todos", &storage).unwrap();
    let mut loaded = todos.get("7").unwrap().clone();
    loaded.set("title", json!("b2"));
    assert_eq!(todos.save(loaded).unwrap(), "7");

    assert_eq!(storage.get("todos").unwrap().as_deref(), Some("5,7"));
    assert_eq!(todos.store().ids(), ["5", "7"]);
    let body: serde_json::Value =
        serde_json::from_str(&storage.get("todos-7").unwrap().unwrap()).unwrap();
    assert_eq!(body, json!({"id": 7, "title": "b2"}));
}

#[test]
fn empty_id_is_treated_as_unassigned() {
    let storage = MemoryStorage::new();
    let mut todos = Collection::open("todos", &storage).unwrap();
    let id = todos.save(Document::new(json!({"id": "", "title": "a"}))).unwrap();

    assert!(!id.is_empty());
    assert_eq!(storage.get("todos-").unwrap(), None);

    let reopened = Store::open("todos", &storage).unwrap();
    assert_eq!(reopened.ids(), [id]);
}

#[test]
fn id_with_comma_is_refused_before_writing() {
    let storage = MemoryStorage::new();
    let mut store = Store::open("todos", &storage).unwrap();
    let mut doc = Document::with_id("a,b", json!({}));

    assert!(matches!(store.create(&mut doc), Err(Error::InvalidId(_))));
    assert!(storage.is_empty());
    assert!(Store::open("todos", &storage).unwrap().is_empty());
}

#[test]
fn ids_on_preexisting_index_survive_reopen() {
    let storage = MemoryStorage::new();
    storage.set("items", "x,y").unwrap();
    storage.set("items-x", "{}").unwrap();

    let mut store = Store::open("items", &storage).unwrap();
    let mut doc = Document::with_id("z", json!({}));
    store.create(&mut doc).unwrap();

    assert_eq!(storage.get("items").unwrap().as_deref(), Some("x,y,z"));
    // y was never stored
    assert_eq!(store.find_all().unwrap().len(), 2);
}

// ============================================================================
// Backend Edge Cases
// ============================================================================

#[test]
fn file_backed_collection_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local.json");

    let id = {
        let storage = FileStorage::open(&path).unwrap();
        let mut todos = Collection::open("todos", storage).unwrap();
        let id = todos.save(Document::new(json!({"title": "a"}))).unwrap();
        todos.save(Document::new(json!({"title": "b"}))).unwrap();
        id
    };

    let storage = FileStorage::open(&path).unwrap();
    let mut todos = Collection::open("todos", storage).unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos.models()[0].id(), Some(id.as_str()));

    todos.remove(&id).unwrap();
    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(Store::open("todos", storage).unwrap().len(), 1);
}

#[test]
fn shared_storage_across_threads() {
    let storage = Arc::new(MemoryStorage::new());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let storage = Arc::clone(&storage);
            std::thread::spawn(move || {
                let mut store = Store::open(format!("c{n}"), storage).unwrap();
                for _ in 0..10 {
                    store.create(&mut Document::default()).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for n in 0..4 {
        let store = Store::open(format!("c{n}"), Arc::clone(&storage)).unwrap();
        assert_eq!(store.len(), 10);
        assert_eq!(store.find_all().unwrap().len(), 10);
    }
}

#[test]
fn snapshot_moves_between_backends() {
    let memory = MemoryStorage::new();
    let mut source = Store::open("todos", &memory).unwrap();
    for i in 0..3 {
        source.create(&mut Document::new(json!({ "n": i }))).unwrap();
    }
    let json = source.snapshot().unwrap().to_json().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = FileStorage::open(dir.path().join("copy.json")).unwrap();
    let mut target = Store::open("todos", &file).unwrap();
    target
        .restore(CollectionSnapshot::from_json(&json).unwrap())
        .unwrap();

    assert_eq!(target.ids(), source.ids());
    assert_eq!(target.find_all().unwrap(), source.find_all().unwrap());
}

// ============================================================================
// Index Invariants
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Create(u8),
    Update(u8),
    Destroy(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(Op::Create),
        (0u8..8).prop_map(Op::Update),
        (0u8..8).prop_map(Op::Destroy),
    ]
}

proptest! {
    #[test]
    fn prop_index_has_no_duplicates_and_matches_bodies(ops in prop::collection::vec(arb_op(), 0..40)) {
        let storage = MemoryStorage::new();
        let mut store = Store::open("items", &storage).unwrap();
        let mut expected: Vec<String> = Vec::new();

        for op in ops {
            match op {
                Op::Create(n) | Op::Update(n) => {
                    let id = format!("id{n}");
                    let mut doc = Document::with_id(id.clone(), json!({ "n": n }));
                    if matches!(op, Op::Create(_)) {
                        store.create(&mut doc).unwrap();
                    } else {
                        store.update(&doc).unwrap();
                    }
                    if !expected.contains(&id) {
                        expected.push(id);
                    }
                }
                Op::Destroy(n) => {
                    let doc = Document::with_id(format!("id{n}"), json!({}));
                    store.destroy(&doc).unwrap();
                    expected.retain(|id| id != doc.id().unwrap());
                }
            }
        }

        prop_assert_eq!(store.ids(), expected.as_slice());
        prop_assert_eq!(store.find_all().unwrap().len(), expected.len());

        let reopened = Store::open("items", &storage).unwrap();
        prop_assert_eq!(reopened.ids(), expected.as_slice());
    }
}
