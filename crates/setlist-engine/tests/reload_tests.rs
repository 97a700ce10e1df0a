//! Integration tests for snapshot loading and reloading

use serde_json::json;
use setlist_engine::{EngineConfig, ModelHandle, RecommendationEngine, SeedSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn write_corpus(path: &Path, corpus: serde_json::Value) {
    fs::write(path, serde_json::to_string(&corpus).unwrap()).unwrap();
}

fn seeds(items: &[&str]) -> SeedSet {
    items.iter().copied().collect()
}

#[test]
fn test_initial_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    write_corpus(
        &path,
        json!([
            {"antecedents": ["A"], "consequents": ["B"], "confidence": 0.8},
            {"antecedents": ["A", "C"], "consequents": ["D"], "confidence": 0.9}
        ]),
    );

    let handle = ModelHandle::load(&path, "0.1").unwrap();
    let snapshot = handle.current();
    assert_eq!(snapshot.store().len(), 2);
    assert_eq!(snapshot.metadata().version, "0.1");

    let engine = RecommendationEngine::default();
    let result = snapshot.recommend(&engine, &seeds(&["A", "C"]), None);
    assert_eq!(result.items, vec!["D", "B"]);
}

#[test]
fn test_initial_load_missing_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = ModelHandle::load(dir.path().join("missing.json"), "0.1").unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_corrupt());
}

#[test]
fn test_reload_swaps_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    write_corpus(&path, json!([{"antecedents": ["A"], "consequents": ["B"], "confidence": 0.8}]));
    let handle = ModelHandle::load(&path, "v1").unwrap();

    write_corpus(&path, json!([{"antecedents": ["A"], "consequents": ["Z"], "confidence": 0.8}]));
    let reloaded = handle.reload(&path, "v2").unwrap();

    assert_eq!(reloaded.metadata().version, "v2");
    let engine = RecommendationEngine::default();
    let result = handle.current().recommend(&engine, &seeds(&["A"]), None);
    assert_eq!(result.items, vec!["Z"]);
    assert_eq!(result.version, "v2");
}

#[test]
fn test_failed_reload_keeps_prior_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    write_corpus(&path, json!([{"antecedents": ["A"], "consequents": ["B"], "confidence": 0.8}]));
    let handle = ModelHandle::load(&path, "v1").unwrap();

    // Overlapping antecedent and consequent
    write_corpus(&path, json!([{"antecedents": ["A"], "consequents": ["A"], "confidence": 0.8}]));
    let err = handle.reload(&path, "v2").unwrap_err();
    assert!(err.is_corrupt());

    let current = handle.current();
    assert_eq!(current.metadata().version, "v1");
    assert_eq!(current.store().len(), 1);

    let err = handle.reload(dir.path().join("gone.json"), "v3").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(handle.current().metadata().version, "v1");
}

#[test]
fn test_concurrent_readers_during_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    write_corpus(&path, json!([{"antecedents": ["A"], "consequents": ["B"], "confidence": 0.8}]));
    let handle = Arc::new(ModelHandle::load(&path, "v1").unwrap());
    let engine = Arc::new(RecommendationEngine::new(EngineConfig::default()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = handle.current();
                    let result = snapshot.recommend(&engine, &seeds(&["A"]), None);
                    // Each snapshot is internally consistent
                    match result.version.as_str() {
                        "v1" => assert_eq!(result.items, vec!["B"]),
                        "v2" => assert_eq!(result.items, vec!["C"]),
                        other => panic!("unexpected version {other}"),
                    }
                }
            })
        })
        .collect();

    let next = dir.path().join("next.json");
    write_corpus(&next, json!([{"antecedents": ["A"], "consequents": ["C"], "confidence": 0.8}]));
    handle.reload(&next, "v2").unwrap();

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(handle.current().metadata().version, "v2");
}

#[test]
fn test_concurrent_reloads_return_their_own_snapshot() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("rules.json");
    write_corpus(&base, json!([{"antecedents": ["A"], "consequents": ["B"], "confidence": 0.8}]));
    let handle = Arc::new(ModelHandle::load(&base, "v0").unwrap());

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let path = dir.path().join(format!("rules-{}.json", worker));
            write_corpus(
                &path,
                json!([{"antecedents": ["A"], "consequents": [format!("C{}", worker)], "confidence": 0.8}]),
            );
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for round in 0..20 {
                    let version = format!("w{}-r{}", worker, round);
                    let snapshot = handle.reload(&path, version.clone()).unwrap();
                    assert_eq!(snapshot.metadata().version, version);
                    assert_eq!(
                        snapshot.store().rules()[0].consequent().to_vec(),
                        vec![format!("C{}", worker)]
                    );
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
}
