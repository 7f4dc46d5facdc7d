//! Tests for the cache backing store: whole-file JSON persistence, atomic
//! replacement, and recovery from missing or malformed content. Each test
//! gets its own temp directory so runs never interfere.

use std::fs;

use tabwise::cache::{SuggestionCache, DEFAULT_TTL_SECS};
use tempfile::tempdir;

#[test]
fn test_round_trip_across_instances() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("completion_cache.json");

    {
        let mut cache = SuggestionCache::open(&store);
        cache.put("git|comm", vec!["commit".into(), "-m".into()], DEFAULT_TTL_SECS);
    }

    // A second process-equivalent opens the same store and sees the entry.
    let mut reopened = SuggestionCache::open(&store);
    assert_eq!(
        reopened.get("git|comm"),
        Some(vec!["commit".to_string(), "-m".to_string()])
    );
}

#[test]
fn test_missing_store_starts_empty() {
    let dir = tempdir().unwrap();
    let cache = SuggestionCache::open(dir.path().join("nope.json"));
    assert!(cache.is_empty());
}

#[test]
fn test_malformed_store_starts_empty() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("completion_cache.json");
    fs::write(&store, "{ this is not json").unwrap();

    let mut cache = SuggestionCache::open(&store);
    assert!(cache.is_empty());

    // And the cache still works; the next mutation rewrites the store.
    cache.put("k", vec!["a".into()], DEFAULT_TTL_SECS);
    let reopened = SuggestionCache::open(&store);
    assert_eq!(reopened.len(), 1);
}

#[test]
fn test_store_is_replaced_not_appended() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("completion_cache.json");

    let mut cache = SuggestionCache::open(&store);
    cache.put("a", vec!["1".into()], DEFAULT_TTL_SECS);
    cache.put("b", vec!["2".into()], DEFAULT_TTL_SECS);
    cache.invalidate("a");

    let reopened = SuggestionCache::open(&store);
    assert_eq!(reopened.len(), 1);
    assert!(reopened.contains_live("b"));
}

#[test]
fn test_no_temp_file_left_behind() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("completion_cache.json");

    let mut cache = SuggestionCache::open(&store);
    cache.put("k", vec!["a".into()], DEFAULT_TTL_SECS);
    cache.put("j", vec!["b".into()], DEFAULT_TTL_SECS);

    // Every write goes through a temp file that the rename consumes; only
    // the store itself survives.
    assert!(store.exists());
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["completion_cache.json"]);
}

#[test]
fn test_writers_use_distinct_temp_inodes() {
    // Two handles on the same store never clobber each other's in-flight
    // write: a pre-existing file at another writer's temp path is left
    // alone, and this writer's rename still lands a complete document.
    let dir = tempdir().unwrap();
    let store = dir.path().join("completion_cache.json");
    let foreign_temp = store.with_extension("tmp.99999999");
    fs::write(&foreign_temp, "{ half a docum").unwrap();

    let mut cache = SuggestionCache::open(&store);
    cache.put("k", vec!["a".into()], DEFAULT_TTL_SECS);

    assert_eq!(fs::read_to_string(&foreign_temp).unwrap(), "{ half a docum");
    let reopened = SuggestionCache::open(&store);
    assert!(reopened.contains_live("k"));
}

#[test]
fn test_unwritable_store_is_not_fatal() {
    // Point the store at a path whose parent is a file, so every persist
    // fails. The cache must keep answering from memory.
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let mut cache = SuggestionCache::open(blocker.join("cache.json"));
    cache.put("k", vec!["a".into()], DEFAULT_TTL_SECS);
    assert_eq!(cache.get("k"), Some(vec!["a".to_string()]));
}

#[test]
fn test_clear_persists_empty_store() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("completion_cache.json");

    let mut cache = SuggestionCache::open(&store);
    cache.put("k", vec!["a".into()], DEFAULT_TTL_SECS);
    cache.clear();

    let reopened = SuggestionCache::open(&store);
    assert!(reopened.is_empty());
}

#[test]
fn test_hit_bookkeeping_survives_reopen() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("completion_cache.json");

    {
        let mut cache = SuggestionCache::open(&store);
        cache.put("k", vec!["a".into()], DEFAULT_TTL_SECS);
        cache.get("k");
        cache.get("k");
    }

    let reopened = SuggestionCache::open(&store);
    assert_eq!(reopened.hit_count("k"), Some(2));
    assert_eq!(reopened.stats().total_hits, 2);
}
