use std::fs;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::utils::{insee_file, write_fixture};
use prenom_trends::{
    CacheConfig, DatasetConfig, Freshness, TrendCache, TrendsError, get_processed_data,
};
use rayon::prelude::*;

fn cache(config: CacheConfig) -> TrendCache {
    TrendCache::new(config, DatasetConfig::default())
}

/// Test that repeated calls return the same table without recomputing
#[test]
fn test_repeated_calls_are_memoized() {
    let fixture = write_fixture(&insee_file(&[(1, "JEAN", "2000", 10)]));
    let cache = cache(CacheConfig::default());

    let first = cache.get(fixture.path()).unwrap();
    let second = cache.get(fixture.path()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.loads(), 1);
    assert!(cache.contains(fixture.path()));
}

/// Test the process-wide entry point
#[test]
fn test_get_processed_data_is_idempotent() {
    let fixture = write_fixture(&insee_file(&[
        (1, "PHILIPPE", "2000", 500),
        (1, "JEAN", "2000", 500),
    ]));

    let first = get_processed_data(fixture.path()).unwrap();
    let second = get_processed_data(fixture.path()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.rows(), second.rows());
    assert_eq!(first.len(), 2);
}

/// Test that concurrent first calls compute the table once
#[test]
fn test_concurrent_first_calls_compute_once() {
    let fixture = write_fixture(&insee_file(&[(2, "MARIE", "1950", 30), (2, "ANNE", "1950", 10)]));
    let cache = cache(CacheConfig::default());

    let tables: Vec<_> = (0..16)
        .into_par_iter()
        .map(|_| cache.get(fixture.path()).unwrap())
        .collect();

    assert_eq!(cache.loads(), 1);
    assert!(tables.iter().all(|table| Arc::ptr_eq(table, &tables[0])));
}

/// Test that failures are returned but never stored
#[test]
fn test_failures_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.csv");
    let cache = cache(CacheConfig::default());

    let err = cache.get(&path).unwrap_err();
    assert!(matches!(err, TrendsError::DataSourceUnavailable { .. }));
    assert!(!cache.contains(&path));
    assert!(cache.is_empty());

    fs::write(&path, insee_file(&[(1, "LEO", "2001", 3)])).unwrap();
    let table = cache.get(&path).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(cache.loads(), 1);
}

/// Test that the default policy keeps serving a table after the file changes
#[test]
fn test_identifier_only_serves_stale_table() {
    let fixture = write_fixture(&insee_file(&[(1, "JEAN", "2000", 10)]));
    let cache = cache(CacheConfig::default());

    let before = cache.get(fixture.path()).unwrap();
    fs::write(fixture.path(), insee_file(&[(1, "PAUL", "2000", 10)])).unwrap();
    let after = cache.get(fixture.path()).unwrap();

    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.rows()[0].name, "JEAN");

    assert!(cache.invalidate(fixture.path()));
    let reloaded = cache.get(fixture.path()).unwrap();
    assert_eq!(reloaded.rows()[0].name, "PAUL");
}

/// Test that modification-time freshness reloads a rewritten file
#[test]
fn test_modified_time_reloads() {
    let fixture = write_fixture(&insee_file(&[(1, "JEAN", "2000", 10)]));
    let cache = cache(CacheConfig::default().with_freshness(Freshness::ModifiedTime));

    let before = cache.get(fixture.path()).unwrap();
    assert!(Arc::ptr_eq(&before, &cache.get(fixture.path()).unwrap()));

    fs::write(fixture.path(), insee_file(&[(1, "PAUL", "2000", 10)])).unwrap();
    fs::File::options()
        .write(true)
        .open(fixture.path())
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();

    let after = cache.get(fixture.path()).unwrap();
    assert_eq!(after.rows()[0].name, "PAUL");
    assert_eq!(cache.loads(), 2);
}

/// Test least-recently-used eviction at capacity
#[test]
fn test_capacity_evicts_least_recent() {
    let a = write_fixture(&insee_file(&[(1, "A", "2000", 1)]));
    let b = write_fixture(&insee_file(&[(1, "B", "2000", 1)]));
    let cache = cache(CacheConfig::default().with_capacity(1));

    cache.get(a.path()).unwrap();
    cache.get(b.path()).unwrap();
    assert_eq!(cache.len(), 1);
    assert!(!cache.contains(a.path()));
    assert!(cache.contains(b.path()));

    cache.get(a.path()).unwrap();
    assert_eq!(cache.loads(), 3);

    cache.clear();
    assert!(cache.is_empty());
}
