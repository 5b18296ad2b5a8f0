//! Concurrency tests: many sessions submitting at once

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use impoll_store::{SqliteValueStore, ValueStore};

fn hammer(store: Arc<dyn ValueStore>, writers: usize) {
    let handles: Vec<_> = (0..writers)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.insert(i as f64).unwrap())
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

fn assert_contiguous(store: &dyn ValueStore, expected: usize) {
    let all = store.read_all().unwrap();
    assert_eq!(all.len(), expected);

    let ids: BTreeSet<i64> = all.iter().map(|o| o.id).collect();
    assert_eq!(ids.len(), expected, "duplicate ids");
    let first = *ids.iter().next().unwrap();
    let last = *ids.iter().next_back().unwrap();
    assert_eq!(last - first + 1, expected as i64, "ids are not contiguous");

    let values: BTreeSet<i64> = all.iter().map(|o| o.value as i64).collect();
    assert_eq!(values, (0..expected as i64).collect::<BTreeSet<_>>());
}

#[test]
fn test_hundred_concurrent_inserts_in_memory() {
    let store: Arc<dyn ValueStore> = Arc::new(SqliteValueStore::open_in_memory().unwrap());
    hammer(Arc::clone(&store), 100);
    assert_contiguous(store.as_ref(), 100);
}

#[test]
fn test_hundred_concurrent_inserts_file_backed() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn ValueStore> =
        Arc::new(SqliteValueStore::open(dir.path().join("data.db")).unwrap());
    hammer(Arc::clone(&store), 100);
    assert_contiguous(store.as_ref(), 100);
    assert_eq!(store.read_all().unwrap()[0].id, 1);
}

#[test]
fn test_readers_never_see_partial_state() {
    let store: Arc<dyn ValueStore> = Arc::new(SqliteValueStore::open_in_memory().unwrap());

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..200 {
                store.insert(i as f64).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut last_len = 0;
                for _ in 0..50 {
                    let all = store.read_all().unwrap();
                    assert!(all.len() >= last_len);
                    assert!(all.windows(2).all(|w| w[1].id == w[0].id + 1));
                    last_len = all.len();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.count().unwrap(), 200);
}
