#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use super::super::*;

type Map = FlightMap<&'static str, u32, String>;

#[test]
fn test_value_is_resolved_once() {
    let map = Map::new();
    let calls = AtomicUsize::new(0);
    let resolve = || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(7)
    };

    assert_eq!(map.get_or_resolve(&"a", resolve), Ok(7));
    assert_eq!(map.get_or_resolve(&"a", resolve), Ok(7));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(map.get(&"a"), Some(7));
    assert_eq!(map.state(&"a"), EntryState::Resolved);
    assert_eq!(map.resolved_len(), 1);
}

#[test]
fn test_failure_is_not_remembered() {
    let map = Map::new();
    assert_eq!(
        map.get_or_resolve(&"a", || Err("boom".to_owned())),
        Err("boom".to_owned())
    );
    assert_eq!(map.state(&"a"), EntryState::Unresolved);
    assert_eq!(map.get_or_resolve(&"a", || Ok(1)), Ok(1));
}

#[test]
fn test_panicking_resolver_abandons_slot() {
    let map = Map::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        map.get_or_resolve(&"a", || panic!("resolver crashed"))
    }));
    assert!(result.is_err());
    assert_eq!(map.state(&"a"), EntryState::Unresolved);
    assert_eq!(map.get_or_resolve(&"a", || Ok(2)), Ok(2));
}

#[test]
fn test_clear_and_remove_forget_values() {
    let map = Map::new();
    map.get_or_resolve(&"a", || Ok(1)).unwrap();
    map.get_or_resolve(&"b", || Ok(2)).unwrap();

    map.remove(&"a");
    assert_eq!(map.get(&"a"), None);
    assert_eq!(map.get(&"b"), Some(2));

    map.clear();
    assert_eq!(map.resolved_len(), 0);
    assert_eq!(map.get_or_resolve(&"b", || Ok(3)), Ok(3));
}

#[test]
fn test_waiter_shares_in_flight_failure() {
    let map = Map::new();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let calls = AtomicUsize::new(0);
    let (map, calls) = (&map, &calls);

    thread::scope(|s| {
        let leader = s.spawn(move || {
            map.get_or_resolve(&"a", || {
                calls.fetch_add(1, Ordering::SeqCst);
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                Err("console died".to_owned())
            })
        });

        entered_rx.recv().unwrap();
        assert_eq!(map.state(&"a"), EntryState::Resolving);

        let follower = s.spawn(move || {
            map.get_or_resolve(&"a", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            })
        });

        // The follower either joins the failing flight or starts a fresh one
        // after it; it never runs concurrently with the leader.
        release_tx.send(()).unwrap();
        assert_eq!(leader.join().unwrap(), Err("console died".to_owned()));
        let followed = follower.join().unwrap();
        match followed {
            Err(err) => {
                assert_eq!(err, "console died");
                assert_eq!(calls.load(Ordering::SeqCst), 1);
            }
            Ok(value) => {
                assert_eq!(value, 1);
                assert_eq!(calls.load(Ordering::SeqCst), 2);
            }
        }
    });
}

#[test]
fn test_distinct_keys_do_not_block_each_other() {
    let map = Map::new();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let map = &map;

    thread::scope(|s| {
        let slow = s.spawn(move || {
            map.get_or_resolve(&"slow", || {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                Ok(1)
            })
        });

        entered_rx.recv().unwrap();
        assert_eq!(map.get_or_resolve(&"fast", || Ok(2)), Ok(2));
        assert_eq!(map.state(&"slow"), EntryState::Resolving);

        release_tx.send(()).unwrap();
        assert_eq!(slow.join().unwrap(), Ok(1));
    });
}
