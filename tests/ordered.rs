//! Ordered-traversal and shared-behaviour tests at the public API level.

use pretty_assertions::assert_eq;

use bosk::{RbMap, RbMapBy, RbSet, SplayMap, SplaySet, SplaySetBy, StringMap, StringSet};

#[test]
fn rb_map_holds_order_through_churn() {
    let mut map = RbMap::new();
    for key in [10, 20, 5, 15, 25, 1] {
        assert!(map.insert(key, key * 100));
    }

    let keys: Vec<i32> = map.iter().map(|kv| kv.0).collect();
    assert_eq!(keys, [1, 5, 10, 15, 20, 25]);

    assert_eq!(map.remove(&10), Some((&10, &1000)));
    let keys: Vec<i32> = map.iter().map(|kv| kv.0).collect();
    assert_eq!(keys, [1, 5, 15, 20, 25]);

    assert_eq!(map.first(), Some((&1, &100)));
    assert_eq!(map.last(), Some((&25, &2500)));
}

#[test]
fn splay_map_holds_order_through_churn() {
    let mut map = SplayMap::new();
    for key in [10, 20, 5, 15, 25, 1] {
        assert!(map.insert(key, key * 100));
    }

    let keys: Vec<i32> = map.iter().map(|kv| kv.0).collect();
    assert_eq!(keys, [1, 5, 10, 15, 20, 25]);

    assert_eq!(map.remove(&10), Some((&10, &1000)));
    let keys: Vec<i32> = map.iter().map(|kv| kv.0).collect();
    assert_eq!(keys, [1, 5, 15, 20, 25]);

    // A miss re-roots the tree but does not change its contents
    assert_eq!(map.get(&11), None);
    let keys: Vec<i32> = map.iter().map(|kv| kv.0).collect();
    assert_eq!(keys, [1, 5, 15, 20, 25]);
}

#[test]
fn sequential_inserts_stay_balanced_enough_to_drain() {
    let mut map = RbMap::new();
    for key in 0..10000 {
        map.insert(key, ());
    }
    let mut expected = 0;
    while let Some((&key, _)) = map.pop_first() {
        assert_eq!(key, expected);
        expected += 1;
    }
    assert_eq!(expected, 10000);

    let mut set = SplaySet::new();
    for key in 0..10000 {
        set.insert(key);
    }
    let mut expected = 9999;
    while let Some(&key) = set.pop_last() {
        assert_eq!(key, expected);
        expected -= 1;
    }
    assert_eq!(expected, -1);
}

#[test]
fn comparator_drives_the_order() {
    let mut map = RbMapBy::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    map.insert("pear", 1);
    map.insert("fig", 2);
    map.insert("apricot", 3);

    // "plum" is equal to "pear" under the length comparator
    assert!(!map.insert("plum", 4));
    assert_eq!(map.get(&"plum"), Some(&1));

    let keys: Vec<&str> = map.iter().map(|kv| kv.0).collect();
    assert_eq!(keys, ["fig", "pear", "apricot"]);

    let mut set = SplaySetBy::new(|a: &i32, b: &i32| b.cmp(a));
    for key in [3, 1, 4, 1, 5] {
        set.insert(key);
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, [5, 4, 3, 1]);
}

#[test]
fn string_containers_round_trip() {
    let words = ["whiskey", "tango", "foxtrot", "alpha", "zulu"];

    let mut map: StringMap<usize> = words.iter().enumerate().map(|(i, w)| (*w, i)).collect();
    assert_eq!(map.count(), 5);
    assert_eq!(map.get("tango"), Some(&1));
    assert_eq!(map.get("sierra"), None);

    let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["alpha", "foxtrot", "tango", "whiskey", "zulu"]);

    assert_eq!(map.pop_first(), Some(("alpha", &3)));
    assert_eq!(map.pop_last(), Some(("zulu", &4)));

    let mut set: StringSet = words.iter().copied().collect();
    assert!(set.contains("zulu"));
    assert_eq!(set.remove("zulu"), Some("zulu"));
    assert_eq!(set.remove("zulu"), None);

    let keys: Vec<&str> = set.iter().collect();
    assert_eq!(keys, ["alpha", "foxtrot", "tango", "whiskey"]);
}

#[test]
fn clear_resets_for_reuse() {
    let mut set: RbSet<i32> = (0..100).collect();
    assert_eq!(set.count(), 100);

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.first(), None);
    assert_eq!(set.iter().count(), 0);

    for key in (0..100).rev() {
        set.insert(key);
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    let expected: Vec<i32> = (0..100).collect();
    assert_eq!(keys, expected);
}

#[test]
fn reserve_and_try_reserve_make_room() {
    let mut map: SplayMap<u64, u64> = SplayMap::new();
    map.reserve(1000);
    for key in 0..1000 {
        map.insert(key, key);
    }
    assert_eq!(map.count(), 1000);

    let mut set: RbSet<u64> = RbSet::new();
    set.try_reserve(1000).unwrap();
    for key in 0..1000 {
        set.insert(key);
    }
    assert_eq!(set.count(), 1000);
}
