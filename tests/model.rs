//! Model tests, checking the trees against the standard library equivalents
//! over randomised operation sequences.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use bosk::{RbMap, RbSet, SplayMap, SplaySet};

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    PopFirst,
    PopLast,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u16>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        any::<u16>().prop_map(Op::Remove),
        any::<u16>().prop_map(Op::Get),
        Just(Op::PopFirst),
        Just(Op::PopLast),
    ]
}

proptest! {
    #[test]
    fn rb_map_matches_btree_map(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let mut map = RbMap::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let fresh = !model.contains_key(&key);
                    prop_assert_eq!(map.insert(key, value), fresh);
                    model.entry(key).or_insert(value);
                }
                Op::Remove(key) => {
                    let expected = model.remove(&key).map(|value| (key, value));
                    let removed = map.remove(&key).map(|(k, v)| (*k, *v));
                    prop_assert_eq!(removed, expected);
                }
                Op::Get(key) => {
                    prop_assert_eq!(map.get(&key), model.get(&key));
                }
                Op::PopFirst => {
                    let expected = model.pop_first();
                    let popped = map.pop_first().map(|(k, v)| (*k, *v));
                    prop_assert_eq!(popped, expected);
                }
                Op::PopLast => {
                    let expected = model.pop_last();
                    let popped = map.pop_last().map(|(k, v)| (*k, *v));
                    prop_assert_eq!(popped, expected);
                }
            }
            prop_assert_eq!(map.count(), model.len());
            prop_assert_eq!(map.first().map(|(k, _)| *k), model.first_key_value().map(|(k, _)| *k));
            prop_assert_eq!(map.last().map(|(k, _)| *k), model.last_key_value().map(|(k, _)| *k));
        }

        let ours: Vec<(u16, u32)> = map.iter().copied().collect();
        let theirs: Vec<(u16, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn splay_map_matches_btree_map(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let mut map = SplayMap::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let fresh = !model.contains_key(&key);
                    prop_assert_eq!(map.insert(key, value), fresh);
                    model.entry(key).or_insert(value);
                }
                Op::Remove(key) => {
                    let expected = model.remove(&key).map(|value| (key, value));
                    let removed = map.remove(&key).map(|(k, v)| (*k, *v));
                    prop_assert_eq!(removed, expected);
                }
                Op::Get(key) => {
                    prop_assert_eq!(map.get(&key).copied(), model.get(&key).copied());
                }
                Op::PopFirst => {
                    let expected = model.pop_first();
                    let popped = map.pop_first().map(|(k, v)| (*k, *v));
                    prop_assert_eq!(popped, expected);
                }
                Op::PopLast => {
                    let expected = model.pop_last();
                    let popped = map.pop_last().map(|(k, v)| (*k, *v));
                    prop_assert_eq!(popped, expected);
                }
            }
            prop_assert_eq!(map.count(), model.len());
            prop_assert_eq!(map.first().map(|(k, _)| *k), model.first_key_value().map(|(k, _)| *k));
            prop_assert_eq!(map.last().map(|(k, _)| *k), model.last_key_value().map(|(k, _)| *k));
        }

        let ours: Vec<(u16, u32)> = map.iter().copied().collect();
        let theirs: Vec<(u16, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn rb_set_matches_btree_set(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let mut set = RbSet::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key, _) => {
                    prop_assert_eq!(set.insert(key), model.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(set.remove(&key).copied(), model.take(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(set.contains(&key), model.contains(&key));
                }
                Op::PopFirst => {
                    prop_assert_eq!(set.pop_first().copied(), model.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(set.pop_last().copied(), model.pop_last());
                }
            }
            prop_assert_eq!(set.count(), model.len());
        }

        let ours: Vec<u16> = set.iter().copied().collect();
        let theirs: Vec<u16> = model.iter().copied().collect();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn splay_set_matches_btree_set(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let mut set = SplaySet::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key, _) => {
                    prop_assert_eq!(set.insert(key), model.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(set.remove(&key).copied(), model.take(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(set.contains(&key), model.contains(&key));
                }
                Op::PopFirst => {
                    prop_assert_eq!(set.pop_first().copied(), model.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(set.pop_last().copied(), model.pop_last());
                }
            }
            prop_assert_eq!(set.count(), model.len());
        }

        let ours: Vec<u16> = set.iter().copied().collect();
        let theirs: Vec<u16> = model.iter().copied().collect();
        prop_assert_eq!(ours, theirs);
    }
}
