//! Implementation of maps, backed by red-black and splay trees

#![warn(missing_docs)]

extern crate alloc;

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use compact_str::CompactString;
use core::{cmp::Ordering, iter::FusedIterator};

use crate::{llrb, splay, Slot};

//-----------------------------------------------------------------------------------------------//

/// A map between keys and values, implemented using a red-black tree.
///
/// Every operation is O(log n) in the worst case, and lookups do not modify the tree.
#[derive(Clone)]
pub struct RbMap<K, V>
where
    K: Ord,
{
    tree: llrb::Tree,
    key_value: Vec<(K, V)>,
}

impl<K, V> RbMap<K, V>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> RbMap<K, V> {
        RbMap {
            tree: llrb::Tree::new(),
            key_value: Vec::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> RbMap<K, V> {
        RbMap {
            tree: llrb::Tree::with_capacity(capacity),
            key_value: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of key/value pairs in the `RbMap`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any key/value pairs in the `RbMap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all key/value pairs from the `RbMap`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_value.truncate(0);
    }

    /// Reserves capacity for at least `additional` more key/value pairs
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_value.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](RbMap::reserve). On failure the map is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_value.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a value by key.
    ///
    /// If the key is not in the tree then `None` is returned.
    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&self.key_value[slot].1)
    }

    /// Get a mutable reference by key.
    ///
    /// If the key is not in the tree then `None` is returned - this function will not create a
    /// key if it does not exist. In this case use `insert` instead.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&mut self.key_value[slot].1)
    }

    /// Check if a key is in the `RbMap`
    pub fn contains(&self, key: &K) -> bool {
        !self.tree.get(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b)) != 0
    }

    /// Insert a key/value pair.
    ///
    /// If an equal key is already in the map, nothing is inserted, the stored entry is left
    /// untouched and `false` is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.tree.insert(&key, &self.key_value, |t| &t.0, |a, b| a.cmp(b)) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_value.len() {
                    self.key_value.push((key, value));
                } else {
                    self.key_value[slot] = (key, value);
                }
                true
            }
        }
    }

    /// Remove a key/value pair by key.
    ///
    /// The removed pair is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned and the map is unchanged.
    pub fn remove(&mut self, key: &K) -> Option<(&K, &V)> {
        let slot = self.tree.remove(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the first key/value pair in the map
    pub fn first(&self) -> Option<(&K, &V)> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the last key/value pair in the map
    pub fn last(&self) -> Option<(&K, &V)> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the first key/value pair from the map
    pub fn pop_first(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the last key/value pair from the map
    pub fn pop_last(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Iterate over the key/value pairs in the `RbMap`, in ascending key order
    pub fn iter(&self) -> RbMapIterator<'_, K, V> {
        RbMapIterator {
            indices: self.tree.indices(),
            key_value: &self.key_value,
        }
    }
}

impl<K, V> Default for RbMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a RbMap<K, V>
where
    K: Ord,
{
    type Item = &'a (K, V);
    type IntoIter = RbMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for RbMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over an `RbMap`
pub struct RbMapIterator<'a, K, V> {
    indices: llrb::Indices<'a>,
    key_value: &'a [(K, V)],
}

impl<'a, K, V> Iterator for RbMapIterator<'a, K, V> {
    type Item = &'a (K, V);

    fn next(&mut self) -> Option<&'a (K, V)> {
        let slot = self.indices.next()?;
        Some(&self.key_value[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<K, V> FusedIterator for RbMapIterator<'_, K, V> {}

impl<K, V> ExactSizeIterator for RbMapIterator<'_, K, V> {}

//-----------------------------------------------------------------------------------------------//

/// A map between keys and values, implemented using a red-black tree.
///
/// This version allows a custom sorting function to be used.
#[derive(Clone)]
pub struct RbMapBy<K, V, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    tree: llrb::Tree,
    key_value: Vec<(K, V)>,
    compare: F,
}

impl<K, V, F> RbMapBy<K, V, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Constructor
    pub fn new(compare: F) -> RbMapBy<K, V, F> {
        RbMapBy {
            tree: llrb::Tree::new(),
            key_value: Vec::new(),
            compare,
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize, compare: F) -> RbMapBy<K, V, F> {
        RbMapBy {
            tree: llrb::Tree::with_capacity(capacity),
            key_value: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Get the number of key/value pairs in the `RbMapBy`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any key/value pairs in the `RbMapBy`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all key/value pairs from the `RbMapBy`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_value.truncate(0);
    }

    /// Reserves capacity for at least `additional` more key/value pairs
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_value.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](RbMapBy::reserve). On failure the map is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_value.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a value by key.
    ///
    /// If the key is not in the tree then `None` is returned.
    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&self.key_value[slot].1)
    }

    /// Get a mutable reference by key.
    ///
    /// If the key is not in the tree then `None` is returned - this function will not create a
    /// key if it does not exist. In this case use `insert` instead.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&mut self.key_value[slot].1)
    }

    /// Check if a key is in the `RbMapBy`
    pub fn contains(&self, key: &K) -> bool {
        !self.tree.get(key, &self.key_value, |t| &t.0, &self.compare) != 0
    }

    /// Insert a key/value pair.
    ///
    /// If an equal key is already in the map, nothing is inserted, the stored entry is left
    /// untouched and `false` is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.tree.insert(&key, &self.key_value, |t| &t.0, &self.compare) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_value.len() {
                    self.key_value.push((key, value));
                } else {
                    self.key_value[slot] = (key, value);
                }
                true
            }
        }
    }

    /// Remove a key/value pair by key.
    ///
    /// The removed pair is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned and the map is unchanged.
    pub fn remove(&mut self, key: &K) -> Option<(&K, &V)> {
        let slot = self.tree.remove(key, &self.key_value, |t| &t.0, &self.compare);
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the first key/value pair in the map
    pub fn first(&self) -> Option<(&K, &V)> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the last key/value pair in the map
    pub fn last(&self) -> Option<(&K, &V)> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the first key/value pair from the map
    pub fn pop_first(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the last key/value pair from the map
    pub fn pop_last(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Iterate over the key/value pairs in the `RbMapBy`, in ascending key order
    pub fn iter(&self) -> RbMapIterator<'_, K, V> {
        RbMapIterator {
            indices: self.tree.indices(),
            key_value: &self.key_value,
        }
    }
}

impl<'a, K, V, F> IntoIterator for &'a RbMapBy<K, V, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    type Item = &'a (K, V);
    type IntoIter = RbMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A map between keys and values, implemented using a splay tree.
///
/// Every access reconfigures the tree to move the accessed key to the root, so repeated lookups
/// of the same or nearby keys are fast. This also means lookups need `&mut self`.
#[derive(Clone)]
pub struct SplayMap<K, V>
where
    K: Ord,
{
    tree: splay::Tree,
    key_value: Vec<(K, V)>,
}

impl<K, V> SplayMap<K, V>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> SplayMap<K, V> {
        SplayMap {
            tree: splay::Tree::new(),
            key_value: Vec::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> SplayMap<K, V> {
        SplayMap {
            tree: splay::Tree::with_capacity(capacity),
            key_value: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of key/value pairs in the `SplayMap`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any key/value pairs in the `SplayMap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all key/value pairs from the `SplayMap`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_value.truncate(0);
    }

    /// Reserves capacity for at least `additional` more key/value pairs
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_value.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](SplayMap::reserve). On failure the map is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_value.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a value by key, splaying it to the root of the tree.
    ///
    /// If the key is not in the tree then `None` is returned. The tree is restructured either
    /// way, which is why this takes `&mut self`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&self.key_value[slot].1)
    }

    /// Get a mutable reference by key, splaying it to the root of the tree.
    ///
    /// If the key is not in the tree then `None` is returned - this function will not create a
    /// key if it does not exist. In this case use `insert` instead.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&mut self.key_value[slot].1)
    }

    /// Check if a key is in the `SplayMap`, splaying it to the root
    pub fn contains(&mut self, key: &K) -> bool {
        !self.tree.get(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b)) != 0
    }

    /// Insert a key/value pair.
    ///
    /// If an equal key is already in the map, nothing is inserted, the stored entry is left
    /// untouched (though it is splayed to the root) and `false` is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.tree.insert(&key, &self.key_value, |t| &t.0, |a, b| a.cmp(b)) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_value.len() {
                    self.key_value.push((key, value));
                } else {
                    self.key_value[slot] = (key, value);
                }
                true
            }
        }
    }

    /// Remove a key/value pair by key.
    ///
    /// The removed pair is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned - the tree is still re-rooted around the
    /// closest key, as for any other access.
    pub fn remove(&mut self, key: &K) -> Option<(&K, &V)> {
        let slot = self.tree.remove(key, &self.key_value, |t| &t.0, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the first key/value pair in the map
    pub fn first(&self) -> Option<(&K, &V)> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the last key/value pair in the map
    pub fn last(&self) -> Option<(&K, &V)> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the first key/value pair from the map
    pub fn pop_first(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the last key/value pair from the map
    pub fn pop_last(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Iterate over the key/value pairs in the `SplayMap`, in ascending key order
    pub fn iter(&self) -> SplayMapIterator<'_, K, V> {
        SplayMapIterator {
            indices: self.tree.indices(),
            key_value: &self.key_value,
        }
    }
}

impl<K, V> Default for SplayMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a SplayMap<K, V>
where
    K: Ord,
{
    type Item = &'a (K, V);
    type IntoIter = SplayMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for SplayMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `SplayMap`
pub struct SplayMapIterator<'a, K, V> {
    indices: splay::Indices<'a>,
    key_value: &'a [(K, V)],
}

impl<'a, K, V> Iterator for SplayMapIterator<'a, K, V> {
    type Item = &'a (K, V);

    fn next(&mut self) -> Option<&'a (K, V)> {
        let slot = self.indices.next()?;
        Some(&self.key_value[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<K, V> FusedIterator for SplayMapIterator<'_, K, V> {}

impl<K, V> ExactSizeIterator for SplayMapIterator<'_, K, V> {}

//-----------------------------------------------------------------------------------------------//

/// A map between keys and values, implemented using a splay tree.
///
/// This version allows a custom sorting function to be used.
#[derive(Clone)]
pub struct SplayMapBy<K, V, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    tree: splay::Tree,
    key_value: Vec<(K, V)>,
    compare: F,
}

impl<K, V, F> SplayMapBy<K, V, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Constructor
    pub fn new(compare: F) -> SplayMapBy<K, V, F> {
        SplayMapBy {
            tree: splay::Tree::new(),
            key_value: Vec::new(),
            compare,
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize, compare: F) -> SplayMapBy<K, V, F> {
        SplayMapBy {
            tree: splay::Tree::with_capacity(capacity),
            key_value: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Get the number of key/value pairs in the `SplayMapBy`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any key/value pairs in the `SplayMapBy`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all key/value pairs from the `SplayMapBy`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_value.truncate(0);
    }

    /// Reserves capacity for at least `additional` more key/value pairs
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_value.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](SplayMapBy::reserve). On failure the map is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_value.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a value by key, splaying it to the root of the tree.
    ///
    /// If the key is not in the tree then `None` is returned. The tree is restructured either
    /// way, which is why this takes `&mut self`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&self.key_value[slot].1)
    }

    /// Get a mutable reference by key, splaying it to the root of the tree.
    ///
    /// If the key is not in the tree then `None` is returned - this function will not create a
    /// key if it does not exist. In this case use `insert` instead.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.tree.get(key, &self.key_value, |t| &t.0, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&mut self.key_value[slot].1)
    }

    /// Check if a key is in the `SplayMapBy`, splaying it to the root
    pub fn contains(&mut self, key: &K) -> bool {
        !self.tree.get(key, &self.key_value, |t| &t.0, &self.compare) != 0
    }

    /// Insert a key/value pair.
    ///
    /// If an equal key is already in the map, nothing is inserted, the stored entry is left
    /// untouched (though it is splayed to the root) and `false` is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.tree.insert(&key, &self.key_value, |t| &t.0, &self.compare) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_value.len() {
                    self.key_value.push((key, value));
                } else {
                    self.key_value[slot] = (key, value);
                }
                true
            }
        }
    }

    /// Remove a key/value pair by key.
    ///
    /// The removed pair is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned - the tree is still re-rooted around the
    /// closest key, as for any other access.
    pub fn remove(&mut self, key: &K) -> Option<(&K, &V)> {
        let slot = self.tree.remove(key, &self.key_value, |t| &t.0, &self.compare);
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the first key/value pair in the map
    pub fn first(&self) -> Option<(&K, &V)> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Get the last key/value pair in the map
    pub fn last(&self) -> Option<(&K, &V)> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the first key/value pair from the map
    pub fn pop_first(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Pop the last key/value pair from the map
    pub fn pop_last(&mut self) -> Option<(&K, &V)> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((&key_value.0, &key_value.1))
    }

    /// Iterate over the key/value pairs in the `SplayMapBy`, in ascending key order
    pub fn iter(&self) -> SplayMapIterator<'_, K, V> {
        SplayMapIterator {
            indices: self.tree.indices(),
            key_value: &self.key_value,
        }
    }
}

impl<'a, K, V, F> IntoIterator for &'a SplayMapBy<K, V, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    type Item = &'a (K, V);
    type IntoIter = SplayMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A map between strings and values, implemented using a splay tree.
///
/// This is a specialised version of [`SplayMap`] that stores keys as strings.
#[derive(Clone)]
pub struct StringMap<V> {
    tree: splay::Tree,
    key_value: Vec<(CompactString, V)>,
}

impl<V> StringMap<V> {
    /// Constructor
    pub fn new() -> StringMap<V> {
        StringMap {
            tree: splay::Tree::new(),
            key_value: Vec::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringMap<V> {
        StringMap {
            tree: splay::Tree::with_capacity(capacity),
            key_value: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of string/value pairs in the `StringMap`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any string/value pairs in the `StringMap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all string/value pairs from the `StringMap`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_value.truncate(0);
    }

    /// Reserves capacity for at least `additional` more string/value pairs
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_value.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](StringMap::reserve). On failure the map is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_value.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a value by string, splaying it to the root of the tree.
    ///
    /// If the string is not in the tree then `None` is returned.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let slot = self.tree.get(key, &self.key_value, |t| t.0.as_str(), |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&self.key_value[slot].1)
    }

    /// Get a mutable reference by string, splaying it to the root of the tree.
    ///
    /// If the string is not in the tree then `None` is returned - this function will not create
    /// a string if it does not exist. In this case use `insert` instead.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let slot = self.tree.get(key, &self.key_value, |t| t.0.as_str(), |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&mut self.key_value[slot].1)
    }

    /// Check if a string is in the `StringMap`, splaying it to the root
    pub fn contains(&mut self, key: &str) -> bool {
        !self.tree.get(key, &self.key_value, |t| t.0.as_str(), |a, b| a.cmp(b)) != 0
    }

    /// Insert a string/value pair.
    ///
    /// If an equal string is already in the map, nothing is inserted, the stored entry is left
    /// untouched (though it is splayed to the root) and `false` is returned.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        match self.tree.insert(key, &self.key_value, |t| t.0.as_str(), |a, b| a.cmp(b)) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_value.len() {
                    self.key_value.push((CompactString::new(key), value));
                } else {
                    self.key_value[slot] = (CompactString::new(key), value);
                }
                true
            }
        }
    }

    /// Remove a string/value pair by string.
    ///
    /// The removed pair is returned by reference; its slot is recycled by a later insertion. If
    /// the string does not exist, then `None` is returned - the tree is still re-rooted around
    /// the closest string, as for any other access.
    pub fn remove(&mut self, key: &str) -> Option<(&str, &V)> {
        let slot = self.tree.remove(key, &self.key_value, |t| t.0.as_str(), |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((key_value.0.as_str(), &key_value.1))
    }

    /// Get the first string/value pair in the map
    pub fn first(&self) -> Option<(&str, &V)> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((key_value.0.as_str(), &key_value.1))
    }

    /// Get the last string/value pair in the map
    pub fn last(&self) -> Option<(&str, &V)> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((key_value.0.as_str(), &key_value.1))
    }

    /// Pop the first string/value pair from the map
    pub fn pop_first(&mut self) -> Option<(&str, &V)> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((key_value.0.as_str(), &key_value.1))
    }

    /// Pop the last string/value pair from the map
    pub fn pop_last(&mut self) -> Option<(&str, &V)> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        let key_value = &self.key_value[slot];
        Some((key_value.0.as_str(), &key_value.1))
    }

    /// Iterate over the string/value pairs in the `StringMap`, in ascending string order
    pub fn iter(&self) -> StringMapIterator<'_, V> {
        StringMapIterator {
            indices: self.tree.indices(),
            key_value: &self.key_value,
        }
    }
}

impl<V> Default for StringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a StringMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = StringMapIterator<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for StringMap<V> {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringMap`
pub struct StringMapIterator<'a, V> {
    indices: splay::Indices<'a>,
    key_value: &'a [(CompactString, V)],
}

impl<'a, V> Iterator for StringMapIterator<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<(&'a str, &'a V)> {
        let slot = self.indices.next()?;
        let key_value = &self.key_value[slot];
        Some((key_value.0.as_str(), &key_value.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<V> FusedIterator for StringMapIterator<'_, V> {}

impl<V> ExactSizeIterator for StringMapIterator<'_, V> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of inserting into the maps
fn test_map_0() {
    use alloc::{
        string::{String, ToString},
        vec,
    };

    let mut map = RbMap::new();

    map.insert(5, "Five".to_string());
    map.insert(1, "One".to_string());
    map.insert(9, "Nine".to_string());

    debug_assert_eq!(map.get(&5), Some(&"Five".to_string()));
    debug_assert_eq!(map.get(&4), None);

    let v: Vec<(i32, String)> = map.iter().cloned().collect();
    debug_assert_eq!(
        v,
        vec![
            (1, "One".to_string()),
            (5, "Five".to_string()),
            (9, "Nine".to_string())
        ]
    );

    let mut map = SplayMap::new();

    map.insert(5, "Five".to_string());
    map.insert(1, "One".to_string());
    map.insert(9, "Nine".to_string());

    debug_assert_eq!(map.get(&5), Some(&"Five".to_string()));
    debug_assert_eq!(map.get(&4), None);

    let v: Vec<(i32, String)> = map.iter().cloned().collect();
    debug_assert_eq!(
        v,
        vec![
            (1, "One".to_string()),
            (5, "Five".to_string()),
            (9, "Nine".to_string())
        ]
    );
}

#[test]
// Inserting an equal key keeps the original entry
fn test_map_1() {
    let mut map = RbMap::new();
    debug_assert!(map.insert(7, "original"));
    debug_assert!(!map.insert(7, "replacement"));
    debug_assert_eq!(map.count(), 1);
    debug_assert_eq!(map.get(&7), Some(&"original"));

    let mut map = SplayMap::new();
    debug_assert!(map.insert(7, "original"));
    debug_assert!(!map.insert(7, "replacement"));
    debug_assert_eq!(map.count(), 1);
    debug_assert_eq!(map.get(&7), Some(&"original"));
}

#[test]
// Removal returns the removed pair, and a miss returns None
fn test_map_2() {
    let mut map = RbMap::new();
    debug_assert_eq!(map.remove(&3), None);

    map.insert(3, "Three");
    debug_assert_eq!(map.remove(&3), Some((&3, &"Three")));
    debug_assert!(map.is_empty());
    debug_assert_eq!(map.remove(&3), None);

    let mut map = SplayMap::new();
    debug_assert_eq!(map.remove(&3), None);

    map.insert(3, "Three");
    debug_assert_eq!(map.remove(&3), Some((&3, &"Three")));
    debug_assert!(map.is_empty());
    debug_assert_eq!(map.remove(&3), None);
}

#[test]
// A custom comparator sorts the maps in the reverse order
fn test_map_3() {
    let mut map = RbMapBy::new(|a: &i32, b: &i32| b.cmp(a));
    for key in [2, 1, 3] {
        map.insert(key, key * 10);
    }
    let v: Vec<i32> = map.iter().map(|kv| kv.0).collect();
    debug_assert_eq!(v, [3, 2, 1]);
    debug_assert_eq!(map.first(), Some((&3, &30)));

    let mut map = SplayMapBy::new(|a: &i32, b: &i32| b.cmp(a));
    for key in [2, 1, 3] {
        map.insert(key, key * 10);
    }
    let v: Vec<i32> = map.iter().map(|kv| kv.0).collect();
    debug_assert_eq!(v, [3, 2, 1]);
    debug_assert_eq!(map.first(), Some((&3, &30)));
}

#[test]
// A very simple test of the string map
fn test_map_4() {
    let mut map = StringMap::new();

    map.insert("five", 5);
    map.insert("one", 1);
    map.insert("nine", 9);

    debug_assert_eq!(map.get("five"), Some(&5));
    debug_assert_eq!(map.get("seven"), None);
    debug_assert!(!map.insert("five", 55));
    debug_assert_eq!(map.get("five"), Some(&5));

    let v: Vec<&str> = map.iter().map(|(k, _)| k).collect();
    debug_assert_eq!(v, ["five", "nine", "one"]);

    debug_assert_eq!(map.remove("nine"), Some(("nine", &9)));
    debug_assert_eq!(map.count(), 2);
}

#[test]
// A stress test with inserting and getting
fn test_map_5() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 1000000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut rb = RbMap::new();
    let mut sp = SplayMap::new();
    let mut inserted = 0;

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        if rb.insert(key, value.clone()) {
            inserted += 1;
        }
        sp.insert(key, value);
    }

    debug_assert_eq!(rb.count(), inserted);
    debug_assert_eq!(sp.count(), inserted);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        debug_assert_eq!(rb.get(&key), Some(&value));
        debug_assert_eq!(sp.get(&key), Some(&value));
    }
}

#[test]
// A stress test with inserting and popping from both ends
fn test_map_6() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(9876543210);

    let mut rb = RbMap::new();
    let mut sp = SplayMap::new();

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        rb.insert(key, value.clone());
        sp.insert(key, value);
    }

    let mut last = 0;
    while let Some((key, value)) = rb.pop_first() {
        debug_assert!(*key >= last);
        debug_assert_eq!(&key.to_string(), value);
        last = *key;
    }
    debug_assert_eq!(rb.count(), 0);

    let mut last = usize::MAX;
    while let Some((key, value)) = sp.pop_last() {
        debug_assert!(*key <= last);
        debug_assert_eq!(&key.to_string(), value);
        last = *key;
    }
    debug_assert_eq!(sp.count(), 0);
}

#[test]
// After a lookup the splay map's accessed key is at the root of the tree
fn test_map_7() {
    let mut map = SplayMap::new();

    map.insert(5, ());
    map.insert(3, ());
    map.insert(8, ());

    debug_assert_eq!(map.get(&3), Some(&()));
    let root = map.tree.root();
    debug_assert_eq!(map.key_value[root].0, 3);

    // A duplicate insert splays but does not replace
    debug_assert!(!map.insert(3, ()));
    debug_assert_eq!(map.count(), 3);
    debug_assert_eq!(map.tree.root(), root);
}
