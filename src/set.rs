//! Implementation of sets, backed by red-black and splay trees

#![warn(missing_docs)]

extern crate alloc;

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use compact_str::CompactString;
use core::{cmp::Ordering, iter::FusedIterator};

use crate::{llrb, splay, Slot};

//-----------------------------------------------------------------------------------------------//

/// A set of keys, implemented using a red-black tree.
///
/// Every operation is O(log n) in the worst case, and lookups do not modify the tree.
#[derive(Clone)]
pub struct RbSet<K>
where
    K: Ord,
{
    tree: llrb::Tree,
    key_slice: Vec<K>,
}

impl<K> RbSet<K>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> RbSet<K> {
        RbSet {
            tree: llrb::Tree::new(),
            key_slice: Vec::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> RbSet<K> {
        RbSet {
            tree: llrb::Tree::with_capacity(capacity),
            key_slice: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of keys in the `RbSet`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any keys in the `RbSet`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys from the `RbSet`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_slice.truncate(0);
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_slice.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](RbSet::reserve). On failure the set is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_slice.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a key from the set.
    ///
    /// The returned reference is to the stored key, which may be useful when keys carry data
    /// that does not take part in the ordering. If the key is not in the set then `None` is
    /// returned.
    pub fn get(&self, key: &K) -> Option<&K> {
        let slot = self.tree.get(key, &self.key_slice, |t| t, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Check if a key is in the `RbSet`
    pub fn contains(&self, key: &K) -> bool {
        !self.tree.get(key, &self.key_slice, |t| t, |a, b| a.cmp(b)) != 0
    }

    /// Insert a key.
    ///
    /// If an equal key is already in the set, nothing is inserted, the stored key is left
    /// untouched and `false` is returned.
    pub fn insert(&mut self, key: K) -> bool {
        match self.tree.insert(&key, &self.key_slice, |t| t, |a, b| a.cmp(b)) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_slice.len() {
                    self.key_slice.push(key);
                } else {
                    self.key_slice[slot] = key;
                }
                true
            }
        }
    }

    /// Remove a key.
    ///
    /// The removed key is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned and the set is unchanged.
    pub fn remove(&mut self, key: &K) -> Option<&K> {
        let slot = self.tree.remove(key, &self.key_slice, |t| t, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the first key in the set
    pub fn first(&self) -> Option<&K> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the last key in the set
    pub fn last(&self) -> Option<&K> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the first key from the set
    pub fn pop_first(&mut self) -> Option<&K> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the last key from the set
    pub fn pop_last(&mut self) -> Option<&K> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Iterate over the keys in the `RbSet`, in ascending order
    pub fn iter(&self) -> RbSetIterator<'_, K> {
        RbSetIterator {
            indices: self.tree.indices(),
            key_slice: &self.key_slice,
        }
    }
}

impl<K> Default for RbSet<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K> IntoIterator for &'a RbSet<K>
where
    K: Ord,
{
    type Item = &'a K;
    type IntoIter = RbSetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> FromIterator<K> for RbSet<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over an `RbSet`
pub struct RbSetIterator<'a, K> {
    indices: llrb::Indices<'a>,
    key_slice: &'a [K],
}

impl<'a, K> Iterator for RbSetIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let slot = self.indices.next()?;
        Some(&self.key_slice[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<K> FusedIterator for RbSetIterator<'_, K> {}

impl<K> ExactSizeIterator for RbSetIterator<'_, K> {}

//-----------------------------------------------------------------------------------------------//

/// A set of keys, implemented using a red-black tree.
///
/// This version allows a custom sorting function to be used.
#[derive(Clone)]
pub struct RbSetBy<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    tree: llrb::Tree,
    key_slice: Vec<K>,
    compare: F,
}

impl<K, F> RbSetBy<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Constructor
    pub fn new(compare: F) -> RbSetBy<K, F> {
        RbSetBy {
            tree: llrb::Tree::new(),
            key_slice: Vec::new(),
            compare,
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize, compare: F) -> RbSetBy<K, F> {
        RbSetBy {
            tree: llrb::Tree::with_capacity(capacity),
            key_slice: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Get the number of keys in the `RbSetBy`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any keys in the `RbSetBy`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys from the `RbSetBy`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_slice.truncate(0);
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_slice.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](RbSetBy::reserve). On failure the set is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_slice.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a key from the set.
    ///
    /// The returned reference is to the stored key, which may be useful when keys carry data
    /// that does not take part in the ordering. If the key is not in the set then `None` is
    /// returned.
    pub fn get(&self, key: &K) -> Option<&K> {
        let slot = self.tree.get(key, &self.key_slice, |t| t, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Check if a key is in the `RbSetBy`
    pub fn contains(&self, key: &K) -> bool {
        !self.tree.get(key, &self.key_slice, |t| t, &self.compare) != 0
    }

    /// Insert a key.
    ///
    /// If an equal key is already in the set, nothing is inserted, the stored key is left
    /// untouched and `false` is returned.
    pub fn insert(&mut self, key: K) -> bool {
        match self.tree.insert(&key, &self.key_slice, |t| t, &self.compare) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_slice.len() {
                    self.key_slice.push(key);
                } else {
                    self.key_slice[slot] = key;
                }
                true
            }
        }
    }

    /// Remove a key.
    ///
    /// The removed key is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned and the set is unchanged.
    pub fn remove(&mut self, key: &K) -> Option<&K> {
        let slot = self.tree.remove(key, &self.key_slice, |t| t, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the first key in the set
    pub fn first(&self) -> Option<&K> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the last key in the set
    pub fn last(&self) -> Option<&K> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the first key from the set
    pub fn pop_first(&mut self) -> Option<&K> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the last key from the set
    pub fn pop_last(&mut self) -> Option<&K> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Iterate over the keys in the `RbSetBy`, in ascending order
    pub fn iter(&self) -> RbSetIterator<'_, K> {
        RbSetIterator {
            indices: self.tree.indices(),
            key_slice: &self.key_slice,
        }
    }
}

impl<'a, K, F> IntoIterator for &'a RbSetBy<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;
    type IntoIter = RbSetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A set of keys, implemented using a splay tree.
///
/// Every access reconfigures the tree to move the accessed key to the root, so repeated lookups
/// of the same or nearby keys are fast. This also means lookups need `&mut self`.
#[derive(Clone)]
pub struct SplaySet<K>
where
    K: Ord,
{
    tree: splay::Tree,
    key_slice: Vec<K>,
}

impl<K> SplaySet<K>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> SplaySet<K> {
        SplaySet {
            tree: splay::Tree::new(),
            key_slice: Vec::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> SplaySet<K> {
        SplaySet {
            tree: splay::Tree::with_capacity(capacity),
            key_slice: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of keys in the `SplaySet`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any keys in the `SplaySet`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys from the `SplaySet`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_slice.truncate(0);
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_slice.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](SplaySet::reserve). On failure the set is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_slice.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a key from the set, splaying it to the root of the tree.
    ///
    /// The returned reference is to the stored key, which may be useful when keys carry data
    /// that does not take part in the ordering. If the key is not in the set then `None` is
    /// returned. The tree is restructured either way, which is why this takes `&mut self`.
    pub fn get(&mut self, key: &K) -> Option<&K> {
        let slot = self.tree.get(key, &self.key_slice, |t| t, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Check if a key is in the `SplaySet`, splaying it to the root
    pub fn contains(&mut self, key: &K) -> bool {
        !self.tree.get(key, &self.key_slice, |t| t, |a, b| a.cmp(b)) != 0
    }

    /// Insert a key.
    ///
    /// If an equal key is already in the set, nothing is inserted, the stored key is left
    /// untouched (though it is splayed to the root) and `false` is returned.
    pub fn insert(&mut self, key: K) -> bool {
        match self.tree.insert(&key, &self.key_slice, |t| t, |a, b| a.cmp(b)) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_slice.len() {
                    self.key_slice.push(key);
                } else {
                    self.key_slice[slot] = key;
                }
                true
            }
        }
    }

    /// Remove a key.
    ///
    /// The removed key is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned - the tree is still re-rooted around the
    /// closest key, as for any other access.
    pub fn remove(&mut self, key: &K) -> Option<&K> {
        let slot = self.tree.remove(key, &self.key_slice, |t| t, |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the first key in the set
    pub fn first(&self) -> Option<&K> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the last key in the set
    pub fn last(&self) -> Option<&K> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the first key from the set
    pub fn pop_first(&mut self) -> Option<&K> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the last key from the set
    pub fn pop_last(&mut self) -> Option<&K> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Iterate over the keys in the `SplaySet`, in ascending order
    pub fn iter(&self) -> SplaySetIterator<'_, K> {
        SplaySetIterator {
            indices: self.tree.indices(),
            key_slice: &self.key_slice,
        }
    }
}

impl<K> Default for SplaySet<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K> IntoIterator for &'a SplaySet<K>
where
    K: Ord,
{
    type Item = &'a K;
    type IntoIter = SplaySetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> FromIterator<K> for SplaySet<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `SplaySet`
pub struct SplaySetIterator<'a, K> {
    indices: splay::Indices<'a>,
    key_slice: &'a [K],
}

impl<'a, K> Iterator for SplaySetIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let slot = self.indices.next()?;
        Some(&self.key_slice[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<K> FusedIterator for SplaySetIterator<'_, K> {}

impl<K> ExactSizeIterator for SplaySetIterator<'_, K> {}

//-----------------------------------------------------------------------------------------------//

/// A set of keys, implemented using a splay tree.
///
/// This version allows a custom sorting function to be used.
#[derive(Clone)]
pub struct SplaySetBy<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    tree: splay::Tree,
    key_slice: Vec<K>,
    compare: F,
}

impl<K, F> SplaySetBy<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Constructor
    pub fn new(compare: F) -> SplaySetBy<K, F> {
        SplaySetBy {
            tree: splay::Tree::new(),
            key_slice: Vec::new(),
            compare,
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize, compare: F) -> SplaySetBy<K, F> {
        SplaySetBy {
            tree: splay::Tree::with_capacity(capacity),
            key_slice: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Get the number of keys in the `SplaySetBy`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any keys in the `SplaySetBy`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all keys from the `SplaySetBy`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_slice.truncate(0);
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_slice.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](SplaySetBy::reserve). On failure the set is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_slice.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a key from the set, splaying it to the root of the tree.
    ///
    /// The returned reference is to the stored key, which may be useful when keys carry data
    /// that does not take part in the ordering. If the key is not in the set then `None` is
    /// returned. The tree is restructured either way, which is why this takes `&mut self`.
    pub fn get(&mut self, key: &K) -> Option<&K> {
        let slot = self.tree.get(key, &self.key_slice, |t| t, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Check if a key is in the `SplaySetBy`, splaying it to the root
    pub fn contains(&mut self, key: &K) -> bool {
        !self.tree.get(key, &self.key_slice, |t| t, &self.compare) != 0
    }

    /// Insert a key.
    ///
    /// If an equal key is already in the set, nothing is inserted, the stored key is left
    /// untouched (though it is splayed to the root) and `false` is returned.
    pub fn insert(&mut self, key: K) -> bool {
        match self.tree.insert(&key, &self.key_slice, |t| t, &self.compare) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_slice.len() {
                    self.key_slice.push(key);
                } else {
                    self.key_slice[slot] = key;
                }
                true
            }
        }
    }

    /// Remove a key.
    ///
    /// The removed key is returned by reference; its slot is recycled by a later insertion. If
    /// the key does not exist, then `None` is returned - the tree is still re-rooted around the
    /// closest key, as for any other access.
    pub fn remove(&mut self, key: &K) -> Option<&K> {
        let slot = self.tree.remove(key, &self.key_slice, |t| t, &self.compare);
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the first key in the set
    pub fn first(&self) -> Option<&K> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Get the last key in the set
    pub fn last(&self) -> Option<&K> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the first key from the set
    pub fn pop_first(&mut self) -> Option<&K> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Pop the last key from the set
    pub fn pop_last(&mut self) -> Option<&K> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        Some(&self.key_slice[slot])
    }

    /// Iterate over the keys in the `SplaySetBy`, in ascending order
    pub fn iter(&self) -> SplaySetIterator<'_, K> {
        SplaySetIterator {
            indices: self.tree.indices(),
            key_slice: &self.key_slice,
        }
    }
}

impl<'a, K, F> IntoIterator for &'a SplaySetBy<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;
    type IntoIter = SplaySetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A set of strings, implemented using a splay tree.
///
/// This is a specialised version of [`SplaySet`] that stores keys as strings.
#[derive(Clone)]
pub struct StringSet {
    tree: splay::Tree,
    key_slice: Vec<CompactString>,
}

impl StringSet {
    /// Constructor
    pub fn new() -> StringSet {
        StringSet {
            tree: splay::Tree::new(),
            key_slice: Vec::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringSet {
        StringSet {
            tree: splay::Tree::with_capacity(capacity),
            key_slice: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of strings in the `StringSet`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any strings in the `StringSet`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all strings from the `StringSet`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_slice.truncate(0);
    }

    /// Reserves capacity for at least `additional` more strings
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_slice.reserve(required);
        }
    }

    /// Fallible version of [`reserve`](StringSet::reserve). On failure the set is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.try_reserve(additional)?;
        if required > 0 {
            self.key_slice.try_reserve(required)?;
        }
        Ok(())
    }

    /// Get a string from the set, splaying it to the root of the tree.
    ///
    /// If the string is not in the set then `None` is returned.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        let slot = self.tree.get(key, &self.key_slice, |t| t.as_str(), |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(self.key_slice[slot].as_str())
    }

    /// Check if a string is in the `StringSet`, splaying it to the root
    pub fn contains(&mut self, key: &str) -> bool {
        !self.tree.get(key, &self.key_slice, |t| t.as_str(), |a, b| a.cmp(b)) != 0
    }

    /// Insert a string.
    ///
    /// If an equal string is already in the set, nothing is inserted and `false` is returned
    /// (though the stored string is splayed to the root).
    pub fn insert(&mut self, key: &str) -> bool {
        match self.tree.insert(key, &self.key_slice, |t| t.as_str(), |a, b| a.cmp(b)) {
            Slot::Found(_) => false,
            Slot::New(slot) => {
                if slot == self.key_slice.len() {
                    self.key_slice.push(CompactString::new(key));
                } else {
                    self.key_slice[slot] = CompactString::new(key);
                }
                true
            }
        }
    }

    /// Remove a string.
    ///
    /// The removed string is returned by reference; its slot is recycled by a later insertion.
    /// If the string does not exist, then `None` is returned - the tree is still re-rooted
    /// around the closest string, as for any other access.
    pub fn remove(&mut self, key: &str) -> Option<&str> {
        let slot = self.tree.remove(key, &self.key_slice, |t| t.as_str(), |a, b| a.cmp(b));
        if !slot == 0 {
            return None;
        }
        Some(self.key_slice[slot].as_str())
    }

    /// Get the first string in the set
    pub fn first(&self) -> Option<&str> {
        let slot = self.tree.first();
        if !slot == 0 {
            return None;
        }
        Some(self.key_slice[slot].as_str())
    }

    /// Get the last string in the set
    pub fn last(&self) -> Option<&str> {
        let slot = self.tree.last();
        if !slot == 0 {
            return None;
        }
        Some(self.key_slice[slot].as_str())
    }

    /// Pop the first string from the set
    pub fn pop_first(&mut self) -> Option<&str> {
        let slot = self.tree.pop_first();
        if !slot == 0 {
            return None;
        }
        Some(self.key_slice[slot].as_str())
    }

    /// Pop the last string from the set
    pub fn pop_last(&mut self) -> Option<&str> {
        let slot = self.tree.pop_last();
        if !slot == 0 {
            return None;
        }
        Some(self.key_slice[slot].as_str())
    }

    /// Iterate over the strings in the `StringSet`, in ascending order
    pub fn iter(&self) -> StringSetIterator<'_> {
        StringSetIterator {
            indices: self.tree.indices(),
            key_slice: &self.key_slice,
        }
    }
}

impl Default for StringSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a StringSet {
    type Item = &'a str;
    type IntoIter = StringSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a str> for StringSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringSet`
pub struct StringSetIterator<'a> {
    indices: splay::Indices<'a>,
    key_slice: &'a [CompactString],
}

impl<'a> Iterator for StringSetIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let slot = self.indices.next()?;
        Some(self.key_slice[slot].as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl FusedIterator for StringSetIterator<'_> {}

impl ExactSizeIterator for StringSetIterator<'_> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of inserting into the sets
fn test_set_0() {
    let mut set = RbSet::new();

    set.insert(5);
    set.insert(1);
    set.insert(9);

    debug_assert!(set.contains(&5));
    debug_assert!(!set.contains(&4));

    let v: Vec<i32> = set.iter().copied().collect();
    debug_assert_eq!(v, [1, 5, 9]);

    let mut set = SplaySet::new();

    set.insert(5);
    set.insert(1);
    set.insert(9);

    debug_assert!(set.contains(&5));
    debug_assert!(!set.contains(&4));

    let v: Vec<i32> = set.iter().copied().collect();
    debug_assert_eq!(v, [1, 5, 9]);
}

#[test]
// Inserting an equal key keeps the original key
fn test_set_1() {
    // Keys compared on the first tuple field only, so the second field tells
    // the original and the duplicate apart
    let compare = |a: &(i32, &str), b: &(i32, &str)| a.0.cmp(&b.0);

    let mut set = RbSetBy::new(compare);
    debug_assert!(set.insert((7, "original")));
    debug_assert!(!set.insert((7, "replacement")));
    debug_assert_eq!(set.count(), 1);
    debug_assert_eq!(set.get(&(7, "")), Some(&(7, "original")));

    let mut set = SplaySetBy::new(compare);
    debug_assert!(set.insert((7, "original")));
    debug_assert!(!set.insert((7, "replacement")));
    debug_assert_eq!(set.count(), 1);
    debug_assert_eq!(set.get(&(7, "")), Some(&(7, "original")));
}

#[test]
// Removal returns the removed key, and a miss returns None
fn test_set_2() {
    let mut set = RbSet::new();
    debug_assert_eq!(set.remove(&3), None);

    set.insert(3);
    debug_assert_eq!(set.remove(&3), Some(&3));
    debug_assert!(set.is_empty());
    debug_assert_eq!(set.remove(&3), None);

    let mut set = SplaySet::new();
    debug_assert_eq!(set.remove(&3), None);

    set.insert(3);
    debug_assert_eq!(set.remove(&3), Some(&3));
    debug_assert!(set.is_empty());
    debug_assert_eq!(set.remove(&3), None);
}

#[test]
// A very simple test of the string set
fn test_set_3() {
    let mut set = StringSet::new();

    set.insert("delta");
    set.insert("alpha");
    set.insert("echo");

    debug_assert!(set.contains("delta"));
    debug_assert!(!set.contains("bravo"));
    debug_assert!(!set.insert("delta"));
    debug_assert_eq!(set.count(), 3);

    let v: Vec<&str> = set.iter().collect();
    debug_assert_eq!(v, ["alpha", "delta", "echo"]);

    debug_assert_eq!(set.first(), Some("alpha"));
    debug_assert_eq!(set.pop_last(), Some("echo"));
    debug_assert_eq!(set.count(), 2);
}

#[test]
// A stress test with inserting, getting and removing
fn test_set_4() {
    use rand::prelude::*;

    const COUNT: usize = 1000000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut rb = RbSet::new();
    let mut sp = SplaySet::new();
    let mut inserted = 0;

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        if rb.insert(key) {
            inserted += 1;
        }
        sp.insert(key);
    }

    debug_assert_eq!(rb.count(), inserted);
    debug_assert_eq!(sp.count(), inserted);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        debug_assert!(rb.contains(&key));
        debug_assert!(sp.contains(&key));

        if key % 2 == 0 {
            rb.remove(&key);
            sp.remove(&key);
        }
    }

    debug_assert_eq!(rb.count(), sp.count());

    let mut last = 0;
    while let Some(&key) = rb.pop_first() {
        debug_assert!(key >= last);
        debug_assert!(key % 2 == 1);
        last = key;
    }
    debug_assert!(rb.is_empty());
}
