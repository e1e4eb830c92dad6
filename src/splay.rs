//! Low-level top-down splay tree over external storage
//!
//! The tree manages `usize` slot indices into an external vector of items
//! that it does not store itself. Every operation that takes a key also takes
//! the item slice, a key extractor and a three-way comparator, so the same
//! tree can index plain keys, key/value pairs or any other item shape.
//!
//! Splaying is the classic single-pass top-down algorithm: two partial trees
//! accumulate the nodes known to be strictly less than and strictly greater
//! than the key, and are grafted back onto the final root at the end. The
//! zig-zig rotation folds two equal-direction steps into one, which is what
//! gives the amortized logarithmic bound.
//!
//! The comparator must be a strict total order that is stable for the
//! lifetime of the tree, and the item slice must hold the items the tree was
//! built against; otherwise the results are undefined.

#![warn(missing_docs)]

extern crate alloc;
use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use core::{cmp::Ordering, fmt::Display};

use crate::Slot;

//-----------------------------------------------------------------------------------------------//

// A node in a splay tree. The item lives in external storage at the same index. Free slots are
// chained into a recycle list through `left`.
#[derive(Clone)]
struct Node {
    left: usize,
    right: usize,
}

//-----------------------------------------------------------------------------------------------//

/// A splay tree of integer slots
#[derive(Clone)]
pub struct Tree {
    node: Vec<Node>,
    root: usize,
    recycle: usize,
    count: usize,
}

impl Tree {
    /// Construct an empty tree
    pub fn new() -> Tree {
        Tree {
            node: Vec::new(),
            root: !0,
            recycle: !0,
            count: 0,
        }
    }

    /// Construct an empty tree, pre-allocating a given capacity
    pub fn with_capacity(capacity: usize) -> Tree {
        Tree {
            node: Vec::with_capacity(capacity),
            root: !0,
            recycle: !0,
            count: 0,
        }
    }

    /// Get the number of slots in the tree
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if the tree is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the number of recycled slots in the tree
    #[inline]
    pub fn recycle_count(&self) -> usize {
        self.node.len() - self.count
    }

    /// Get the current allocated size of the tree. This is the current `count` plus the
    /// `recycle_count`. Note that this is not necessarily the same as the allocated capacity.
    #[inline]
    pub fn allocated_count(&self) -> usize {
        self.node.len()
    }

    /// Get the root slot of the tree, or `usize::MAX` if the tree is empty.
    ///
    /// The root is where the most recently accessed key ends up, so this is mostly useful for
    /// inspecting the effect of splaying.
    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Remove all slots from the tree
    pub fn clear(&mut self) {
        self.node.truncate(0);
        self.root = !0;
        self.recycle = !0;
        self.count = 0;
    }

    /// Reserves capacity for at least `additional` more slots
    ///
    /// The tree may already have some room that has been allocated then 'recycled', and this
    /// space is subtracted from the `additional` requested. This function returns the total
    /// amount of additional element storage that was required (if any), which is useful when
    /// implementing more complex types.
    pub fn reserve(&mut self, additional: usize) -> usize {
        let recycle_count = self.recycle_count();
        if additional > recycle_count {
            let required = additional - recycle_count;
            self.node.reserve(required);
            required
        } else {
            0
        }
    }

    /// Fallible version of [`reserve`](Tree::reserve)
    ///
    /// On failure the tree is unchanged. Reserving ahead of insertions is the way to make
    /// insertion itself infallible.
    pub fn try_reserve(&mut self, additional: usize) -> Result<usize, TryReserveError> {
        let recycle_count = self.recycle_count();
        if additional > recycle_count {
            let required = additional - recycle_count;
            self.node.try_reserve(required)?;
            Ok(required)
        } else {
            Ok(0)
        }
    }

    /// Get a slot by key, splaying it to the root
    ///
    /// If the key is not found, then `usize::MAX` is returned. The tree is restructured either
    /// way: after a miss the closest key ends up at the root, which is what gives repeated
    /// accesses near each other their amortized bound.
    pub fn get<T, K, KF, CF>(&mut self, key: &K, items: &[T], keyf: KF, compare: CF) -> usize
    where
        K: ?Sized,
        KF: Fn(&T) -> &K,
        CF: Fn(&K, &K) -> Ordering,
    {
        if !self.root == 0 {
            return !0;
        }

        let t = splay(&mut self.node, self.root, key, items, &keyf, &compare);
        self.root = t;

        if compare(key, keyf(&items[t])) == Ordering::Equal {
            t
        } else {
            !0
        }
    }

    /// Insert a slot by key
    ///
    /// The tree is splayed around the key first. If an equal key is already present it becomes
    /// the root and `Slot::Found` is returned without changing the set of slots. Otherwise a new
    /// slot is claimed (recycled if possible), spliced in as the new root taking one subtree of
    /// the old root, and returned as `Slot::New`.
    pub fn insert<T, K, KF, CF>(&mut self, key: &K, items: &[T], keyf: KF, compare: CF) -> Slot
    where
        K: ?Sized,
        KF: Fn(&T) -> &K,
        CF: Fn(&K, &K) -> Ordering,
    {
        // First slot is a special case
        if !self.root == 0 {
            let x = self.alloc();
            self.root = x;
            return Slot::New(x);
        }

        let t = splay(&mut self.node, self.root, key, items, &keyf, &compare);
        self.root = t;

        match compare(key, keyf(&items[t])) {
            Ordering::Equal => Slot::Found(t),
            Ordering::Less => {
                let x = self.alloc();
                self.node[x].left = self.node[t].left;
                self.node[x].right = t;
                self.node[t].left = !0;
                self.root = x;
                Slot::New(x)
            }
            Ordering::Greater => {
                let x = self.alloc();
                self.node[x].right = self.node[t].right;
                self.node[x].left = t;
                self.node[t].right = !0;
                self.root = x;
                Slot::New(x)
            }
        }
    }

    /// Remove a slot by key
    ///
    /// The slot of the removed item is returned so the caller can dispose of the item, or
    /// `usize::MAX` if the key was not found. A miss still splays the closest key to the root;
    /// this is intentional, failed lookups restructure a splay tree too. On a hit the root is
    /// detached and, when it had a left subtree, that subtree is splayed around the key to bring
    /// the predecessor (which then has no right child) to its root, and the right subtree is
    /// grafted back on.
    pub fn remove<T, K, KF, CF>(&mut self, key: &K, items: &[T], keyf: KF, compare: CF) -> usize
    where
        K: ?Sized,
        KF: Fn(&T) -> &K,
        CF: Fn(&K, &K) -> Ordering,
    {
        if !self.root == 0 {
            return !0;
        }

        let t = splay(&mut self.node, self.root, key, items, &keyf, &compare);
        self.root = t;

        if compare(key, keyf(&items[t])) != Ordering::Equal {
            return !0;
        }

        if !self.node[t].left == 0 {
            self.root = self.node[t].right;
        } else {
            let left = self.node[t].left;
            let right = self.node[t].right;
            let l = splay(&mut self.node, left, key, items, &keyf, &compare);
            debug_assert!(!self.node[l].right == 0);
            self.node[l].right = right;
            self.root = l;
        }

        self.free(t);
        t
    }

    /// Get the first slot in the tree (the one holding the smallest key)
    ///
    /// This does not splay, so it can be used while iterating.
    pub fn first(&self) -> usize {
        let mut x = self.root;
        if !x == 0 {
            return !0;
        }
        loop {
            let y = self.node[x].left;
            if !y == 0 {
                return x;
            }
            x = y;
        }
    }

    /// Get the last slot in the tree (the one holding the largest key)
    pub fn last(&self) -> usize {
        let mut x = self.root;
        if !x == 0 {
            return !0;
        }
        loop {
            let y = self.node[x].right;
            if !y == 0 {
                return x;
            }
            x = y;
        }
    }

    /// Remove and return the first slot, or `usize::MAX` if the tree is empty
    pub fn pop_first(&mut self) -> usize {
        if !self.root == 0 {
            return !0;
        }

        let t = splay_min(&mut self.node, self.root);
        debug_assert!(!self.node[t].left == 0);
        self.root = self.node[t].right;
        self.free(t);
        t
    }

    /// Remove and return the last slot, or `usize::MAX` if the tree is empty
    pub fn pop_last(&mut self) -> usize {
        if !self.root == 0 {
            return !0;
        }

        let t = splay_max(&mut self.node, self.root);
        debug_assert!(!self.node[t].right == 0);
        self.root = self.node[t].left;
        self.free(t);
        t
    }

    /// Iterate over the occupied slots in ascending key order
    pub fn indices(&self) -> Indices<'_> {
        let mut stack = Vec::new();
        let mut x = self.root;
        while !x != 0 {
            stack.push(x);
            x = self.node[x].left;
        }
        Indices {
            node: &self.node,
            stack,
            remaining: self.count,
        }
    }

    // Allocate and initialise a new slot
    fn alloc(&mut self) -> usize {
        // Increase the slot count
        self.count += 1;

        // Recycle an old slot
        let x = self.recycle;
        if !x != 0 {
            let n = &mut self.node[x];
            self.recycle = n.left;
            n.left = !0;
            n.right = !0;

            return x;
        }

        // Inititialise a new one
        let x = self.node.len();
        self.node.push(Node {
            left: !0,
            right: !0,
        });

        // Return the new slot
        x
    }

    // Free a slot and add it to the recycle queue
    fn free(&mut self, x: usize) {
        // Decrease the slot count
        self.count -= 1;

        // Recycle the slot
        self.node[x].left = self.recycle;
        self.node[x].right = !0;
        self.recycle = x;
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[ ")?;
        for x in self.indices() {
            write!(f, "{x} ")?;
        }
        write!(f, "]")?;
        Ok(())
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over the occupied slots of a [`Tree`], in ascending key order
pub struct Indices<'a> {
    node: &'a [Node],
    stack: Vec<usize>,
    remaining: usize,
}

impl Iterator for Indices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let x = self.stack.pop()?;

        let mut y = self.node[x].right;
        while !y != 0 {
            self.stack.push(y);
            y = self.node[y].left;
        }

        self.remaining -= 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl core::iter::FusedIterator for Indices<'_> {}

impl ExactSizeIterator for Indices<'_> {}

//-----------------------------------------------------------------------------------------------//

// IMPLEMENTATION NOTE
//
// The functions below are low level. They are not 'unsafe' in the Rust sense, but they implement
// very low level operations. Use with caution.

// Splay the tree rooted at `t` around `key` and return the new root.
//
// This is a single top-down pass. Two partial trees are assembled on the way down: the left
// chain holds nodes known to be strictly less than the key (linked through their `right`
// pointers) and the right chain holds nodes known to be strictly greater (linked through their
// `left` pointers). When the descent stops, the final node's subtrees are handed to the chain
// tails and the chains become its new children.
//
// When two consecutive steps would go the same way, the upper node is rotated first (the
// 'zig-zig' case); this folding is what keeps the amortized bound logarithmic on skewed access
// sequences.
fn splay<T, K, KF, CF>(
    node: &mut [Node],
    mut t: usize,
    key: &K,
    items: &[T],
    keyf: &KF,
    compare: &CF,
) -> usize
where
    K: ?Sized,
    KF: Fn(&T) -> &K,
    CF: Fn(&K, &K) -> Ordering,
{
    debug_assert!(!t != 0);

    let mut lhead = !0;
    let mut ltail = !0;
    let mut rhead = !0;
    let mut rtail = !0;

    loop {
        match compare(key, keyf(&items[t])) {
            Ordering::Equal => break,
            Ordering::Less => {
                let mut x = node[t].left;
                if !x == 0 {
                    break;
                }

                // Zig-zig : rotate right before linking
                if compare(key, keyf(&items[x])) == Ordering::Less {
                    node[t].left = node[x].right;
                    node[x].right = t;
                    t = x;
                    x = node[t].left;
                    if !x == 0 {
                        break;
                    }
                }

                // Link `t` into the right chain and descend left
                if !rtail == 0 {
                    rhead = t;
                } else {
                    node[rtail].left = t;
                }
                rtail = t;
                t = x;
            }
            Ordering::Greater => {
                let mut x = node[t].right;
                if !x == 0 {
                    break;
                }

                // Zig-zig : rotate left before linking
                if compare(key, keyf(&items[x])) == Ordering::Greater {
                    node[t].right = node[x].left;
                    node[x].left = t;
                    t = x;
                    x = node[t].right;
                    if !x == 0 {
                        break;
                    }
                }

                // Link `t` into the left chain and descend right
                if !ltail == 0 {
                    lhead = t;
                } else {
                    node[ltail].right = t;
                }
                ltail = t;
                t = x;
            }
        }
    }

    // Reassemble: the chain tails take the final node's subtrees, and the chains become its
    // children. An empty chain leaves that side of the final node as it is.
    if !ltail != 0 {
        node[ltail].right = node[t].left;
        node[t].left = lhead;
    }
    if !rtail != 0 {
        node[rtail].left = node[t].right;
        node[t].right = rhead;
    }

    t
}

// Splay the smallest slot to the root and return it.
//
// Degenerate form of `splay` for a key smaller than everything: only the right chain is ever
// used and no comparisons are needed.
fn splay_min(node: &mut [Node], mut t: usize) -> usize {
    debug_assert!(!t != 0);

    let mut rhead = !0;
    let mut rtail = !0;

    loop {
        let mut x = node[t].left;
        if !x == 0 {
            break;
        }

        node[t].left = node[x].right;
        node[x].right = t;
        t = x;
        x = node[t].left;
        if !x == 0 {
            break;
        }

        if !rtail == 0 {
            rhead = t;
        } else {
            node[rtail].left = t;
        }
        rtail = t;
        t = x;
    }

    if !rtail != 0 {
        node[rtail].left = node[t].right;
        node[t].right = rhead;
    }

    t
}

// Splay the largest slot to the root and return it.
fn splay_max(node: &mut [Node], mut t: usize) -> usize {
    debug_assert!(!t != 0);

    let mut lhead = !0;
    let mut ltail = !0;

    loop {
        let mut x = node[t].right;
        if !x == 0 {
            break;
        }

        node[t].right = node[x].left;
        node[x].left = t;
        t = x;
        x = node[t].right;
        if !x == 0 {
            break;
        }

        if !ltail == 0 {
            lhead = t;
        } else {
            node[ltail].right = t;
        }
        ltail = t;
        t = x;
    }

    if !ltail != 0 {
        node[ltail].right = node[t].left;
        node[t].left = lhead;
    }

    t
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn insert_key(tree: &mut Tree, keys: &mut Vec<i32>, key: i32) -> bool {
    match tree.insert(&key, keys, |t| t, |a, b| a.cmp(b)) {
        Slot::Found(_) => false,
        Slot::New(slot) => {
            if slot == keys.len() {
                keys.push(key);
            } else {
                keys[slot] = key;
            }
            true
        }
    }
}

#[test]
// Splaying moves the searched key to the root, on hits and misses alike
fn test_splay_root() {
    let mut tree = Tree::new();
    let mut keys = Vec::new();

    for key in [5, 3, 8] {
        debug_assert!(insert_key(&mut tree, &mut keys, key));
    }

    let slot = tree.get(&3, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(keys[slot], 3);
    debug_assert_eq!(tree.root(), slot);

    // A duplicate insert is a no-op and leaves the root where it is
    debug_assert!(!insert_key(&mut tree, &mut keys, 3));
    debug_assert_eq!(tree.count(), 3);
    debug_assert_eq!(tree.root(), slot);

    // A miss still re-roots the tree around the closest key
    let miss = tree.get(&4, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(miss, !0);
    debug_assert!(keys[tree.root()] == 3 || keys[tree.root()] == 5);
}

#[test]
// Removal detaches the root and reassembles the remaining subtrees in order
fn test_splay_remove() {
    let mut tree = Tree::new();
    let mut keys = Vec::new();

    for key in [10, 20, 5, 15, 25, 1] {
        debug_assert!(insert_key(&mut tree, &mut keys, key));
    }

    let slot = tree.remove(&10, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(keys[slot], 10);
    debug_assert_eq!(tree.count(), 5);

    let inorder: Vec<i32> = tree.indices().map(|x| keys[x]).collect();
    debug_assert_eq!(inorder, [1, 5, 15, 20, 25]);

    // Removing a missing key returns the sentinel but still re-roots
    let miss = tree.remove(&10, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(miss, !0);
    debug_assert_eq!(tree.count(), 5);
}

#[test]
// Remove on an empty tree returns the sentinel, and a single insert/remove round-trips
fn test_splay_empty() {
    let mut tree = Tree::new();
    let mut keys: Vec<i32> = Vec::new();

    debug_assert_eq!(tree.remove(&1, &keys, |t| t, |a, b| a.cmp(b)), !0);
    debug_assert_eq!(tree.get(&1, &keys, |t| t, |a, b| a.cmp(b)), !0);

    debug_assert!(insert_key(&mut tree, &mut keys, 1));
    let slot = tree.remove(&1, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(keys[slot], 1);
    debug_assert!(tree.is_empty());
    debug_assert_eq!(tree.root(), !0);
}

#[test]
// A stress test of interleaved inserts, gets and pops
fn test_splay_stress() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut tree = Tree::new();
    let mut keys = Vec::new();
    let mut inserted = 0;

    for _ in 0..COUNT {
        let key = rng.random_range(0..1000000);
        if insert_key(&mut tree, &mut keys, key) {
            inserted += 1;
        }
    }

    debug_assert_eq!(tree.count(), inserted);
    debug_assert_eq!(tree.indices().count(), inserted);

    let mut rng = SmallRng::seed_from_u64(1234567890);
    for _ in 0..COUNT {
        let key = rng.random_range(0..1000000);
        let slot = tree.get(&key, &keys, |t| t, |a, b| a.cmp(b));
        debug_assert_eq!(keys[slot], key);
    }

    let mut last = i32::MIN;
    while !tree.is_empty() {
        let slot = tree.pop_first();
        debug_assert!(keys[slot] > last);
        last = keys[slot];
    }
}
