//! Low-level left-leaning red-black tree over external storage
//!
//! The tree manages `usize` slot indices into an external vector of items
//! that it does not store itself, in the same way as [`crate::splay::Tree`].
//! Every operation that takes a key also takes the item slice, a key
//! extractor and a three-way comparator.
//!
//! The left-leaning discipline simulates a 2-3 tree with red left links: red
//! links never lean right, no red node has a red left child, and every path
//! from the root to a nil leaf passes the same number of black nodes. The
//! root is black after every mutating operation. These invariants bound the
//! depth, and so every operation, at O(log n) in the worst case.
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

// The colour of the link from a node to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Colour {
    Red,
    Black,
}

// A node in a red-black tree. The item lives in external storage at the same index. Free slots
// are chained into a recycle list through `left`.
#[derive(Clone)]
struct Node {
    left: usize,
    right: usize,
    colour: Colour,
}

//-----------------------------------------------------------------------------------------------//

/// A red-black tree of integer slots
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

    /// Get the root slot of the tree, or `usize::MAX` if the tree is empty
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

    /// Get a slot by key
    ///
    /// If the key is not found, then `usize::MAX` is returned. Unlike the splay tree, lookups do
    /// not restructure the tree.
    pub fn get<T, K, KF, CF>(&self, key: &K, items: &[T], keyf: KF, compare: CF) -> usize
    where
        K: ?Sized,
        KF: Fn(&T) -> &K,
        CF: Fn(&K, &K) -> Ordering,
    {
        get(&self.node, self.root, key, items, &keyf, &compare)
    }

    /// Insert a slot by key
    ///
    /// If an equal key is already present, `Slot::Found` is returned and the tree is unchanged.
    /// Otherwise a new slot is claimed (recycled if possible), inserted as a red leaf, and the
    /// invariants are restored bottom-up on the way back out of the recursion; the claimed slot
    /// is returned as `Slot::New`.
    pub fn insert<T, K, KF, CF>(&mut self, key: &K, items: &[T], keyf: KF, compare: CF) -> Slot
    where
        K: ?Sized,
        KF: Fn(&T) -> &K,
        CF: Fn(&K, &K) -> Ordering,
    {
        let found = get(&self.node, self.root, key, items, &keyf, &compare);
        if !found != 0 {
            return Slot::Found(found);
        }

        let x = self.alloc();
        let root = insert_rec(&mut self.node, self.root, x, key, items, &keyf, &compare);
        self.root = root;
        self.node[root].colour = Colour::Black;
        Slot::New(x)
    }

    /// Remove a slot by key
    ///
    /// The slot of the removed item is returned so the caller can dispose of the item, or
    /// `usize::MAX` if the key was not found. A miss leaves the tree untouched. The removal is a
    /// single recursive pass that carries a red link down to the target, so no second fix-up
    /// pass is needed on the way back.
    pub fn remove<T, K, KF, CF>(&mut self, key: &K, items: &[T], keyf: KF, compare: CF) -> usize
    where
        K: ?Sized,
        KF: Fn(&T) -> &K,
        CF: Fn(&K, &K) -> Ordering,
    {
        if !self.root == 0 {
            return !0;
        }
        if !get(&self.node, self.root, key, items, &keyf, &compare) == 0 {
            return !0;
        }

        let r = self.root;
        if !is_red(&self.node, self.node[r].left) && !is_red(&self.node, self.node[r].right) {
            self.node[r].colour = Colour::Red;
        }

        let (root, removed) = remove_rec(&mut self.node, r, key, items, &keyf, &compare);
        self.root = root;
        if !root != 0 {
            self.node[root].colour = Colour::Black;
        }

        self.free(removed);
        removed
    }

    /// Get the first slot in the tree (the one holding the smallest key)
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

        let r = self.root;
        if !is_red(&self.node, self.node[r].left) && !is_red(&self.node, self.node[r].right) {
            self.node[r].colour = Colour::Red;
        }

        let (root, m) = remove_min_rec(&mut self.node, r);
        self.root = root;
        if !root != 0 {
            self.node[root].colour = Colour::Black;
        }

        self.free(m);
        m
    }

    /// Remove and return the last slot, or `usize::MAX` if the tree is empty
    pub fn pop_last(&mut self) -> usize {
        if !self.root == 0 {
            return !0;
        }

        let r = self.root;
        if !is_red(&self.node, self.node[r].left) && !is_red(&self.node, self.node[r].right) {
            self.node[r].colour = Colour::Red;
        }

        let (root, m) = remove_max_rec(&mut self.node, r);
        self.root = root;
        if !root != 0 {
            self.node[root].colour = Colour::Black;
        }

        self.free(m);
        m
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

    // Allocate and initialise a new red slot
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
            n.colour = Colour::Red;

            return x;
        }

        // Inititialise a new one
        let x = self.node.len();
        self.node.push(Node {
            left: !0,
            right: !0,
            colour: Colour::Red,
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
// very low level operations. Use with caution. Each of the recursive transformations takes the
// root of a subtree and returns the (possibly different) slot that is its root afterwards; the
// caller rebinds the parent link.

// A nil link is black
#[inline]
fn is_red(node: &[Node], x: usize) -> bool {
    !x != 0 && node[x].colour == Colour::Red
}

// Get a slot in a tree
fn get<T, K, KF, CF>(node: &[Node], mut x: usize, key: &K, items: &[T], keyf: &KF, compare: &CF) -> usize
where
    K: ?Sized,
    KF: Fn(&T) -> &K,
    CF: Fn(&K, &K) -> Ordering,
{
    loop {
        if !x == 0 {
            return !0;
        }

        match compare(key, keyf(&items[x])) {
            Ordering::Equal => {
                return x;
            }
            Ordering::Less => x = node[x].left,
            Ordering::Greater => x = node[x].right,
        }
    }
}

// Insert the freshly allocated slot `x` below `h`, restoring the invariants bottom-up.
//
// The caller has already established that the key is absent, so an `Equal` comparison cannot
// occur with a consistent comparator and the descent only ever branches two ways.
fn insert_rec<T, K, KF, CF>(
    node: &mut [Node],
    h: usize,
    x: usize,
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
    if !h == 0 {
        return x;
    }

    if compare(key, keyf(&items[h])) == Ordering::Less {
        let l = node[h].left;
        node[h].left = insert_rec(node, l, x, key, items, keyf, compare);
    } else {
        let r = node[h].right;
        node[h].right = insert_rec(node, r, x, key, items, keyf, compare);
    }

    fix(node, h)
}

// Remove the slot holding `key` from the subtree rooted at `h`, returning the new subtree root
// and the removed slot.
//
// The caller has already established that the key is present in this subtree, and that `h`
// carries a red link (or is the reddened root). `move_red_left`/`move_red_right` push that red
// link ahead of the descent so the target is never a black leaf when it is reached, which is
// what lets a single pass delete without a separate fix-up phase. A target with a right subtree
// is not removed in place: the successor slot is unlinked from the right subtree and re-linked
// where the target was, so items never move between slots.
fn remove_rec<T, K, KF, CF>(
    node: &mut [Node],
    mut h: usize,
    key: &K,
    items: &[T],
    keyf: &KF,
    compare: &CF,
) -> (usize, usize)
where
    K: ?Sized,
    KF: Fn(&T) -> &K,
    CF: Fn(&K, &K) -> Ordering,
{
    if compare(key, keyf(&items[h])) == Ordering::Less {
        let l = node[h].left;
        if !is_red(node, l) && !is_red(node, node[l].left) {
            h = move_red_left(node, h);
        }

        let l = node[h].left;
        let (nl, removed) = remove_rec(node, l, key, items, keyf, compare);
        node[h].left = nl;
        (fix(node, h), removed)
    } else {
        if is_red(node, node[h].left) {
            h = rotate_right(node, h);
        }

        if compare(key, keyf(&items[h])) == Ordering::Equal && !node[h].right == 0 {
            return (!0, h);
        }

        let r = node[h].right;
        if !is_red(node, r) && !is_red(node, node[r].left) {
            h = move_red_right(node, h);
        }

        if compare(key, keyf(&items[h])) == Ordering::Equal {
            // Unlink the successor from the right subtree and re-link it in place of `h`
            let r = node[h].right;
            let (nr, m) = remove_min_rec(node, r);
            node[m].left = node[h].left;
            node[m].right = nr;
            node[m].colour = node[h].colour;
            (fix(node, m), h)
        } else {
            let r = node[h].right;
            let (nr, removed) = remove_rec(node, r, key, items, keyf, compare);
            node[h].right = nr;
            (fix(node, h), removed)
        }
    }
}

// Remove the smallest slot from the subtree rooted at `h`, returning the new subtree root and
// the removed slot. In a left-leaning tree a slot with no left child has no right child either.
fn remove_min_rec(node: &mut [Node], mut h: usize) -> (usize, usize) {
    if !node[h].left == 0 {
        debug_assert!(!node[h].right == 0);
        return (!0, h);
    }

    let l = node[h].left;
    if !is_red(node, l) && !is_red(node, node[l].left) {
        h = move_red_left(node, h);
    }

    let l = node[h].left;
    let (nl, m) = remove_min_rec(node, l);
    node[h].left = nl;
    (fix(node, h), m)
}

// Remove the largest slot from the subtree rooted at `h`, returning the new subtree root and
// the removed slot.
fn remove_max_rec(node: &mut [Node], mut h: usize) -> (usize, usize) {
    if is_red(node, node[h].left) {
        h = rotate_right(node, h);
    }

    if !node[h].right == 0 {
        debug_assert!(!node[h].left == 0);
        return (!0, h);
    }

    let r = node[h].right;
    if !is_red(node, r) && !is_red(node, node[r].left) {
        h = move_red_right(node, h);
    }

    let r = node[h].right;
    let (nr, m) = remove_max_rec(node, r);
    node[h].right = nr;
    (fix(node, h), m)
}

// Restore the invariants at `h` after a structural change below it:
//  1. a red right link leans the wrong way, rotate it left;
//  2. two reds in a row on the left spine, rotate right;
//  3. both children red, flip colours (the 'split' of the equivalent 2-3 tree node).
fn fix(node: &mut [Node], mut h: usize) -> usize {
    if is_red(node, node[h].right) {
        h = rotate_left(node, h);
    }
    if is_red(node, node[h].left) && is_red(node, node[node[h].left].left) {
        h = rotate_right(node, h);
    }
    if is_red(node, node[h].left) && is_red(node, node[h].right) {
        flip_colours(node, h);
    }
    h
}

// Rotate the red link at `h` to the left. The rotated-up slot takes over the colour of `h`,
// which stays in the same 3-node cluster and so becomes red.
fn rotate_left(node: &mut [Node], h: usize) -> usize {
    let x = node[h].right;
    debug_assert!(is_red(node, x));

    node[h].right = node[x].left;
    node[x].left = h;
    node[x].colour = node[h].colour;
    node[h].colour = Colour::Red;
    x
}

// Rotate the red link at `h` to the right
fn rotate_right(node: &mut [Node], h: usize) -> usize {
    let x = node[h].left;
    debug_assert!(is_red(node, x));

    node[h].left = node[x].right;
    node[x].right = h;
    node[x].colour = node[h].colour;
    node[h].colour = Colour::Red;
    x
}

// Complement the colours of `h` and both its children in lockstep. Only ever invoked on a slot
// whose children are both present.
fn flip_colours(node: &mut [Node], h: usize) {
    let l = node[h].left;
    let r = node[h].right;
    debug_assert!(!l != 0 && !r != 0);

    node[h].colour = opposite(node[h].colour);
    node[l].colour = opposite(node[l].colour);
    node[r].colour = opposite(node[r].colour);
}

#[inline]
fn opposite(colour: Colour) -> Colour {
    match colour {
        Colour::Red => Colour::Black,
        Colour::Black => Colour::Red,
    }
}

// Assuming `h` is red and both `h.left` and `h.left.left` are black, make `h.left` or one of its
// children red before the removal descends into it.
fn move_red_left(node: &mut [Node], mut h: usize) -> usize {
    flip_colours(node, h);

    let r = node[h].right;
    if is_red(node, node[r].left) {
        node[h].right = rotate_right(node, r);
        h = rotate_left(node, h);
        flip_colours(node, h);
    }
    h
}

// Assuming `h` is red and both `h.right` and `h.right.left` are black, make `h.right` or one of
// its children red before the removal descends into it.
fn move_red_right(node: &mut [Node], mut h: usize) -> usize {
    flip_colours(node, h);

    let l = node[h].left;
    if is_red(node, node[l].left) {
        h = rotate_right(node, h);
        flip_colours(node, h);
    }
    h
}

//-----------------------------------------------------------------------------------------------//

// DEBUG : Check the colour invariants, returning the black height
//
// Asserts that no red link leans right, that no red node has a red left child, and that every
// path from `x` to a nil leaf passes the same number of black nodes.
#[cfg(test)]
fn check_colours(node: &[Node], x: usize) -> usize {
    if !x == 0 {
        return 1;
    }

    let l = node[x].left;
    let r = node[x].right;

    assert!(!is_red(node, r), "red link leaning right at slot {x}");
    if node[x].colour == Colour::Red {
        assert!(!is_red(node, l), "two red links in a row at slot {x}");
    }

    let bl = check_colours(node, l);
    let br = check_colours(node, r);
    assert_eq!(bl, br, "black height mismatch at slot {x}");

    bl + usize::from(node[x].colour == Colour::Black)
}

// DEBUG : Check all invariants of a tree
#[cfg(test)]
fn check_tree(tree: &Tree) {
    if !tree.root != 0 {
        assert_eq!(tree.node[tree.root].colour, Colour::Black, "root is red");
    }
    check_colours(&tree.node, tree.root);
    assert_eq!(tree.indices().count(), tree.count);
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
// The worked example: every insert keeps the invariants, and removing a slot with two children
// splices in its successor
fn test_llrb_scenario() {
    let mut tree = Tree::new();
    let mut keys = Vec::new();

    for key in [10, 20, 5, 15, 25, 1] {
        debug_assert!(insert_key(&mut tree, &mut keys, key));
        check_tree(&tree);
    }

    let inorder: Vec<i32> = tree.indices().map(|x| keys[x]).collect();
    debug_assert_eq!(inorder, [1, 5, 10, 15, 20, 25]);

    let slot = tree.remove(&10, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(keys[slot], 10);
    check_tree(&tree);

    let inorder: Vec<i32> = tree.indices().map(|x| keys[x]).collect();
    debug_assert_eq!(inorder, [1, 5, 15, 20, 25]);
}

#[test]
// Duplicate inserts are a no-op and lookups have no side effects
fn test_llrb_duplicates() {
    let mut tree = Tree::new();
    let mut keys = Vec::new();

    debug_assert!(insert_key(&mut tree, &mut keys, 7));
    debug_assert!(!insert_key(&mut tree, &mut keys, 7));
    debug_assert_eq!(tree.count(), 1);

    let slot = tree.get(&7, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(keys[slot], 7);
    debug_assert_eq!(tree.get(&8, &keys, |t| t, |a, b| a.cmp(b)), !0);
}

#[test]
// Remove on an empty tree returns the sentinel, and a single insert/remove round-trips
fn test_llrb_empty() {
    let mut tree = Tree::new();
    let mut keys: Vec<i32> = Vec::new();

    debug_assert_eq!(tree.remove(&1, &keys, |t| t, |a, b| a.cmp(b)), !0);
    debug_assert_eq!(tree.pop_first(), !0);
    debug_assert_eq!(tree.pop_last(), !0);

    debug_assert!(insert_key(&mut tree, &mut keys, 1));
    let slot = tree.remove(&1, &keys, |t| t, |a, b| a.cmp(b));
    debug_assert_eq!(keys[slot], 1);
    debug_assert!(tree.is_empty());
    debug_assert_eq!(tree.root(), !0);
}

#[test]
// A stress test with interleaved inserts and removes, checking the invariants as it goes
fn test_llrb_stress() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut tree = Tree::new();
    let mut keys = Vec::new();
    let mut live = 0usize;

    for i in 0..COUNT {
        let key = rng.random_range(0..100000);
        if rng.random_range(0..3) == 0 {
            if !tree.remove(&key, &keys, |t| t, |a, b| a.cmp(b)) != 0 {
                live -= 1;
            }
        } else if insert_key(&mut tree, &mut keys, key) {
            live += 1;
        }

        debug_assert_eq!(tree.count(), live);
        if i % 1000 == 0 {
            check_tree(&tree);
        }
    }

    check_tree(&tree);

    // Drain in order from both ends
    let mut lo = i32::MIN;
    let mut hi = i32::MAX;
    while !tree.is_empty() {
        let slot = tree.pop_first();
        debug_assert!(keys[slot] > lo);
        lo = keys[slot];

        if !tree.is_empty() {
            let slot = tree.pop_last();
            debug_assert!(keys[slot] < hi);
            hi = keys[slot];
        }
    }

    check_tree(&tree);
}
