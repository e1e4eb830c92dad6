//! ## Introduction
//!
//! This crate implements ordered maps and sets backed by two classic
//! self-balancing binary search trees: a red-black tree (the left-leaning
//! variant) and a splay tree. The red-black tree gives logarithmic worst-case
//! bounds for every operation. The splay tree gives logarithmic amortized
//! bounds and is self-organising, in the sense that commonly accessed keys
//! 'bubble' to the top of the tree so that future lookups of those keys will
//! be faster.
//!
//! ## Benefits
//!
//! The crate complements the standard `std::collections` types, but provides
//! the following benefits:
//!
//! - Keys stored in the collections do not need to be hashable.
//! - Keys are sorted into an 'ascending' order within the collection by
//!   comparing keys pairwise. Keys that support `Ord` can use [`RbMap`],
//!   [`SplaySet`], etc, but if not a custom function can be supplied to
//!   compare keys using [`RbMapBy`], [`SplaySetBy`], etc.
//! - The crate is small and `#![no_std]`.
//! - Copying and moving of keys and values is minimised. They are stored in a
//!   single array, separate from the storage of the structure of the tree, so
//!   they do not move as the tree reconfigures around them. When entries are
//!   removed their slots are recycled for future insertions.
//!
//! ## Contents
//!
//! <center>
//!
//! | Type           | Tree       | Stores       | Sorts By |
//! |:---------------|:-----------|:-------------|:---------|
//! | [`RbMap`]      | red-black  | Key/Value    | Ord      |
//! | [`RbSet`]      | red-black  | Key          | Ord      |
//! | [`RbMapBy`]    | red-black  | Key/Value    | Function |
//! | [`RbSetBy`]    | red-black  | Key          | Function |
//! | [`SplayMap`]   | splay      | Key/Value    | Ord      |
//! | [`SplaySet`]   | splay      | Key          | Ord      |
//! | [`SplayMapBy`] | splay      | Key/Value    | Function |
//! | [`SplaySetBy`] | splay      | Key          | Function |
//! | [`StringMap`]  | splay      | String/Value | Ord      |
//! | [`StringSet`]  | splay      | String       | Ord      |
//!
//! </center>
//!
//! Two behavioural notes apply across the whole crate. Inserting a key that
//! compares equal to one already present is a no-op: the originally stored
//! entry is kept and `insert` returns `false`. And because a splay tree
//! restructures itself on every access, including failed lookups, the
//! splay-backed types take `&mut self` for `get` and `contains`.
//!
//! The crate exposes the additional types [`llrb::Tree`] and [`splay::Tree`]
//! that provide the foundation of the other types. These can be thought of as
//! utilities that manage a set of `usize` indices into an external vector of
//! data, without storing the vector itself. They are provided to support
//! development of additional collection types.

#![no_std]
#![warn(missing_docs)]

pub mod llrb;
pub mod splay;

mod map;
mod set;

pub use map::*;
pub use set::*;

/// Outcome of a low-level insertion, identifying the storage slot involved.
///
/// The low-level trees manage indices into an external vector of items. An
/// insertion either finds an equal key already in the tree, or claims a slot
/// for the new item. A `New` slot equal to the current item-vector length is
/// brand new and requires a push; a smaller `New` slot is a recycled one and
/// requires an overwrite. A `Found` slot must be left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// An equal key is already stored at this slot; nothing was inserted.
    Found(usize),
    /// The slot claimed for the newly inserted item.
    New(usize),
}
