#![forbid(unsafe_code)]

//! Tree navigation for arbor.
//!
//! A tree is never materialised. Everything here works from local
//! navigation primitives (parent, first/last child, next/previous sibling)
//! exposed by the [`TreeWalker`] trait, so trees may be arbitrarily large or
//! lazily constructed.
//!
//! # Adapters
//!
//! - [`SimpleTree`]: fixed in-memory tree addressed by index paths.
//! - [`NestedTree`]: flattens embedded lists into a two-level tree.
//! - [`CachingTree`]: memoizes content produced by a factory.
//!
//! Linear sequences ([`ListWalker`], [`FocusWalker`]) are what the list
//! engine consumes; [`SimpleListWalker`] is the vector-backed one.

pub mod caching;
pub mod error;
pub mod list;
pub mod nested;
pub mod simple;
pub mod walker;

pub use caching::CachingTree;
pub use error::NotFound;
pub use list::{FocusWalker, ListWalker, Positions, SimpleListWalker};
pub use nested::{NestedEntry, NestedPosition, NestedTree};
pub use simple::{SimpleTree, TreeEntry};
pub use walker::{
    TreeWalker, first_ancestor, first_sibling_position, last_descendant, last_sibling_position,
    probe,
};
