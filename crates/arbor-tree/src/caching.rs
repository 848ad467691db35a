#![forbid(unsafe_code)]

//! Memoizing adapter.
//!
//! [`CachingTree`] keeps the wrapped tree's navigation and replaces its
//! content with what a factory builds for each position. Built content is
//! cached by position and kept until [`CachingTree::invalidate`] or
//! [`CachingTree::clear`] is called; nothing is evicted automatically.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::error::NotFound;
use crate::walker::TreeWalker;

/// Tree whose content comes from a cached factory.
pub struct CachingTree<W: TreeWalker, N, F> {
    walker: W,
    factory: F,
    cache: RefCell<HashMap<W::Position, N>>,
}

impl<W, N, F> CachingTree<W, N, F>
where
    W: TreeWalker,
    N: Clone,
    F: Fn(&W::Position) -> Option<N>,
{
    /// Navigate like `walker`, building content with `factory`.
    ///
    /// A factory result of `None` is reported as [`NotFound`] and is not
    /// cached.
    pub fn new(walker: W, factory: F) -> Self {
        Self {
            walker,
            factory,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Drop the cached content for `pos`.
    pub fn invalidate(&self, pos: &W::Position) {
        self.cache.borrow_mut().remove(pos);
    }

    /// Drop all cached content.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Number of cached entries.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// The wrapped navigator.
    pub fn walker(&self) -> &W {
        &self.walker
    }
}

impl<W, N, F> TreeWalker for CachingTree<W, N, F>
where
    W: TreeWalker,
    N: Clone,
    F: Fn(&W::Position) -> Option<N>,
{
    type Position = W::Position;
    type Node = N;

    fn get(&self, pos: &W::Position) -> Result<N, NotFound> {
        if let Some(node) = self.cache.borrow().get(pos) {
            return Ok(node.clone());
        }
        let node = (self.factory)(pos).ok_or(NotFound)?;
        self.cache.borrow_mut().insert(pos.clone(), node.clone());
        Ok(node)
    }

    fn root(&self) -> Option<W::Position> {
        self.walker.root()
    }

    fn parent_position(&self, pos: &W::Position) -> Option<W::Position> {
        self.walker.parent_position(pos)
    }

    fn first_child_position(&self, pos: &W::Position) -> Option<W::Position> {
        self.walker.first_child_position(pos)
    }

    fn last_child_position(&self, pos: &W::Position) -> Option<W::Position> {
        self.walker.last_child_position(pos)
    }

    fn next_sibling_position(&self, pos: &W::Position) -> Option<W::Position> {
        self.walker.next_sibling_position(pos)
    }

    fn prev_sibling_position(&self, pos: &W::Position) -> Option<W::Position> {
        self.walker.prev_sibling_position(pos)
    }

    fn depth(&self, pos: &W::Position) -> usize {
        self.walker.depth(pos)
    }
}

impl<W: TreeWalker + fmt::Debug, N, F> fmt::Debug for CachingTree<W, N, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingTree")
            .field("walker", &self.walker)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}
