#![forbid(unsafe_code)]

//! Nesting adapter: flatten embedded lists into the tree.
//!
//! The wrapped tree's content is either a plain node or an embedded
//! [`ListWalker`]. Elements of an embedded list become siblings in the
//! flattened tree, addressed by [`NestedPosition::Inner`]. An embedded
//! list is never itself a node: navigation that would land on a list lands
//! on its first (or last) element instead, and an empty list is skipped.

use crate::error::NotFound;
use crate::list::ListWalker;
use crate::walker::TreeWalker;

/// Content of the wrapped tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedEntry<N, L> {
    /// A plain node.
    Node(N),
    /// An embedded list whose elements are flattened into the tree.
    List(L),
}

/// Position in a [`NestedTree`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NestedPosition<P, Q> {
    /// A plain node of the wrapped tree.
    Outer(P),
    /// Element `Q` of the list hosted at outer position `P`.
    Inner(P, Q),
}

impl<P, Q> NestedPosition<P, Q> {
    /// The outer component.
    pub fn outer(&self) -> &P {
        match self {
            Self::Outer(p) | Self::Inner(p, _) => p,
        }
    }
}

/// Tree adapter that expands embedded lists.
#[derive(Debug, Clone)]
pub struct NestedTree<W> {
    inner: W,
}

impl<W> NestedTree<W> {
    /// Wrap a tree whose content is [`NestedEntry`].
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// The wrapped tree.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

impl<W, N, L> NestedTree<W>
where
    W: TreeWalker<Node = NestedEntry<N, L>>,
    N: Clone,
    L: ListWalker<Node = N> + Clone,
{
    /// Resolve an outer position to a flattened one, stepping through outer
    /// siblings past empty lists.
    fn expand(
        &self,
        start: Option<W::Position>,
        reverse: bool,
    ) -> Option<NestedPosition<W::Position, L::Position>> {
        let mut cur = start;
        while let Some(pos) = cur {
            match self.inner.get(&pos).ok()? {
                NestedEntry::Node(_) => return Some(NestedPosition::Outer(pos)),
                NestedEntry::List(list) => {
                    let first = if reverse {
                        list.last_position()
                    } else {
                        list.first_position()
                    };
                    if let Some(q) = first {
                        return Some(NestedPosition::Inner(pos, q));
                    }
                }
            }
            cur = if reverse {
                self.inner.prev_sibling_position(&pos)
            } else {
                self.inner.next_sibling_position(&pos)
            };
        }
        None
    }

    fn hosted_list(&self, pos: &W::Position) -> Option<L> {
        match self.inner.get(pos).ok()? {
            NestedEntry::List(list) => Some(list),
            NestedEntry::Node(_) => None,
        }
    }
}

impl<W, N, L> TreeWalker for NestedTree<W>
where
    W: TreeWalker<Node = NestedEntry<N, L>>,
    N: Clone,
    L: ListWalker<Node = N> + Clone,
{
    type Position = NestedPosition<W::Position, L::Position>;
    type Node = N;

    fn get(&self, pos: &Self::Position) -> Result<N, NotFound> {
        match (pos, self.inner.get(pos.outer())?) {
            (NestedPosition::Outer(_), NestedEntry::Node(node)) => Ok(node),
            (NestedPosition::Inner(_, q), NestedEntry::List(list)) => list.get(q),
            _ => Err(NotFound),
        }
    }

    fn root(&self) -> Option<Self::Position> {
        self.expand(self.inner.root(), false)
    }

    fn parent_position(&self, pos: &Self::Position) -> Option<Self::Position> {
        self.inner
            .parent_position(pos.outer())
            .map(NestedPosition::Outer)
    }

    fn first_child_position(&self, pos: &Self::Position) -> Option<Self::Position> {
        match pos {
            NestedPosition::Outer(p) => self.expand(self.inner.first_child_position(p), false),
            NestedPosition::Inner(..) => None,
        }
    }

    fn last_child_position(&self, pos: &Self::Position) -> Option<Self::Position> {
        match pos {
            NestedPosition::Outer(p) => self.expand(self.inner.last_child_position(p), true),
            NestedPosition::Inner(..) => None,
        }
    }

    fn next_sibling_position(&self, pos: &Self::Position) -> Option<Self::Position> {
        if let NestedPosition::Inner(p, q) = pos
            && let Some(list) = self.hosted_list(p)
            && let Some((_, next)) = list.get_next(q)
        {
            return Some(NestedPosition::Inner(p.clone(), next));
        }
        self.expand(self.inner.next_sibling_position(pos.outer()), false)
    }

    fn prev_sibling_position(&self, pos: &Self::Position) -> Option<Self::Position> {
        if let NestedPosition::Inner(p, q) = pos
            && let Some(list) = self.hosted_list(p)
            && let Some((_, prev)) = list.get_prev(q)
        {
            return Some(NestedPosition::Inner(p.clone(), prev));
        }
        self.expand(self.inner.prev_sibling_position(pos.outer()), true)
    }
}
