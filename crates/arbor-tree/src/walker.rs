#![forbid(unsafe_code)]

//! The tree navigation trait and helpers derived from it.
//!
//! Every primitive is total: a missing relation is `None`, never a panic
//! or an error. The derived helpers repeat a primitive until it returns
//! `None` and report the last position reached, so they terminate on any
//! acyclic tree regardless of depth.

use std::fmt;
use std::hash::Hash;

use crate::error::NotFound;

/// Local navigation over a tree of positions.
///
/// Implementors provide content lookup and whichever relations their tree
/// has; the relation methods default to `None`.
pub trait TreeWalker {
    /// Opaque node handle. Only equality is meaningful.
    type Position: Clone + Eq + Hash + fmt::Debug;
    /// Content produced for a position.
    type Node: Clone;

    /// Content at `pos`.
    fn get(&self, pos: &Self::Position) -> Result<Self::Node, NotFound>;

    /// First top-level position, or `None` for an empty tree.
    fn root(&self) -> Option<Self::Position>;

    /// Parent of `pos`.
    fn parent_position(&self, _pos: &Self::Position) -> Option<Self::Position> {
        None
    }

    /// First child of `pos`.
    fn first_child_position(&self, _pos: &Self::Position) -> Option<Self::Position> {
        None
    }

    /// Last child of `pos`.
    fn last_child_position(&self, _pos: &Self::Position) -> Option<Self::Position> {
        None
    }

    /// Next sibling of `pos`.
    fn next_sibling_position(&self, _pos: &Self::Position) -> Option<Self::Position> {
        None
    }

    /// Previous sibling of `pos`.
    fn prev_sibling_position(&self, _pos: &Self::Position) -> Option<Self::Position> {
        None
    }

    /// Number of ancestors of `pos`; top-level positions have depth 0.
    fn depth(&self, pos: &Self::Position) -> usize {
        let mut depth = 0;
        let mut cur = self.parent_position(pos);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent_position(&p);
        }
        depth
    }
}

/// Follow `step` from `pos` until it yields `None`.
fn follow<P>(pos: &P, mut step: impl FnMut(&P) -> Option<P>) -> P
where
    P: Clone,
{
    let mut cur = pos.clone();
    while let Some(next) = step(&cur) {
        cur = next;
    }
    cur
}

/// The top-level ancestor of `pos` (or `pos` itself at top level).
pub fn first_ancestor<W: TreeWalker + ?Sized>(walker: &W, pos: &W::Position) -> W::Position {
    follow(pos, |p| walker.parent_position(p))
}

/// The deepest last descendant of `pos` (or `pos` itself for a leaf).
pub fn last_descendant<W: TreeWalker + ?Sized>(walker: &W, pos: &W::Position) -> W::Position {
    follow(pos, |p| walker.last_child_position(p))
}

/// The last sibling of `pos` (or `pos` itself).
pub fn last_sibling_position<W: TreeWalker + ?Sized>(
    walker: &W,
    pos: &W::Position,
) -> W::Position {
    follow(pos, |p| walker.next_sibling_position(p))
}

/// The first sibling of `pos` (or `pos` itself).
pub fn first_sibling_position<W: TreeWalker + ?Sized>(
    walker: &W,
    pos: &W::Position,
) -> W::Position {
    follow(pos, |p| walker.prev_sibling_position(p))
}

/// Keep `pos` only if it resolves to content.
pub fn probe<W: TreeWalker + ?Sized>(
    walker: &W,
    pos: Option<W::Position>,
) -> Option<W::Position> {
    pos.filter(|p| walker.get(p).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A single chain 0 -> 1 -> ... -> len-1, each node's only child is the next.
    struct Chain {
        len: u32,
    }

    impl TreeWalker for Chain {
        type Position = u32;
        type Node = u32;

        fn get(&self, pos: &u32) -> Result<u32, NotFound> {
            if *pos < self.len { Ok(*pos) } else { Err(NotFound) }
        }

        fn root(&self) -> Option<u32> {
            (self.len > 0).then_some(0)
        }

        fn parent_position(&self, pos: &u32) -> Option<u32> {
            pos.checked_sub(1)
        }

        fn first_child_position(&self, pos: &u32) -> Option<u32> {
            probe(self, Some(pos + 1))
        }

        fn last_child_position(&self, pos: &u32) -> Option<u32> {
            self.first_child_position(pos)
        }
    }

    #[test]
    fn defaults_are_absent() {
        struct Lone;
        impl TreeWalker for Lone {
            type Position = ();
            type Node = ();
            fn get(&self, _: &()) -> Result<(), NotFound> {
                Ok(())
            }
            fn root(&self) -> Option<()> {
                Some(())
            }
        }
        let w = Lone;
        assert_eq!(w.parent_position(&()), None);
        assert_eq!(w.next_sibling_position(&()), None);
        assert_eq!(w.depth(&()), 0);
        let () = first_sibling_position(&w, &());
    }

    #[test]
    fn depth_counts_ancestors() {
        let w = Chain { len: 5 };
        assert_eq!(w.depth(&0), 0);
        assert_eq!(w.depth(&4), 4);
    }

    #[test]
    fn deep_chain_does_not_overflow_stack() {
        let w = Chain { len: 200_000 };
        assert_eq!(w.depth(&199_999), 199_999);
        assert_eq!(first_ancestor(&w, &199_999), 0);
        assert_eq!(last_descendant(&w, &0), 199_999);
    }

    #[test]
    fn helpers_return_start_when_primitive_is_absent() {
        let w = Chain { len: 3 };
        assert_eq!(first_ancestor(&w, &0), 0);
        assert_eq!(last_descendant(&w, &2), 2);
        assert_eq!(last_sibling_position(&w, &1), 1);
    }

    #[test]
    fn probe_filters_invalid_positions() {
        let w = Chain { len: 3 };
        assert_eq!(probe(&w, Some(2)), Some(2));
        assert_eq!(probe(&w, Some(3)), None);
        assert_eq!(probe(&w, None), None);
    }
}
