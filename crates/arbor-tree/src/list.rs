#![forbid(unsafe_code)]

//! Linear, bidirectional sequences of positions.
//!
//! [`ListWalker`] is the navigation and lookup half; it is all an embedded
//! list needs. [`FocusWalker`] adds the single focus position the list
//! engine reads and moves.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::NotFound;

/// A bidirectional sequence of positions with content.
pub trait ListWalker {
    /// Opaque element handle. Only equality is meaningful.
    type Position: Clone + Eq + Hash + fmt::Debug;
    /// Content produced for a position.
    type Node: Clone;

    /// Content at `pos`.
    fn get(&self, pos: &Self::Position) -> Result<Self::Node, NotFound>;

    /// Position after `pos`.
    fn next_position(&self, pos: &Self::Position) -> Option<Self::Position>;

    /// Position before `pos`.
    fn prev_position(&self, pos: &Self::Position) -> Option<Self::Position>;

    /// First position, `None` when empty.
    fn first_position(&self) -> Option<Self::Position>;

    /// Last position, `None` when empty.
    fn last_position(&self) -> Option<Self::Position>;

    /// The element after `pos` with its position.
    fn get_next(&self, pos: &Self::Position) -> Option<(Self::Node, Self::Position)> {
        let next = self.next_position(pos)?;
        self.get(&next).ok().map(|node| (node, next))
    }

    /// The element before `pos` with its position.
    fn get_prev(&self, pos: &Self::Position) -> Option<(Self::Node, Self::Position)> {
        let prev = self.prev_position(pos)?;
        self.get(&prev).ok().map(|node| (node, prev))
    }

    /// Iterate positions from the first (or, reversed, from the last).
    fn positions(&self, reverse: bool) -> Positions<'_, Self>
    where
        Self: Sized,
    {
        let start = if reverse {
            self.last_position()
        } else {
            self.first_position()
        };
        Positions::new(self, start, reverse)
    }
}

/// A [`ListWalker`] with a focus position.
pub trait FocusWalker: ListWalker {
    /// Current focus, `None` when the sequence is empty.
    fn focus(&self) -> Option<Self::Position>;

    /// Move the focus.
    fn set_focus(&mut self, pos: Self::Position);

    /// Focused content with its position.
    fn get_focus(&self) -> Option<(Self::Node, Self::Position)> {
        let pos = self.focus()?;
        self.get(&pos).ok().map(|node| (node, pos))
    }
}

impl<L: ListWalker + ?Sized> ListWalker for Rc<L> {
    type Position = L::Position;
    type Node = L::Node;

    fn get(&self, pos: &Self::Position) -> Result<Self::Node, NotFound> {
        (**self).get(pos)
    }

    fn next_position(&self, pos: &Self::Position) -> Option<Self::Position> {
        (**self).next_position(pos)
    }

    fn prev_position(&self, pos: &Self::Position) -> Option<Self::Position> {
        (**self).prev_position(pos)
    }

    fn first_position(&self) -> Option<Self::Position> {
        (**self).first_position()
    }

    fn last_position(&self) -> Option<Self::Position> {
        (**self).last_position()
    }
}

/// Iterator over the positions of a [`ListWalker`].
pub struct Positions<'a, L: ListWalker> {
    walker: &'a L,
    next: Option<L::Position>,
    reverse: bool,
}

impl<'a, L: ListWalker> Positions<'a, L> {
    /// Walk from `start` (inclusive) in the given direction.
    pub fn new(walker: &'a L, start: Option<L::Position>, reverse: bool) -> Self {
        Self {
            walker,
            next: start,
            reverse,
        }
    }
}

impl<L: ListWalker> Iterator for Positions<'_, L> {
    type Item = L::Position;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next.take()?;
        self.next = if self.reverse {
            self.walker.prev_position(&cur)
        } else {
            self.walker.next_position(&cur)
        };
        Some(cur)
    }
}

impl<L: ListWalker> fmt::Debug for Positions<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Positions")
            .field("next", &self.next)
            .field("reverse", &self.reverse)
            .finish()
    }
}

/// Vector-backed sequence; positions are indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleListWalker<N> {
    items: Vec<N>,
    focus: usize,
}

impl<N: Clone> SimpleListWalker<N> {
    /// Wrap `items`, focusing the first one.
    pub fn new(items: Vec<N>) -> Self {
        Self { items, focus: 0 }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The elements in order.
    #[inline]
    pub fn items(&self) -> &[N] {
        &self.items
    }

    /// Append an element.
    pub fn push(&mut self, item: N) {
        self.items.push(item);
    }
}

impl<N: Clone> FromIterator<N> for SimpleListWalker<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<N: Clone> ListWalker for SimpleListWalker<N> {
    type Position = usize;
    type Node = N;

    fn get(&self, pos: &usize) -> Result<N, NotFound> {
        self.items.get(*pos).cloned().ok_or(NotFound)
    }

    fn next_position(&self, pos: &usize) -> Option<usize> {
        let next = pos.checked_add(1)?;
        (next < self.items.len()).then_some(next)
    }

    fn prev_position(&self, pos: &usize) -> Option<usize> {
        pos.checked_sub(1).filter(|p| *p < self.items.len())
    }

    fn first_position(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(0)
    }

    fn last_position(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }
}

impl<N: Clone> FocusWalker for SimpleListWalker<N> {
    fn focus(&self) -> Option<usize> {
        (!self.items.is_empty()).then(|| self.focus.min(self.items.len() - 1))
    }

    /// Positions past the end focus the last element.
    fn set_focus(&mut self, pos: usize) {
        self.focus = pos.min(self.items.len().saturating_sub(1));
    }
}
