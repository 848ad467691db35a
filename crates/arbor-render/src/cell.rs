#![forbid(unsafe_code)]

//! Cell types.
//!
//! A [`Cell`] is one column of one row. Wide characters occupy a head cell
//! holding the character followed by [`CellContent::Continuation`] cells, so
//! every row of a canvas has exactly `width` cells.

/// What a cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellContent {
    /// Nothing drawn; displays as a space.
    #[default]
    Empty,
    /// A character (the first scalar of its grapheme).
    Char(char),
    /// Trailing column of a wide character to the left.
    Continuation,
}

impl CellContent {
    /// The character, if this cell holds one.
    #[inline]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    /// 8-bit cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM       = 0b0000_0010;
        /// Italic text.
        const ITALIC    = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE = 0b0000_1000;
        /// Reverse video (swap fg/bg).
        const REVERSE   = 0b0010_0000;
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Displayed content.
    pub content: CellContent,
    /// Style flags.
    pub attrs: StyleFlags,
}

impl Cell {
    /// A cell showing `c` with no styling.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Char(c),
            attrs: StyleFlags::empty(),
        }
    }

    /// The trailing half of a wide character.
    #[inline]
    pub const fn continuation() -> Self {
        Self {
            content: CellContent::Continuation,
            attrs: StyleFlags::empty(),
        }
    }

    /// Replace the style flags.
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = attrs;
        self
    }

    /// Check whether nothing is drawn here.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Check whether this cell continues a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_empty() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert!(!cell.is_continuation());
        assert_eq!(cell.content.as_char(), None);
        assert_eq!(cell.attrs, StyleFlags::empty());
    }

    #[test]
    fn from_char_round_trips() {
        let cell = Cell::from_char('x').with_attrs(StyleFlags::BOLD | StyleFlags::REVERSE);
        assert_eq!(cell.content.as_char(), Some('x'));
        assert!(cell.attrs.contains(StyleFlags::REVERSE));
        assert!(!cell.is_empty());
    }

    #[test]
    fn continuation_has_no_char() {
        let cell = Cell::continuation();
        assert!(cell.is_continuation());
        assert_eq!(cell.content.as_char(), None);
    }
}
