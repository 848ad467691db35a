#![forbid(unsafe_code)]

//! Canvas: a fixed-size grid of cells with an optional cursor.
//!
//! Canvases are produced by nodes and composed by the list engine. All
//! composition is by value: [`Canvas::vstack`] and [`Canvas::hstack`] consume
//! their parts, and the trimming operations shrink in place.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`.
//! 2. A cursor, if present, lies inside the canvas.
//! 3. A wide character is followed by `width - 1` continuation cells.

use unicode_segmentation::UnicodeSegmentation;

use crate::cell::{Cell, StyleFlags};
use crate::grapheme_width;

/// A rectangular block of rendered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: Option<(u16, u16)>,
}

impl Canvas {
    /// Create a blank canvas.
    ///
    /// A zero width with a non-zero height is allowed; such a canvas still
    /// reports its rows.
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            cursor: None,
        }
    }

    /// Create a canvas of `width` columns holding one row per line.
    ///
    /// Lines longer than `width` are clipped.
    pub fn from_lines<S: AsRef<str>>(width: u16, lines: &[S]) -> Self {
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let mut canvas = Self::new(width, height);
        for (y, line) in lines.iter().take(usize::from(height)).enumerate() {
            canvas.draw_str(0, y as u16, line.as_ref(), StyleFlags::empty());
        }
        canvas
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Cursor position `(x, y)`, if any.
    #[inline]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Set or clear the cursor. A position outside the canvas clears it.
    pub fn set_cursor(&mut self, cursor: Option<(u16, u16)>) {
        self.cursor = cursor.filter(|&(x, y)| x < self.width && y < self.height);
    }

    /// Builder form of [`set_cursor`](Self::set_cursor).
    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<(u16, u16)>) -> Self {
        self.set_cursor(cursor);
        self
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at `(x, y)`.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite the cell at `(x, y)`. Out of bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Draw a string starting at `(x, y)` and return the column after the
    /// last cell drawn.
    ///
    /// Zero-width graphemes are skipped. A wide grapheme that would not fit
    /// before the right edge is not drawn and ends the run.
    pub fn draw_str(&mut self, x: u16, y: u16, text: &str, attrs: StyleFlags) -> u16 {
        if y >= self.height {
            return x;
        }
        let mut x = x;
        for grapheme in text.graphemes(true) {
            let w = grapheme_width(grapheme);
            if w == 0 {
                continue;
            }
            let w = w as u16;
            if x.saturating_add(w) > self.width {
                break;
            }
            let Some(c) = grapheme.chars().next() else {
                continue;
            };
            self.set(x, y, Cell::from_char(c).with_attrs(attrs));
            for dx in 1..w {
                self.set(x + dx, y, Cell::continuation().with_attrs(attrs));
            }
            x += w;
        }
        x
    }

    /// Fill a whole row with `c`.
    pub fn fill_row(&mut self, y: u16, c: char) {
        for x in 0..self.width {
            self.set(x, y, Cell::from_char(c));
        }
    }

    /// Add `flags` to every cell of the canvas.
    pub fn apply_attrs(&mut self, flags: StyleFlags) {
        for cell in &mut self.cells {
            cell.attrs |= flags;
        }
    }

    /// The text of row `y`, with empty cells shown as spaces.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::with_capacity(usize::from(self.width));
        for x in 0..self.width {
            let Some(cell) = self.get(x, y) else {
                break;
            };
            match cell.content.as_char() {
                Some(c) => out.push(c),
                None if cell.is_continuation() => {}
                None => out.push(' '),
            }
        }
        out
    }

    /// Every row as text.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Remove `n` rows from the top. The cursor moves up with the content
    /// and is dropped when its row is removed.
    pub fn trim_top(&mut self, n: u16) {
        let n = n.min(self.height);
        if n == 0 {
            return;
        }
        let start = usize::from(n) * usize::from(self.width);
        self.cells.drain(..start);
        self.height -= n;
        self.cursor = self
            .cursor
            .and_then(|(x, y)| y.checked_sub(n).map(|y| (x, y)));
    }

    /// Remove `n` rows from the bottom. The cursor is dropped when its row
    /// is removed.
    pub fn trim_bottom(&mut self, n: u16) {
        let n = n.min(self.height);
        if n == 0 {
            return;
        }
        self.height -= n;
        self.cells
            .truncate(usize::from(self.height) * usize::from(self.width));
        let height = self.height;
        self.cursor = self.cursor.filter(|&(_, y)| y < height);
    }

    /// Append `n` blank rows.
    pub fn pad_bottom(&mut self, n: u16) {
        let n = n.min(u16::MAX - self.height);
        self.height += n;
        self.cells.resize(
            usize::from(self.height) * usize::from(self.width),
            Cell::default(),
        );
    }

    /// Stack canvases top to bottom.
    ///
    /// The result is as wide as the widest part; narrower parts are padded
    /// on the right. Only a part flagged as focused contributes its cursor.
    pub fn vstack(parts: Vec<(Canvas, bool)>) -> Self {
        let width = parts.iter().map(|(c, _)| c.width).max().unwrap_or(0);
        let height: u16 = parts
            .iter()
            .fold(0u16, |acc, (c, _)| acc.saturating_add(c.height));
        let mut out = Self::new(width, height);
        let mut y0: u16 = 0;
        for (part, focus) in parts {
            for y in 0..part.height {
                for x in 0..part.width {
                    if let Some(cell) = part.get(x, y) {
                        out.set(x, y0.saturating_add(y), *cell);
                    }
                }
            }
            if focus && let Some((cx, cy)) = part.cursor {
                out.set_cursor(Some((cx, y0.saturating_add(cy))));
            }
            y0 = y0.saturating_add(part.height);
        }
        out
    }

    /// Join canvases left to right.
    ///
    /// Widths add up and the result is as tall as the tallest part. The
    /// first cursor found is kept, shifted by its part's column offset.
    pub fn hstack(parts: Vec<Canvas>) -> Self {
        let height = parts.iter().map(|c| c.height).max().unwrap_or(0);
        let width: u16 = parts
            .iter()
            .fold(0u16, |acc, c| acc.saturating_add(c.width));
        let mut out = Self::new(width, height);
        let mut x0: u16 = 0;
        for part in parts {
            for y in 0..part.height {
                for x in 0..part.width {
                    if let Some(cell) = part.get(x, y) {
                        out.set(x0.saturating_add(x), y, *cell);
                    }
                }
            }
            if out.cursor.is_none()
                && let Some((cx, cy)) = part.cursor
            {
                out.set_cursor(Some((x0.saturating_add(cx), cy)));
            }
            x0 = x0.saturating_add(part.width);
        }
        out
    }
}
