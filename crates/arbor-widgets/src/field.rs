#![forbid(unsafe_code)]

//! Multi-line field with a movable cursor.

use std::cell::Cell;

use arbor_core::event::{KeyCode, KeyEvent, MouseButton, MouseEvent};
use arbor_render::canvas::Canvas;
use arbor_render::display_width;

use crate::{Node, PrefCol};

/// A selectable block of lines with a cursor.
///
/// One row per line, clipped to the width. Arrow keys move the cursor;
/// `Up` on the first row and `Down` on the last are handed back so the
/// enclosing list can move the focus. The cursor lives in a [`Cell`] so
/// shared handles (`Rc<TextField>`) see the same position.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    lines: Vec<String>,
    cursor: Cell<(u16, u16)>,
}

impl TextField {
    /// Create a field over `text`, split on newlines.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            cursor: Cell::new((0, 0)),
        }
    }

    /// Lines of the field.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as `(column, line)`, unclipped.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor.get()
    }

    fn line_width(&self, row: u16) -> u16 {
        self.lines
            .get(usize::from(row))
            .map_or(0, |l| u16::try_from(display_width(l)).unwrap_or(u16::MAX))
    }

    fn last_row(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn place(&self, col: PrefCol, row: u16) {
        let end = self.line_width(row);
        let col = match col {
            PrefCol::Left => 0,
            PrefCol::Right => end,
            PrefCol::Col(c) => c.min(end),
        };
        self.cursor.set((col, row));
    }
}

impl Node for TextField {
    fn rows(&self, _width: u16, _focus: bool) -> u16 {
        self.last_row().saturating_add(1)
    }

    fn render(&self, width: u16, focus: bool) -> Canvas {
        let mut canvas = Canvas::from_lines(width, &self.lines);
        if self.lines.is_empty() {
            canvas.pad_bottom(1);
        }
        if focus {
            canvas.set_cursor(self.cursor_coords(width));
        }
        canvas
    }

    fn selectable(&self) -> bool {
        true
    }

    fn keypress(&self, _width: u16, key: KeyEvent) -> Option<KeyEvent> {
        let (col, row) = self.cursor.get();
        match key.code {
            KeyCode::Left if col > 0 => self.cursor.set((col - 1, row)),
            KeyCode::Left if row > 0 => self.place(PrefCol::Right, row - 1),
            KeyCode::Right if col < self.line_width(row) => self.cursor.set((col + 1, row)),
            KeyCode::Right if row < self.last_row() => self.place(PrefCol::Left, row + 1),
            KeyCode::Up if row > 0 => self.place(PrefCol::Col(col), row - 1),
            KeyCode::Down if row < self.last_row() => self.place(PrefCol::Col(col), row + 1),
            KeyCode::Home => self.place(PrefCol::Left, row),
            KeyCode::End => self.place(PrefCol::Right, row),
            _ => return Some(key),
        }
        None
    }

    fn cursor_coords(&self, width: u16) -> Option<(u16, u16)> {
        if width == 0 {
            return None;
        }
        let (col, row) = self.cursor.get();
        Some((col.min(width - 1), row))
    }

    fn pref_col(&self, _width: u16) -> Option<PrefCol> {
        Some(PrefCol::Col(self.cursor.get().0))
    }

    fn move_cursor_to_coords(&self, _width: u16, col: PrefCol, row: u16) -> bool {
        if row > self.last_row() {
            return false;
        }
        self.place(col, row);
        true
    }

    fn mouse_event(&self, width: u16, event: &MouseEvent, _focus: bool) -> bool {
        if !event.is_press_of(MouseButton::Left) || event.x >= width {
            return false;
        }
        self.move_cursor_to_coords(width, PrefCol::Col(event.x), event.y)
    }
}
