#![forbid(unsafe_code)]

//! Static text node.

use arbor_render::canvas::Canvas;
use arbor_render::cell::StyleFlags;
use arbor_render::grapheme_width;
use unicode_segmentation::UnicodeSegmentation;

use crate::Node;

/// How [`Text`] fits lines longer than the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Break lines at the grapheme that would overflow.
    #[default]
    Char,
    /// One row per source line; the overflow is cut off.
    Clip,
}

/// A block of text, one or more rows tall.
///
/// A selectable text renders reversed while it holds the focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    content: String,
    selectable: bool,
    wrap: WrapMode,
}

impl Text {
    /// Create a non-selectable text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            selectable: false,
            wrap: WrapMode::Char,
        }
    }

    /// Set whether the text can take the focus.
    #[must_use]
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// The text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Rows of text at `width`. Never empty.
    pub fn layout(&self, width: u16) -> Vec<String> {
        let mut rows = Vec::new();
        for line in self.content.split('\n') {
            if self.wrap == WrapMode::Clip || width == 0 {
                rows.push(line.to_string());
                continue;
            }
            let width = usize::from(width);
            let mut current = String::new();
            let mut used = 0usize;
            for g in line.graphemes(true) {
                let w = grapheme_width(g);
                if used + w > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    used = 0;
                }
                current.push_str(g);
                used += w;
            }
            rows.push(current);
        }
        rows
    }
}

impl Node for Text {
    fn rows(&self, width: u16, _focus: bool) -> u16 {
        u16::try_from(self.layout(width).len()).unwrap_or(u16::MAX)
    }

    fn render(&self, width: u16, focus: bool) -> Canvas {
        let mut canvas = Canvas::from_lines(width, &self.layout(width));
        if focus && self.selectable {
            canvas.apply_attrs(StyleFlags::REVERSE);
        }
        canvas
    }

    fn selectable(&self) -> bool {
        self.selectable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_one_row() {
        let t = Text::new("");
        assert_eq!(t.rows(10, false), 1);
        assert_eq!(t.render(3, false).to_lines(), vec!["   "]);
    }

    #[test]
    fn char_wrap_breaks_at_width() {
        let t = Text::new("abcdefg");
        assert_eq!(t.layout(3), vec!["abc", "def", "g"]);
        assert_eq!(t.rows(3, false), 3);
    }

    #[test]
    fn wide_chars_wrap_by_display_width() {
        let t = Text::new("ab中c");
        assert_eq!(t.layout(3), vec!["ab", "中c"]);
    }

    #[test]
    fn clip_keeps_source_lines() {
        let t = Text::new("abcdef\nxy").with_wrap(WrapMode::Clip);
        assert_eq!(t.rows(3, false), 2);
        assert_eq!(t.render(3, false).to_lines(), vec!["abc", "xy "]);
    }

    #[test]
    fn selectable_text_reverses_when_focused() {
        let t = Text::new("a").with_selectable(true);
        assert!(t.selectable());
        let c = t.render(1, true);
        assert!(c.get(0, 0).is_some_and(|cell| cell.attrs.contains(StyleFlags::REVERSE)));
        let c = t.render(1, false);
        assert!(c.get(0, 0).is_some_and(|cell| cell.attrs.is_empty()));
    }

    #[test]
    fn rows_match_render() {
        let t = Text::new("hello world\nfoo");
        for w in [0u16, 1, 4, 20] {
            assert_eq!(t.rows(w, false), t.render(w, false).height());
        }
    }
}
