#![forbid(unsafe_code)]

//! Depth-first linearization of a tree, with connector decoration.
//!
//! [`TreeListWalker`] turns any [`TreeWalker`] into the focus-bearing
//! sequence the list engine consumes. Next and previous are depth-first
//! successor and predecessor, and every line is prefixed with indentation
//! and connector glyphs derived from the node's ancestry:
//!
//! ```text
//! A
//! ├─▶A1
//! │ └─▶A1a
//! └─▶A2
//! B
//! ```
//!
//! Decorated lines are cached by position until explicitly invalidated.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use arbor_core::event::{KeyEvent, MouseEvent};
use arbor_render::canvas::Canvas;
use arbor_render::cell::Cell;
use arbor_tree::{
    FocusWalker, ListWalker, NotFound, TreeWalker, first_sibling_position, last_descendant,
    last_sibling_position,
};

use crate::guides::TreeGuides;
use crate::{Node, PrefCol};

/// One column band of a line prefix: `head` on the first row, `body` below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    width: u16,
    head: char,
    body: char,
}

impl Segment {
    const fn new(width: u16, head: char, body: char) -> Self {
        Self { width, head, body }
    }

    const fn solid(width: u16, c: char) -> Self {
        Self::new(width, c, c)
    }
}

/// A node's content behind its tree prefix.
#[derive(Debug, Clone)]
pub struct DecoratedLine<N> {
    prefix: Vec<Segment>,
    prefix_width: u16,
    content: N,
}

impl<N> DecoratedLine<N> {
    fn new(prefix: Vec<Segment>, content: N) -> Self {
        let prefix_width = prefix
            .iter()
            .fold(0u16, |acc, s| acc.saturating_add(s.width));
        Self {
            prefix,
            prefix_width,
            content,
        }
    }

    /// The undecorated content.
    pub fn content(&self) -> &N {
        &self.content
    }

    /// Columns taken by the prefix.
    pub fn prefix_width(&self) -> u16 {
        self.prefix_width
    }

    /// Prefix width and content width at `width`.
    fn split(&self, width: u16) -> (u16, u16) {
        let pw = self.prefix_width.min(width);
        (pw, width - pw)
    }

    fn render_prefix(&self, width: u16, height: u16) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let mut x = 0u16;
        for seg in &self.prefix {
            for _ in 0..seg.width {
                if x >= width {
                    return canvas;
                }
                for y in 0..height {
                    let c = if y == 0 { seg.head } else { seg.body };
                    if c != ' ' {
                        canvas.set(x, y, Cell::from_char(c));
                    }
                }
                x += 1;
            }
        }
        canvas
    }
}

impl<N: Node> Node for DecoratedLine<N> {
    fn rows(&self, width: u16, focus: bool) -> u16 {
        let (_, cw) = self.split(width);
        self.content.rows(cw, focus)
    }

    fn render(&self, width: u16, focus: bool) -> Canvas {
        let (pw, cw) = self.split(width);
        let body = self.content.render(cw, focus);
        let prefix = self.render_prefix(pw, body.height());
        Canvas::hstack(vec![prefix, body])
    }

    fn selectable(&self) -> bool {
        self.content.selectable()
    }

    fn keypress(&self, width: u16, key: KeyEvent) -> Option<KeyEvent> {
        let (_, cw) = self.split(width);
        self.content.keypress(cw, key)
    }

    fn cursor_coords(&self, width: u16) -> Option<(u16, u16)> {
        let (pw, cw) = self.split(width);
        self.content
            .cursor_coords(cw)
            .map(|(x, y)| (x.saturating_add(pw), y))
    }

    fn pref_col(&self, width: u16) -> Option<PrefCol> {
        let (pw, cw) = self.split(width);
        self.content.pref_col(cw).map(|col| match col {
            PrefCol::Col(c) => PrefCol::Col(c.saturating_add(pw)),
            other => other,
        })
    }

    fn move_cursor_to_coords(&self, width: u16, col: PrefCol, row: u16) -> bool {
        let (pw, cw) = self.split(width);
        let col = match col {
            PrefCol::Col(c) => PrefCol::Col(c.saturating_sub(pw)),
            other => other,
        };
        self.content.move_cursor_to_coords(cw, col, row)
    }

    fn mouse_event(&self, width: u16, event: &MouseEvent, focus: bool) -> bool {
        let (pw, cw) = self.split(width);
        if event.x < pw {
            return false;
        }
        let local = event.at(event.x - pw, event.y);
        self.content.mouse_event(cw, &local, focus)
    }
}

/// A tree presented as a depth-first, focus-bearing list.
pub struct TreeListWalker<W: TreeWalker> {
    walker: W,
    focus: Option<W::Position>,
    indent: u16,
    guides: TreeGuides,
    cache: RefCell<HashMap<W::Position, Rc<DecoratedLine<W::Node>>>>,
}

impl<W: TreeWalker> TreeListWalker<W> {
    /// Walk `walker`, focusing its root.
    pub fn new(walker: W) -> Self {
        let focus = walker.root();
        Self {
            walker,
            focus,
            indent: 2,
            guides: TreeGuides::default(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Columns of indentation per depth level (default 2). Zero disables
    /// the prefix entirely.
    #[must_use]
    pub fn with_indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self.cache.get_mut().clear();
        self
    }

    /// Glyph set for connectors.
    #[must_use]
    pub fn with_guides(mut self, guides: TreeGuides) -> Self {
        self.guides = guides;
        self.cache.get_mut().clear();
        self
    }

    /// The wrapped tree.
    pub fn walker(&self) -> &W {
        &self.walker
    }

    /// Indentation per level.
    pub fn indent(&self) -> u16 {
        self.indent
    }

    /// Connector glyphs.
    pub fn guides(&self) -> TreeGuides {
        self.guides
    }

    /// Drop the cached line for `pos`.
    pub fn invalidate(&self, pos: &W::Position) {
        self.cache.borrow_mut().remove(pos);
    }

    /// Drop all cached lines.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Number of cached lines.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Prefix segments for `pos`, outermost first.
    fn prefix(&self, pos: &W::Position) -> Vec<Segment> {
        let mut segs = Vec::new();
        if self.indent == 0 {
            return segs;
        }
        let Some(parent) = self.walker.parent_position(pos) else {
            return segs;
        };
        let g = &self.guides;

        // Ancestors below the top level, innermost first.
        let mut ancestors = Vec::new();
        let mut cur = parent;
        while let Some(up) = self.walker.parent_position(&cur) {
            ancestors.push(cur);
            cur = up;
        }
        for a in ancestors.iter().rev() {
            if self.walker.next_sibling_position(a).is_some() {
                segs.push(Segment::solid(1, g.vbar()));
                if self.indent > 1 {
                    segs.push(Segment::solid(self.indent - 1, ' '));
                }
            } else {
                segs.push(Segment::solid(self.indent, ' '));
            }
        }

        if self.walker.next_sibling_position(pos).is_some() {
            segs.push(Segment::new(1, g.connector_t(), g.vbar()));
        } else {
            segs.push(Segment::new(1, g.connector_l(), ' '));
        }
        if self.indent > 1 {
            segs.push(Segment::new(self.indent - 1, g.hbar(), ' '));
        }
        segs.push(Segment::new(1, g.tip(), ' '));
        segs
    }
}

impl<W> ListWalker for TreeListWalker<W>
where
    W: TreeWalker,
    W::Node: Node,
{
    type Position = W::Position;
    type Node = Rc<DecoratedLine<W::Node>>;

    fn get(&self, pos: &W::Position) -> Result<Self::Node, NotFound> {
        if let Some(line) = self.cache.borrow().get(pos) {
            return Ok(Rc::clone(line));
        }
        let content = self.walker.get(pos)?;
        let line = Rc::new(DecoratedLine::new(self.prefix(pos), content));
        self.cache
            .borrow_mut()
            .insert(pos.clone(), Rc::clone(&line));
        Ok(line)
    }

    fn next_position(&self, pos: &W::Position) -> Option<W::Position> {
        if let Some(child) = self.walker.first_child_position(pos) {
            return Some(child);
        }
        let mut cur = pos.clone();
        loop {
            if let Some(sibling) = self.walker.next_sibling_position(&cur) {
                return Some(sibling);
            }
            cur = self.walker.parent_position(&cur)?;
        }
    }

    fn prev_position(&self, pos: &W::Position) -> Option<W::Position> {
        match self.walker.prev_sibling_position(pos) {
            Some(sibling) => Some(last_descendant(&self.walker, &sibling)),
            None => self.walker.parent_position(pos),
        }
    }

    fn first_position(&self) -> Option<W::Position> {
        let root = self.walker.root()?;
        Some(first_sibling_position(&self.walker, &root))
    }

    fn last_position(&self) -> Option<W::Position> {
        let root = self.walker.root()?;
        let last_top = last_sibling_position(&self.walker, &root);
        Some(last_descendant(&self.walker, &last_top))
    }
}

impl<W> FocusWalker for TreeListWalker<W>
where
    W: TreeWalker,
    W::Node: Node,
{
    fn focus(&self) -> Option<W::Position> {
        self.focus.clone()
    }

    fn set_focus(&mut self, pos: W::Position) {
        self.focus = Some(pos);
    }
}

impl<W: TreeWalker + fmt::Debug> fmt::Debug for TreeListWalker<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeListWalker")
            .field("walker", &self.walker)
            .field("focus", &self.focus)
            .field("indent", &self.indent)
            .field("guides", &self.guides)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::TextField;
    use crate::text::Text;
    use arbor_core::event::{KeyCode, MouseButton, MouseEventKind};
    use arbor_tree::{SimpleTree, TreeEntry};

    fn t(s: &str) -> Text {
        Text::new(s)
    }

    /// A
    /// ├ A1
    /// │ └ A1a
    /// └ A2
    /// B
    fn sample() -> TreeListWalker<SimpleTree<Text>> {
        TreeListWalker::new(SimpleTree::new(vec![
            TreeEntry::branch(
                t("A"),
                vec![
                    TreeEntry::branch(t("A1"), vec![TreeEntry::leaf(t("A1a"))]),
                    TreeEntry::leaf(t("A2")),
                ],
            ),
            TreeEntry::leaf(t("B")),
        ]))
    }

    fn lines(w: &TreeListWalker<SimpleTree<Text>>, width: u16) -> Vec<String> {
        w.positions(false)
            .map(|p| w.get(&p).map(|l| l.render(width, false).row_text(0)))
            .collect::<Result<_, _>>()
            .unwrap_or_default()
    }

    #[test]
    fn depth_first_order() {
        let w = sample();
        let fwd: Vec<_> = w.positions(false).collect();
        assert_eq!(
            fwd,
            vec![vec![0], vec![0, 0], vec![0, 0, 0], vec![0, 1], vec![1]]
        );
        let mut back: Vec<_> = w.positions(true).collect();
        back.reverse();
        assert_eq!(back, fwd);
    }

    #[test]
    fn decorated_prefixes() {
        let w = sample();
        assert_eq!(
            lines(&w, 10),
            vec![
                "A         ",
                "├─▶A1     ",
                "│ └─▶A1a  ",
                "└─▶A2     ",
                "B         ",
            ]
        );
    }

    #[test]
    fn ascii_guides_with_wider_indent() {
        let w = sample().with_guides(TreeGuides::Ascii).with_indent(3);
        assert_eq!(lines(&w, 10)[2], "|  `-->A1a");
    }

    #[test]
    fn zero_indent_has_no_prefix() {
        let w = sample().with_indent(0);
        assert_eq!(lines(&w, 4)[2], "A1a ");
    }

    #[test]
    fn prefix_width_is_depth_times_indent_plus_one() {
        let w = sample();
        let line = w.get(&vec![0, 0, 0]).ok();
        assert_eq!(line.map(|l| l.prefix_width()), Some(5));
        let top = w.get(&vec![1]).ok();
        assert_eq!(top.map(|l| l.prefix_width()), Some(0));
    }

    #[test]
    fn connector_continues_below_first_row() {
        let w = TreeListWalker::new(SimpleTree::new(vec![TreeEntry::branch(
            t("P"),
            vec![TreeEntry::leaf(t("x\ny")), TreeEntry::leaf(t("z\nw"))],
        )]));
        let first = w.get(&vec![0, 0]).map(|l| l.render(6, false).to_lines());
        assert_eq!(first, Ok(vec!["├─▶x  ".to_string(), "│  y  ".to_string()]));
        let last = w.get(&vec![0, 1]).map(|l| l.render(6, false).to_lines());
        assert_eq!(last, Ok(vec!["└─▶z  ".to_string(), "   w  ".to_string()]));
    }

    #[test]
    fn lines_are_cached_until_invalidated() {
        let w = sample();
        let a = w.get(&vec![0, 1]);
        let b = w.get(&vec![0, 1]);
        assert!(matches!((a, b), (Ok(a), Ok(b)) if Rc::ptr_eq(&a, &b)));
        assert_eq!(w.cached_len(), 1);
        w.invalidate(&vec![0, 1]);
        assert_eq!(w.cached_len(), 0);
        let _ = w.get(&vec![0]);
        w.clear_cache();
        assert_eq!(w.cached_len(), 0);
    }

    #[test]
    fn unknown_position_is_not_found() {
        let w = sample();
        assert!(matches!(w.get(&vec![7]), Err(NotFound)));
    }

    #[test]
    fn focus_starts_at_root() {
        let mut w = sample();
        assert_eq!(w.focus(), Some(vec![0]));
        w.set_focus(vec![0, 1]);
        assert_eq!(w.get_focus().map(|(_, p)| p), Some(vec![0, 1]));
        assert_eq!(w.first_position(), Some(vec![0]));
        assert_eq!(w.last_position(), Some(vec![1]));
    }

    #[test]
    fn cursor_and_mouse_are_shifted_by_prefix() {
        let field = Rc::new(TextField::new("abc"));
        let w = TreeListWalker::new(SimpleTree::new(vec![TreeEntry::branch(
            Rc::clone(&field),
            vec![TreeEntry::leaf(Rc::clone(&field))],
        )]));
        let Ok(line) = w.get(&vec![0, 0]) else {
            panic!("child line missing");
        };
        assert!(line.selectable());
        assert_eq!(line.cursor_coords(10), Some((3, 0)));
        assert_eq!(line.render(10, true).cursor(), Some((3, 0)));
        assert!(line.move_cursor_to_coords(10, PrefCol::Col(5), 0));
        assert_eq!(field.cursor(), (2, 0));
        assert_eq!(line.pref_col(10), Some(PrefCol::Col(5)));

        let in_prefix = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 1, 0);
        assert!(!line.mouse_event(10, &in_prefix, true));
        let on_text = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 4, 0);
        assert!(line.mouse_event(10, &on_text, true));
        assert_eq!(field.cursor(), (1, 0));

        assert_eq!(line.keypress(10, KeyEvent::new(KeyCode::Right)), None);
        assert_eq!(field.cursor(), (2, 0));
    }

    #[test]
    fn narrow_width_clips_prefix() {
        let w = sample();
        let Ok(line) = w.get(&vec![0, 0, 0]) else {
            panic!("line missing");
        };
        let c = line.render(3, false);
        assert_eq!(c.width(), 3);
        assert_eq!(c.height(), line.rows(3, false));
    }
}
