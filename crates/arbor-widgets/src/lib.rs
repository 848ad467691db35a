#![forbid(unsafe_code)]

//! Widgets: the list box viewport engine and the tree list built on it.
//!
//! Host content implements [`Node`]. A [`ListBox`](listbox::ListBox) lays
//! nodes from any [`FocusWalker`](arbor_tree::FocusWalker) into a fixed
//! viewport; a [`TreeBox`](treebox::TreeBox) does the same for a tree by
//! walking it depth first through a
//! [`TreeListWalker`](tree_list::TreeListWalker).

pub mod error;
pub mod field;
pub mod guides;
pub mod listbox;
pub mod text;
pub mod tree_list;
pub mod treebox;
pub mod valign;

use std::rc::Rc;

use arbor_core::event::{KeyEvent, MouseEvent};
use arbor_render::canvas::Canvas;

pub use error::{ErrorKind, ListBoxError};
pub use field::TextField;
pub use guides::TreeGuides;
pub use listbox::{
    ComingFrom, Command, Edges, Fill, FocusPlacement, FocusRequest, ListBox, Navigation, Placed,
    VisibleWindow,
};
pub use text::{Text, WrapMode};
pub use tree_list::{DecoratedLine, TreeListWalker};
pub use treebox::TreeBox;
pub use valign::VAlign;

/// Preferred cursor column carried between focus changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrefCol {
    /// Leftmost column.
    #[default]
    Left,
    /// Rightmost column.
    Right,
    /// A specific column.
    Col(u16),
}

/// Content the list engine can lay out.
///
/// `rows` is authoritative: the engine does all layout arithmetic with it
/// and fails the render if `render` disagrees. Nodes are shared by value,
/// so stateful nodes (cursor position, edit buffer) keep their state behind
/// interior mutability and are usually handed out as `Rc<T>`.
pub trait Node {
    /// Height of the node rendered at `width`.
    fn rows(&self, width: u16, focus: bool) -> u16;

    /// Render at `width`. The canvas must be `rows(width, focus)` tall, and
    /// carry a cursor exactly when [`cursor_coords`](Node::cursor_coords)
    /// reports one and `focus` is set.
    fn render(&self, width: u16, focus: bool) -> Canvas;

    /// Whether the node can take the focus.
    fn selectable(&self) -> bool {
        false
    }

    /// Handle a key. Returns the key back when it was not consumed.
    fn keypress(&self, _width: u16, key: KeyEvent) -> Option<KeyEvent> {
        Some(key)
    }

    /// Cursor position `(col, row)` within the node, if it shows one.
    fn cursor_coords(&self, _width: u16) -> Option<(u16, u16)> {
        None
    }

    /// Column the node would like the cursor to stay in.
    fn pref_col(&self, _width: u16) -> Option<PrefCol> {
        None
    }

    /// Try to place the cursor at `col` on `row`. Returns whether it moved.
    fn move_cursor_to_coords(&self, _width: u16, _col: PrefCol, _row: u16) -> bool {
        false
    }

    /// Handle a mouse event in node coordinates. Returns whether it was used.
    fn mouse_event(&self, _width: u16, _event: &MouseEvent, _focus: bool) -> bool {
        false
    }
}

macro_rules! forward_node {
    ($ptr:ident) => {
        impl<T: Node + ?Sized> Node for $ptr<T> {
            fn rows(&self, width: u16, focus: bool) -> u16 {
                (**self).rows(width, focus)
            }

            fn render(&self, width: u16, focus: bool) -> Canvas {
                (**self).render(width, focus)
            }

            fn selectable(&self) -> bool {
                (**self).selectable()
            }

            fn keypress(&self, width: u16, key: KeyEvent) -> Option<KeyEvent> {
                (**self).keypress(width, key)
            }

            fn cursor_coords(&self, width: u16) -> Option<(u16, u16)> {
                (**self).cursor_coords(width)
            }

            fn pref_col(&self, width: u16) -> Option<PrefCol> {
                (**self).pref_col(width)
            }

            fn move_cursor_to_coords(&self, width: u16, col: PrefCol, row: u16) -> bool {
                (**self).move_cursor_to_coords(width, col, row)
            }

            fn mouse_event(&self, width: u16, event: &MouseEvent, focus: bool) -> bool {
                (**self).mouse_event(width, event, focus)
            }
        }
    };
}

forward_node!(Rc);
forward_node!(Box);

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::event::KeyCode;

    struct Blank;

    impl Node for Blank {
        fn rows(&self, _width: u16, _focus: bool) -> u16 {
            2
        }

        fn render(&self, width: u16, _focus: bool) -> Canvas {
            Canvas::new(width, 2)
        }
    }

    #[test]
    fn defaults_are_inert() {
        let n = Blank;
        assert!(!n.selectable());
        let key = KeyEvent::new(KeyCode::Up);
        assert_eq!(n.keypress(4, key), Some(key));
        assert_eq!(n.cursor_coords(4), None);
        assert_eq!(n.pref_col(4), None);
        assert!(!n.move_cursor_to_coords(4, PrefCol::Left, 0));
    }

    #[test]
    fn shared_pointers_forward() {
        let rc: Rc<dyn Node> = Rc::new(Blank);
        assert_eq!(rc.rows(3, false), 2);
        let boxed: Box<dyn Node> = Box::new(Blank);
        assert_eq!(boxed.render(3, false).height(), 2);
    }

    #[test]
    fn pref_col_defaults_left() {
        assert_eq!(PrefCol::default(), PrefCol::Left);
    }
}
