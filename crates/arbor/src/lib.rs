#![forbid(unsafe_code)]

//! Arbor public facade crate.
//!
//! Re-exports the types a host needs to put a list or tree of content
//! nodes on screen, plus a prelude for day-to-day use.
//!
//! ```
//! use arbor::prelude::*;
//!
//! let tree = SimpleTree::new(vec![
//!     TreeEntry::branch(Text::new("src"), vec![TreeEntry::leaf(Text::new("main.rs"))]),
//!     TreeEntry::leaf(Text::new("Cargo.toml")),
//! ]);
//! let mut tree_box = TreeBox::new(tree);
//! let canvas = tree_box.render(Size::new(14, 3), false)?;
//! assert_eq!(canvas.to_lines(), vec!["src           ", "└─▶main.rs    ", "Cargo.toml    "]);
//! # Ok::<(), ListBoxError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use arbor_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use arbor_core::geometry::Size;

// --- Render re-exports -----------------------------------------------------

pub use arbor_render::canvas::Canvas;
pub use arbor_render::cell::{Cell, StyleFlags};

// --- Tree re-exports -------------------------------------------------------

pub use arbor_tree::{
    CachingTree, FocusWalker, ListWalker, NestedEntry, NestedTree, NotFound, SimpleListWalker,
    SimpleTree, TreeEntry, TreeWalker,
};

// --- Widget re-exports -----------------------------------------------------

pub use arbor_widgets::{
    ComingFrom, Command, Edges, ErrorKind, FocusRequest, ListBox, ListBoxError, Navigation, Node,
    PrefCol, Text, TextField, TreeBox, TreeGuides, TreeListWalker, VAlign, WrapMode,
};

/// Standard result type for arbor widget operations.
pub type Result<T> = std::result::Result<T, ListBoxError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Canvas, ComingFrom, Edges, Event, KeyCode, KeyEvent, ListBox, ListBoxError, Navigation,
        Node, Result, SimpleListWalker, SimpleTree, Size, Text, TextField, TreeBox, TreeEntry,
        TreeWalker, VAlign,
    };

    pub use crate::{core, render, tree, widgets};
}

pub use arbor_core as core;
pub use arbor_render as render;
pub use arbor_tree as tree;
pub use arbor_widgets as widgets;
