#![forbid(unsafe_code)]

//! A list box over a tree, with tree-shaped focus moves.

use std::ops::{Deref, DerefMut};

use arbor_tree::{FocusWalker, TreeWalker, last_descendant, last_sibling_position};

use crate::error::ListBoxError;
use crate::listbox::{ComingFrom, ListBox, Navigation};
use crate::tree_list::TreeListWalker;
use crate::Node;

/// A [`ListBox`] showing a tree depth first.
///
/// Derefs to the list box for layout, rendering and line or page steps.
/// The `focus_*` methods move along tree relations instead; the move is
/// placed at the next layout pass like [`ListBox::set_focus`].
///
/// ```
/// use arbor_tree::{SimpleTree, TreeEntry};
/// use arbor_widgets::{Navigation, Text, TreeBox};
///
/// let tree = SimpleTree::new(vec![
///     TreeEntry::branch(Text::new("root"), vec![TreeEntry::leaf(Text::new("leaf"))]),
/// ]);
/// let mut tree_box = TreeBox::new(tree);
/// assert_eq!(tree_box.focus_first_child(), Ok(Navigation::Handled));
/// assert_eq!(tree_box.focus_position(), Some(vec![0, 0]));
/// ```
pub struct TreeBox<W>
where
    W: TreeWalker,
    W::Node: Node,
{
    list: ListBox<TreeListWalker<W>>,
}

impl<W> TreeBox<W>
where
    W: TreeWalker,
    W::Node: Node,
{
    /// Show `walker` with default indentation and guides.
    pub fn new(walker: W) -> Self {
        Self::from_walker(TreeListWalker::new(walker))
    }

    /// Show an already configured tree list.
    pub fn from_walker(walker: TreeListWalker<W>) -> Self {
        Self {
            list: ListBox::new(walker),
        }
    }

    /// The tree.
    pub fn walker(&self) -> &W {
        self.list.body().walker()
    }

    /// Focus the parent of the focus node.
    pub fn focus_parent(&mut self) -> Result<Navigation, ListBoxError> {
        self.focus_related(|w, pos| w.parent_position(pos), ComingFrom::Below)
    }

    /// Focus the first child of the focus node.
    pub fn focus_first_child(&mut self) -> Result<Navigation, ListBoxError> {
        self.focus_related(|w, pos| w.first_child_position(pos), ComingFrom::Above)
    }

    /// Focus the last child of the focus node.
    pub fn focus_last_child(&mut self) -> Result<Navigation, ListBoxError> {
        self.focus_related(|w, pos| w.last_child_position(pos), ComingFrom::Above)
    }

    /// Focus the next sibling of the focus node.
    pub fn focus_next_sibling(&mut self) -> Result<Navigation, ListBoxError> {
        self.focus_related(|w, pos| w.next_sibling_position(pos), ComingFrom::Above)
    }

    /// Focus the previous sibling of the focus node.
    pub fn focus_prev_sibling(&mut self) -> Result<Navigation, ListBoxError> {
        self.focus_related(|w, pos| w.prev_sibling_position(pos), ComingFrom::Below)
    }

    /// Focus the first line of the tree.
    pub fn focus_first(&mut self) -> Result<Navigation, ListBoxError> {
        self.focus_related(|w, _| w.root(), ComingFrom::Below)
    }

    /// Focus the last line of the tree.
    pub fn focus_last(&mut self) -> Result<Navigation, ListBoxError> {
        self.focus_related(
            |w, _| {
                w.root()
                    .map(|root| last_descendant(w, &last_sibling_position(w, &root)))
            },
            ComingFrom::Above,
        )
    }

    fn focus_related(
        &mut self,
        relation: impl FnOnce(&W, &W::Position) -> Option<W::Position>,
        coming_from: ComingFrom,
    ) -> Result<Navigation, ListBoxError> {
        let Some(current) = self.list.body().focus() else {
            return Ok(Navigation::Unhandled);
        };
        match relation(self.walker(), &current) {
            Some(target) if target != current => {
                self.list.set_focus(target, Some(coming_from))?;
                Ok(Navigation::Handled)
            }
            _ => Ok(Navigation::Unhandled),
        }
    }
}

impl<W> Deref for TreeBox<W>
where
    W: TreeWalker,
    W::Node: Node,
{
    type Target = ListBox<TreeListWalker<W>>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl<W> DerefMut for TreeBox<W>
where
    W: TreeWalker,
    W::Node: Node,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}

impl<W> std::fmt::Debug for TreeBox<W>
where
    W: TreeWalker,
    W::Node: Node,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBox").field("list", &self.list).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Text;
    use arbor_core::geometry::Size;
    use arbor_tree::{SimpleTree, TreeEntry};

    fn t(s: &str) -> Text {
        Text::new(s).with_selectable(true)
    }

    /// A
    /// ├ A1
    /// │ └ A1a
    /// └ A2
    /// B
    fn sample() -> TreeBox<SimpleTree<Text>> {
        TreeBox::new(SimpleTree::new(vec![
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

    #[test]
    fn relations_move_focus() {
        let mut tb = sample();
        assert_eq!(tb.focus_first_child(), Ok(Navigation::Handled));
        assert_eq!(tb.focus_position(), Some(vec![0, 0]));
        assert_eq!(tb.focus_next_sibling(), Ok(Navigation::Handled));
        assert_eq!(tb.focus_position(), Some(vec![0, 1]));
        assert_eq!(tb.focus_prev_sibling(), Ok(Navigation::Handled));
        assert_eq!(tb.focus_last_child(), Ok(Navigation::Handled));
        assert_eq!(tb.focus_position(), Some(vec![0, 0, 0]));
        assert_eq!(tb.focus_parent(), Ok(Navigation::Handled));
        assert_eq!(tb.focus_position(), Some(vec![0, 0]));
    }

    #[test]
    fn missing_relations_are_unhandled() {
        let mut tb = sample();
        assert_eq!(tb.focus_parent(), Ok(Navigation::Unhandled));
        assert_eq!(tb.focus_prev_sibling(), Ok(Navigation::Unhandled));
        assert_eq!(tb.focus_first(), Ok(Navigation::Unhandled));
        assert_eq!(tb.focus_position(), Some(vec![0]));
    }

    #[test]
    fn first_and_last() {
        let mut tb = sample();
        assert_eq!(tb.focus_last(), Ok(Navigation::Handled));
        assert_eq!(tb.focus_position(), Some(vec![1]));
        assert_eq!(tb.focus_first(), Ok(Navigation::Handled));
        assert_eq!(tb.focus_position(), Some(vec![0]));
    }

    #[test]
    fn far_move_is_placed_at_next_layout() {
        let mut tb = sample();
        let size = Size::new(8, 2);
        tb.render(size, true).unwrap();
        // B is off screen below; arriving from above puts it at the bottom.
        tb.focus_last().unwrap();
        let w = tb.calculate_visible(size, true).unwrap().unwrap();
        assert_eq!(w.focus.position, vec![1]);
        assert_eq!(w.focus.offset, 1);
        assert_eq!(
            tb.render(size, true).unwrap().to_lines(),
            vec!["└─▶A2   ", "B       "]
        );
    }

    #[test]
    fn empty_tree_is_unhandled() {
        let mut tb: TreeBox<SimpleTree<Text>> = TreeBox::new(SimpleTree::new(Vec::new()));
        assert_eq!(tb.focus_first(), Ok(Navigation::Unhandled));
        assert_eq!(tb.focus_last(), Ok(Navigation::Unhandled));
    }
}
