#![forbid(unsafe_code)]

//! Fixed in-memory tree addressed by index paths.
//!
//! A position is the sequence of child indices from the top level: `[0]`
//! is the first top-level entry, `[0, 1]` its second child, and so on.

use crate::error::NotFound;
use crate::walker::{TreeWalker, probe};

/// One entry of a [`SimpleTree`]: content plus optional children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry<N> {
    /// Content at this entry.
    pub content: N,
    /// Child entries; `None` and an empty list both mean "no children".
    pub children: Option<Vec<TreeEntry<N>>>,
}

impl<N> TreeEntry<N> {
    /// An entry without children.
    pub fn leaf(content: N) -> Self {
        Self {
            content,
            children: None,
        }
    }

    /// An entry with children.
    pub fn branch(content: N, children: Vec<TreeEntry<N>>) -> Self {
        Self {
            content,
            children: Some(children),
        }
    }
}

/// Tree built from nested literal entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleTree<N> {
    roots: Vec<TreeEntry<N>>,
}

impl<N> SimpleTree<N> {
    /// Build from the top-level entries.
    pub fn new(roots: Vec<TreeEntry<N>>) -> Self {
        Self { roots }
    }

    /// Top-level entries.
    pub fn roots(&self) -> &[TreeEntry<N>] {
        &self.roots
    }

    fn lookup(&self, path: &[usize]) -> Option<&TreeEntry<N>> {
        let (first, rest) = path.split_first()?;
        let mut entry = self.roots.get(*first)?;
        for &i in rest {
            entry = entry.children.as_ref()?.get(i)?;
        }
        Some(entry)
    }
}

impl<N: Clone> TreeWalker for SimpleTree<N> {
    type Position = Vec<usize>;
    type Node = N;

    fn get(&self, pos: &Vec<usize>) -> Result<N, NotFound> {
        self.lookup(pos)
            .map(|entry| entry.content.clone())
            .ok_or(NotFound)
    }

    fn root(&self) -> Option<Vec<usize>> {
        (!self.roots.is_empty()).then(|| vec![0])
    }

    fn parent_position(&self, pos: &Vec<usize>) -> Option<Vec<usize>> {
        (pos.len() > 1).then(|| pos[..pos.len() - 1].to_vec())
    }

    fn first_child_position(&self, pos: &Vec<usize>) -> Option<Vec<usize>> {
        let mut child = pos.clone();
        child.push(0);
        probe(self, Some(child))
    }

    fn last_child_position(&self, pos: &Vec<usize>) -> Option<Vec<usize>> {
        let children = self.lookup(pos)?.children.as_ref()?;
        let last = children.len().checked_sub(1)?;
        let mut child = pos.clone();
        child.push(last);
        Some(child)
    }

    fn next_sibling_position(&self, pos: &Vec<usize>) -> Option<Vec<usize>> {
        let mut sibling = pos.clone();
        let last = sibling.last_mut()?;
        *last = last.checked_add(1)?;
        probe(self, Some(sibling))
    }

    fn prev_sibling_position(&self, pos: &Vec<usize>) -> Option<Vec<usize>> {
        let mut sibling = pos.clone();
        let last = sibling.last_mut()?;
        *last = last.checked_sub(1)?;
        probe(self, Some(sibling))
    }

    fn depth(&self, pos: &Vec<usize>) -> usize {
        pos.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::{first_ancestor, last_descendant, last_sibling_position};

    fn sample() -> SimpleTree<&'static str> {
        SimpleTree::new(vec![
            TreeEntry::branch(
                "A",
                vec![TreeEntry::leaf("A1"), TreeEntry::branch("A2", Vec::new())],
            ),
            TreeEntry::leaf("B"),
        ])
    }

    #[test]
    fn get_resolves_paths() {
        let t = sample();
        assert_eq!(t.get(&vec![0]), Ok("A"));
        assert_eq!(t.get(&vec![0, 1]), Ok("A2"));
        assert_eq!(t.get(&vec![1]), Ok("B"));
        assert_eq!(t.get(&vec![2]), Err(NotFound));
        assert_eq!(t.get(&vec![1, 0]), Err(NotFound));
        assert_eq!(t.get(&Vec::new()), Err(NotFound));
    }

    #[test]
    fn root_of_empty_tree_is_absent() {
        let t: SimpleTree<u8> = SimpleTree::default();
        assert_eq!(t.root(), None);
        assert_eq!(sample().root(), Some(vec![0]));
    }

    #[test]
    fn parent_strips_last_index() {
        let t = sample();
        assert_eq!(t.parent_position(&vec![0, 1]), Some(vec![0]));
        assert_eq!(t.parent_position(&vec![0]), None);
    }

    #[test]
    fn children_are_confirmed() {
        let t = sample();
        assert_eq!(t.first_child_position(&vec![0]), Some(vec![0, 0]));
        assert_eq!(t.last_child_position(&vec![0]), Some(vec![0, 1]));
        assert_eq!(t.first_child_position(&vec![1]), None);
        assert_eq!(t.last_child_position(&vec![1]), None);
        // Empty child list behaves like no children.
        assert_eq!(t.first_child_position(&vec![0, 1]), None);
        assert_eq!(t.last_child_position(&vec![0, 1]), None);
    }

    #[test]
    fn siblings_stop_at_bounds() {
        let t = sample();
        assert_eq!(t.next_sibling_position(&vec![0]), Some(vec![1]));
        assert_eq!(t.next_sibling_position(&vec![1]), None);
        assert_eq!(t.prev_sibling_position(&vec![0, 1]), Some(vec![0, 0]));
        assert_eq!(t.prev_sibling_position(&vec![0, 0]), None);
    }

    #[test]
    fn depth_is_path_length() {
        let t = sample();
        assert_eq!(t.depth(&vec![0]), 0);
        assert_eq!(t.depth(&vec![0, 1]), 1);
    }

    #[test]
    fn derived_helpers() {
        let t = sample();
        assert_eq!(first_ancestor(&t, &vec![0, 1]), vec![0]);
        assert_eq!(last_descendant(&t, &vec![0]), vec![0, 1]);
        assert_eq!(last_sibling_position(&t, &vec![0]), vec![1]);
    }
}
