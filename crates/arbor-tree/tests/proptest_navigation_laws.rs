//! Property tests for navigator symmetry laws.
//!
//! 1. parent(first_child(p)) == p and parent(last_child(p)) == p.
//! 2. prev_sibling(next_sibling(p)) == p, and the mirror.
//! 3. Every reachable position resolves to content.
//! 4. Empty embedded lists never surface as positions.

use std::rc::Rc;

use arbor_tree::{
    NestedEntry, NestedPosition, NestedTree, SimpleListWalker, SimpleTree, TreeEntry, TreeWalker,
    first_sibling_position, last_descendant,
};
use proptest::prelude::*;

fn tree_strategy() -> impl Strategy<Value = Vec<TreeEntry<u32>>> {
    let leaf = any::<u32>().prop_map(TreeEntry::leaf);
    let entry = leaf.prop_recursive(4, 48, 5, |inner| {
        (any::<u32>(), prop::collection::vec(inner, 0..5))
            .prop_map(|(c, kids)| TreeEntry::branch(c, kids))
    });
    prop::collection::vec(entry, 0..6)
}

type Entry = NestedEntry<u32, Rc<SimpleListWalker<u32>>>;

fn nested_strategy() -> impl Strategy<Value = Vec<TreeEntry<Entry>>> {
    let content = prop_oneof![
        any::<u32>().prop_map(NestedEntry::Node),
        prop::collection::vec(any::<u32>(), 0..3)
            .prop_map(|v| NestedEntry::List(Rc::new(SimpleListWalker::new(v)))),
    ];
    let leaf = content.clone().prop_map(TreeEntry::leaf);
    let entry = leaf.prop_recursive(3, 32, 4, move |inner| {
        (
            any::<u32>().prop_map(NestedEntry::Node),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(c, kids)| TreeEntry::branch(c, kids))
    });
    prop::collection::vec(entry, 0..5)
}

/// Every position reachable from the root, in depth-first order.
fn reachable<W: TreeWalker>(walker: &W) -> Vec<W::Position> {
    let mut out = Vec::new();
    let mut stack: Vec<W::Position> = Vec::new();
    let mut top = walker.root();
    while let Some(p) = top {
        top = walker.next_sibling_position(&p);
        stack.push(p);
        while let Some(p) = stack.pop() {
            let mut child = walker.first_child_position(&p);
            let mut kids = Vec::new();
            while let Some(c) = child {
                child = walker.next_sibling_position(&c);
                kids.push(c);
            }
            out.push(p);
            stack.extend(kids.into_iter().rev());
        }
    }
    out
}

fn check_laws<W: TreeWalker>(walker: &W) -> Result<(), TestCaseError> {
    for p in reachable(walker) {
        prop_assert!(walker.get(&p).is_ok(), "unresolvable {:?}", p);
        if let Some(c) = walker.first_child_position(&p) {
            prop_assert_eq!(walker.parent_position(&c), Some(p.clone()));
        }
        if let Some(c) = walker.last_child_position(&p) {
            prop_assert_eq!(walker.parent_position(&c), Some(p.clone()));
            prop_assert_eq!(walker.next_sibling_position(&c), None);
        }
        if let Some(n) = walker.next_sibling_position(&p) {
            prop_assert_eq!(walker.prev_sibling_position(&n), Some(p.clone()));
        }
        if let Some(n) = walker.prev_sibling_position(&p) {
            prop_assert_eq!(walker.next_sibling_position(&n), Some(p.clone()));
        }
        let depth = walker.depth(&p);
        match walker.parent_position(&p) {
            Some(parent) => prop_assert_eq!(depth, walker.depth(&parent) + 1),
            None => prop_assert_eq!(depth, 0),
        }
        let last = last_descendant(walker, &p);
        prop_assert_eq!(walker.last_child_position(&last), None);
        let first = first_sibling_position(walker, &p);
        prop_assert_eq!(walker.prev_sibling_position(&first), None);
    }
    Ok(())
}

proptest! {
    #[test]
    fn simple_tree_laws(roots in tree_strategy()) {
        check_laws(&SimpleTree::new(roots))?;
    }

    #[test]
    fn nested_tree_laws(roots in nested_strategy()) {
        check_laws(&NestedTree::new(SimpleTree::new(roots)))?;
    }

    #[test]
    fn nested_tree_never_surfaces_empty_lists(roots in nested_strategy()) {
        let tree = NestedTree::new(SimpleTree::new(roots));
        for p in reachable(&tree) {
            if let NestedPosition::Outer(outer) = &p {
                let is_list = matches!(tree.get_ref().get(outer), Ok(NestedEntry::List(_)));
                prop_assert!(!is_list, "list host surfaced at {:?}", outer);
            }
        }
    }

    #[test]
    fn simple_tree_reaches_every_entry(roots in tree_strategy()) {
        fn count(entries: &[TreeEntry<u32>]) -> usize {
            entries
                .iter()
                .map(|e| 1 + e.children.as_deref().map_or(0, count))
                .sum()
        }
        let total = count(&roots);
        prop_assert_eq!(reachable(&SimpleTree::new(roots)).len(), total);
    }
}
