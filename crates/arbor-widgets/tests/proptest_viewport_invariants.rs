//! Property tests for list box viewport invariants.
//!
//! Lists mix fixed blocks (some with no rows at all) with multi-line
//! fields that carry a cursor. After any sequence of keys, focus moves,
//! alignments and clicks:
//!
//! 1. Rendering succeeds and fills exactly the viewport.
//! 2. The focus node overlaps the viewport.
//! 3. A focus cursor is on a viewport row.
//! 4. Visible rows equal `min(height, total content rows)`.
//! 5. Reported edges agree with what is on screen.

use std::rc::Rc;

use arbor_core::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use arbor_core::geometry::Size;
use arbor_render::canvas::Canvas;
use arbor_tree::SimpleListWalker;
use arbor_widgets::{ComingFrom, Edges, ListBox, Node, TextField, VAlign};
use proptest::prelude::*;

const WIDTH: u16 = 4;

#[derive(Debug, Clone)]
struct Block {
    rows: u16,
    selectable: bool,
}

impl Node for Block {
    fn rows(&self, _width: u16, _focus: bool) -> u16 {
        self.rows
    }

    fn render(&self, width: u16, _focus: bool) -> Canvas {
        Canvas::new(width, self.rows)
    }

    fn selectable(&self) -> bool {
        self.selectable
    }
}

/// What to put in the list; built into shared nodes per case.
#[derive(Debug, Clone)]
enum Item {
    Block(Block),
    Field(Vec<&'static str>),
}

impl Item {
    fn rows(&self) -> u16 {
        match self {
            Self::Block(b) => b.rows,
            Self::Field(lines) => u16::try_from(lines.len()).unwrap(),
        }
    }

    fn selectable(&self) -> bool {
        match self {
            Self::Block(b) => b.selectable,
            Self::Field(_) => true,
        }
    }

    fn node(&self) -> Rc<dyn Node> {
        match self {
            Self::Block(b) => Rc::new(b.clone()),
            Self::Field(lines) => Rc::new(TextField::new(&lines.join("\n"))),
        }
    }
}

type Walker = SimpleListWalker<Rc<dyn Node>>;

#[derive(Debug, Clone)]
enum Op {
    Key(KeyCode),
    SetFocus(usize, Option<ComingFrom>),
    Align(VAlign),
    Click(u16, u16),
}

fn item_strategy() -> impl Strategy<Value = Item> {
    let line = prop_oneof![Just(""), Just("ab"), Just("abcdef")];
    prop_oneof![
        3 => (0u16..=3, any::<bool>())
            .prop_map(|(rows, selectable)| Item::Block(Block { rows, selectable })),
        1 => prop::collection::vec(line, 1..=4).prop_map(Item::Field),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let direction = prop_oneof![
        Just(None),
        Just(Some(ComingFrom::Above)),
        Just(Some(ComingFrom::Below)),
    ];
    let valign = prop_oneof![
        Just(VAlign::Top),
        Just(VAlign::Middle),
        Just(VAlign::Bottom),
        (0u16..=100).prop_map(VAlign::Relative),
        (0u16..10).prop_map(VAlign::FixedTop),
        (0u16..10).prop_map(VAlign::FixedBottom),
    ];
    prop_oneof![
        4 => prop_oneof![
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::PageUp),
            Just(KeyCode::PageDown),
            Just(KeyCode::Left),
            Just(KeyCode::Right),
            Just(KeyCode::End),
        ]
        .prop_map(Op::Key),
        1 => (any::<usize>(), direction).prop_map(|(i, d)| Op::SetFocus(i, d)),
        1 => valign.prop_map(Op::Align),
        1 => (0u16..WIDTH, 0u16..8).prop_map(|(x, y)| Op::Click(x, y)),
    ]
}

fn list(items: &[Item]) -> ListBox<Walker> {
    ListBox::new(items.iter().map(Item::node).collect())
}

fn apply(lb: &mut ListBox<Walker>, len: usize, size: Size, op: &Op) {
    match op {
        Op::Key(code) => {
            lb.keypress(size, KeyEvent::new(*code)).unwrap();
        }
        Op::SetFocus(i, from) => lb.set_focus(i % len, *from).unwrap(),
        Op::Align(valign) => lb.set_focus_valign(*valign).unwrap(),
        Op::Click(x, y) if *y < size.height => {
            let click = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), *x, *y);
            lb.mouse_event(size, &click, true).unwrap();
        }
        Op::Click(..) => {}
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn viewport_stays_consistent(
        items in prop::collection::vec(item_strategy(), 1..16),
        height in 1u16..8,
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let len = items.len();
        let total: i32 = items.iter().map(|i| i32::from(i.rows())).sum();
        let size = Size::new(WIDTH, height);
        let maxrow = i32::from(height);
        let mut lb = list(&items);

        for op in &ops {
            apply(&mut lb, len, size, op);

            let canvas = lb.render(size, true);
            prop_assert!(canvas.is_ok(), "render failed after {:?}: {:?}", op, canvas);
            let canvas = canvas.unwrap();
            prop_assert_eq!(canvas.height(), height);
            prop_assert_eq!(canvas.width(), WIDTH);

            let window = lb.calculate_visible(size, true).unwrap().unwrap();
            let focus = &window.focus;
            prop_assert!(focus.offset < maxrow, "offset {} past bottom", focus.offset);
            if focus.rows == 0 {
                prop_assert!(focus.offset >= 0, "empty focus above the top: {}", focus.offset);
            } else {
                prop_assert!(focus.offset + focus.rows > 0, "focus hidden above: {}", focus.offset);
            }

            if let Some((_, cy)) = focus.cursor {
                let row = i32::from(cy) + focus.offset;
                prop_assert!((0..maxrow).contains(&row), "cursor row {} off screen", row);
                let reported = lb.get_cursor_coords(size).unwrap();
                prop_assert_eq!(reported.map(|(_, y)| i32::from(y)), Some(row));
            }

            let visible = focus.rows
                + window.above.items.iter().map(|p| p.rows).sum::<i32>()
                + window.below.items.iter().map(|p| p.rows).sum::<i32>()
                - window.above.trim
                - window.below.trim;
            prop_assert_eq!(visible, maxrow.min(total));

            let edges = lb.ends_visible(size, true).unwrap();
            if total <= maxrow {
                prop_assert_eq!(edges, Edges::all());
            }
            if edges.contains(Edges::TOP) {
                prop_assert_eq!(window.above.trim, 0);
            }
            if edges.contains(Edges::BOTTOM) {
                prop_assert_eq!(window.below.trim, 0);
            }
        }
    }

    #[test]
    fn first_layout_prefers_a_visible_selectable_node(
        items in prop::collection::vec(item_strategy(), 1..12),
        height in 1u16..8,
    ) {
        let size = Size::new(WIDTH, height);
        let mut lb = list(&items);
        let window = lb.calculate_visible(size, true).unwrap().unwrap();

        // Nodes with rows wholly visible from the top, in order.
        let mut row = 0;
        let mut fully_visible = Vec::new();
        for (i, item) in items.iter().enumerate() {
            row += i32::from(item.rows());
            if row > i32::from(height) {
                break;
            }
            if item.rows() > 0 {
                fully_visible.push(i);
            }
        }
        let expected = if items[0].selectable() {
            0
        } else {
            fully_visible
                .into_iter()
                .find(|&i| items[i].selectable())
                .unwrap_or(0)
        };
        prop_assert_eq!(window.focus.position, expected);
    }
}
