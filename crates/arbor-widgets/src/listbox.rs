#![forbid(unsafe_code)]

//! Viewport and focus engine.
//!
//! A [`ListBox`] shows a window onto a [`FocusWalker`] sequence. The walker
//! owns the focus position; the list box owns where that focus sits on
//! screen:
//!
//! - `offset_rows` is the number of rows between the viewport top and the
//!   top of the focus node.
//! - `inset_fraction` applies when the focus node starts above the
//!   viewport: it is the fraction `(num, den)` of the focus node cut off at
//!   the top. Storing a fraction keeps the inset stable when the node's
//!   height changes with the width.
//!
//! Every layout pass starts from those two values and fills the space
//! above and below the focus by walking the sequence outwards. Node
//! `rows` reports are authoritative: layout arithmetic trusts them and
//! [`ListBox::render`] fails if a node renders a different height.
//!
//! Focus changes made without a viewport size (through
//! [`ListBox::set_focus`] or [`ListBox::set_focus_valign`]) are deferred
//! and resolved at the start of the next layout pass.

use std::fmt;
use std::iter;

use arbor_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent};
use arbor_core::geometry::Size;
use arbor_render::canvas::Canvas;
use arbor_tree::{FocusWalker, ListWalker, Positions};
use bitflags::bitflags;

use crate::error::ListBoxError;
use crate::valign::VAlign;
use crate::{Node, PrefCol};

type Result<T> = std::result::Result<T, ListBoxError>;

/// Side the focus arrives from when it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComingFrom {
    /// The old focus was above the new one.
    Above,
    /// The old focus was below the new one.
    Below,
}

/// Outcome of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// The step moved the focus or the viewport.
    Handled,
    /// The step hit the edge of the content. An enclosing widget may react.
    Unhandled,
}

bitflags! {
    /// Content edges currently inside the viewport.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        /// The first row of the content is visible.
        const TOP = 0b01;
        /// The last row of the content is visible.
        const BOTTOM = 0b10;
    }
}

/// Navigation commands understood by [`ListBox::keypress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// One line up.
    Up,
    /// One line down.
    Down,
    /// One viewport up.
    PageUp,
    /// One viewport down.
    PageDown,
}

impl Command {
    /// Map a key to its command.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::PageUp => Some(Self::PageUp),
            KeyCode::PageDown => Some(Self::PageDown),
            _ => None,
        }
    }

    const fn is_page(self) -> bool {
        matches!(self, Self::PageUp | Self::PageDown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorTarget {
    /// Column only; rows are scanned from the entry edge.
    Col(PrefCol),
    /// Column and row.
    At(PrefCol, i32),
}

impl CursorTarget {
    const fn col(self) -> PrefCol {
        match self {
            Self::Col(col) | Self::At(col, _) => col,
        }
    }
}

/// Arguments for [`ListBox::change_focus`].
///
/// ```
/// use arbor_widgets::{FocusRequest, PrefCol};
///
/// let request = FocusRequest::new(3usize)
///     .offset(2)
///     .from_above()
///     .cursor_col(PrefCol::Left);
/// assert_eq!(*request.position(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRequest<P> {
    position: P,
    offset: i32,
    coming_from: Option<ComingFrom>,
    cursor: Option<CursorTarget>,
    snap_rows: Option<i32>,
}

impl<P> FocusRequest<P> {
    /// Focus `position` with its top at the viewport top.
    pub fn new(position: P) -> Self {
        Self {
            position,
            offset: 0,
            coming_from: None,
            cursor: None,
            snap_rows: None,
        }
    }

    /// Rows between the viewport top and the node top. Negative values
    /// hide that many rows of the node above the viewport.
    #[must_use]
    pub fn offset(mut self, offset_inset: i32) -> Self {
        self.offset = offset_inset;
        self
    }

    /// The old focus was above the target.
    #[must_use]
    pub fn from_above(self) -> Self {
        self.coming_from(Some(ComingFrom::Above))
    }

    /// The old focus was below the target.
    #[must_use]
    pub fn from_below(self) -> Self {
        self.coming_from(Some(ComingFrom::Below))
    }

    /// Set or clear the arrival direction.
    #[must_use]
    pub fn coming_from(mut self, coming_from: Option<ComingFrom>) -> Self {
        self.coming_from = coming_from;
        self
    }

    /// Place the target's cursor in `col`, scanning rows inward from the
    /// edge the focus arrives at. Needs a direction.
    #[must_use]
    pub fn cursor_col(mut self, col: PrefCol) -> Self {
        self.cursor = Some(CursorTarget::Col(col));
        self
    }

    /// Place the target's cursor at `col` on `row`, falling back toward
    /// the arrival edge.
    #[must_use]
    pub fn cursor_at(mut self, col: PrefCol, row: i32) -> Self {
        self.cursor = Some(CursorTarget::At(col, row));
        self
    }

    /// Most rows the viewport may scroll to snap a selectable target fully
    /// into view. Defaults to one less than the viewport height; negative
    /// values count as zero.
    #[must_use]
    pub fn snap_rows(mut self, rows: i32) -> Self {
        self.snap_rows = Some(rows);
        self
    }

    /// The target position.
    pub fn position(&self) -> &P {
        &self.position
    }
}

/// A node laid out in the viewport.
#[derive(Debug, Clone)]
pub struct Placed<N, P> {
    /// The node.
    pub node: N,
    /// Its position in the walker.
    pub position: P,
    /// Rows it takes (never zero).
    pub rows: i32,
}

/// The focus node as laid out.
#[derive(Debug, Clone)]
pub struct FocusPlacement<N, P> {
    /// Row of the node top: positive is margin above it, negative is rows
    /// hidden above the viewport.
    pub offset: i32,
    /// The node.
    pub node: N,
    /// Its position in the walker.
    pub position: P,
    /// Rows it takes.
    pub rows: i32,
    /// Cursor within the node, when the viewport has input focus.
    pub cursor: Option<(u16, u16)>,
}

/// Nodes on one side of the focus.
#[derive(Debug, Clone)]
pub struct Fill<N, P> {
    /// Rows of the outermost node cut off at the viewport edge.
    pub trim: i32,
    /// Nodes, nearest to the focus first.
    pub items: Vec<Placed<N, P>>,
}

/// Result of [`ListBox::calculate_visible`].
#[derive(Debug, Clone)]
pub struct VisibleWindow<N, P> {
    /// The focus node.
    pub focus: FocusPlacement<N, P>,
    /// Nodes above the focus, bottom to top.
    pub above: Fill<N, P>,
    /// Nodes below the focus, top to bottom.
    pub below: Fill<N, P>,
}

type Window<L> = VisibleWindow<<L as ListWalker>::Node, <L as ListWalker>::Position>;

#[derive(Debug, Clone)]
enum PendingFocus<P> {
    Idle,
    /// Move the focus to the first visible selectable node.
    FirstSelectable,
    /// The walker focus moved away from `old` without a size.
    Change {
        coming_from: Option<ComingFrom>,
        old: P,
    },
}

/// A page step candidate.
struct Candidate<N, P> {
    offset: i32,
    node: N,
    position: P,
    rows: i32,
}

fn to_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

fn node_rows<N: Node>(node: &N, width: u16, focus: bool) -> i32 {
    i32::from(node.rows(width, focus))
}

fn check_rows<P: fmt::Debug>(position: &P, expected: i32, canvas: &Canvas) -> Result<()> {
    let actual = i32::from(canvas.height());
    if actual != expected {
        arbor_core::warn!(?position, expected, actual, "node row count mismatch");
        return Err(ListBoxError::RowCountMismatch {
            position: format!("{position:?}"),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Offset after snapping a selectable target fully into view, spending at
/// most `snap` rows of extra scroll.
fn snap_offset(
    offset: i32,
    coming_from: Option<ComingFrom>,
    snap: i32,
    align_bottom: i32,
) -> i32 {
    let align_top = 0;
    match coming_from {
        Some(ComingFrom::Above) if offset > align_bottom => {
            if snap >= offset - align_bottom {
                align_bottom
            } else if snap >= offset - align_top {
                align_top
            } else {
                offset - snap
            }
        }
        Some(ComingFrom::Below) if offset < align_top => {
            if snap >= align_top - offset {
                align_top
            } else if snap >= align_bottom - offset {
                align_bottom
            } else {
                offset + snap
            }
        }
        _ => offset,
    }
}

/// Viewport over a focus-bearing sequence of [`Node`]s.
pub struct ListBox<L: FocusWalker> {
    body: L,
    offset_rows: i32,
    inset_fraction: (i32, i32),
    pref_col: PrefCol,
    pending: PendingFocus<L::Position>,
    valign_pending: Option<VAlign>,
}

impl<L: FocusWalker> ListBox<L> {
    /// Show `body`. The first layout pass moves the focus to the first
    /// visible selectable node.
    pub fn new(body: L) -> Self {
        Self {
            body,
            offset_rows: 0,
            inset_fraction: (0, 1),
            pref_col: PrefCol::Left,
            pending: PendingFocus::FirstSelectable,
            valign_pending: None,
        }
    }

    /// The walker.
    pub fn body(&self) -> &L {
        &self.body
    }

    /// The walker, mutably. Moving its focus directly bypasses the
    /// deferred placement of [`set_focus`](Self::set_focus).
    pub fn body_mut(&mut self) -> &mut L {
        &mut self.body
    }

    /// The focus node, or `None` when the list is empty.
    pub fn focus(&self) -> Option<L::Node> {
        self.body.get_focus().map(|(node, _)| node)
    }

    /// The focus position, or `None` when the list is empty.
    pub fn focus_position(&self) -> Option<L::Position> {
        self.body.get_focus().map(|(_, pos)| pos)
    }

    /// Remembered cursor column.
    pub fn pref_col(&self) -> PrefCol {
        self.pref_col
    }

    /// Positions from the focus downwards, then upwards from just above
    /// the focus.
    pub fn positions(&self) -> impl Iterator<Item = L::Position> + '_ {
        let focus = self.body.focus();
        let above = focus
            .as_ref()
            .and_then(|pos| self.body.prev_position(pos));
        Positions::new(&self.body, focus, false).chain(Positions::new(&self.body, above, true))
    }

    /// Positions from just above the focus upwards, then from the focus
    /// downwards.
    pub fn positions_rev(&self) -> impl Iterator<Item = L::Position> + '_ {
        let focus = self.body.focus();
        let above = focus
            .as_ref()
            .and_then(|pos| self.body.prev_position(pos));
        Positions::new(&self.body, above, true).chain(Positions::new(&self.body, focus, false))
    }

    fn has_pending(&self) -> bool {
        !matches!(self.pending, PendingFocus::Idle) || self.valign_pending.is_some()
    }
}

impl<L> ListBox<L>
where
    L: FocusWalker,
    L::Node: Node,
{
    /// Lay out the viewport.
    ///
    /// Resolves pending focus changes first. Returns `None` for an empty
    /// list.
    pub fn calculate_visible(&mut self, size: Size, focus: bool) -> Result<Option<Window<L>>> {
        let span = arbor_core::debug_span!(
            "listbox_calculate_visible",
            width = size.width,
            height = size.height
        );
        let _guard = span.enter();
        let width = size.width;
        let maxrow = i32::from(size.height);

        if self.has_pending() {
            self.set_focus_complete(size, focus)?;
        }

        let Some((focus_node, focus_pos)) = self.body.get_focus() else {
            return Ok(None);
        };
        let focus_rows = node_rows(&focus_node, width, true);
        let (mut offset_rows, mut inset_rows) = self.offset_inset_for(focus_rows)?;

        // At least one row of the focus stays visible.
        if maxrow > 0 && offset_rows >= maxrow {
            offset_rows = maxrow - 1;
        }

        let cursor = if maxrow > 0 && focus && focus_node.selectable() {
            focus_node.cursor_coords(width)
        } else {
            None
        };
        if let Some((_, cy)) = cursor {
            let cy = i32::from(cy);
            let effective_cy = cy + offset_rows - inset_rows;
            if effective_cy < 0 {
                inset_rows = cy;
            } else if effective_cy >= maxrow {
                offset_rows = maxrow - cy - 1;
                if offset_rows < 0 {
                    inset_rows = -offset_rows;
                    offset_rows = 0;
                }
            }
        }

        let mut trim_top = inset_rows;

        let mut above = Vec::new();
        let mut pos = focus_pos.clone();
        let mut top_pos = focus_pos.clone();
        let mut fill_lines = offset_rows;
        while fill_lines > 0 {
            let Some((prev, prev_pos)) = self.body.get_prev(&pos) else {
                offset_rows -= fill_lines;
                break;
            };
            pos = prev_pos;
            top_pos = pos.clone();
            let rows = node_rows(&prev, width, false);
            if rows > 0 {
                above.push(Placed {
                    node: prev,
                    position: pos.clone(),
                    rows,
                });
            }
            if rows > fill_lines {
                trim_top = rows - fill_lines;
                break;
            }
            fill_lines -= rows;
        }

        let mut trim_bottom = (focus_rows + offset_rows - inset_rows - maxrow).max(0);

        let mut below = Vec::new();
        let mut pos = focus_pos.clone();
        let mut fill_lines = maxrow - focus_rows - offset_rows + inset_rows;
        while fill_lines > 0 {
            let Some((next, next_pos)) = self.body.get_next(&pos) else {
                break;
            };
            pos = next_pos;
            let rows = node_rows(&next, width, false);
            if rows > 0 {
                below.push(Placed {
                    node: next,
                    position: pos.clone(),
                    rows,
                });
            }
            if rows > fill_lines {
                trim_bottom = rows - fill_lines;
                fill_lines -= rows;
                break;
            }
            fill_lines -= rows;
        }

        // Ran out below: pull content down from above.
        let mut fill_lines = fill_lines.max(0);
        if fill_lines > 0 && trim_top > 0 {
            let used = fill_lines.min(trim_top);
            trim_top -= used;
            offset_rows += used;
            fill_lines -= used;
        }
        let mut pos = top_pos;
        while fill_lines > 0 {
            let Some((prev, prev_pos)) = self.body.get_prev(&pos) else {
                break;
            };
            pos = prev_pos;
            let rows = node_rows(&prev, width, false);
            if rows == 0 {
                continue;
            }
            above.push(Placed {
                node: prev,
                position: pos.clone(),
                rows,
            });
            if rows > fill_lines {
                trim_top = rows - fill_lines;
                offset_rows += fill_lines;
                break;
            }
            fill_lines -= rows;
            offset_rows += rows;
        }

        Ok(Some(VisibleWindow {
            focus: FocusPlacement {
                offset: offset_rows - inset_rows,
                node: focus_node,
                position: focus_pos,
                rows: focus_rows,
                cursor,
            },
            above: Fill {
                trim: trim_top,
                items: above,
            },
            below: Fill {
                trim: trim_bottom,
                items: below,
            },
        }))
    }

    /// Whether any node past `pos` (above it when `upwards`) takes rows.
    fn has_rows_beyond(&self, pos: &L::Position, width: u16, upwards: bool) -> bool {
        let mut pos = pos.clone();
        loop {
            let step = if upwards {
                self.body.get_prev(&pos)
            } else {
                self.body.get_next(&pos)
            };
            let Some((node, next)) = step else {
                return false;
            };
            if node.rows(width, false) > 0 {
                return true;
            }
            pos = next;
        }
    }

    /// Render the viewport. The canvas is exactly `size` when successful.
    pub fn render(&mut self, size: Size, focus: bool) -> Result<Canvas> {
        let span = arbor_core::debug_span!(
            "listbox_render",
            width = size.width,
            height = size.height
        );
        let _guard = span.enter();
        let width = size.width;
        let maxrow = i32::from(size.height);

        let Some(window) = self.calculate_visible(size, focus)? else {
            return Ok(Canvas::new(width, size.height));
        };
        let VisibleWindow {
            focus: placed_focus,
            above,
            below,
        } = window;

        let mut parts = Vec::with_capacity(above.items.len() + below.items.len() + 1);
        let mut rows = 0;
        for placed in above.items.iter().rev() {
            let canvas = placed.node.render(width, false);
            check_rows(&placed.position, placed.rows, &canvas)?;
            rows += placed.rows;
            parts.push((canvas, false));
        }

        let focus_canvas = placed_focus.node.render(width, focus);
        check_rows(&placed_focus.position, placed_focus.rows, &focus_canvas)?;
        if focus_canvas.cursor() != placed_focus.cursor {
            arbor_core::warn!(position = ?placed_focus.position, "focus cursor mismatch");
            return Err(ListBoxError::CursorMismatch {
                position: format!("{:?}", placed_focus.position),
                expected: placed_focus.cursor,
                actual: focus_canvas.cursor(),
            });
        }
        rows += placed_focus.rows;
        parts.push((focus_canvas, true));

        for placed in &below.items {
            let canvas = placed.node.render(width, false);
            check_rows(&placed.position, placed.rows, &canvas)?;
            rows += placed.rows;
            parts.push((canvas, false));
        }

        let mut canvas = Canvas::vstack(parts);
        if above.trim > 0 {
            canvas.trim_top(to_u16(above.trim));
            rows -= above.trim;
        }
        if below.trim > 0 {
            canvas.trim_bottom(to_u16(below.trim));
            rows -= below.trim;
        }

        if rows > maxrow {
            arbor_core::warn!(rows, maxrow, "list box contents too long");
            return Err(ListBoxError::ContentTooLong { rows, maxrow });
        }
        if rows < maxrow {
            let bottom_pos = below
                .items
                .last()
                .map_or(&placed_focus.position, |p| &p.position);
            if below.trim != 0 || self.has_rows_beyond(bottom_pos, width, false) {
                arbor_core::warn!(rows, maxrow, "list box contents too short");
                return Err(ListBoxError::ContentTooShort { rows, maxrow });
            }
            canvas.pad_bottom(to_u16(maxrow - rows));
        }
        Ok(canvas)
    }

    /// Cursor in viewport coordinates, or `None` when there is no cursor
    /// or it lies outside the viewport.
    pub fn get_cursor_coords(&mut self, size: Size) -> Result<Option<(u16, u16)>> {
        let Some(window) = self.calculate_visible(size, true)? else {
            return Ok(None);
        };
        let Some((x, y)) = window.focus.cursor else {
            return Ok(None);
        };
        let y = i32::from(y) + window.focus.offset;
        if y < 0 || y >= i32::from(size.height) {
            return Ok(None);
        }
        Ok(Some((x, to_u16(y))))
    }

    /// Align the focus node at the next layout pass.
    pub fn set_focus_valign(&mut self, valign: VAlign) -> Result<()> {
        self.valign_pending = Some(valign.validate()?);
        Ok(())
    }

    /// Move the focus to `position` and place it at the next layout pass.
    ///
    /// A target already on screen keeps its row. Otherwise it goes to the
    /// top when `coming_from` is [`ComingFrom::Below`], to the bottom for
    /// [`ComingFrom::Above`], and to the middle without a direction.
    pub fn set_focus(
        &mut self,
        position: L::Position,
        coming_from: Option<ComingFrom>,
    ) -> Result<()> {
        let Some(old) = self.body.focus() else {
            return Err(ListBoxError::Empty);
        };
        if self.body.get(&position).is_err() {
            return Err(ListBoxError::UnknownPosition {
                position: format!("{position:?}"),
            });
        }
        self.pending = PendingFocus::Change { coming_from, old };
        self.body.set_focus(position);
        Ok(())
    }

    /// Resolve pending focus work now that the size is known.
    ///
    /// Does nothing for a zero-height viewport; the work stays pending.
    fn set_focus_complete(&mut self, size: Size, focus: bool) -> Result<()> {
        if size.height == 0 {
            return Ok(());
        }
        if matches!(self.pending, PendingFocus::FirstSelectable) {
            return self.set_focus_first_selectable(size, focus);
        }
        if let Some(valign) = self.valign_pending {
            return self.set_focus_valign_complete(size, focus, valign);
        }
        let PendingFocus::Change { coming_from, old } =
            std::mem::replace(&mut self.pending, PendingFocus::Idle)
        else {
            return Ok(());
        };
        let Some(position) = self.body.focus() else {
            return Ok(());
        };
        if position == old {
            return Ok(());
        }
        arbor_core::trace!(?old, ?position, "resolving deferred focus change");

        // Lay out around the old focus to find where the target sits.
        self.body.set_focus(old);
        let Some(window) = self.calculate_visible(size, focus)? else {
            self.body.set_focus(position);
            return Ok(());
        };

        let mut offset = window.focus.offset;
        for placed in &window.above.items {
            offset -= placed.rows;
            if placed.position == position {
                let request = FocusRequest::new(position).offset(offset).from_below();
                return self.change_focus(size, request);
            }
        }
        let mut offset = window.focus.offset + window.focus.rows;
        for placed in &window.below.items {
            if placed.position == position {
                let request = FocusRequest::new(position).offset(offset).from_above();
                return self.change_focus(size, request);
            }
            offset += placed.rows;
        }

        self.body.set_focus(position);
        let Some((node, _)) = self.body.get_focus() else {
            return Ok(());
        };
        let maxrow = i32::from(size.height);
        let rows = node_rows(&node, size.width, focus);
        // A zero-row target still needs a row of its own.
        let offset = match coming_from {
            Some(ComingFrom::Below) => 0,
            Some(ComingFrom::Above) => maxrow - rows,
            None => (maxrow - rows).div_euclid(2),
        }
        .min(maxrow - 1);
        arbor_core::trace!(offset, "deferred focus target off screen");
        self.shift_focus(size, offset)
    }

    fn set_focus_valign_complete(&mut self, size: Size, focus: bool, valign: VAlign) -> Result<()> {
        self.valign_pending = None;
        self.pending = PendingFocus::Idle;
        let Some((node, _)) = self.body.get_focus() else {
            return Ok(());
        };
        let rows = node_rows(&node, size.width, focus);
        let top = valign.top_offset(i32::from(size.height), rows)?;
        self.shift_focus(size, top)
    }

    fn set_focus_first_selectable(&mut self, size: Size, focus: bool) -> Result<()> {
        self.valign_pending = None;
        self.pending = PendingFocus::Idle;
        let Some(window) = self.calculate_visible(size, focus)? else {
            return Ok(());
        };
        if window.focus.node.selectable() {
            return Ok(());
        }
        let mut below = window.below.items;
        if window.below.trim > 0 {
            below.pop();
        }
        let mut offset = window.focus.offset + window.focus.rows;
        for placed in below {
            if placed.node.selectable() {
                arbor_core::trace!(offset, "focusing first selectable node");
                self.body.set_focus(placed.position);
                return self.shift_focus(size, offset);
            }
            offset += placed.rows;
        }
        Ok(())
    }

    /// Move the focus node on screen without changing the focus.
    ///
    /// Non-negative values are rows above the node; negative values hide
    /// that many of its rows above the viewport.
    pub fn shift_focus(&mut self, size: Size, offset_inset: i32) -> Result<()> {
        let maxrow = i32::from(size.height);
        if offset_inset >= 0 {
            if offset_inset >= maxrow {
                return Err(ListBoxError::InvalidOffset {
                    offset: offset_inset,
                    maxrow,
                });
            }
            self.offset_rows = offset_inset;
            self.inset_fraction = (0, 1);
        } else {
            let Some((target, _)) = self.body.get_focus() else {
                return Err(ListBoxError::Empty);
            };
            let rows = node_rows(&target, size.width, true);
            if offset_inset + rows <= 0 {
                return Err(ListBoxError::InvalidInset {
                    offset: offset_inset,
                    rows,
                });
            }
            self.offset_rows = 0;
            self.inset_fraction = (-offset_inset, rows);
        }
        Ok(())
    }

    /// Remember the focus node's cursor column.
    pub fn update_pref_col_from_focus(&mut self, size: Size) {
        let Some((node, _)) = self.body.get_focus() else {
            return;
        };
        let col = node.pref_col(size.width).or_else(|| {
            node.cursor_coords(size.width)
                .map(|(x, _)| PrefCol::Col(x))
        });
        if let Some(col) = col {
            self.pref_col = col;
        }
    }

    /// Focus a position at a given row.
    ///
    /// The request is validated before anything changes. A selectable
    /// target arriving from a direction is snapped fully into view when
    /// that costs at most `snap_rows` of extra scroll. The target's cursor
    /// is then placed: in the requested column, on the requested row or
    /// scanning from the arrival edge.
    pub fn change_focus(&mut self, size: Size, request: FocusRequest<L::Position>) -> Result<()> {
        let width = size.width;
        let maxrow = i32::from(size.height);
        let FocusRequest {
            position,
            offset,
            coming_from,
            cursor,
            snap_rows,
        } = request;

        let Ok(target) = self.body.get(&position) else {
            return Err(ListBoxError::UnknownPosition {
                position: format!("{position:?}"),
            });
        };
        let tgt_rows = node_rows(&target, width, true);
        match cursor {
            Some(CursorTarget::At(_, row)) if row < 0 || row >= tgt_rows => {
                return Err(ListBoxError::InvalidCursorRow {
                    row,
                    rows: tgt_rows,
                });
            }
            Some(CursorTarget::Col(_)) if coming_from.is_none() => {
                return Err(ListBoxError::MissingDirection);
            }
            _ => {}
        }

        let offset = if target.selectable() {
            let snap = snap_rows.unwrap_or(maxrow - 1).max(0);
            snap_offset(offset, coming_from, snap, maxrow - tgt_rows)
        } else {
            offset
        };
        if offset < 0 && offset + tgt_rows <= 0 {
            return Err(ListBoxError::InvalidInset {
                offset,
                rows: tgt_rows,
            });
        }

        match cursor {
            Some(requested) => self.pref_col = requested.col(),
            None => self.update_pref_col_from_focus(size),
        }
        self.body.set_focus(position);
        if offset >= 0 {
            self.offset_rows = offset;
            self.inset_fraction = (0, 1);
        } else {
            self.offset_rows = 0;
            self.inset_fraction = (-offset, tgt_rows);
        }

        let cursor = match (cursor, coming_from) {
            (Some(cursor), _) => cursor,
            (None, Some(_)) => CursorTarget::Col(self.pref_col),
            (None, None) => return Ok(()),
        };
        let attempts: Vec<i32> = match (cursor, coming_from) {
            (CursorTarget::Col(_), Some(ComingFrom::Above)) => (0..tgt_rows).collect(),
            (CursorTarget::Col(_), _) => (0..tgt_rows).rev().collect(),
            (CursorTarget::At(_, row), Some(ComingFrom::Above)) => (0..=row).rev().collect(),
            (CursorTarget::At(_, row), Some(ComingFrom::Below)) => (row..tgt_rows).collect(),
            (CursorTarget::At(_, row), None) => vec![row],
        };
        let col = cursor.col();
        for row in attempts {
            if target.move_cursor_to_coords(width, col, to_u16(row)) {
                break;
            }
        }
        Ok(())
    }

    /// Focus offset and inset as stored, resolved against the focus
    /// node's current height.
    pub fn get_focus_offset_inset(&self, size: Size) -> Result<(i32, i32)> {
        let Some((node, _)) = self.body.get_focus() else {
            return Err(ListBoxError::Empty);
        };
        self.offset_inset_for(node_rows(&node, size.width, true))
    }

    fn offset_inset_for(&self, focus_rows: i32) -> Result<(i32, i32)> {
        if self.offset_rows != 0 {
            return Ok((self.offset_rows, 0));
        }
        let (num, den) = self.inset_fraction;
        if num < 0 || den < 0 || num >= den {
            return Err(ListBoxError::InvalidInsetFraction { num, den });
        }
        let inset = focus_rows * num / den;
        if inset != 0 && inset >= focus_rows {
            return Err(ListBoxError::InvalidInsetFraction { num, den });
        }
        Ok((0, inset))
    }

    /// Shift the focus node so its cursor is on screen.
    pub fn make_cursor_visible(&mut self, size: Size) -> Result<()> {
        let maxrow = i32::from(size.height);
        if maxrow == 0 {
            return Ok(());
        }
        let Some((node, _)) = self.body.get_focus() else {
            return Ok(());
        };
        if !node.selectable() {
            return Ok(());
        }
        let Some((_, cy)) = node.cursor_coords(size.width) else {
            return Ok(());
        };
        let cy = i32::from(cy);
        let (offset, inset) = self.offset_inset_for(node_rows(&node, size.width, true))?;
        if cy < inset {
            return self.shift_focus(size, -cy);
        }
        if offset - inset + cy >= maxrow {
            return self.shift_focus(size, maxrow - cy - 1);
        }
        Ok(())
    }

    /// Handle a key.
    ///
    /// Keys other than page up and page down go to a selectable focus node
    /// first. Returns the key when neither the node nor the list used it.
    pub fn keypress(&mut self, size: Size, key: KeyEvent) -> Result<Option<KeyEvent>> {
        let span = arbor_core::debug_span!(
            "listbox_keypress",
            width = size.width,
            height = size.height
        );
        let _guard = span.enter();

        if self.has_pending() {
            self.set_focus_complete(size, true)?;
        }
        let Some((node, _)) = self.body.get_focus() else {
            return Ok(Some(key));
        };

        let key = if Command::from_key(&key).is_some_and(Command::is_page) {
            key
        } else {
            let unused = if node.selectable() {
                node.keypress(size.width, key)
            } else {
                Some(key)
            };
            let Some(unused) = unused else {
                self.make_cursor_visible(size)?;
                return Ok(None);
            };
            unused
        };

        let outcome = match Command::from_key(&key) {
            Some(Command::Up) => self.step_up(size)?,
            Some(Command::Down) => self.step_down(size)?,
            Some(Command::PageUp) => self.page_up(size)?,
            Some(Command::PageDown) => self.page_down(size)?,
            None => return Ok(Some(key)),
        };
        Ok(match outcome {
            Navigation::Handled => None,
            Navigation::Unhandled => Some(key),
        })
    }

    /// Move the focus to the nearest selectable node above, scrolling one
    /// row when none is visible.
    pub fn step_up(&mut self, size: Size) -> Result<Navigation> {
        let width = size.width;
        let maxrow = i32::from(size.height);
        let Some(window) = self.calculate_visible(size, true)? else {
            return Ok(Navigation::Unhandled);
        };
        let focus_row_offset = window.focus.offset;
        let cursor = window.focus.cursor;
        let focus_selectable = window.focus.node.selectable();

        let mut row_offset = focus_row_offset;
        let mut pos = window.focus.position;
        // Rows of the last node looked at, if any.
        let mut candidate: Option<i32> = None;
        for placed in window.above.items {
            row_offset -= placed.rows;
            pos = placed.position;
            candidate = Some(placed.rows);
            if placed.node.selectable() {
                self.change_focus(size, FocusRequest::new(pos).offset(row_offset).from_below())?;
                return Ok(Navigation::Handled);
            }
        }

        row_offset += 1;
        while row_offset > 0 {
            let Some((node, prev_pos)) = self.body.get_prev(&pos) else {
                arbor_core::trace!("step up reached the top");
                return Ok(Navigation::Unhandled);
            };
            pos = prev_pos;
            let rows = node_rows(&node, width, true);
            candidate = Some(rows);
            row_offset -= rows;
            if rows > 0 && node.selectable() {
                self.change_focus(size, FocusRequest::new(pos).offset(row_offset).from_below())?;
                return Ok(Navigation::Handled);
            }
        }

        if !focus_selectable || focus_row_offset + 1 >= maxrow {
            // Take the top node when the focus is not selectable or has
            // scrolled out of view.
            match candidate {
                None => self.shift_focus(size, row_offset)?,
                Some(_) => {
                    arbor_core::trace!(row_offset, "step up adopting unselectable node");
                    let request = FocusRequest::new(pos).offset(row_offset).from_below();
                    self.change_focus(size, request)?;
                }
            }
            return Ok(Navigation::Handled);
        }

        if let Some((_, y)) = cursor
            && i32::from(y) + focus_row_offset + 1 >= maxrow
        {
            // The cursor would leave the viewport; pick another focus.
            let rows = match candidate {
                Some(rows) => rows,
                None => {
                    let Some((node, prev_pos)) = self.body.get_prev(&pos) else {
                        return Ok(Navigation::Handled);
                    };
                    pos = prev_pos;
                    let rows = node_rows(&node, width, true);
                    row_offset -= rows;
                    rows
                }
            };
            if -row_offset >= rows {
                row_offset = -(rows - 1);
            }
            self.change_focus(size, FocusRequest::new(pos).offset(row_offset).from_below())?;
            return Ok(Navigation::Handled);
        }

        arbor_core::trace!("step up shifting focus");
        self.shift_focus(size, focus_row_offset + 1)?;
        Ok(Navigation::Handled)
    }

    /// Move the focus to the nearest selectable node below, scrolling one
    /// row when none is visible.
    pub fn step_down(&mut self, size: Size) -> Result<Navigation> {
        let width = size.width;
        let maxrow = i32::from(size.height);
        let Some(window) = self.calculate_visible(size, true)? else {
            return Ok(Navigation::Unhandled);
        };
        let focus_row_offset = window.focus.offset;
        let focus_rows = window.focus.rows;
        let cursor = window.focus.cursor;
        let focus_selectable = window.focus.node.selectable();

        let mut row_offset = focus_row_offset + focus_rows;
        let mut rows = focus_rows;
        let mut pos = window.focus.position;
        let mut have_candidate = false;
        for placed in window.below.items {
            pos = placed.position;
            rows = placed.rows;
            have_candidate = true;
            if placed.node.selectable() {
                self.change_focus(size, FocusRequest::new(pos).offset(row_offset).from_above())?;
                return Ok(Navigation::Handled);
            }
            row_offset += rows;
        }

        row_offset -= 1;
        while row_offset < maxrow {
            let Some((node, next_pos)) = self.body.get_next(&pos) else {
                arbor_core::trace!("step down reached the bottom");
                return Ok(Navigation::Unhandled);
            };
            pos = next_pos;
            rows = node_rows(&node, width, false);
            have_candidate = true;
            if rows > 0 && node.selectable() {
                self.change_focus(size, FocusRequest::new(pos).offset(row_offset).from_above())?;
                return Ok(Navigation::Handled);
            }
            row_offset += rows;
        }

        if !focus_selectable || focus_row_offset + focus_rows - 1 <= 0 {
            // Take the bottom node when the focus is not selectable or has
            // scrolled out of view.
            if have_candidate {
                arbor_core::trace!(row_offset, "step down adopting unselectable node");
                self.change_focus(
                    size,
                    FocusRequest::new(pos).offset(row_offset - rows).from_above(),
                )?;
            } else {
                self.shift_focus(size, row_offset - rows)?;
            }
            return Ok(Navigation::Handled);
        }

        if let Some((_, y)) = cursor
            && i32::from(y) + focus_row_offset - 1 < 0
        {
            // The cursor would leave the viewport; pick another focus.
            if have_candidate {
                row_offset -= rows;
            } else {
                let Some((_, next_pos)) = self.body.get_next(&pos) else {
                    return Ok(Navigation::Handled);
                };
                pos = next_pos;
            }
            if row_offset >= maxrow {
                row_offset = maxrow - 1;
            }
            self.change_focus(size, FocusRequest::new(pos).offset(row_offset).from_above())?;
            return Ok(Navigation::Handled);
        }

        arbor_core::trace!("step down shifting focus");
        self.shift_focus(size, focus_row_offset - 1)?;
        Ok(Navigation::Handled)
    }

    /// Scroll one viewport up, focusing the topmost suitable selectable
    /// node.
    ///
    /// Candidates are the visible nodes plus the ones scrolled in within
    /// the snap slack. Those entirely inside the slack are tried first,
    /// nearest first, then the rest from the top down. A choice that ends
    /// up scrolling less than asked, or leaves the node cut off at the top,
    /// is set aside. With no selectable candidate the topmost other node
    /// takes the focus; with no other node at all the focus is shifted by
    /// a page.
    ///
    /// Handing the focus to a non-selectable node is deliberate: the next
    /// page starts from it, so repeated presses keep scrolling through
    /// long runs of unselectable content instead of stalling.
    pub fn page_up(&mut self, size: Size) -> Result<Navigation> {
        let span = arbor_core::debug_span!(
            "listbox_page_up",
            width = size.width,
            height = size.height
        );
        let _guard = span.enter();
        let width = size.width;
        let maxrow = i32::from(size.height);
        let Some(window) = self.calculate_visible(size, true)? else {
            return Ok(Navigation::Unhandled);
        };
        let VisibleWindow {
            focus: placed_focus,
            above,
            ..
        } = window;

        // Rows the focus top sits below the first visible row.
        let topmost_visible = placed_focus.offset;
        let scroll_from_row = if !placed_focus.node.selectable() {
            topmost_visible
        } else if let Some((_, y)) = placed_focus.cursor {
            -i32::from(y)
        } else if placed_focus.offset >= 0 {
            0
        } else {
            topmost_visible
        };
        let snap_rows = topmost_visible - scroll_from_row;
        let mut row_offset = scroll_from_row + maxrow;

        let focus_pos = placed_focus.position.clone();
        let mut pos = focus_pos.clone();
        let mut t = vec![Candidate {
            offset: row_offset,
            node: placed_focus.node,
            position: placed_focus.position,
            rows: placed_focus.rows,
        }];
        for placed in above.items {
            row_offset -= placed.rows;
            pos = placed.position.clone();
            t.push(Candidate {
                offset: row_offset,
                node: placed.node,
                position: placed.position,
                rows: placed.rows,
            });
        }
        let mut snap_region_start = t.len();
        while row_offset > -snap_rows {
            let Some((node, prev_pos)) = self.body.get_prev(&pos) else {
                break;
            };
            pos = prev_pos;
            let rows = node_rows(&node, width, false);
            row_offset -= rows;
            if row_offset > 0 {
                snap_region_start += 1;
            }
            t.push(Candidate {
                offset: row_offset,
                node,
                position: pos.clone(),
                rows,
            });
        }

        // Out of content above: line the topmost node up with the top.
        if let Some(last) = t.last()
            && last.offset > 0
        {
            let adjust = -last.offset;
            for c in &mut t {
                c.offset += adjust;
            }
        }

        let focus_target = t[0].offset;
        if focus_target >= maxrow {
            t.remove(0);
            snap_region_start -= 1;
        }

        self.update_pref_col_from_focus(size);

        let search_order: Vec<usize> = (snap_region_start..t.len())
            .chain((0..snap_region_start).rev())
            .collect();
        let mut bad = vec![false; t.len()];
        let mut cut_off_chosen = false;
        for &i in &search_order {
            let c = &t[i];
            if !c.node.selectable() || c.rows == 0 {
                continue;
            }
            let request = if c.rows + c.offset <= 0 {
                // Entirely inside the snap region.
                FocusRequest::new(c.position.clone())
                    .offset(-(c.rows - 1))
                    .from_below()
                    .cursor_at(self.pref_col, c.rows - 1)
                    .snap_rows(snap_rows - (-c.offset - (c.rows - 1)))
            } else {
                FocusRequest::new(c.position.clone())
                    .offset(c.offset)
                    .from_below()
                    .cursor_at(self.pref_col, (-c.offset).max(0))
                    .snap_rows(snap_rows)
            };
            self.change_focus(size, request)?;

            let Some(after) = self.calculate_visible(size, true)? else {
                return Ok(Navigation::Handled);
            };
            let actual = after.focus.offset;
            if actual > c.offset + snap_rows || actual < c.offset {
                // A fixed cursor cut the scroll short.
                bad[i] = true;
                continue;
            }
            if actual < 0 {
                bad[i] = true;
                cut_off_chosen = true;
                continue;
            }
            return Ok(Navigation::Handled);
        }
        if cut_off_chosen {
            return Ok(Navigation::Handled);
        }

        let good = search_order.iter().filter(|&&i| !bad[i]);
        for &i in good.chain(search_order.iter()) {
            let c = &t[i];
            if c.position == focus_pos || c.rows == 0 {
                continue;
            }
            let (mut offset, mut snap) = (c.offset.min(maxrow - 1), snap_rows);
            if c.rows + c.offset <= 0 {
                snap -= -c.offset - (c.rows - 1);
                offset = -(c.rows - 1);
            }
            arbor_core::trace!(offset, "page up adopting fallback node");
            self.change_focus(
                size,
                FocusRequest::new(c.position.clone())
                    .offset(offset)
                    .from_below()
                    .snap_rows(snap),
            )?;
            return Ok(Navigation::Handled);
        }

        let shift = focus_target.min(maxrow - 1);
        arbor_core::trace!(shift, "page up found no candidate; shifting focus");
        self.shift_focus(size, shift)?;

        let Some(after) = self.calculate_visible(size, true)? else {
            return Ok(Navigation::Handled);
        };
        if after.focus.offset >= shift {
            return Ok(Navigation::Handled);
        }
        // Fell short: bring in one row of whatever is above.
        let Some(last) = t.last() else {
            return Ok(Navigation::Handled);
        };
        let Some((node, prev_pos)) = self.body.get_prev(&last.position) else {
            return Ok(Navigation::Handled);
        };
        let rows = node_rows(&node, width, true);
        if rows == 0 {
            return Ok(Navigation::Handled);
        }
        arbor_core::trace!("page up fell short");
        self.change_focus(
            size,
            FocusRequest::new(prev_pos)
                .offset(-(rows - 1))
                .from_below()
                .cursor_at(self.pref_col, rows - 1)
                .snap_rows(0),
        )?;
        Ok(Navigation::Handled)
    }

    /// Scroll one viewport down, focusing the bottommost suitable
    /// selectable node. Mirrors [`page_up`](Self::page_up), including the
    /// deliberate hand-off to a non-selectable node when no selectable one
    /// is in reach.
    pub fn page_down(&mut self, size: Size) -> Result<Navigation> {
        let span = arbor_core::debug_span!(
            "listbox_page_down",
            width = size.width,
            height = size.height
        );
        let _guard = span.enter();
        let width = size.width;
        let maxrow = i32::from(size.height);
        let Some(window) = self.calculate_visible(size, true)? else {
            return Ok(Navigation::Unhandled);
        };
        let VisibleWindow {
            focus: placed_focus,
            below,
            ..
        } = window;
        let focus_rows = placed_focus.rows;

        // Rows from the focus top to the viewport bottom.
        let bottom_edge = maxrow - placed_focus.offset;
        let scroll_from_row = if !placed_focus.node.selectable() {
            bottom_edge
        } else if let Some((_, y)) = placed_focus.cursor {
            i32::from(y) + 1
        } else if bottom_edge >= focus_rows {
            focus_rows
        } else {
            bottom_edge
        };
        let snap_rows = bottom_edge - scroll_from_row;
        let mut row_offset = -scroll_from_row;

        let focus_pos = placed_focus.position.clone();
        let mut pos = focus_pos.clone();
        let mut t = vec![Candidate {
            offset: row_offset,
            node: placed_focus.node,
            position: placed_focus.position,
            rows: focus_rows,
        }];
        row_offset += focus_rows;
        for placed in below.items {
            pos = placed.position.clone();
            t.push(Candidate {
                offset: row_offset,
                node: placed.node,
                position: placed.position,
                rows: placed.rows,
            });
            row_offset += placed.rows;
        }
        let mut snap_region_start = t.len();
        while row_offset < maxrow + snap_rows {
            let Some((node, next_pos)) = self.body.get_next(&pos) else {
                break;
            };
            pos = next_pos;
            let rows = node_rows(&node, width, false);
            t.push(Candidate {
                offset: row_offset,
                node,
                position: pos.clone(),
                rows,
            });
            row_offset += rows;
            if row_offset < maxrow {
                snap_region_start += 1;
            }
        }

        // Out of content below: line the bottom node up with the bottom.
        if let Some(last) = t.last()
            && last.offset + last.rows < maxrow
        {
            let adjust = maxrow - (last.offset + last.rows);
            for c in &mut t {
                c.offset += adjust;
            }
        }

        let focus_target = t[0].offset;
        if focus_target + t[0].rows <= 0 {
            t.remove(0);
            snap_region_start -= 1;
        }

        self.update_pref_col_from_focus(size);

        let search_order: Vec<usize> = (snap_region_start..t.len())
            .chain((0..snap_region_start).rev())
            .collect();
        let mut bad = vec![false; t.len()];
        let mut cut_off_chosen = false;
        for &i in &search_order {
            let c = &t[i];
            if !c.node.selectable() || c.rows == 0 {
                continue;
            }
            if c.offset + c.rows <= 0 {
                // Entirely above the viewport; never a usable target.
                bad[i] = true;
                continue;
            }
            let request = if c.offset >= maxrow {
                // Entirely inside the snap region.
                FocusRequest::new(c.position.clone())
                    .offset(maxrow - 1)
                    .from_above()
                    .cursor_at(self.pref_col, 0)
                    .snap_rows(snap_rows + maxrow - c.offset - 1)
            } else {
                FocusRequest::new(c.position.clone())
                    .offset(c.offset)
                    .from_above()
                    .cursor_at(self.pref_col, (maxrow - c.offset - 1).min(c.rows - 1))
                    .snap_rows(snap_rows)
            };
            self.change_focus(size, request)?;

            let Some(after) = self.calculate_visible(size, true)? else {
                return Ok(Navigation::Handled);
            };
            let actual = after.focus.offset;
            if actual < c.offset - snap_rows || actual > c.offset {
                // A fixed cursor cut the scroll short.
                bad[i] = true;
                continue;
            }
            if actual + c.rows > maxrow {
                bad[i] = true;
                cut_off_chosen = true;
                continue;
            }
            return Ok(Navigation::Handled);
        }
        if cut_off_chosen {
            return Ok(Navigation::Handled);
        }

        let good = search_order.iter().filter(|&&i| !bad[i]);
        for &i in good.chain(search_order.iter()) {
            let c = &t[i];
            if c.position == focus_pos || c.rows == 0 || c.offset + c.rows <= 0 {
                continue;
            }
            let (mut offset, mut snap) = (c.offset, snap_rows);
            if c.offset >= maxrow {
                snap -= c.offset - (maxrow - 1);
                offset = maxrow - 1;
            }
            arbor_core::trace!(offset, "page down adopting fallback node");
            self.change_focus(
                size,
                FocusRequest::new(c.position.clone())
                    .offset(offset)
                    .from_above()
                    .snap_rows(snap),
            )?;
            return Ok(Navigation::Handled);
        }

        let shift = focus_target.max(1 - focus_rows).min(maxrow - 1);
        arbor_core::trace!(shift, "page down found no candidate; shifting focus");
        self.shift_focus(size, shift)?;

        let Some(after) = self.calculate_visible(size, true)? else {
            return Ok(Navigation::Handled);
        };
        if after.focus.offset <= shift {
            return Ok(Navigation::Handled);
        }
        // Fell short: bring in the first row of whatever is below.
        let Some(last) = t.last() else {
            return Ok(Navigation::Handled);
        };
        let Some((node, next_pos)) = self.body.get_next(&last.position) else {
            return Ok(Navigation::Handled);
        };
        if node_rows(&node, width, true) == 0 {
            return Ok(Navigation::Handled);
        }
        arbor_core::trace!("page down fell short");
        self.change_focus(
            size,
            FocusRequest::new(next_pos)
                .offset(maxrow - 1)
                .from_above()
                .cursor_at(self.pref_col, 0)
                .snap_rows(0),
        )?;
        Ok(Navigation::Handled)
    }

    /// Deliver a mouse event in viewport coordinates.
    ///
    /// A left press on a selectable node focuses it where it stands. The
    /// event then goes to the node under the pointer, translated to its
    /// own coordinates. Returns whether the node used it.
    pub fn mouse_event(&mut self, size: Size, event: &MouseEvent, focus: bool) -> Result<bool> {
        let span = arbor_core::debug_span!(
            "listbox_mouse_event",
            width = size.width,
            height = size.height
        );
        let _guard = span.enter();
        let Some(window) = self.calculate_visible(size, true)? else {
            return Ok(false);
        };
        let VisibleWindow {
            focus: placed_focus,
            above,
            below,
        } = window;

        let row = i32::from(event.y);
        let focus_index = above.items.len();
        let mut wrow = -above.trim;
        let bands = above
            .items
            .into_iter()
            .rev()
            .chain(iter::once(Placed {
                node: placed_focus.node,
                position: placed_focus.position,
                rows: placed_focus.rows,
            }))
            .chain(below.items);
        let mut hit = None;
        for (i, placed) in bands.enumerate() {
            if wrow + placed.rows > row {
                hit = Some((i, placed));
                break;
            }
            wrow += placed.rows;
        }
        let Some((index, placed)) = hit else {
            return Ok(false);
        };

        let focus = focus && index == focus_index;
        if event.is_press_of(MouseButton::Left) && placed.node.selectable() {
            self.change_focus(size, FocusRequest::new(placed.position.clone()).offset(wrow))?;
        }
        let local = event.at(event.x, to_u16(row - wrow));
        Ok(placed.node.mouse_event(size.width, &local, focus))
    }

    /// Which ends of the content are inside the viewport.
    pub fn ends_visible(&mut self, size: Size, focus: bool) -> Result<Edges> {
        let maxrow = i32::from(size.height);
        let Some(window) = self.calculate_visible(size, focus)? else {
            return Ok(Edges::all());
        };
        let mut edges = Edges::empty();

        if window.below.trim == 0 {
            let mut row_offset = window.focus.offset + window.focus.rows;
            let mut pos = &window.focus.position;
            for placed in &window.below.items {
                row_offset += placed.rows;
                pos = &placed.position;
            }
            if row_offset < maxrow || !self.has_rows_beyond(pos, size.width, false) {
                edges |= Edges::BOTTOM;
            }
        }

        if window.above.trim == 0 {
            let pos = window
                .above
                .items
                .last()
                .map_or(&window.focus.position, |p| &p.position);
            if !self.has_rows_beyond(pos, size.width, true) {
                edges |= Edges::TOP;
            }
        }
        Ok(edges)
    }

    /// Route an input event. Returns whether it was consumed.
    ///
    /// A resize lays the viewport out again at the new size, which also
    /// resolves any pending focus change.
    pub fn handle_event(&mut self, size: Size, event: &Event, focus: bool) -> Result<bool> {
        match event {
            Event::Key(key) => Ok(self.keypress(size, *key)?.is_none()),
            Event::Mouse(mouse) => self.mouse_event(size, mouse, focus),
            Event::Resize { width, height } => {
                self.calculate_visible(Size::new(*width, *height), focus)?;
                Ok(true)
            }
            Event::Focus(_) => Ok(false),
        }
    }
}

impl<L: FocusWalker> fmt::Debug for ListBox<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBox")
            .field("focus", &self.body.focus())
            .field("offset_rows", &self.offset_rows)
            .field("inset_fraction", &self.inset_fraction)
            .field("pref_col", &self.pref_col)
            .field("pending", &self.pending)
            .field("valign_pending", &self.valign_pending)
            .finish()
    }
}
