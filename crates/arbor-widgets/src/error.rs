#![forbid(unsafe_code)]

//! List box errors.

use std::fmt;

/// Broad class of a [`ListBoxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed an out-of-range value; nothing changed.
    InvalidArgument,
    /// A layout invariant broke, usually because a node misreported its
    /// own rows or cursor.
    Consistency,
    /// The operation needs a focus but the list is empty.
    Empty,
}

/// Errors from list box layout and focus operations.
///
/// Positions are carried as their `Debug` rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBoxError {
    /// A non-negative offset at or past the viewport bottom.
    InvalidOffset {
        /// Requested offset.
        offset: i32,
        /// Viewport height.
        maxrow: i32,
    },
    /// A negative offset that hides the whole focus node.
    InvalidInset {
        /// Requested offset.
        offset: i32,
        /// Rows of the focus node.
        rows: i32,
    },
    /// A cursor row outside the target node.
    InvalidCursorRow {
        /// Requested row.
        row: i32,
        /// Rows of the target node.
        rows: i32,
    },
    /// A relative alignment outside `0..=100`.
    InvalidAlignment {
        /// Requested percentage.
        percent: u16,
    },
    /// A cursor column without a row needs a direction to scan from.
    MissingDirection,
    /// The walker has no node at the requested position.
    UnknownPosition {
        /// The position asked for.
        position: String,
    },
    /// A node rendered a different number of rows than it reported.
    RowCountMismatch {
        /// Position of the node.
        position: String,
        /// Rows it reported.
        expected: i32,
        /// Rows it rendered.
        actual: i32,
    },
    /// The focus node rendered a cursor other than the one it reported.
    CursorMismatch {
        /// Position of the node.
        position: String,
        /// Cursor it reported.
        expected: Option<(u16, u16)>,
        /// Cursor it rendered.
        actual: Option<(u16, u16)>,
    },
    /// Composed content is taller than the viewport.
    ContentTooLong {
        /// Composed rows.
        rows: i32,
        /// Viewport height.
        maxrow: i32,
    },
    /// Composed content is shorter than the viewport although more
    /// content is available.
    ContentTooShort {
        /// Composed rows.
        rows: i32,
        /// Viewport height.
        maxrow: i32,
    },
    /// The stored inset fraction is out of range.
    InvalidInsetFraction {
        /// Numerator.
        num: i32,
        /// Denominator.
        den: i32,
    },
    /// The list is empty.
    Empty,
}

impl ListBoxError {
    /// The class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOffset { .. }
            | Self::InvalidInset { .. }
            | Self::InvalidCursorRow { .. }
            | Self::InvalidAlignment { .. }
            | Self::MissingDirection
            | Self::UnknownPosition { .. } => ErrorKind::InvalidArgument,
            Self::RowCountMismatch { .. }
            | Self::CursorMismatch { .. }
            | Self::ContentTooLong { .. }
            | Self::ContentTooShort { .. }
            | Self::InvalidInsetFraction { .. } => ErrorKind::Consistency,
            Self::Empty => ErrorKind::Empty,
        }
    }
}

impl fmt::Display for ListBoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOffset { offset, maxrow } => {
                write!(f, "invalid offset {offset}: only {maxrow} rows in list box")
            }
            Self::InvalidInset { offset, rows } => {
                write!(f, "invalid offset {offset}: only {rows} rows in target")
            }
            Self::InvalidCursorRow { row, rows } => {
                write!(f, "cursor row {row} outside target of {rows} rows")
            }
            Self::InvalidAlignment { percent } => {
                write!(f, "relative alignment {percent} outside 0..=100")
            }
            Self::MissingDirection => {
                write!(f, "cursor column without a row needs a direction")
            }
            Self::UnknownPosition { position } => write!(f, "no node at {position}"),
            Self::RowCountMismatch {
                position,
                expected,
                actual,
            } => write!(
                f,
                "node at {position} reported {expected} rows but rendered {actual}"
            ),
            Self::CursorMismatch {
                position,
                expected,
                actual,
            } => write!(
                f,
                "focus node at {position} reported cursor {expected:?} but rendered {actual:?}"
            ),
            Self::ContentTooLong { rows, maxrow } => {
                write!(f, "list box contents too long: {rows} rows for {maxrow}")
            }
            Self::ContentTooShort { rows, maxrow } => {
                write!(f, "list box contents too short: {rows} rows for {maxrow}")
            }
            Self::InvalidInsetFraction { num, den } => {
                write!(f, "invalid inset fraction {num}/{den}")
            }
            Self::Empty => write!(f, "list box is empty"),
        }
    }
}

impl std::error::Error for ListBoxError {}
