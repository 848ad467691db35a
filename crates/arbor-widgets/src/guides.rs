#![forbid(unsafe_code)]

/// Glyph sets for the connector column drawn in front of tree lines.
///
/// A child line is prefixed, on its first row, with a connector glyph, a
/// horizontal bar and an arrow tip:
///
/// ```text
/// A
/// ├─▶A1
/// └─▶A2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreeGuides {
    /// ASCII guides: `|`, `+-`, `` `- ``, `>`.
    Ascii,
    /// Unicode box-drawing characters (default).
    #[default]
    Unicode,
    /// Bold Unicode box-drawing characters.
    Bold,
    /// Double-line Unicode characters.
    Double,
    /// Rounded Unicode characters.
    Rounded,
}

impl TreeGuides {
    /// Horizontal bar between the connector and the tip.
    #[must_use]
    pub const fn hbar(&self) -> char {
        match self {
            Self::Ascii => '-',
            Self::Unicode | Self::Rounded => '\u{2500}',
            Self::Bold => '\u{2501}',
            Self::Double => '\u{2550}',
        }
    }

    /// Vertical continuation (an ancestor or the node has later siblings).
    #[must_use]
    pub const fn vbar(&self) -> char {
        match self {
            Self::Ascii => '|',
            Self::Unicode | Self::Rounded => '\u{2502}',
            Self::Bold => '\u{2503}',
            Self::Double => '\u{2551}',
        }
    }

    /// Arrow tip right before the content.
    #[must_use]
    pub const fn tip(&self) -> char {
        match self {
            Self::Ascii => '>',
            _ => '\u{25B6}',
        }
    }

    /// Connector for a node with later siblings.
    #[must_use]
    pub const fn connector_t(&self) -> char {
        match self {
            Self::Ascii => '+',
            Self::Unicode | Self::Rounded => '\u{251C}',
            Self::Bold => '\u{2523}',
            Self::Double => '\u{2560}',
        }
    }

    /// Connector for the last sibling.
    #[must_use]
    pub const fn connector_l(&self) -> char {
        match self {
            Self::Ascii => '`',
            Self::Unicode => '\u{2514}',
            Self::Bold => '\u{2517}',
            Self::Double => '\u{255A}',
            Self::Rounded => '\u{2570}',
        }
    }
}
