#![forbid(unsafe_code)]

use std::fmt;

/// No content exists at the requested position.
///
/// Returned by every content lookup. Navigation code probing speculative
/// positions treats it the same as absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotFound;

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no node at position")
    }
}

impl std::error::Error for NotFound {}
