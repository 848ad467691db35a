#![forbid(unsafe_code)]

use crate::error::ListBoxError;

/// Vertical placement of the focus node within the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    /// Focus at the top row.
    #[default]
    Top,
    /// Focus centred.
    Middle,
    /// Focus at the bottom.
    Bottom,
    /// Focus at `percent` of the free space (0 = top, 100 = bottom).
    Relative(u16),
    /// Focus `n` rows below the top.
    FixedTop(u16),
    /// Focus `n` rows above the bottom.
    FixedBottom(u16),
}

impl VAlign {
    /// Check the alignment and normalise the named variants.
    pub fn validate(self) -> Result<Self, ListBoxError> {
        match self {
            Self::Relative(percent) if percent > 100 => {
                Err(ListBoxError::InvalidAlignment { percent })
            }
            Self::Top => Ok(Self::Relative(0)),
            Self::Middle => Ok(Self::Relative(50)),
            Self::Bottom => Ok(Self::Relative(100)),
            other => Ok(other),
        }
    }

    /// Row offset of the focus top for a node of `rows` in a viewport of
    /// `maxrow`. The result is always a valid non-negative offset when
    /// `maxrow > 0`, including for a node with no rows.
    pub fn top_offset(self, maxrow: i32, rows: i32) -> Result<i32, ListBoxError> {
        let filler = maxrow - rows;
        let top = match self.validate()? {
            Self::Relative(percent) => {
                if filler <= 0 {
                    0
                } else {
                    let bottom = ((100 - i32::from(percent)) * filler + 50) / 100;
                    filler - bottom
                }
            }
            Self::FixedTop(n) => i32::from(n).min(maxrow - 1),
            Self::FixedBottom(n) => (filler - i32::from(n)).max(0),
            Self::Top | Self::Middle | Self::Bottom => 0,
        };
        Ok(top.min(maxrow - 1).max(0))
    }
}
