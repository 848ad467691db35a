#![forbid(unsafe_code)]

//! Render kernel: cells and canvases.
//!
//! A [`Canvas`](canvas::Canvas) is the rendered form of one node at a fixed
//! width. The list engine stacks node canvases vertically, trims the rows
//! that fall outside the viewport, and pads short frames.

pub mod canvas;
pub mod cell;

mod text_width {
    use unicode_segmentation::UnicodeSegmentation;
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    #[inline]
    pub fn grapheme_width(grapheme: &str) -> usize {
        if grapheme.is_ascii() {
            return grapheme.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
        }
        UnicodeWidthStr::width(grapheme)
    }

    #[inline]
    pub fn char_width(ch: char) -> usize {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }

    #[inline]
    pub fn display_width(text: &str) -> usize {
        if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
            return text.len();
        }
        text.graphemes(true).map(grapheme_width).sum()
    }
}

pub use text_width::{char_width, display_width, grapheme_width};
