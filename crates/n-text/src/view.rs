//! Viewport geometry and display columns.
//!
//! A [`Viewport`] describes the visible window onto a buffer in pixels, the
//! way a GUI host reports it: a scroll offset, an extent, and a line height.
//! Terminal hosts use [`Viewport::rows`], where one row is one unit high.
//!
//! ```text
//!   y = position.1 ──► ┌──────────────┐  row 3 (partly hidden)
//!                      │              │  row 4
//!                      │   extent.1   │  row 5
//!                      │              │  row 6
//!                      └──────────────┘  row 7 (partly hidden)
//! ```
//!
//! Display columns expand tabs to the next tab stop and count wide chars as
//! their terminal width (via `unicode-width`).

use unicode_width::UnicodeWidthChar;

// ---------------------------------------------------------------------------
// Display columns
// ---------------------------------------------------------------------------

/// Convert a char column to a display column, expanding tabs.
///
/// Stops at the first line ending, so passing a whole line slice is fine.
pub fn char_col_to_display_col<I: Iterator<Item = char>>(
    chars: I,
    char_col: usize,
    tab_width: usize,
) -> usize {
    let tab_w = tab_width.max(1);
    let mut display_col = 0;

    for (i, ch) in chars.enumerate() {
        if i >= char_col {
            break;
        }
        match ch {
            '\n' | '\r' => break,
            '\t' => display_col = (display_col / tab_w + 1) * tab_w,
            _ => display_col += ch.width().unwrap_or(0),
        }
    }

    display_col
}

/// Number of chars to walk from the start of a line to reach `display_col`.
///
/// The walk stops at the line ending. A tab or wide char that straddles the
/// target counts as reached, so the result lands on it rather than before it.
pub fn display_col_to_char_col<I: Iterator<Item = char>>(
    chars: I,
    display_col: usize,
    tab_width: usize,
) -> usize {
    let tab_w = tab_width.max(1);
    let mut col = 0;
    let mut walked = 0;

    for ch in chars {
        if col >= display_col {
            break;
        }
        match ch {
            '\n' | '\r' => break,
            '\t' => col = (col / tab_w + 1) * tab_w,
            _ => col += ch.width().unwrap_or(0).max(1),
        }
        walked += 1;
    }

    walked
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The visible window onto a buffer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Scroll offset `(x, y)` of the top-left corner.
    pub position: (f64, f64),
    /// Visible `(width, height)`.
    pub extent: (f64, f64),
    /// Height of one text row.
    pub line_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::rows(0, 24)
    }
}

impl Viewport {
    /// A terminal-style viewport: `rows` rows starting at `top_row`, each one
    /// unit high.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn rows(top_row: usize, rows: usize) -> Self {
        Self {
            position: (0.0, top_row as f64),
            extent: (80.0, rows as f64),
            line_height: 1.0,
        }
    }

    /// Number of rows that fit in the extent, rounded down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row_capacity(&self) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        (self.extent.1 / self.line_height).floor().max(0.0) as usize
    }

    /// First row touched by the viewport, even partially.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn first_row(&self) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        (self.position.1 / self.line_height).floor().max(0.0) as usize
    }

    /// Last row touched by the viewport, even partially.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn last_row(&self) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        let bottom = self.position.1 + self.extent.1;
        let row = (bottom / self.line_height).ceil().max(1.0) as usize - 1;
        row.max(self.first_row())
    }

    /// True when `row` is fully inside the viewport.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_row_fully_visible(&self, row: usize) -> bool {
        let top = row as f64 * self.line_height;
        let bottom = top + self.line_height;
        top >= self.position.1 && bottom <= self.position.1 + self.extent.1
    }

    /// Scroll vertically by `lines` rows, never above the top.
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_by(&mut self, lines: isize) {
        let y = (lines as f64).mul_add(self.line_height, self.position.1);
        self.position.1 = y.max(0.0);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
