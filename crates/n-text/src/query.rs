//! The buffer query interface.
//!
//! [`TextQuery`] is everything the motion engine needs to know about a
//! buffer and the view showing it. Hosts implement the handful of required
//! methods; searching, word lookup, class expansion and viewport helpers are
//! provided on top of them.
//!
//! All offsets are char offsets in `[0, size()]`. Methods that take an offset
//! clamp it rather than fail, so callers can pass `size()` freely.

use bitflags::bitflags;

use crate::pattern::{byte_to_char, char_to_byte, Pattern};
use crate::position::{Position, Region};
use crate::view::{char_col_to_display_col, display_col_to_char_col, Viewport};

bitflags! {
    /// Point classes for [`TextQuery::expand_by_class`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointClass: u8 {
        /// Start of a line with no content.
        const EMPTY_LINE = 1 << 0;
        /// First offset of any line.
        const LINE_START = 1 << 1;
        /// Offset of a line's newline (or the end of the buffer).
        const LINE_END = 1 << 2;
    }
}

/// Read-only access to a buffer and its view.
pub trait TextQuery {
    /// Number of chars in the buffer.
    fn size(&self) -> usize;

    /// The char at `pt`, or `None` at or past the end.
    fn char_at(&self, pt: usize) -> Option<char>;

    /// The text covered by `region`.
    fn substr(&self, region: Region) -> String;

    /// Row and column of `pt`. `size()` maps to the last row.
    fn rowcol(&self, pt: usize) -> Position;

    /// Offset of `(row, col)`. The row is clamped to the last row and the
    /// column to the end of that line's content.
    fn text_point(&self, row: usize, col: usize) -> usize;

    /// The line containing `pt`, without its newline.
    fn line(&self, pt: usize) -> Region;

    /// The line containing `pt`, including its newline.
    fn full_line(&self, pt: usize) -> Region;

    /// Regions hidden behind folds, in buffer order.
    fn folded_regions(&self) -> Vec<Region> {
        Vec::new()
    }

    /// True for HTML/XML buffers, where `%` also jumps between tags.
    fn is_markup(&self) -> bool {
        false
    }

    /// Display width of a tab stop.
    fn tab_size(&self) -> usize {
        8
    }

    /// The current viewport geometry.
    fn viewport(&self) -> Viewport;

    // -- Provided ----------------------------------------------------------

    /// Row of `size()`, which is one past the final newline when the buffer
    /// ends with one.
    fn last_row(&self) -> usize {
        self.rowcol(self.size()).line
    }

    /// Rows touched by the viewport, as an offset region from the start of
    /// the first row to the end of the last row's full line.
    fn visible_region(&self) -> Region {
        let vp = self.viewport();
        let last = self.last_row();
        let top = vp.first_row().min(last);
        let bottom = vp.last_row().clamp(top, last);
        let a = self.text_point(top, 0);
        let b = self.full_line(self.text_point(bottom, 0)).end();
        Region::new(a, b)
    }

    /// Display column of `pt` within its line, with tabs expanded.
    fn display_col(&self, pt: usize) -> usize {
        let line = self.line(pt);
        let text = self.substr(Region::new(line.begin(), pt.min(line.end())));
        char_col_to_display_col(text.chars(), usize::MAX, self.tab_size())
    }

    /// Offset on the line starting at `line_start` whose display column is
    /// `display_col`, capped at the line's newline.
    fn display_col_to_point(&self, line_start: usize, display_col: usize) -> usize {
        let line = self.line(line_start);
        let text = self.substr(line);
        line.begin() + display_col_to_char_col(text.chars(), display_col, self.tab_size())
    }

    /// First match of `pattern` that starts at or after `start` and ends at or
    /// before `end`.
    fn find(&self, pattern: &Pattern, start: usize, end: usize) -> Option<Region> {
        let size = self.size();
        if start > size {
            return None;
        }
        let text = self.substr(Region::new(0, size));
        let start_byte = char_to_byte(&text, start);
        let end_byte = char_to_byte(&text, end.min(size));
        let m = pattern.regex().find_at(&text, start_byte)?;
        if m.end() > end_byte {
            return None;
        }
        Some(Region::new(
            byte_to_char(&text, m.start()),
            byte_to_char(&text, m.end()),
        ))
    }

    /// Last match of `pattern` that starts in `[start, end)`.
    fn reverse_find(&self, pattern: &Pattern, start: usize, end: usize) -> Option<Region> {
        let size = self.size();
        let text = self.substr(Region::new(0, size));
        let start_byte = char_to_byte(&text, start.min(size));
        let end_byte = char_to_byte(&text, end.min(size));

        let mut last = None;
        let mut pos = start_byte;
        while pos <= text.len() {
            let Some(m) = pattern.regex().find_at(&text, pos) else {
                break;
            };
            if m.start() >= end_byte {
                break;
            }
            last = Some((m.start(), m.end()));
            pos = if m.end() > m.start() {
                m.end()
            } else {
                // Step over one char so empty matches make progress.
                text[m.start()..]
                    .chars()
                    .next()
                    .map_or(text.len() + 1, |ch| m.start() + ch.len_utf8())
            };
        }

        last.map(|(a, b)| Region::new(byte_to_char(&text, a), byte_to_char(&text, b)))
    }

    /// Every non-overlapping match of `pattern`, in buffer order.
    fn find_all(&self, pattern: &Pattern) -> Vec<Region> {
        let text = self.substr(Region::new(0, self.size()));
        pattern
            .regex()
            .find_iter(&text)
            .map(|m| Region::new(byte_to_char(&text, m.start()), byte_to_char(&text, m.end())))
            .collect()
    }

    /// The run of word chars (alphanumeric or `_`) around `pt`.
    ///
    /// When `pt` sits just after a word, that word is returned. Anywhere else
    /// the result is the empty region at `pt`.
    fn word(&self, pt: usize) -> Region {
        let is_word = |p: usize| self.char_at(p).is_some_and(is_word_char);
        let pt = pt.min(self.size());
        if !is_word(pt) && (pt == 0 || !is_word(pt - 1)) {
            return Region::point(pt);
        }
        let mut a = pt;
        while a > 0 && is_word(a - 1) {
            a -= 1;
        }
        let mut b = pt;
        while is_word(b) {
            b += 1;
        }
        Region::new(a, b)
    }

    /// Expand `pt` outward to the nearest points of `classes` on each side:
    /// the last one strictly before `pt` (or 0) and the first one strictly
    /// after it (or `size()`).
    fn expand_by_class(&self, pt: usize, classes: PointClass) -> Region {
        let size = self.size();
        let pt = pt.min(size);
        let is_class = |p: usize| {
            let prev_newline = p == 0 || self.char_at(p - 1) == Some('\n');
            let at_newline = p == size || self.char_at(p) == Some('\n');
            (classes.contains(PointClass::EMPTY_LINE) && prev_newline && at_newline)
                || (classes.contains(PointClass::LINE_START) && prev_newline)
                || (classes.contains(PointClass::LINE_END) && at_newline)
        };

        let a = (0..pt).rev().find(|&p| is_class(p)).unwrap_or(0);
        let b = (pt + 1..=size).find(|&p| is_class(p)).unwrap_or(size);
        Region::new(a, b)
    }
}

/// Letters, digits, underscore.
#[inline]
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
