//! Span arithmetic shared by the motion families.
//!
//! A visual selection is inclusive: the char under the cursor is selected, so
//! a forward region `(a, b)` has its cursor on `b - 1` and a reversed region
//! `(a, b)` has its anchor char on `a - 1`. The helpers here convert between
//! caret offsets and those inclusive regions.

use n_text::{Region, TextQuery};

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};

/// Cursor offset of a region: `b - 1` for a forward selection, else `b`.
#[inline]
#[must_use]
pub(crate) const fn resolve_b(r: Region) -> usize {
    if r.a < r.b { r.b - 1 } else { r.b }
}

/// Anchor char of a region: `a - 1` for a reversed selection, else `a`.
#[inline]
#[must_use]
pub(crate) const fn resolve_a(r: Region) -> usize {
    if r.a > r.b { r.a - 1 } else { r.a }
}

/// Inclusive region from anchor char `a` to cursor char `b`.
#[inline]
#[must_use]
pub(crate) const fn new_inclusive(a: usize, b: usize) -> Region {
    if a <= b {
        Region::new(a, b + 1)
    } else {
        Region::new(a + 1, b)
    }
}

/// Move the cursor end of a visual selection to char `b`, flipping the anchor
/// across its char when the selection changes direction.
#[must_use]
pub(crate) const fn resize_visual(r: Region, b: usize) -> Region {
    if b < r.a {
        if r.b >= r.a {
            // Forward turning backward: the anchor char stays selected.
            Region::new(r.a + 1, b)
        } else {
            Region::new(r.a, b)
        }
    } else if r.b < r.a {
        Region::new(r.a.saturating_sub(1), b + 1)
    } else {
        Region::new(r.a, b + 1)
    }
}

/// First char at or after `pt` that is not a space or tab. Stops at the
/// newline, so a blank line yields its end.
pub(crate) fn next_non_blank(view: &dyn TextQuery, pt: usize) -> usize {
    let mut pt = pt;
    while matches!(view.char_at(pt), Some(' ' | '\t')) {
        pt += 1;
    }
    pt
}

/// Walk backward from `pt` while the char there is in `set`.
pub(crate) fn previous_non_ws(view: &dyn TextQuery, pt: usize, set: &str) -> usize {
    let mut pt = pt;
    while pt > 0 && view.char_at(pt).is_some_and(|ch| set.contains(ch)) {
        pt -= 1;
    }
    pt
}

/// True when `pt` starts a line.
pub(crate) fn is_bol(view: &dyn TextQuery, pt: usize) -> bool {
    view.line(pt).begin() == pt
}

/// Offset of column 0 on `row`.
pub(crate) fn row_start(view: &dyn TextQuery, row: usize) -> usize {
    view.text_point(row, 0)
}

/// Row of `pt`.
pub(crate) fn row_of(view: &dyn TextQuery, pt: usize) -> usize {
    view.rowcol(pt).line
}

/// Row of the last char, ignoring the phantom row after a final newline.
pub(crate) fn last_text_row(view: &dyn TextQuery) -> usize {
    row_of(view, view.size().saturating_sub(1))
}

/// True when the line at `pt` holds only spaces and tabs (or nothing).
pub(crate) fn is_blank_line(view: &dyn TextQuery, pt: usize) -> bool {
    view.substr(view.line(pt))
        .chars()
        .all(|ch| ch == ' ' || ch == '\t')
}

/// Linewise selection from the anchor line through the line holding
/// `target`, flipping around the anchor line when `target` crosses it.
pub(crate) fn line_span(view: &dyn TextQuery, s: Region, target: usize) -> Region {
    if s.a <= s.b {
        if target < s.a {
            Region::new(view.full_line(s.a).end(), view.line(target).begin())
        } else {
            Region::new(s.a, view.full_line(target).end())
        }
    } else if target >= s.a {
        Region::new(view.line(s.a - 1).begin(), view.full_line(target).end())
    } else {
        Region::new(s.a, view.line(target).begin())
    }
}

/// The usual landing for a jump to `target`: a caret in Normal, an exclusive
/// span in `OperatorPending`, a resized selection in the visual modes.
pub(crate) fn land(view: &dyn TextQuery, mode: Mode, s: Region, target: usize) -> Region {
    match mode {
        Mode::Normal => Region::point(target),
        Mode::Visual(Char) => resize_visual(s, target),
        Mode::OperatorPending => Region::new(s.a, target),
        Mode::Visual(Line) => line_span(view, s, target),
        Mode::Visual(Block) | Mode::Select => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
