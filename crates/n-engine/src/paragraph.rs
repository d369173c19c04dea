//! Paragraph motions: `}` and `{`.
//!
//! Paragraphs are separated by empty lines. A run of empty lines is one
//! boundary; lines holding only whitespace are not boundaries. The phantom
//! row after a final newline never counts.

use n_text::{Region, TextQuery};

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::Ctx;
use crate::span::{last_text_row, resize_visual, resolve_b, row_of, row_start};

fn is_empty_row(v: &dyn TextQuery, row: usize) -> bool {
    v.line(row_start(v, row)).is_empty()
}

/// Start of the `count`-th empty line after the paragraph at `pt`, or the
/// last char of the buffer when the paragraphs run out.
fn next_paragraph_start(v: &dyn TextQuery, pt: usize, count: usize) -> usize {
    let size = v.size();
    if size == 0 {
        return 0;
    }
    let last = last_text_row(v);
    let mut row = row_of(v, pt);
    for _ in 0..count {
        while row <= last && is_empty_row(v, row) {
            row += 1;
        }
        while row <= last && !is_empty_row(v, row) {
            row += 1;
        }
        if row > last {
            return size - 1;
        }
    }
    row_start(v, row)
}

/// Start of the `count`-th empty line before the paragraph at `pt`, or 0.
fn prev_paragraph_start(v: &dyn TextQuery, pt: usize, count: usize) -> usize {
    let mut row = row_of(v, pt);
    for _ in 0..count {
        while row > 0 && is_empty_row(v, row) {
            row -= 1;
        }
        while row > 0 && !is_empty_row(v, row) {
            row -= 1;
        }
        if row == 0 {
            return 0;
        }
    }
    row_start(v, row)
}

/// `}`
pub(crate) fn paragraph_forward(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let size = v.size();
    let from = match cx.mode {
        Mode::Visual(_) => resolve_b(s),
        Mode::Normal | Mode::OperatorPending | Mode::Select => s.b,
    };
    let par = next_paragraph_start(v, from, cx.count);
    let at_buffer_end = par + 1 == size;

    match cx.mode {
        Mode::Normal => {
            if at_buffer_end && v.char_at(par) == Some('\n') && !v.line(par).is_empty() {
                Region::point(par - 1)
            } else {
                Region::point(par)
            }
        }
        Mode::Visual(Char) => resize_visual(s, par),
        Mode::OperatorPending => {
            if at_buffer_end {
                Region::new(s.a, size)
            } else if s.a == 0 || v.char_at(s.a - 1) == Some('\n') {
                Region::new(s.a, par)
            } else {
                // Exclusive span ending at column 0 drops the newline.
                Region::new(s.a, par.saturating_sub(1))
            }
        }
        Mode::Visual(Line) => {
            if s.a <= s.b {
                Region::new(s.a, par + 1)
            } else if par > s.a {
                Region::new(v.line(s.a - 1).begin(), par + 1)
            } else {
                Region::new(s.a, par)
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    }
}

/// `{`
pub(crate) fn paragraph_backward(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let from = match cx.mode {
        Mode::Visual(_) => resolve_b(s),
        Mode::Normal | Mode::OperatorPending | Mode::Select => s.b,
    };
    let par = prev_paragraph_start(v, from, cx.count);

    match cx.mode {
        Mode::Normal => Region::point(par),
        Mode::Visual(Char) => resize_visual(s, par),
        Mode::OperatorPending => Region::new(s.a, par),
        Mode::Visual(Line) => {
            if s.a > s.b {
                Region::new(s.a, par)
            } else if par < s.a {
                Region::new(v.full_line(s.a).end(), par)
            } else {
                Region::new(s.a, par + 1)
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use n_text::Buffer;
    use pretty_assertions::assert_eq;

    use crate::mode::{Mode, VisualKind};
    use crate::testing::{normal, one};

    const OP: Mode = Mode::OperatorPending;
    const VL: Mode = Mode::Visual(VisualKind::Line);

    // -- } ------------------------------------------------------------------

    #[test]
    fn forward_lands_on_empty_line() {
        let buf = Buffer::from_text("a\nb\n\nc\nd");
        assert_eq!(normal(&buf, "}", None, 0), 4);
        assert_eq!(normal(&buf, "}", None, 4), 7);
    }

    #[test]
    fn empty_line_runs_are_one_boundary() {
        let buf = Buffer::from_text("a\n\n\nb\n\nc");
        assert_eq!(normal(&buf, "}", None, 0), 2);
        assert_eq!(normal(&buf, "}", Some(2), 0), 6);
    }

    #[test]
    fn whitespace_lines_are_not_boundaries() {
        let buf = Buffer::from_text("a\n  \nb");
        assert_eq!(normal(&buf, "}", None, 0), 5);
    }

    #[test]
    fn forward_ignores_the_phantom_row() {
        let buf = Buffer::from_text("a\nb\n");
        assert_eq!(normal(&buf, "}", None, 0), 2);
    }

    #[test]
    fn forward_operator_from_line_start() {
        let buf = Buffer::from_text("a\nb\n\nc");
        assert_eq!(one(&buf, "}", OP, None, (0, 0)), (0, 4));
    }

    #[test]
    fn forward_operator_mid_line_drops_newline() {
        let buf = Buffer::from_text("ab\ncd\n\ne");
        assert_eq!(one(&buf, "}", OP, None, (1, 1)), (1, 5));
    }

    #[test]
    fn forward_operator_without_boundary_takes_rest() {
        let buf = Buffer::from_text("ab\ncd");
        assert_eq!(one(&buf, "}", OP, None, (0, 0)), (0, 5));
    }

    #[test]
    fn forward_visual_line_includes_empty_line() {
        let buf = Buffer::from_text("a\nb\n\nc");
        assert_eq!(one(&buf, "}", VL, None, (0, 2)), (0, 5));
    }

    // -- { ------------------------------------------------------------------

    #[test]
    fn backward_lands_on_empty_line() {
        let buf = Buffer::from_text("a\nb\n\nc\nd");
        assert_eq!(normal(&buf, "{", None, 7), 4);
        assert_eq!(normal(&buf, "{", None, 4), 0);
    }

    #[test]
    fn backward_with_count() {
        let buf = Buffer::from_text("a\n\nb\n\nc");
        assert_eq!(normal(&buf, "{", Some(2), 6), 2);
        assert_eq!(normal(&buf, "{", Some(5), 6), 0);
    }

    #[test]
    fn backward_operator_is_exclusive() {
        let buf = Buffer::from_text("a\n\nbc");
        assert_eq!(one(&buf, "{", OP, None, (4, 4)), (4, 2));
    }

    #[test]
    fn backward_visual_char_flips() {
        let buf = Buffer::from_text("a\n\nbc");
        let v = Mode::Visual(VisualKind::Char);
        assert_eq!(one(&buf, "{", v, None, (3, 5)), (4, 2));
    }
}
