//! Sentence motions: `)` and `(`.
//!
//! A sentence ends at `.`, `!` or `?`, optionally followed by closing `)`,
//! `]`, `"` or `'`, and then whitespace. The next non-blank char starts the
//! next sentence. Empty lines are sentence starts too, as is the first char
//! after one.

use n_text::{Region, TextQuery};

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::Ctx;
use crate::span::{resize_visual, resolve_b};

fn is_empty_line_at(v: &dyn TextQuery, p: usize) -> bool {
    v.char_at(p) == Some('\n') && (p == 0 || v.char_at(p - 1) == Some('\n'))
}

/// True when a sentence starts at `p`.
fn is_sentence_start(v: &dyn TextQuery, p: usize) -> bool {
    let Some(ch) = v.char_at(p) else {
        return false;
    };
    if ch == '\n' {
        return is_empty_line_at(v, p);
    }
    if ch.is_whitespace() {
        return false;
    }
    if p == 0 {
        return true;
    }

    let mut q = p;
    while q > 0 && v.char_at(q - 1).is_some_and(char::is_whitespace) {
        if is_empty_line_at(v, q - 1) {
            return true;
        }
        q -= 1;
    }
    if q == p {
        return false;
    }
    if q == 0 {
        return true;
    }
    while q > 0 && matches!(v.char_at(q - 1), Some(')' | ']' | '"' | '\'')) {
        q -= 1;
    }
    q > 0 && matches!(v.char_at(q - 1), Some('.' | '!' | '?'))
}

fn next_start(v: &dyn TextQuery, pt: usize) -> Option<usize> {
    (pt + 1..v.size()).find(|&p| is_sentence_start(v, p))
}

fn prev_start(v: &dyn TextQuery, pt: usize) -> Option<usize> {
    (0..pt.min(v.size())).rev().find(|&p| is_sentence_start(v, p))
}

/// Step `count` times, or `None` when the first step finds nothing.
fn repeat(
    v: &dyn TextQuery,
    from: usize,
    count: usize,
    step: fn(&dyn TextQuery, usize) -> Option<usize>,
) -> Option<usize> {
    let mut pt = step(v, from)?;
    for _ in 1..count {
        match step(v, pt) {
            Some(next) => pt = next,
            None => break,
        }
    }
    Some(pt)
}

fn origin(cx: &Ctx<'_>, s: Region) -> usize {
    match cx.mode {
        Mode::Visual(_) => resolve_b(s),
        Mode::Normal | Mode::OperatorPending | Mode::Select => s.b,
    }
}

/// `)`
pub(crate) fn sentence_forward(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let Some(next) = repeat(v, origin(cx, s), cx.count, next_start) else {
        return s;
    };
    let last_char = v.size().saturating_sub(1);
    match cx.mode {
        Mode::Normal => Region::point(next.min(last_char)),
        Mode::Visual(Char) => resize_visual(s, next.min(last_char)),
        Mode::OperatorPending => Region::new(s.a, next),
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `(`
pub(crate) fn sentence_backward(cx: &Ctx<'_>, s: Region) -> Region {
    let Some(prev) = repeat(cx.view, origin(cx, s), cx.count, prev_start) else {
        return s;
    };
    match cx.mode {
        Mode::Normal => Region::point(prev),
        Mode::Visual(Char) => resize_visual(s, prev),
        Mode::OperatorPending => Region::new(s.a, prev),
        Mode::Visual(Line | Block) | Mode::Select => s,
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
    use crate::motion::Outcome;
    use crate::session::Session;
    use crate::testing::{normal, one, run_with};

    const TEXT: &str = "One. Two! Three? Four";

    // -- ) ------------------------------------------------------------------

    #[test]
    fn forward_lands_on_next_sentence() {
        let buf = Buffer::from_text(TEXT);
        assert_eq!(normal(&buf, ")", None, 0), 5);
        assert_eq!(normal(&buf, ")", None, 5), 10);
        assert_eq!(normal(&buf, ")", Some(2), 0), 10);
    }

    #[test]
    fn closers_after_terminator() {
        let buf = Buffer::from_text("He said \"Hi.\" Then");
        assert_eq!(normal(&buf, ")", None, 0), 14);
    }

    #[test]
    fn empty_lines_are_sentence_starts() {
        let buf = Buffer::from_text("ab\n\ncd");
        assert_eq!(normal(&buf, ")", None, 0), 3);
        assert_eq!(normal(&buf, ")", None, 3), 4);
    }

    #[test]
    fn no_boundary_is_a_no_op() {
        let buf = Buffer::from_text("abc def");
        let out = run_with(&buf, &mut Session::new(), ")", Mode::Normal, None, &[(0, 0)]);
        assert_eq!(out.outcome, Outcome::NoOp);
    }

    #[test]
    fn forward_operator_is_exclusive() {
        let buf = Buffer::from_text(TEXT);
        assert_eq!(one(&buf, ")", Mode::OperatorPending, None, (0, 0)), (0, 5));
    }

    #[test]
    fn forward_visual_extends() {
        let buf = Buffer::from_text(TEXT);
        let v = Mode::Visual(VisualKind::Char);
        assert_eq!(one(&buf, ")", v, None, (0, 1)), (0, 6));
    }

    // -- ( ------------------------------------------------------------------

    #[test]
    fn backward_lands_on_sentence_start() {
        let buf = Buffer::from_text(TEXT);
        assert_eq!(normal(&buf, "(", None, 12), 10);
        assert_eq!(normal(&buf, "(", None, 10), 5);
        assert_eq!(normal(&buf, "(", Some(3), 19), 5);
    }

    #[test]
    fn backward_operator_is_exclusive() {
        let buf = Buffer::from_text(TEXT);
        assert_eq!(one(&buf, "(", Mode::OperatorPending, None, (7, 7)), (7, 5));
    }
}
