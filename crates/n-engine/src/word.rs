//! Word motions: `w`, `W`, `e`, `E`, `b`, `B`, `ge`, `gE`.
//!
//! # Words vs WORDs
//!
//! A **word** is a run of word characters (letters, digits, underscore) or a
//! run of other non-blank characters (punctuation). `hello.world` holds three
//! words: `hello`, `.`, `world`.
//!
//! A **WORD** is a run of non-blank characters. Only whitespace separates
//! WORDs, so `hello.world` is one WORD.
//!
//! An empty line counts as a word: `w`, `b` and `ge` stop on it.
//!
//! # Operator spans
//!
//! `w` under an operator never crosses the end of the line on its last step,
//! so `dw` on the last word of a line leaves the newline alone. When the
//! operator starts on a blank line, the span reaches back to that line's
//! start.

use n_text::{Region, TextQuery};

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::Ctx;
use crate::span::{is_blank_line, previous_non_ws, resize_visual, resolve_b, row_of};

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Character class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Letters, digits, underscore.
    Word,
    /// Non-blank, non-word characters.
    Punctuation,
    /// Space, tab and other in-line whitespace.
    Blank,
    /// Line ending, or past the end of the buffer.
    Newline,
}

impl CharClass {
    const fn is_word(self) -> bool {
        matches!(self, Self::Word | Self::Punctuation)
    }
}

/// Classify a character for `w`/`b`/`e`/`ge`.
pub(crate) fn classify(ch: char) -> CharClass {
    if ch == '\n' || ch == '\r' {
        CharClass::Newline
    } else if ch.is_whitespace() {
        CharClass::Blank
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// Classify a character for `W`/`B`/`E`/`gE`: blank vs non-blank only.
pub(crate) fn classify_big(ch: char) -> CharClass {
    if ch == '\n' || ch == '\r' {
        CharClass::Newline
    } else if ch.is_whitespace() {
        CharClass::Blank
    } else {
        CharClass::Word
    }
}

/// Class lookup over a view, treating the end of the buffer as a newline.
struct Classes<'a> {
    view: &'a dyn TextQuery,
    classify: fn(char) -> CharClass,
}

impl<'a> Classes<'a> {
    fn new(view: &'a dyn TextQuery, big: bool) -> Self {
        Self {
            view,
            classify: if big { classify_big } else { classify },
        }
    }

    fn at(&self, pt: usize) -> CharClass {
        self.view.char_at(pt).map_or(CharClass::Newline, self.classify)
    }

    /// True when `pt` is the newline of an empty line.
    fn is_empty_line(&self, pt: usize) -> bool {
        self.at(pt) == CharClass::Newline && self.view.line(pt).is_empty()
    }
}

// ---------------------------------------------------------------------------
// Scans
// ---------------------------------------------------------------------------

/// Start of the next word after `pt`, or `size()` when there is none.
///
/// 1. Skip the current word.
/// 2. Skip blanks and newlines, stopping on an empty line.
fn forward_start(c: &Classes<'_>, pt: usize) -> usize {
    let size = c.view.size();
    let mut idx = pt;
    if idx >= size {
        return size;
    }

    let start = c.at(idx);
    if start.is_word() {
        while idx < size && c.at(idx) == start {
            idx += 1;
        }
    }

    while idx < size {
        match c.at(idx) {
            CharClass::Word | CharClass::Punctuation => break,
            CharClass::Blank => idx += 1,
            CharClass::Newline => {
                idx += 1;
                if idx < size && c.at(idx) == CharClass::Newline {
                    break;
                }
            }
        }
    }
    idx
}

/// Start of the word before `pt`. An empty line stops the scan.
fn backward_start(c: &Classes<'_>, pt: usize) -> usize {
    if pt == 0 {
        return 0;
    }

    let mut idx = pt - 1;
    loop {
        match c.at(idx) {
            CharClass::Word | CharClass::Punctuation => break,
            CharClass::Newline if c.is_empty_line(idx) => return idx,
            CharClass::Newline | CharClass::Blank => {
                if idx == 0 {
                    return 0;
                }
                idx -= 1;
            }
        }
    }

    let class = c.at(idx);
    while idx > 0 && c.at(idx - 1) == class {
        idx -= 1;
    }
    idx
}

/// Last char of the current or next word after `pt`.
fn forward_end(c: &Classes<'_>, pt: usize) -> Option<usize> {
    let size = c.view.size();
    if pt + 1 >= size {
        return None;
    }

    let mut idx = pt + 1;
    while idx < size && !c.at(idx).is_word() {
        idx += 1;
    }
    if idx >= size {
        return None;
    }

    let class = c.at(idx);
    while idx + 1 < size && c.at(idx + 1) == class {
        idx += 1;
    }
    Some(idx)
}

/// Last char of the word before the one at `pt`. An empty line stops the
/// scan.
fn backward_end(c: &Classes<'_>, pt: usize) -> usize {
    if pt == 0 {
        return 0;
    }

    let mut idx = pt;
    let start = c.at(idx);
    if start.is_word() {
        while idx > 0 && c.at(idx) == start {
            idx -= 1;
        }
    }
    if idx == pt {
        idx -= 1;
    }

    loop {
        match c.at(idx) {
            CharClass::Word | CharClass::Punctuation => return idx,
            CharClass::Newline if c.is_empty_line(idx) => return idx,
            CharClass::Newline | CharClass::Blank => {
                if idx == 0 {
                    return 0;
                }
                idx -= 1;
            }
        }
    }
}

/// Operator spans starting on a blank line reach back to its start.
fn widen_blank_start(v: &dyn TextQuery, a: usize, pt: usize) -> usize {
    if is_blank_line(v, a) && row_of(v, a) != row_of(v, pt) {
        v.line(a).begin()
    } else {
        a
    }
}

// ---------------------------------------------------------------------------
// Motions
// ---------------------------------------------------------------------------

/// `w` / `W`
pub(crate) fn word_forward(cx: &Ctx<'_>, s: Region, big: bool) -> Region {
    let v = cx.view;
    let c = Classes::new(v, big);
    let size = v.size();

    match cx.mode {
        Mode::Normal => {
            let mut pt = s.b;
            for _ in 0..cx.count {
                pt = forward_start(&c, pt);
            }
            if pt == size && size > 0 {
                // No next word: settle on the last char instead.
                pt = previous_non_ws(v, size - 1, "\n").max(s.b);
            }
            Region::point(pt)
        }
        Mode::Visual(Char | Block) => {
            let mut pt = resolve_b(s);
            for _ in 0..cx.count {
                pt = forward_start(&c, pt);
            }
            if pt == size {
                pt = size.saturating_sub(1);
            }
            resize_visual(s, pt)
        }
        Mode::OperatorPending => {
            let mut pt = s.b;
            for i in 0..cx.count {
                let last = i + 1 == cx.count;
                pt = if last && pt < size && c.at(pt) == CharClass::Newline {
                    pt + 1
                } else if last {
                    forward_start(&c, pt).min(v.line(pt).end())
                } else {
                    forward_start(&c, pt)
                };
            }
            Region::new(widen_blank_start(v, s.a, pt), pt)
        }
        Mode::Visual(Line) | Mode::Select => s,
    }
}

/// `e` / `E`
pub(crate) fn word_end(cx: &Ctx<'_>, s: Region, big: bool) -> Region {
    let v = cx.view;
    let c = Classes::new(v, big);
    let from = match cx.mode {
        Mode::Visual(Char) => resolve_b(s),
        Mode::Normal | Mode::OperatorPending | Mode::Visual(Line | Block) | Mode::Select => s.b,
    };

    let mut last = None;
    let mut pt = from;
    for _ in 0..cx.count {
        match forward_end(&c, pt) {
            Some(end) => {
                last = Some(end);
                pt = end;
            }
            None => break,
        }
    }
    let Some(end) = last else {
        return s;
    };

    match cx.mode {
        Mode::Normal => Region::point(end),
        Mode::Visual(Char) => resize_visual(s, end),
        Mode::OperatorPending => Region::new(widen_blank_start(v, s.a, end), end + 1),
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `b` / `B`
pub(crate) fn word_backward(cx: &Ctx<'_>, s: Region, big: bool) -> Region {
    let c = Classes::new(cx.view, big);
    let from = match cx.mode {
        Mode::Visual(Char) => resolve_b(s),
        Mode::Normal | Mode::OperatorPending | Mode::Visual(Line | Block) | Mode::Select => s.b,
    };
    let mut pt = from;
    for _ in 0..cx.count {
        pt = backward_start(&c, pt);
    }

    match cx.mode {
        Mode::Normal => Region::point(pt),
        Mode::Visual(Char) => resize_visual(s, pt),
        Mode::OperatorPending => Region::new(s.a, pt),
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `ge` / `gE`
pub(crate) fn word_end_backward(cx: &Ctx<'_>, s: Region, big: bool) -> Region {
    let v = cx.view;
    let c = Classes::new(v, big);
    let from = match cx.mode {
        Mode::Visual(Char) => resolve_b(s),
        Mode::Normal | Mode::OperatorPending | Mode::Visual(Line | Block) | Mode::Select => s.b,
    };
    let mut pt = from;
    for _ in 0..cx.count {
        pt = backward_end(&c, pt);
    }
    if pt == from {
        return s;
    }

    match cx.mode {
        Mode::Normal => Region::point(pt),
        Mode::Visual(Char) => resize_visual(s, pt),
        Mode::OperatorPending => Region::new((s.a + 1).min(v.size()), pt),
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use n_text::Buffer;
    use pretty_assertions::assert_eq;

    use crate::mode::{Mode, VisualKind};
    use crate::testing::{normal, one, run};

    const V: Mode = Mode::Visual(VisualKind::Char);
    const OP: Mode = Mode::OperatorPending;

    // -- Classification -----------------------------------------------------

    #[test]
    fn classify_chars() {
        assert_eq!(classify('a'), CharClass::Word);
        assert_eq!(classify('_'), CharClass::Word);
        assert_eq!(classify('9'), CharClass::Word);
        assert_eq!(classify('é'), CharClass::Word);
        assert_eq!(classify('.'), CharClass::Punctuation);
        assert_eq!(classify('('), CharClass::Punctuation);
        assert_eq!(classify('\t'), CharClass::Blank);
        assert_eq!(classify('\n'), CharClass::Newline);
    }

    #[test]
    fn classify_big_merges_punct_into_word() {
        assert_eq!(classify_big('.'), CharClass::Word);
        assert_eq!(classify_big('a'), CharClass::Word);
        assert_eq!(classify_big(' '), CharClass::Blank);
        assert_eq!(classify_big('\r'), CharClass::Newline);
    }

    // -- w / W --------------------------------------------------------------

    #[test]
    fn w_simple() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(normal(&buf, "w", None, 0), 6);
        assert_eq!(normal(&buf, "w", None, 2), 6);
    }

    #[test]
    fn w_punctuation_boundary() {
        let buf = Buffer::from_text("hello.world");
        assert_eq!(normal(&buf, "w", None, 0), 5);
        assert_eq!(normal(&buf, "w", None, 5), 6);
    }

    #[test]
    fn w_with_count() {
        let buf = Buffer::from_text("one two three four");
        assert_eq!(normal(&buf, "w", Some(3), 0), 14);
    }

    #[test]
    fn w_stops_on_empty_lines() {
        let buf = Buffer::from_text("hello\n\n\nworld");
        assert_eq!(normal(&buf, "w", None, 0), 6);
        assert_eq!(normal(&buf, "w", None, 6), 7);
        assert_eq!(normal(&buf, "w", None, 7), 8);
    }

    #[test]
    fn w_skips_whitespace_only_lines() {
        let buf = Buffer::from_text("hello\n   \nworld");
        assert_eq!(normal(&buf, "w", None, 0), 10);
    }

    #[test]
    fn w_on_last_word_settles_on_last_char() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(normal(&buf, "w", None, 6), 10);
        let buf = Buffer::from_text("hello\n");
        assert_eq!(normal(&buf, "w", None, 0), 4);
    }

    #[test]
    fn w_never_moves_backward() {
        let buf = Buffer::from_text("a\n\n");
        assert_eq!(normal(&buf, "w", None, 2), 2);
    }

    #[test]
    fn big_w_treats_punct_as_word() {
        let buf = Buffer::from_text("hello.world next");
        assert_eq!(normal(&buf, "W", None, 0), 12);
    }

    #[test]
    fn w_visual_extends_onto_next_word() {
        let buf = Buffer::from_text("ab cd ef");
        assert_eq!(one(&buf, "w", V, None, (0, 1)), (0, 4));
    }

    #[test]
    fn w_visual_block_extends_every_row() {
        let buf = Buffer::from_text("ab cd ef\nab cd ef");
        let vb = Mode::Visual(VisualKind::Block);
        assert_eq!(
            run(&buf, "w", vb, None, &[(0, 1), (9, 10)]),
            vec![(0, 4), (9, 13)]
        );
    }

    #[test]
    fn w_visual_reversed_shrinks() {
        let buf = Buffer::from_text("ab cd ef");
        assert_eq!(one(&buf, "w", V, None, (7, 0)), (7, 3));
    }

    #[test]
    fn w_operator_stops_at_line_end() {
        let buf = Buffer::from_text("foo bar\nbaz");
        assert_eq!(one(&buf, "w", OP, None, (0, 0)), (0, 4));
        assert_eq!(one(&buf, "w", OP, None, (4, 4)), (4, 7));
        assert_eq!(one(&buf, "w", OP, Some(2), (0, 0)), (0, 7));
    }

    #[test]
    fn w_operator_on_empty_line_takes_the_newline() {
        let buf = Buffer::from_text("a\n\nb");
        assert_eq!(one(&buf, "w", OP, None, (2, 2)), (2, 3));
    }

    #[test]
    fn w_operator_from_blank_line_takes_whole_line() {
        let buf = Buffer::from_text("x\n   \nfoo");
        assert_eq!(one(&buf, "w", OP, Some(2), (4, 4)), (2, 9));
    }

    // -- e / E --------------------------------------------------------------

    #[test]
    fn e_goes_to_word_end() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(normal(&buf, "e", None, 0), 4);
        assert_eq!(normal(&buf, "e", None, 4), 10);
    }

    #[test]
    fn e_skips_blank_lines() {
        let buf = Buffer::from_text("hello\n\nworld");
        assert_eq!(normal(&buf, "e", None, 4), 11);
    }

    #[test]
    fn e_at_buffer_end_stays() {
        let buf = Buffer::from_text("hello");
        assert_eq!(normal(&buf, "e", None, 4), 4);
    }

    #[test]
    fn big_e_treats_punct_as_word() {
        let buf = Buffer::from_text("hello.world next");
        assert_eq!(normal(&buf, "E", None, 0), 10);
    }

    #[test]
    fn e_operator_is_inclusive() {
        let buf = Buffer::from_text("foo bar");
        assert_eq!(one(&buf, "e", OP, None, (0, 0)), (0, 3));
    }

    #[test]
    fn e_visual_extends() {
        let buf = Buffer::from_text("foo bar");
        assert_eq!(one(&buf, "e", V, None, (0, 1)), (0, 3));
    }

    // -- b / B --------------------------------------------------------------

    #[test]
    fn b_simple() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(normal(&buf, "b", None, 6), 0);
        assert_eq!(normal(&buf, "b", None, 8), 6);
        assert_eq!(normal(&buf, "b", None, 0), 0);
    }

    #[test]
    fn b_stops_on_empty_line() {
        let buf = Buffer::from_text("hello\n\nworld");
        assert_eq!(normal(&buf, "b", None, 7), 6);
        assert_eq!(normal(&buf, "b", None, 6), 0);
    }

    #[test]
    fn b_consecutive_punct_groups() {
        let buf = Buffer::from_text("a::b");
        assert_eq!(normal(&buf, "b", None, 3), 1);
        assert_eq!(normal(&buf, "b", None, 1), 0);
    }

    #[test]
    fn big_b_treats_punct_as_word() {
        let buf = Buffer::from_text("hello.world next");
        assert_eq!(normal(&buf, "B", None, 12), 0);
    }

    #[test]
    fn b_operator_is_exclusive() {
        let buf = Buffer::from_text("foo bar");
        assert_eq!(one(&buf, "b", OP, None, (6, 6)), (6, 4));
    }

    #[test]
    fn b_visual_flips_past_anchor() {
        let buf = Buffer::from_text("foo bar");
        assert_eq!(one(&buf, "b", V, None, (4, 6)), (4, 5));
        assert_eq!(one(&buf, "b", V, None, (4, 5)), (5, 0));
    }

    // -- ge / gE ------------------------------------------------------------

    #[test]
    fn ge_goes_to_previous_word_end() {
        let buf = Buffer::from_text("foo bar baz");
        assert_eq!(normal(&buf, "ge", None, 9), 6);
        assert_eq!(normal(&buf, "ge", None, 4), 2);
        assert_eq!(normal(&buf, "ge", Some(2), 9), 2);
    }

    #[test]
    fn ge_stops_on_empty_line() {
        let buf = Buffer::from_text("ab\n\ncd");
        assert_eq!(normal(&buf, "ge", None, 4), 3);
        assert_eq!(normal(&buf, "ge", None, 3), 1);
    }

    #[test]
    fn big_ge_treats_punct_as_word() {
        let buf = Buffer::from_text("a.b c.d");
        assert_eq!(normal(&buf, "gE", None, 5), 2);
        assert_eq!(normal(&buf, "ge", None, 5), 4);
    }

    #[test]
    fn ge_operator_includes_cursor_char() {
        let buf = Buffer::from_text("foo bar");
        assert_eq!(one(&buf, "ge", OP, None, (5, 5)), (6, 2));
    }

    // -- round trip ---------------------------------------------------------

    #[test]
    fn w_then_b_returns_to_word_start() {
        let buf = Buffer::from_text("hello world foo");
        let next = normal(&buf, "w", None, 2);
        assert_eq!(normal(&buf, "b", None, next), 0);
    }
}
