//! Character and line motions: `h`, `l`, `j`, `k`, `<CR>`, `-`.
//!
//! Horizontal motions never cross a line's newline in Normal and
//! operator-pending mode. In visual mode the anchor char stays selected, so
//! shrinking a selection past its anchor swaps which side the anchor sits on.
//!
//! Vertical motions keep a sticky display column (`xpos`, tabs expanded) and
//! step over the hidden rows of folds in Normal mode. Visual-block `j`/`k`
//! live in [`block`](crate::block), since they add and remove regions.

use n_text::{Region, TextQuery};

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::Ctx;
use crate::selection::Selection;
use crate::span::{next_non_blank, resolve_b, row_of, row_start};

// ---------------------------------------------------------------------------
// h / l
// ---------------------------------------------------------------------------

/// Column that jagged visual-block selections shrink toward on `h`.
///
/// Only regions sticking out past the shortest one move:
///
/// ```text
/// foo [bar]
/// foo [bar foo bar]
/// foo [bar foo]
/// ```
///
/// Returns 0 for rectangular or reversed blocks.
pub(crate) fn block_baseline(cx: &Ctx<'_>, sel: &Selection) -> usize {
    if cx.mode != Mode::Visual(Block) {
        return 0;
    }
    let first = sel.first();
    if first.a >= first.b {
        return 0;
    }
    let cols: Vec<usize> = sel
        .iter()
        .map(|r| cx.view.rowcol(r.b.saturating_sub(1)).col)
        .collect();
    let min = cols.iter().copied().min().unwrap_or(0);
    if cols.iter().any(|&c| c != min) { min } else { 0 }
}

/// `h`
pub(crate) fn left(cx: &Ctx<'_>, s: Region, baseline: usize) -> Region {
    let v = cx.view;
    let count = cx.count;
    match cx.mode {
        Mode::Normal => {
            let x = v.line(s.b).begin().max(s.b.saturating_sub(count));
            Region::point(x)
        }
        Mode::OperatorPending => {
            Region::new(s.a, v.line(s.b).begin().max(s.b.saturating_sub(count)))
        }
        Mode::Visual(kind @ (Char | Block)) => {
            if s.a < s.b {
                if kind == Block && v.rowcol(s.b - 1).col == baseline {
                    return s;
                }
                let line = v.line(s.b - 1);
                if v.line(s.a) == line && count >= s.size() {
                    let x = line.begin().max(s.b.saturating_sub(count + 1));
                    return Region::new(s.a + 1, x);
                }
                Region::new(s.a, (line.begin() + 1).max(s.b.saturating_sub(count)))
            } else if s.a > s.b {
                Region::new(s.a, v.line(s.b).begin().max(s.b.saturating_sub(count)))
            } else {
                s
            }
        }
        Mode::Visual(Line) | Mode::Select => s,
    }
}

/// `l`
pub(crate) fn right(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let count = cx.count;
    match cx.mode {
        Mode::Normal => {
            let line = v.line(s.b);
            if line.is_empty() {
                return s;
            }
            let x = (line.end() - 1).min(s.b + count).min(v.size());
            Region::point(x)
        }
        Mode::OperatorPending => Region::new(s.a, v.line(s.b).end().min(s.b + count)),
        Mode::Visual(Char | Block) => {
            if s.a < s.b {
                Region::new(s.a, v.full_line(s.b - 1).end().min(s.b + count))
            } else if s.a > s.b {
                if v.char_at(s.b) == Some('\n') {
                    return s;
                }
                if v.line(s.a) == v.line(s.b) && count >= s.size() {
                    let x = v.full_line(s.b).end().min(s.b + count + 1);
                    return Region::new(s.a - 1, x);
                }
                Region::new(s.a, (v.full_line(s.b).end() - 1).min(s.b + count))
            } else {
                s
            }
        }
        Mode::Visual(Line) | Mode::Select => s,
    }
}

// ---------------------------------------------------------------------------
// Folds
// ---------------------------------------------------------------------------

/// Inclusive row ranges hidden behind folds. The row a fold starts on stays
/// visible.
fn hidden_rows(v: &dyn TextQuery) -> Vec<(usize, usize)> {
    v.folded_regions()
        .into_iter()
        .filter(|f| !f.is_empty())
        .filter_map(|f| {
            let first = row_of(v, f.begin()) + 1;
            let last = row_of(v, f.end() - 1);
            (first <= last).then_some((first, last))
        })
        .collect()
}

fn step_down(v: &dyn TextQuery, row: usize, count: usize) -> usize {
    let hidden = hidden_rows(v);
    let last = v.last_row();
    let mut row = row;
    for _ in 0..count {
        if row >= last {
            break;
        }
        row += 1;
        if let Some(&(_, end)) = hidden.iter().find(|&&(a, b)| a <= row && row <= b) {
            row = (end + 1).min(last);
        }
    }
    row
}

fn step_up(v: &dyn TextQuery, row: usize, count: usize) -> usize {
    let hidden = hidden_rows(v);
    let mut row = row;
    for _ in 0..count {
        if row == 0 {
            break;
        }
        row -= 1;
        if let Some(&(start, _)) = hidden.iter().find(|&&(a, b)| a <= row && row <= b) {
            row = start - 1;
        }
    }
    row
}

/// Caret on `row` at display column `xpos`, never on the newline.
fn caret_on_row(v: &dyn TextQuery, row: usize, xpos: usize) -> Region {
    let start = row_start(v, row);
    let line = v.line(start);
    if line.is_empty() {
        return Region::point(start);
    }
    Region::point(v.display_col_to_point(start, xpos).min(line.end() - 1))
}

// ---------------------------------------------------------------------------
// j / k
// ---------------------------------------------------------------------------

/// `j`
pub(crate) fn down(cx: &Ctx<'_>, s: Region, xpos: usize) -> Region {
    let v = cx.view;
    let count = cx.count;
    let last = v.last_row();
    match cx.mode {
        Mode::Normal => caret_on_row(v, step_down(v, row_of(v, s.b), count), xpos),
        Mode::OperatorPending => {
            let target = row_start(v, (row_of(v, s.b) + count).min(last));
            Region::new(v.line(s.a).begin(), v.full_line(target).end())
        }
        Mode::Visual(Char) => {
            let target = row_start(v, (row_of(v, resolve_b(s)) + count).min(last));
            let x = v.display_col_to_point(target, xpos);
            if s.a < s.b {
                Region::new(s.a, x + 1)
            } else if x >= s.a {
                Region::new(s.a.saturating_sub(1), x + 1)
            } else {
                Region::new(s.a, x)
            }
        }
        Mode::Visual(Line) => {
            if s.a < s.b {
                let target = row_start(v, (row_of(v, s.b - 1) + count).min(last));
                Region::new(s.a, v.full_line(target).end())
            } else if s.a > s.b {
                let target_row = (row_of(v, s.b) + count).min(last);
                let target = row_start(v, target_row);
                if target_row > row_of(v, s.a - 1) {
                    Region::new(v.line(s.a - 1).begin(), v.full_line(target).end())
                } else {
                    Region::new(s.a, v.full_line(target).begin())
                }
            } else {
                s
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    }
}

/// `k`
pub(crate) fn up(cx: &Ctx<'_>, s: Region, xpos: usize) -> Region {
    let v = cx.view;
    let count = cx.count;
    match cx.mode {
        Mode::Normal => caret_on_row(v, step_up(v, row_of(v, s.b), count), xpos),
        Mode::OperatorPending => {
            let target = row_start(v, row_of(v, s.b).saturating_sub(count));
            Region::new(v.full_line(s.a).end(), v.line(target).begin())
        }
        Mode::Visual(Char) => {
            let target = row_start(v, row_of(v, resolve_b(s)).saturating_sub(count));
            let x = v.display_col_to_point(target, xpos);
            if s.b >= s.a {
                let anchor_line = v.line(s.a);
                let leaving_anchor_line =
                    anchor_line.contains(s.b.saturating_sub(1)) && !anchor_line.contains(target);
                if leaving_anchor_line || x < s.a {
                    Region::new(s.a + 1, x)
                } else {
                    Region::new(s.a, x + 1)
                }
            } else {
                Region::new(s.a, x)
            }
        }
        Mode::Visual(Line) => {
            if s.a < s.b {
                let target_row = row_of(v, s.b - 1).saturating_sub(count);
                let target = row_start(v, target_row);
                if target_row < row_of(v, s.begin()) {
                    Region::new(v.full_line(s.a).end(), v.full_line(target).begin())
                } else {
                    Region::new(s.a, v.full_line(target).end())
                }
            } else if s.a > s.b {
                let target = row_start(v, row_of(v, s.b).saturating_sub(count));
                Region::new(s.a, v.full_line(target).begin())
            } else {
                s
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    }
}

// ---------------------------------------------------------------------------
// <CR> / -
// ---------------------------------------------------------------------------

/// `<CR>` and `+`: `j`, then the first non-blank.
pub(crate) fn down_first_non_blank(cx: &Ctx<'_>, s: Region) -> Region {
    to_first_non_blank(cx, down(cx, s, 0))
}

/// `-`: `k`, then the first non-blank.
pub(crate) fn up_first_non_blank(cx: &Ctx<'_>, s: Region) -> Region {
    to_first_non_blank(cx, up(cx, s, 0))
}

fn to_first_non_blank(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    match cx.mode {
        Mode::Normal => Region::point(next_non_blank(v, s.b)),
        Mode::Visual(Char) => {
            if s.a < s.b {
                Region::new(s.a, next_non_blank(v, s.b - 1) + 1)
            } else {
                Region::new(s.a, next_non_blank(v, s.b))
            }
        }
        Mode::OperatorPending | Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use n_text::{Buffer, Region};
    use pretty_assertions::assert_eq;

    use crate::mode::{Mode, VisualKind};
    use crate::session::Session;
    use crate::testing::{normal, one, run, run_with};

    const V: Mode = Mode::Visual(VisualKind::Char);
    const VL: Mode = Mode::Visual(VisualKind::Line);
    const VB: Mode = Mode::Visual(VisualKind::Block);
    const OP: Mode = Mode::OperatorPending;

    // -- l ------------------------------------------------------------------

    #[test]
    fn l_normal_stops_before_newline() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(normal(&buf, "l", None, 0), 1);
        assert_eq!(normal(&buf, "l", Some(10), 0), 2);
    }

    #[test]
    fn l_normal_on_empty_line_stays() {
        let buf = Buffer::from_text("a\n\nb");
        assert_eq!(normal(&buf, "l", None, 2), 2);
    }

    #[test]
    fn l_operator_pending_reaches_newline() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(one(&buf, "l", OP, Some(10), (1, 1)), (1, 3));
    }

    #[test]
    fn l_visual_forward_grows() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(one(&buf, "l", V, Some(2), (1, 2)), (1, 4));
    }

    #[test]
    fn l_visual_reversed_flips_over_anchor() {
        //                          012345
        let buf = Buffer::from_text("abcdef");
        // Selecting "bcd" backward (cursor on b), 3l puts the cursor on e.
        assert_eq!(one(&buf, "l", V, Some(3), (4, 1)), (3, 5));
    }

    #[test]
    fn l_visual_reversed_shrinks() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(one(&buf, "l", V, None, (4, 1)), (4, 2));
    }

    // -- h ------------------------------------------------------------------

    #[test]
    fn h_normal_stops_at_line_start() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(normal(&buf, "h", None, 6), 5);
        assert_eq!(normal(&buf, "h", Some(9), 6), 4);
    }

    #[test]
    fn h_operator_pending() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(one(&buf, "h", OP, Some(2), (6, 6)), (6, 4));
    }

    #[test]
    fn h_visual_forward_flips_to_reversed() {
        let buf = Buffer::from_text("abcdef");
        // "c" selected; h selects "bc" with the cursor on b.
        assert_eq!(one(&buf, "h", V, None, (2, 3)), (3, 1));
    }

    #[test]
    fn h_visual_forward_shrinks() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(one(&buf, "h", V, None, (1, 4)), (1, 3));
    }

    #[test]
    fn h_visual_block_jagged_moves_only_long_rows() {
        //                          0123 4567890 12345
        let buf = Buffer::from_text("abc\nabcdef\nabcd");
        let out = run(&buf, "h", VB, None, &[(0, 3), (4, 10), (11, 15)]);
        assert_eq!(out, vec![(0, 3), (4, 9), (11, 14)]);
    }

    // -- j / k --------------------------------------------------------------

    #[test]
    fn j_normal_keeps_column() {
        let buf = Buffer::from_text("abcd\nefgh");
        assert_eq!(normal(&buf, "j", None, 2), 7);
    }

    #[test]
    fn j_normal_clamps_to_short_line() {
        let buf = Buffer::from_text("abcd\nef\nghij");
        let mut session = Session::new();
        let out = run_with(&buf, &mut session, "j", Mode::Normal, None, &[(3, 3)]);
        assert_eq!(out.selection.first(), Region::point(6));
        // The sticky column survives the short line.
        let out = run_with(&buf, &mut session, "j", Mode::Normal, None, &[(6, 6)]);
        assert_eq!(out.selection.first(), Region::point(11));
    }

    #[test]
    fn j_normal_lands_on_empty_line_start() {
        let buf = Buffer::from_text("abc\n\nxyz");
        assert_eq!(normal(&buf, "j", None, 2), 4);
    }

    #[test]
    fn j_normal_clamps_at_last_row() {
        let buf = Buffer::from_text("ab\ncd");
        assert_eq!(normal(&buf, "j", Some(10), 1), 4);
    }

    #[test]
    fn j_normal_skips_fold_interior() {
        //                          01 234 567 890 12
        let mut buf = Buffer::from_text("a{\n b\n c\n}\nz");
        // Fold hides " b\n c\n": rows 1 and 2.
        buf.set_folds(vec![Region::new(2, 9)]);
        assert_eq!(normal(&buf, "j", None, 0), 9);
    }

    #[test]
    fn k_normal_skips_fold_interior() {
        let mut buf = Buffer::from_text("a{\n b\n c\n}\nz");
        buf.set_folds(vec![Region::new(2, 9)]);
        assert_eq!(normal(&buf, "k", None, 9), 0);
    }

    #[test]
    fn j_tab_expanded_column() {
        let mut buf = Buffer::from_text("abcdefgh\n\tx");
        buf.set_tab_size(4);
        // The tab spans cols 0..4 and x sits on col 4; col 5 clamps to x.
        assert_eq!(normal(&buf, "j", None, 5), 10);
    }

    #[test]
    fn j_operator_pending_is_linewise() {
        let buf = Buffer::from_text("ab\ncd\nef");
        assert_eq!(one(&buf, "j", OP, None, (1, 1)), (0, 6));
    }

    #[test]
    fn k_operator_pending_is_linewise() {
        let buf = Buffer::from_text("ab\ncd\nef");
        assert_eq!(one(&buf, "k", OP, None, (4, 4)), (6, 0));
    }

    #[test]
    fn j_visual_forward() {
        let buf = Buffer::from_text("abcd\nefgh");
        assert_eq!(one(&buf, "j", V, None, (1, 2)), (1, 7));
    }

    #[test]
    fn k_visual_forward_flips_above_anchor() {
        let buf = Buffer::from_text("abcd\nefgh");
        assert_eq!(one(&buf, "k", V, None, (6, 7)), (7, 1));
    }

    #[test]
    fn j_visual_line_forward() {
        let buf = Buffer::from_text("ab\ncd\nef");
        assert_eq!(one(&buf, "j", VL, None, (0, 3)), (0, 6));
    }

    #[test]
    fn k_visual_line_crosses_anchor() {
        let buf = Buffer::from_text("ab\ncd\nef");
        assert_eq!(one(&buf, "k", VL, None, (3, 6)), (6, 0));
    }

    // -- <CR> / - -----------------------------------------------------------

    #[test]
    fn enter_lands_on_first_non_blank() {
        let buf = Buffer::from_text("abc\n   def");
        assert_eq!(normal(&buf, "<CR>", None, 2), 7);
    }

    #[test]
    fn minus_lands_on_first_non_blank() {
        let buf = Buffer::from_text("  abc\ndef");
        assert_eq!(normal(&buf, "-", None, 8), 2);
    }
}
