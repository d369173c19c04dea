//! Motions within a line: `$`, `0`, `^`, `_`, `g_`, `|`, `gm`.
//!
//! | Key  | Target                         | Operator span                   |
//! |------|--------------------------------|---------------------------------|
//! | `$`  | last char                      | through the newline from col 0  |
//! | `0`  | line start                     | exclusive                       |
//! | `^`  | first non-blank                | exclusive                       |
//! | `_`  | first non-blank, `count-1` down| linewise                        |
//! | `g_` | last non-blank                 | inclusive                       |
//! | `\|` | display column `count`         | exclusive                       |
//! | `gm` | middle of the line's width     | Normal only                     |

use n_text::{Region, TextQuery};

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::{Ctx, SideEffect};
use crate::selection::Selection;
use crate::span::{
    is_bol, last_text_row, new_inclusive, next_non_blank, resize_visual, resolve_a, resolve_b,
    row_of, row_start,
};

/// Start of the line `count - 1` rows below the cursor of `s`.
fn line_below(cx: &Ctx<'_>, s: Region) -> usize {
    let v = cx.view;
    let target = resolve_b(s);
    if cx.count > 1 {
        row_start(v, (row_of(v, target) + cx.count - 1).min(v.last_row()))
    } else {
        target
    }
}

/// `$`
pub(crate) fn line_end(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let eol = v.line(line_below(cx, s)).end();
    match cx.mode {
        Mode::Normal => {
            if v.line(eol).is_empty() {
                Region::point(eol)
            } else {
                Region::point(eol - 1)
            }
        }
        Mode::Visual(Char) => {
            if s.a == eol && !v.line(eol).is_empty() {
                Region::new(s.a - 1, eol + 1)
            } else {
                resize_visual(s, eol)
            }
        }
        Mode::OperatorPending => {
            if is_bol(v, s.a) {
                Region::new(s.a, (eol + 1).min(v.size()))
            } else {
                Region::new(s.a, eol)
            }
        }
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `0`
pub(crate) fn line_start(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    match cx.mode {
        Mode::Normal => Region::point(v.line(s.b).begin()),
        Mode::OperatorPending => Region::new(s.a, v.line(s.b).begin()),
        Mode::Visual(Char) => {
            if s.a < s.b {
                let line = v.line(s.b - 1);
                if s.a > line.begin() {
                    Region::new(s.a + 1, line.begin())
                } else {
                    Region::new(s.a, line.begin() + 1)
                }
            } else {
                Region::new(s.a, v.line(s.b).begin())
            }
        }
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `^`
pub(crate) fn first_non_blank(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let (a, b) = if s.is_empty() {
        (s.a, s.b)
    } else {
        (resolve_a(s), resolve_b(s))
    };
    let bol = next_non_blank(v, v.line(b).begin());
    match cx.mode {
        Mode::Normal => Region::point(bol),
        Mode::OperatorPending => Region::new(a, bol),
        Mode::Visual(Char) => new_inclusive(a, bol),
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `_`
pub(crate) fn first_non_blank_down(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let (a, b) = if s.is_empty() {
        (s.a, s.b)
    } else {
        (resolve_a(s), resolve_b(s))
    };
    let target_row = (row_of(v, b) + cx.count - 1).min(last_text_row(v));
    let bol = row_start(v, target_row);
    match cx.mode {
        Mode::Normal => Region::point(next_non_blank(v, bol)),
        Mode::OperatorPending => {
            let end = (v.line(bol).end() + 1).min(v.size());
            Region::new(v.line(b).begin(), end)
        }
        Mode::Visual(Char) => new_inclusive(a, next_non_blank(v, bol)),
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// Last char of `line` that is not a space or tab, or its start.
fn last_non_blank_in(v: &dyn TextQuery, line: Region) -> usize {
    let mut pt = line.end();
    while pt > line.begin() {
        pt -= 1;
        if !matches!(v.char_at(pt), Some(' ' | '\t')) {
            return pt;
        }
    }
    line.begin()
}

/// `g_`
pub(crate) fn last_non_blank(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let line = v.line(line_below(cx, s));
    let lnb = last_non_blank_in(v, line);
    match cx.mode {
        Mode::Normal => Region::point(lnb),
        Mode::Visual(Char) => resize_visual(s, lnb),
        Mode::OperatorPending => {
            if line.is_empty() {
                Region::new(s.a, lnb)
            } else {
                Region::new(s.a, lnb + 1)
            }
        }
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `|`: display column `count` (1-based), tabs expanded.
pub(crate) fn column(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    let line = v.line(resolve_b(s));
    let pt = if line.is_empty() {
        line.begin()
    } else {
        v.display_col_to_point(line.begin(), cx.count - 1)
            .min(line.end() - 1)
    };
    match cx.mode {
        Mode::Normal => Region::point(pt),
        Mode::Visual(Char) => resize_visual(s, pt),
        Mode::OperatorPending => Region::new(s.a, pt),
        Mode::Visual(Line | Block) | Mode::Select => s,
    }
}

/// `gm`: the char at half the line's display width. Normal mode only; other
/// modes blink.
pub(crate) fn mid_line(cx: &Ctx<'_>, sel: &Selection, effects: &mut Vec<SideEffect>) -> Selection {
    let v = cx.view;
    match cx.mode {
        Mode::Normal => sel.transform(|s| {
            let line = v.line(s.b);
            if line.is_empty() {
                return s;
            }
            let width = v.display_col(line.end());
            Region::point(v.display_col_to_point(line.begin(), width / 2).min(line.end() - 1))
        }),
        Mode::OperatorPending | Mode::Visual(_) | Mode::Select => {
            effects.push(SideEffect::Blink);
            sel.clone()
        }
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
    use crate::motion::{Outcome, SideEffect};
    use crate::session::Session;
    use crate::testing::{normal, one, run_with};

    const V: Mode = Mode::Visual(VisualKind::Char);
    const OP: Mode = Mode::OperatorPending;

    // -- $ ------------------------------------------------------------------

    #[test]
    fn dollar_normal_lands_on_last_char() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(normal(&buf, "$", None, 0), 2);
    }

    #[test]
    fn dollar_with_count_moves_down_first() {
        let buf = Buffer::from_text("abc\ndefg\nh");
        assert_eq!(normal(&buf, "$", Some(2), 0), 7);
    }

    #[test]
    fn dollar_on_empty_line_stays() {
        let buf = Buffer::from_text("a\n\nb");
        assert_eq!(normal(&buf, "$", None, 2), 2);
    }

    #[test]
    fn dollar_operator_from_line_start_takes_newline() {
        let buf = Buffer::from_text("  abc\ndef");
        assert_eq!(one(&buf, "$", OP, None, (0, 0)), (0, 6));
    }

    #[test]
    fn dollar_operator_mid_line_stops_at_newline() {
        let buf = Buffer::from_text("  abc\ndef");
        assert_eq!(one(&buf, "$", OP, None, (2, 2)), (2, 5));
    }

    #[test]
    fn dollar_operator_on_last_line_clamps() {
        let buf = Buffer::from_text("abc");
        assert_eq!(one(&buf, "$", OP, None, (0, 0)), (0, 3));
    }

    #[test]
    fn dollar_visual_includes_newline() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(one(&buf, "$", V, None, (0, 1)), (0, 4));
    }

    #[test]
    fn dollar_makes_j_stick_to_line_ends() {
        let buf = Buffer::from_text("ab\nabcdef");
        let mut session = Session::new();
        run_with(&buf, &mut session, "$", Mode::Normal, None, &[(0, 0)]);
        let out = run_with(&buf, &mut session, "j", Mode::Normal, None, &[(1, 1)]);
        assert_eq!(out.selection.first().b, 8);
    }

    // -- 0 / ^ / _ ----------------------------------------------------------

    #[test]
    fn zero_goes_to_column_zero() {
        let buf = Buffer::from_text("ab\n  cd");
        assert_eq!(normal(&buf, "0", None, 6), 3);
        assert_eq!(one(&buf, "0", OP, None, (6, 6)), (6, 3));
    }

    #[test]
    fn zero_visual_forward_flips() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(one(&buf, "0", V, None, (2, 4)), (3, 0));
    }

    #[test]
    fn hat_goes_to_first_non_blank() {
        let buf = Buffer::from_text("\t  x y");
        assert_eq!(normal(&buf, "^", None, 5), 3);
        assert_eq!(one(&buf, "^", OP, None, (5, 5)), (5, 3));
    }

    #[test]
    fn underscore_counts_lines() {
        let buf = Buffer::from_text("a\n  b\n   c\n");
        assert_eq!(normal(&buf, "_", Some(3), 0), 9);
    }

    #[test]
    fn underscore_operator_is_linewise() {
        let buf = Buffer::from_text("ab\ncd\nef");
        assert_eq!(one(&buf, "_", OP, Some(2), (1, 1)), (0, 6));
    }

    // -- g_ -----------------------------------------------------------------

    #[test]
    fn g_underscore_skips_trailing_blanks() {
        let buf = Buffer::from_text("abc  \nx");
        assert_eq!(normal(&buf, "g_", None, 0), 2);
        assert_eq!(one(&buf, "g_", OP, None, (0, 0)), (0, 3));
    }

    // -- | ------------------------------------------------------------------

    #[test]
    fn pipe_goes_to_column() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(normal(&buf, "|", Some(4), 0), 3);
        assert_eq!(normal(&buf, "|", None, 4), 0);
        assert_eq!(normal(&buf, "|", Some(40), 0), 5);
    }

    #[test]
    fn pipe_counts_display_columns() {
        let mut buf = Buffer::from_text("\tabc");
        buf.set_tab_size(4);
        assert_eq!(normal(&buf, "|", Some(6), 0), 2);
    }

    #[test]
    fn pipe_operator_is_exclusive() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(one(&buf, "|", OP, Some(2), (4, 4)), (4, 1));
    }

    // -- gm -----------------------------------------------------------------

    #[test]
    fn gm_goes_to_middle() {
        let buf = Buffer::from_text("abcdefgh");
        assert_eq!(normal(&buf, "gm", None, 0), 4);
    }

    #[test]
    fn gm_blinks_outside_normal_mode() {
        let buf = Buffer::from_text("abcdefgh");
        let out = run_with(&buf, &mut Session::new(), "gm", V, None, &[(0, 1)]);
        assert_eq!(out.outcome, Outcome::NoOp);
        assert_eq!(out.effects, vec![SideEffect::Blink]);
    }
}
