//! Find-in-line: `f`, `t`, `F`, `T`.
//!
//! The search never leaves the cursor's line. `t`/`T` stop one char short
//! of the target; when `skipping` is set (a `;`/`,` repeat), they first step
//! over the adjacent char so a repeat does not match the same target again.

use n_text::Region;

use crate::error::MotionError;
use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::Ctx;
use crate::selection::Selection;
use crate::span::{new_inclusive, resolve_a, resolve_b};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Apply a find-in-line motion to every region.
///
/// # Errors
///
/// [`MotionError::PreconditionFailed`] when the request carries no target
/// char.
pub(crate) fn in_line(
    cx: &Ctx<'_>,
    sel: &Selection,
    direction: Direction,
    inclusive: bool,
    name: &'static str,
) -> Result<Selection, MotionError> {
    let ch = cx.args.char.ok_or(MotionError::PreconditionFailed {
        motion: name,
        reason: "missing target character",
    })?;

    Ok(sel.transform(|s| match cx.mode {
        Mode::Visual(Line) | Mode::Select => s,
        Mode::Normal | Mode::OperatorPending | Mode::Visual(Char | Block) => match direction {
            Direction::Forward => forward(cx, s, ch, inclusive),
            Direction::Backward => backward(cx, s, ch, inclusive),
        },
    }))
}

fn forward(cx: &Ctx<'_>, s: Region, ch: char, inclusive: bool) -> Region {
    let v = cx.view;
    let mut pos = resolve_b(s);
    let eol = v.line(pos).end();
    if cx.args.skipping && !inclusive {
        pos += 1;
    }

    for _ in 0..cx.count {
        match (pos + 1..eol).find(|&p| v.char_at(p) == Some(ch)) {
            Some(found) => pos = found,
            None => return s,
        }
    }
    let target = if inclusive { pos } else { pos - 1 };

    match cx.mode {
        Mode::Normal => Region::point(target),
        Mode::OperatorPending => Region::new(s.a, target + 1),
        Mode::Visual(_) | Mode::Select => new_inclusive(resolve_a(s), target),
    }
}

fn backward(cx: &Ctx<'_>, s: Region, ch: char, inclusive: bool) -> Region {
    let v = cx.view;
    let mut pos = resolve_b(s);
    let bol = v.line(pos).begin();
    if cx.args.skipping && !inclusive {
        pos = pos.saturating_sub(1).max(bol);
    }

    for _ in 0..cx.count {
        match (bol..pos).rev().find(|&p| v.char_at(p) == Some(ch)) {
            Some(found) => pos = found,
            None => return s,
        }
    }
    let target = if inclusive { pos } else { pos + 1 };

    match cx.mode {
        Mode::Normal => Region::point(target),
        Mode::OperatorPending => Region::new(s.a, target),
        Mode::Visual(_) | Mode::Select => new_inclusive(resolve_a(s), target),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use n_text::Buffer;
    use pretty_assertions::assert_eq;

    use crate::error::MotionError;
    use crate::mode::{Mode, VisualKind};
    use crate::motion::{apply_motion, Motion, MotionArgs, MotionRequest};
    use crate::options::MotionOptions;
    use crate::session::Session;
    use crate::testing::{normal, one, sel};

    const OP: Mode = Mode::OperatorPending;

    // -- f / t --------------------------------------------------------------

    #[test]
    fn f_lands_on_char() {
        let buf = Buffer::from_text("a;b;c");
        assert_eq!(normal(&buf, "f;", None, 0), 1);
        assert_eq!(normal(&buf, "f;", Some(2), 0), 3);
    }

    #[test]
    fn t_stops_before_char() {
        let buf = Buffer::from_text("a;b;c");
        assert_eq!(normal(&buf, "t;", None, 2), 2);
        assert_eq!(normal(&buf, "tc", None, 0), 3);
    }

    #[test]
    fn f_missing_char_stays() {
        let buf = Buffer::from_text("abc\nx");
        assert_eq!(normal(&buf, "fx", None, 0), 0);
        assert_eq!(normal(&buf, "f;", Some(9), 0), 0);
    }

    #[test]
    fn t_skipping_steps_over_adjacent_target() {
        let buf = Buffer::from_text("a;b;c");
        let args = MotionArgs {
            char: Some(';'),
            skipping: true,
            ..MotionArgs::default()
        };
        let request = MotionRequest::new(Motion::TillChar, Mode::Normal).with_args(args);
        let out = apply_motion(
            &buf,
            &mut Session::new(),
            &MotionOptions::default(),
            &request,
            &sel(&[(0, 0)]),
        )
        .unwrap();
        assert_eq!(out.selection.first().b, 2);
    }

    #[test]
    fn f_operator_is_inclusive() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(one(&buf, "fd", OP, None, (1, 1)), (1, 4));
        assert_eq!(one(&buf, "td", OP, None, (1, 1)), (1, 3));
    }

    #[test]
    fn f_visual_extends() {
        let buf = Buffer::from_text("abcdef");
        let v = Mode::Visual(VisualKind::Char);
        assert_eq!(one(&buf, "fe", v, None, (0, 1)), (0, 5));
    }

    #[test]
    fn f_in_visual_line_does_nothing() {
        let buf = Buffer::from_text("abcdef");
        let vl = Mode::Visual(VisualKind::Line);
        assert_eq!(one(&buf, "fe", vl, None, (0, 6)), (0, 6));
    }

    // -- F / T --------------------------------------------------------------

    #[test]
    fn big_f_searches_backward_in_line() {
        let buf = Buffer::from_text("x\na;b;c");
        assert_eq!(normal(&buf, "F;", None, 6), 5);
        assert_eq!(normal(&buf, "F;", Some(2), 6), 3);
        assert_eq!(normal(&buf, "Fx", None, 6), 6);
    }

    #[test]
    fn big_t_stops_after_char() {
        let buf = Buffer::from_text("a;b;c");
        assert_eq!(normal(&buf, "T;", None, 4), 4);
        assert_eq!(normal(&buf, "Ta", None, 4), 1);
    }

    #[test]
    fn big_f_operator_excludes_cursor() {
        let buf = Buffer::from_text("abcdef");
        assert_eq!(one(&buf, "Fb", OP, None, (4, 4)), (4, 1));
    }

    // -- preconditions ------------------------------------------------------

    #[test]
    fn missing_char_is_a_precondition_failure() {
        let buf = Buffer::from_text("abc");
        let request = MotionRequest::new(Motion::FindChar, Mode::Normal);
        let err = apply_motion(
            &buf,
            &mut Session::new(),
            &MotionOptions::default(),
            &request,
            &sel(&[(0, 0)]),
        )
        .unwrap_err();
        assert!(matches!(err, MotionError::PreconditionFailed { motion: "f", .. }));
    }
}
