//! Jumps: `gg`, `G`, `:{n}`, `{n}%`.
//!
//! Every jump that moves the selection records the old cursor in the jump
//! list and asks the host to show the new one.

use n_text::Region;

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::{Ctx, SideEffect};
use crate::selection::Selection;
use crate::span::{last_text_row, new_inclusive, next_non_blank, resolve_a, row_start};

fn record_jump(before: &Selection, after: &Selection, effects: &mut Vec<SideEffect>) {
    if before != after {
        effects.push(SideEffect::JumpListEntry(before.first().b));
        effects.push(SideEffect::ShowPoint(after.first().b));
    }
}

/// `gg`, or `{n}gg` to go to line `n`.
pub(crate) fn buffer_start(
    cx: &Ctx<'_>,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    if let Some(line) = cx.explicit_count {
        return go_to_line(cx, sel, line, effects);
    }

    let v = cx.view;
    let target = next_non_blank(v, 0);
    let out = sel.transform(|s| match cx.mode {
        Mode::Normal => Region::point(target),
        Mode::Visual(Char) => new_inclusive(resolve_a(s), target),
        Mode::OperatorPending => Region::new(v.full_line(s.b).end(), 0),
        Mode::Visual(Line) => {
            if s.a < s.b {
                Region::new(v.full_line(s.a).end(), 0)
            } else {
                Region::new(s.a, 0)
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    });
    record_jump(sel, &out, effects);
    out
}

/// `G`, or `{n}G` to go to line `n`.
pub(crate) fn buffer_end(
    cx: &Ctx<'_>,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    if let Some(line) = cx.explicit_count {
        return go_to_line(cx, sel, line, effects);
    }

    let v = cx.view;
    let size = v.size();
    let last = v.line(row_start(v, last_text_row(v)));
    let target = next_non_blank(v, last.begin()).min(last.end());
    let out = sel.transform(|s| match cx.mode {
        Mode::Normal => Region::point(target),
        Mode::Visual(Char) => new_inclusive(resolve_a(s), target),
        Mode::OperatorPending => Region::new(v.line(s.b).begin(), size),
        Mode::Visual(Line) => {
            if s.a > s.b {
                Region::new(v.line(s.a - 1).begin(), size)
            } else {
                Region::new(s.a, size)
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    });
    record_jump(sel, &out, effects);
    out
}

/// `:{line}`: 1-based, clamped to the buffer. Line 0 is line 1.
pub(crate) fn go_to_line(
    cx: &Ctx<'_>,
    sel: &Selection,
    line: usize,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let v = cx.view;
    let dest = row_start(v, line.max(1) - 1);
    let dest_line = v.full_line(dest);
    let out = sel.transform(|s| match cx.mode {
        Mode::Normal => Region::point(next_non_blank(v, dest)),
        Mode::Visual(Char) => new_inclusive(resolve_a(s), next_non_blank(v, dest)),
        Mode::OperatorPending => {
            let start = v.full_line(s.a);
            if start == dest_line {
                dest_line
            } else if start.begin() < dest_line.begin() {
                Region::new(start.begin(), dest_line.end())
            } else {
                Region::new(start.end(), dest_line.begin())
            }
        }
        Mode::Visual(Line) => {
            if s.a > s.b {
                let anchor = v.line(s.a - 1).begin();
                if dest >= anchor {
                    Region::new(anchor, dest_line.end())
                } else {
                    Region::new(s.a, dest_line.begin())
                }
            } else if dest < s.a {
                Region::new(v.full_line(s.a).end(), dest_line.begin())
            } else {
                Region::new(s.a, dest_line.end())
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    });
    record_jump(sel, &out, effects);
    out
}

/// `{n}%`: line at `n` percent of the buffer, rounded down.
pub(crate) fn go_to_percent(
    cx: &Ctx<'_>,
    sel: &Selection,
    percent: usize,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let row = last_text_row(cx.view) * percent.min(100) / 100;
    go_to_line(cx, sel, row + 1, effects)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
