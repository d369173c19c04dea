//! Viewport motions: `Ctrl-D`/`Ctrl-U`, `Ctrl-F`/`Ctrl-B`, `H`, `M`, `L`.
//!
//! The engine never scrolls. It moves the selection and asks the host to
//! scroll through [`SideEffect::ScrollBy`].
//!
//! `H`/`L` only count rows that are fully on screen; a row cut off at the
//! top or bottom edge is skipped.

use n_text::{Region, TextQuery};
use tracing::debug;

use crate::mode::Mode;
use crate::motion::{Ctx, SideEffect};
use crate::selection::Selection;
use crate::span::{land, last_text_row, next_non_blank, resolve_b, row_of, row_start};

fn origin(mode: Mode, s: Region) -> usize {
    match mode {
        Mode::Visual(_) => resolve_b(s),
        Mode::Normal | Mode::OperatorPending | Mode::Select => s.b,
    }
}

fn rows_to_isize(rows: usize) -> isize {
    isize::try_from(rows).unwrap_or(isize::MAX)
}

/// Move every region `rows` rows down (or up) onto the first non-blank.
/// Blinks when the first region cannot move.
fn shift_rows(
    cx: &Ctx<'_>,
    sel: &Selection,
    rows: usize,
    forward: bool,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let v = cx.view;
    let last = last_text_row(v);
    let mut stuck = false;

    let out = sel.transform(|s| {
        let row = row_of(v, origin(cx.mode, s));
        let target_row = if forward {
            row.saturating_add(rows).min(last)
        } else {
            row.saturating_sub(rows)
        };
        if target_row == row {
            stuck = true;
            return s;
        }
        let target = next_non_blank(v, row_start(v, target_row));
        land(v, cx.mode, s, target)
    });

    if stuck && out == *sel {
        debug!(motion = %cx.motion, "already at the buffer edge");
        effects.push(SideEffect::Blink);
        return out;
    }

    let visible = v.visible_region();
    let edge_visible = if forward {
        visible.contains(v.size())
    } else {
        visible.contains(0)
    };
    if !edge_visible {
        let by = rows_to_isize(rows);
        effects.push(SideEffect::ScrollBy(if forward { by } else { -by }));
    }
    out
}

/// `Ctrl-D`, or `Ctrl-U` when `forward` is false.
///
/// A count sets the distance; without one the `scroll` option applies, and
/// when that is 0 half the window height.
pub(crate) fn half_page(
    cx: &Ctx<'_>,
    sel: &Selection,
    forward: bool,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let rows = match cx.explicit_count.filter(|&n| n > 0) {
        Some(n) => n,
        None if cx.options.scroll > 0 => cx.options.scroll,
        None => (cx.view.viewport().row_capacity() / 2).max(1),
    };
    shift_rows(cx, sel, rows, forward, effects)
}

/// Rows fully inside the viewport.
fn fully_visible_rows(v: &dyn TextQuery) -> usize {
    let vp = v.viewport();
    (vp.first_row()..=vp.last_row())
        .filter(|&row| vp.is_row_fully_visible(row))
        .count()
}

/// `Ctrl-F`, or `Ctrl-B` when `forward` is false. A page keeps two rows of
/// context; the count multiplies it.
pub(crate) fn full_page(
    cx: &Ctx<'_>,
    sel: &Selection,
    forward: bool,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let page = fully_visible_rows(cx.view).saturating_sub(2).max(1);
    shift_rows(cx, sel, page.saturating_mul(cx.count), forward, effects)
}

/// Highest and lowest fully visible text rows.
fn screen_rows(v: &dyn TextQuery) -> (usize, usize) {
    let vp = v.viewport();
    let visible = v.visible_region();

    let mut high = row_of(v, visible.begin());
    if !vp.is_row_fully_visible(high) {
        high += 1;
    }
    let mut low = row_of(v, visible.end().saturating_sub(1));
    if !vp.is_row_fully_visible(low) {
        low = low.saturating_sub(1);
    }
    let low = low.min(last_text_row(v));
    (high.min(low), low)
}

fn to_row(cx: &Ctx<'_>, sel: &Selection, row: usize) -> Selection {
    let v = cx.view;
    let target = next_non_blank(v, row_start(v, row));
    sel.transform(|s| land(v, cx.mode, s, target))
}

/// `H`: the count-th fully visible row from the top.
pub(crate) fn screen_top(cx: &Ctx<'_>, sel: &Selection) -> Selection {
    let (high, low) = screen_rows(cx.view);
    to_row(cx, sel, high.saturating_add(cx.count - 1).min(low))
}

/// `M`
pub(crate) fn screen_middle(cx: &Ctx<'_>, sel: &Selection) -> Selection {
    let (high, low) = screen_rows(cx.view);
    to_row(cx, sel, high + (low - high) / 2)
}

/// `L`: the count-th fully visible row from the bottom.
pub(crate) fn screen_bottom(cx: &Ctx<'_>, sel: &Selection) -> Selection {
    let (high, low) = screen_rows(cx.view);
    to_row(cx, sel, low.saturating_sub(cx.count - 1).max(high))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
