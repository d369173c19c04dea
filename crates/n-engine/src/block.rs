//! Visual-block `j`/`k`.
//!
//! A block selection is one region per row. Vertical motion does not move
//! those regions: it adds a row to the edge the block is growing toward, or
//! drops the row at the opposite edge. The growth direction is recorded in
//! [`Session::block_direction`] while the block has one region, and cleared
//! once it collapses back to one.
//!
//! Growth is all-or-nothing. If any of the `count` rows it needs is missing,
//! empty, or too short for the rectangle at its widest row, the whole motion
//! is refused.

use n_text::{Region, TextQuery};
use tracing::debug;

use crate::motion::{Ctx, SideEffect};
use crate::selection::Selection;
use crate::session::{BlockDirection, Session};
use crate::span::{row_of, row_start};

/// Grow or shrink the block one row per count in `dir`.
pub(crate) fn grow_or_shrink(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    dir: BlockDirection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    if sel.len() == 1 {
        session.block_direction = Some(dir);
    }

    if sel.iter().any(|r| r.b < r.a) {
        return sel.clone();
    }

    if session.block_direction == Some(dir) {
        grow(cx, sel, dir, effects).unwrap_or_else(|| sel.clone())
    } else {
        shrink(cx.count, session, sel, dir)
    }
}

/// Rightmost selected column over every row of the block.
fn right_column(v: &dyn TextQuery, sel: &Selection) -> usize {
    sel.iter()
        .map(|r| v.rowcol(r.b.saturating_sub(1)).col)
        .max()
        .unwrap_or(0)
}

fn grow(
    cx: &Ctx<'_>,
    sel: &Selection,
    dir: BlockDirection,
    effects: &mut Vec<SideEffect>,
) -> Option<Selection> {
    let v = cx.view;
    let width = sel.iter().map(|r| r.size()).max().unwrap_or(0);
    let mut out = sel.clone();
    let mut added = None;

    for _ in 0..cx.count {
        let edge = match dir {
            BlockDirection::Down => out.last(),
            BlockDirection::Up => out.first(),
        };
        let rect_b = right_column(v, &out);
        let row = row_of(v, edge.a);
        let next_row = match dir {
            BlockDirection::Down if row < v.last_row() => row + 1,
            BlockDirection::Up if row > 0 => row - 1,
            BlockDirection::Down | BlockDirection::Up => {
                debug!(row, "block growth refused: no row beyond the block");
                return None;
            }
        };

        let next_line = v.line(row_start(v, next_row));
        if next_line.is_empty() || next_line.size() <= rect_b {
            debug!(
                row = next_row,
                len = next_line.size(),
                rect_b,
                "block growth refused: row too short"
            );
            return None;
        }

        let start = v.text_point(next_row, v.rowcol(edge.a).col);
        let region = Region::new(start, (start + width).min(next_line.end()));
        match dir {
            BlockDirection::Down => out.push_back(region),
            BlockDirection::Up => out.push_front(region),
        }
        added = Some(region);
    }

    if let Some(region) = added {
        effects.push(SideEffect::ShowPoint(region.b));
    }
    Some(out)
}

fn shrink(count: usize, session: &mut Session, sel: &Selection, dir: BlockDirection) -> Selection {
    let mut out = sel.clone();
    for _ in 0..count {
        let removed = match dir {
            BlockDirection::Down => out.pop_front(),
            BlockDirection::Up => out.pop_back(),
        };
        if removed.is_none() {
            break;
        }
    }
    if out.len() == 1 {
        session.block_direction = None;
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
