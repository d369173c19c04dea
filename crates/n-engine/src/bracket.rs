//! Bracket and tag balancing: `%`, `[(`, `[{`, `])`, `]}`.
//!
//! `%` looks for the first of `()[]{}<>` from the cursor to the end of the
//! line and jumps to its partner. In markup buffers, a cursor inside a tag
//! (and not on a bracket) jumps between the opening and closing tag instead.
//!
//! Nesting is tracked with a depth counter over a single scan, so deeply
//! nested or unbalanced input costs one pass and never recurses.

use std::sync::LazyLock;

use n_text::pattern::byte_to_char;
use n_text::{Region, TextQuery};
use regex::Regex;
use tracing::trace;

use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::{Ctx, SideEffect};
use crate::selection::Selection;
use crate::span::{resize_visual, resolve_b};

/// Bracket pairs `%` knows, in no particular priority.
const PAIRS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

fn is_bracket(ch: char) -> bool {
    PAIRS.iter().any(|&(open, close)| ch == open || ch == close)
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Search backward from `start` (exclusive) for an unmatched `open`.
///
/// Each `close` passed on the way raises the depth and each `open` lowers
/// it; an `open` at depth zero is the match.
pub(crate) fn find_opening(
    v: &dyn TextQuery,
    start: usize,
    (open, close): (char, char),
) -> Option<usize> {
    let mut depth = 0_usize;
    for i in (0..start.min(v.size())).rev() {
        match v.char_at(i) {
            Some(ch) if ch == close => depth += 1,
            Some(ch) if ch == open => {
                if depth == 0 {
                    trace!(from = start, found = i, %open, "matched opening bracket");
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    trace!(from = start, %open, "no opening bracket");
    None
}

/// Search forward from `start` (exclusive) for an unmatched `close`.
pub(crate) fn find_closing(
    v: &dyn TextQuery,
    start: usize,
    (open, close): (char, char),
) -> Option<usize> {
    let mut depth = 0_usize;
    for i in start + 1..v.size() {
        match v.char_at(i) {
            Some(ch) if ch == open => depth += 1,
            Some(ch) if ch == close => {
                if depth == 0 {
                    trace!(from = start, found = i, %close, "matched closing bracket");
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    trace!(from = start, %close, "no closing bracket");
    None
}

/// Partner of the first bracket between `pt` and the end of its line.
fn bracket_target(v: &dyn TextQuery, pt: usize) -> Option<usize> {
    let line_end = v.line(pt).end();
    let (pos, ch) = (pt..line_end)
        .find_map(|p| v.char_at(p).filter(|&ch| is_bracket(ch)).map(|ch| (p, ch)))?;

    PAIRS.iter().find_map(|&(open, close)| {
        if ch == open {
            find_closing(v, pos, (open, close))
        } else if ch == close {
            find_opening(v, pos, (open, close))
        } else {
            None
        }
    })
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

static TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][\w:.-]*)[^>]*?(/?)>").ok());

#[derive(Debug)]
struct Tag {
    start: usize,
    end: usize,
    name: String,
    closing: bool,
    self_closing: bool,
}

fn scan_tags(v: &dyn TextQuery) -> Vec<Tag> {
    let Some(re) = TAG.as_ref() else {
        return Vec::new();
    };
    let text = v.substr(Region::new(0, v.size()));
    re.captures_iter(&text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Tag {
                start: byte_to_char(&text, whole.start()),
                end: byte_to_char(&text, whole.end()),
                name: caps.get(2)?.as_str().to_string(),
                closing: caps.get(1).is_some_and(|m| !m.is_empty()),
                self_closing: caps.get(3).is_some_and(|m| !m.is_empty()),
            })
        })
        .collect()
}

/// Start of the tag paired with the one around `pt`.
fn tag_target(v: &dyn TextQuery, pt: usize) -> Option<usize> {
    let tags = scan_tags(v);
    let here = tags.iter().position(|t| t.start <= pt && pt < t.end)?;
    let tag = &tags[here];
    if tag.self_closing {
        return None;
    }

    let mut depth = 0_usize;
    let same = |t: &&Tag| t.name == tag.name && !t.self_closing;
    let found = if tag.closing {
        tags[..here].iter().rev().filter(same).find(|t| {
            if t.closing {
                depth += 1;
                false
            } else if depth == 0 {
                true
            } else {
                depth -= 1;
                false
            }
        })
    } else {
        tags[here + 1..].iter().filter(same).find(|t| {
            if !t.closing {
                depth += 1;
                false
            } else if depth == 0 {
                true
            } else {
                depth -= 1;
                false
            }
        })
    };
    trace!(name = %tag.name, closing = tag.closing, found = ?found.map(|t| t.start), "tag match");
    found.map(|t| t.start)
}

/// Where `%` goes from `pt`.
fn pair_target(v: &dyn TextQuery, pt: usize) -> Option<usize> {
    if v.is_markup() && !v.char_at(pt).is_some_and(is_bracket) {
        if let Some(target) = tag_target(v, pt) {
            return Some(target);
        }
    }
    bracket_target(v, pt)
}

// ---------------------------------------------------------------------------
// Motions
// ---------------------------------------------------------------------------

/// `%` without a count.
pub(crate) fn match_pair(cx: &Ctx<'_>, s: Region) -> Region {
    let v = cx.view;
    match cx.mode {
        Mode::Normal => pair_target(v, s.b).map_or(s, Region::point),
        Mode::OperatorPending => match pair_target(v, s.b) {
            Some(found) if found < s.a => Region::new(s.a + 1, found),
            Some(found) => Region::new(s.a, found + 1),
            None => s,
        },
        Mode::Visual(Char) => pair_target(v, resolve_b(s)).map_or(s, |found| resize_visual(s, found)),
        Mode::Visual(Line) => {
            // Forward, the cursor line is the last one selected and the
            // search starts at its last char.
            let from = if s.a > s.b {
                s.b
            } else {
                let line = v.line(resolve_b(s));
                if line.is_empty() { line.begin() } else { line.end() - 1 }
            };
            let Some(found) = pair_target(v, from) else {
                return s;
            };
            let target = v.full_line(found);
            if s.a > s.b {
                if target.begin() > s.a {
                    Region::new(v.line(s.a - 1).begin(), target.end())
                } else {
                    Region::new(s.a, target.begin())
                }
            } else if target.begin() < s.a {
                Region::new(v.full_line(s.a).end(), target.begin())
            } else {
                Region::new(s.a, target.end())
            }
        }
        Mode::Visual(Block) | Mode::Select => s,
    }
}

/// `[(`, `[{`, `])`, `]}`. Normal mode only; other modes blink.
pub(crate) fn unmatched(
    cx: &Ctx<'_>,
    sel: &Selection,
    pair: (char, char),
    forward: bool,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let v = cx.view;
    match cx.mode {
        Mode::Normal => sel.transform(|s| {
            let mut pt = s.b;
            for _ in 0..cx.count {
                let next = if forward {
                    find_closing(v, pt, pair)
                } else {
                    find_opening(v, pt, pair)
                };
                match next {
                    Some(next) => pt = next,
                    None => break,
                }
            }
            Region::point(pt)
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
