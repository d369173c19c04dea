//! Text objects: selection by structure rather than by cursor motion.
//!
//! ```text
//! operator + text-object = action
//! d        + iw          = delete inner word
//! c        + i"          = change inside quotes
//! y        + a(          = yank around parentheses
//! ```
//!
//! | Inner    | Around   | Object                          |
//! |----------|----------|---------------------------------|
//! | `iw`     | `aw`     | word (letters, digits, `_`)     |
//! | `iW`     | `aW`     | WORD (non-blank characters)     |
//! | `i"`     | `a"`     | double-quoted string            |
//! | `i'`     | `a'`     | single-quoted string            |
//! | `` i` `` | `` a` `` | backtick-quoted string          |
//! | `i(`     | `a(`     | parenthesized block (`ib`)      |
//! | `i[`     | `a[`     | square-bracketed block          |
//! | `i{`     | `a{`     | curly-braced block (`iB`)       |
//! | `i<`     | `a<`     | angle-bracketed block           |
//!
//! Objects apply in operator-pending and characterwise visual mode. The
//! result is the half-open range of the object, or the input unchanged when
//! there is no object around the cursor.

use std::str::FromStr;

use n_text::{Region, TextQuery};

use crate::bracket::{find_closing, find_opening};
use crate::error::MotionError;
use crate::mode::{
    Mode,
    VisualKind::{Block, Char, Line},
};
use crate::motion::Ctx;
use crate::span::resolve_b;
use crate::word::{classify, classify_big, CharClass};

/// What a text object selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Word,
    BigWord,
    /// Quoted string delimited by this char.
    Quote(char),
    /// Block delimited by this open/close pair.
    Bracket(char, char),
}

/// A text object: its kind, and whether it is the inner (`i`) or around
/// (`a`) variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextObject {
    pub kind: ObjectKind,
    pub inner: bool,
}

impl FromStr for TextObject {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || MotionError::UnknownMotion(s.to_string());
        let mut chars = s.chars();
        let inner = match chars.next() {
            Some('i') => true,
            Some('a') => false,
            _ => return Err(unknown()),
        };
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return Err(unknown());
        };
        let kind = match key {
            'w' => ObjectKind::Word,
            'W' => ObjectKind::BigWord,
            '"' | '\'' | '`' => ObjectKind::Quote(key),
            '(' | ')' | 'b' => ObjectKind::Bracket('(', ')'),
            '[' | ']' => ObjectKind::Bracket('[', ']'),
            '{' | '}' | 'B' => ObjectKind::Bracket('{', '}'),
            '<' | '>' => ObjectKind::Bracket('<', '>'),
            _ => return Err(unknown()),
        };
        Ok(Self { kind, inner })
    }
}

/// Select `object` around the cursor of `s`.
pub(crate) fn select(cx: &Ctx<'_>, s: Region, object: TextObject) -> Region {
    let pt = match cx.mode {
        Mode::OperatorPending => s.b,
        Mode::Visual(Char) => resolve_b(s),
        Mode::Normal | Mode::Visual(Line | Block) | Mode::Select => return s,
    };
    find(cx.view, pt, object).map_or(s, |(a, b)| Region::new(a, b))
}

/// Half-open `[start, end)` range of `object` around `pt`.
pub(crate) fn find(v: &dyn TextQuery, pt: usize, object: TextObject) -> Option<(usize, usize)> {
    let TextObject { kind, inner } = object;
    match kind {
        ObjectKind::Word if inner => inner_word(v, pt, classify),
        ObjectKind::Word => a_word(v, pt, classify),
        ObjectKind::BigWord if inner => inner_word(v, pt, classify_big),
        ObjectKind::BigWord => a_word(v, pt, classify_big),
        ObjectKind::Quote(quote) => {
            let (open, close) = find_quote_pair(v, pt, quote)?;
            Some(if inner { (open + 1, close) } else { (open, close + 1) })
        }
        ObjectKind::Bracket(open, close) => {
            let (open, close) = find_bracket_pair(v, pt, (open, close))?;
            Some(if inner { (open + 1, close) } else { (open, close + 1) })
        }
    }
}

// ---------------------------------------------------------------------------
// Word objects
// ---------------------------------------------------------------------------

fn class_at(v: &dyn TextQuery, p: usize, classify_fn: fn(char) -> CharClass) -> CharClass {
    v.char_at(p).map_or(CharClass::Newline, classify_fn)
}

/// The run of same-class chars around `pt`. Blanks stop at newlines; a
/// newline selects just itself.
fn inner_word(
    v: &dyn TextQuery,
    pt: usize,
    classify_fn: fn(char) -> CharClass,
) -> Option<(usize, usize)> {
    let size = v.size();
    if pt >= size {
        return None;
    }

    let class = class_at(v, pt, classify_fn);
    if class == CharClass::Newline {
        return Some((pt, pt + 1));
    }

    let mut start = pt;
    while start > 0 && class_at(v, start - 1, classify_fn) == class {
        start -= 1;
    }
    let mut end = pt + 1;
    while end < size && class_at(v, end, classify_fn) == class {
        end += 1;
    }
    Some((start, end))
}

/// The inner word plus surrounding blanks: trailing first, else leading. On
/// a blank run, the following word is included instead.
fn a_word(
    v: &dyn TextQuery,
    pt: usize,
    classify_fn: fn(char) -> CharClass,
) -> Option<(usize, usize)> {
    let size = v.size();
    let (start, end) = inner_word(v, pt, classify_fn)?;

    match class_at(v, pt, classify_fn) {
        CharClass::Word | CharClass::Punctuation => {
            let mut new_end = end;
            while new_end < size && class_at(v, new_end, classify_fn) == CharClass::Blank {
                new_end += 1;
            }
            if new_end > end {
                return Some((start, new_end));
            }

            let mut new_start = start;
            while new_start > 0 && class_at(v, new_start - 1, classify_fn) == CharClass::Blank {
                new_start -= 1;
            }
            Some((new_start, end))
        }
        CharClass::Blank => {
            let mut new_end = end;
            let next = class_at(v, new_end, classify_fn);
            if matches!(next, CharClass::Word | CharClass::Punctuation) {
                while new_end < size && class_at(v, new_end, classify_fn) == next {
                    new_end += 1;
                }
            }
            Some((start, new_end))
        }
        CharClass::Newline => Some((start, end)),
    }
}

// ---------------------------------------------------------------------------
// Quote objects
// ---------------------------------------------------------------------------

/// The quote pair on the cursor's line that contains, or else follows, `pt`.
///
/// Quotes pair up left to right: 1st with 2nd, 3rd with 4th.
fn find_quote_pair(v: &dyn TextQuery, pt: usize, quote: char) -> Option<(usize, usize)> {
    let line = v.line(pt);
    let quotes: Vec<usize> = (line.begin()..line.end())
        .filter(|&p| v.char_at(p) == Some(quote))
        .collect();

    let pairs = || quotes.chunks_exact(2).map(|pair| (pair[0], pair[1]));
    pairs()
        .find(|&(open, close)| open <= pt && pt <= close)
        .or_else(|| pairs().find(|&(open, _)| open > pt))
}

// ---------------------------------------------------------------------------
// Bracket objects
// ---------------------------------------------------------------------------

/// The innermost `open`/`close` pair around `pt`, across lines.
fn find_bracket_pair(
    v: &dyn TextQuery,
    pt: usize,
    (open, close): (char, char),
) -> Option<(usize, usize)> {
    let pair = (open, close);
    match v.char_at(pt)? {
        ch if ch == open => Some((pt, find_closing(v, pt, pair)?)),
        ch if ch == close => Some((find_opening(v, pt, pair)?, pt)),
        _ => {
            let start = find_opening(v, pt, pair)?;
            let end = find_closing(v, start, pair)?;
            (pt < end).then_some((start, end))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
