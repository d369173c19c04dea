//! Text positions and regions.
//!
//! Two coordinate systems coexist:
//!
//! - **Offsets** (`usize`) index the buffer as a flat sequence of chars.
//!   Offset 0 is the first char, `size()` is one past the last. Every motion
//!   works in offsets.
//! - **[`Position`]** is a `(line, col)` pair, both 0-indexed, with `col`
//!   counting chars. It appears wherever rows matter (vertical motions,
//!   viewport math, display).
//!
//! A [`Region`] is a pair of offsets with a direction: `a` is the anchor and
//! `b` the active end. A caret is a region where `a == b`.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A position in a text buffer: (line, column), both 0-indexed.
///
/// `col` is the char offset from the start of the line, **not** a byte offset
/// and not a display column. Tabs and wide characters count as one.
///
/// # Ordering
///
/// Positions are ordered lexicographically: line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin: line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display, matching Vim's `line:col` status.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A directed span of offsets: anchor `a`, active end `b`.
///
/// The covered text is always `[begin, end)`. Direction matters to visual
/// selections: the anchor stays put while `b` follows the cursor. A region is
/// *reversed* when `a > b`.
///
/// | Region      | Covers | Meaning                          |
/// |-------------|--------|----------------------------------|
/// | `(3, 3)`    |:      | caret before char 3              |
/// | `(3, 6)`    | 3..6   | forward selection, cursor at 5   |
/// | `(6, 3)`    | 3..6   | reversed selection, cursor at 3  |
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub a: usize,
    pub b: usize,
}

impl Region {
    /// Create a region from anchor and active end.
    #[inline]
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// A caret (empty region) at `pt`.
    #[inline]
    #[must_use]
    pub const fn point(pt: usize) -> Self {
        Self { a: pt, b: pt }
    }

    /// The smaller of the two ends.
    #[inline]
    #[must_use]
    pub const fn begin(self) -> usize {
        if self.a < self.b { self.a } else { self.b }
    }

    /// The larger of the two ends.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        if self.a < self.b { self.b } else { self.a }
    }

    /// Number of chars covered.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        self.end() - self.begin()
    }

    /// True for a caret.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.a == self.b
    }

    /// True when the anchor sits after the active end.
    #[inline]
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        self.a > self.b
    }

    /// True when `pt` lies in `[begin, end]`. Both ends are included, so a
    /// caret contains its own offset.
    #[inline]
    #[must_use]
    pub const fn contains(self, pt: usize) -> bool {
        self.begin() <= pt && pt <= self.end()
    }

    /// True when `other` lies entirely within this region.
    #[inline]
    #[must_use]
    pub const fn covers(self, other: Self) -> bool {
        self.begin() <= other.begin() && other.end() <= self.end()
    }

    /// Clamp both ends into `[0, size]`.
    #[inline]
    #[must_use]
    pub const fn clamped(self, size: usize) -> Self {
        Self {
            a: if self.a > size { size } else { self.a },
            b: if self.b > size { size } else { self.b },
        }
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region({}, {})", self.a, self.b)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.a)
        } else {
            write!(f, "{}..{}", self.a, self.b)
        }
    }
}

impl From<(usize, usize)> for Region {
    #[inline]
    fn from((a, b): (usize, usize)) -> Self {
        Self { a, b }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
