//! Rope-backed buffer: the reference [`TextQuery`] host.
//!
//! A `Buffer` wraps a [`ropey::Rope`] together with the view state the motion
//! engine asks about: folds, the viewport, the tab width, and whether the
//! text is markup.
//!
//! # Design choices
//!
//! - **Line endings are normalized to `\n` on load.** Offsets are char
//!   offsets and every motion assumes a one-char newline. The original style
//!   is recorded in [`Buffer::line_ending`] for display.
//!
//! - **Read-only.** The engine never edits text; hosts that do can rebuild
//!   the buffer or implement [`TextQuery`] over their own storage.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ropey::Rope;

use crate::position::{Position, Region};
use crate::query::TextQuery;
use crate::view::Viewport;

// ---------------------------------------------------------------------------
// Line ending detection
// ---------------------------------------------------------------------------

/// Line ending style of the loaded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`: Unix, macOS, Linux.
    Lf,
    /// `\r\n`: Windows, DOS.
    CrLf,
    /// `\r`: Classic Mac.
    Cr,
}

impl LineEnding {
    /// Detect the line ending style from its first occurrence. Text without
    /// any line ending reports `Lf`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                return Self::Lf;
            }
            if byte == b'\r' {
                if bytes.get(i + 1) == Some(&b'\n') {
                    return Self::CrLf;
                }
                return Self::Cr;
            }
        }
        Self::Lf
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
            Self::Cr => f.write_str("CR"),
        }
    }
}

/// Replace `\r\n` and lone `\r` with `\n`.
fn normalize_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    out
}

/// File extensions treated as markup for tag matching.
const MARKUP_EXTENSIONS: &[&str] = &["html", "htm", "xhtml", "xml", "svg", "vue"];

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A read-only text buffer plus the view state motions consult.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
    line_ending: LineEnding,
    folds: Vec<Region>,
    viewport: Viewport,
    tab_size: usize,
    markup: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create a buffer from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            line_ending: LineEnding::detect(text),
            rope: Rope::from_str(&normalize_line_endings(text)),
            path: None,
            folds: Vec::new(),
            viewport: Viewport::default(),
            tab_size: 8,
            markup: false,
        }
    }

    /// Load a buffer from a file. Markup is switched on for HTML/XML-like
    /// extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid UTF-8.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut buf = Self::from_text(&text);
        buf.markup = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| MARKUP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        buf.path = Some(path.to_path_buf());
        Ok(buf)
    }

    // -- Accessors ----------------------------------------------------------

    /// The underlying rope.
    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// The file this buffer was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Line ending style detected on load.
    #[inline]
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Total number of lines. A buffer ending with `\n` has a trailing empty
    /// line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Collect all text into a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- View state ---------------------------------------------------------

    /// Replace the folded regions. They are kept sorted by start.
    pub fn set_folds(&mut self, mut folds: Vec<Region>) {
        let size = self.rope.len_chars();
        for fold in &mut folds {
            *fold = Region::new(fold.begin(), fold.end()).clamped(size);
        }
        folds.sort_by_key(|f| f.a);
        self.folds = folds;
    }

    /// Replace the viewport geometry.
    pub const fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Mutable access to the viewport, for hosts applying scroll effects.
    pub const fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Set the tab width. Zero is treated as one.
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.tab_size = tab_size.max(1);
    }

    /// Mark the buffer as HTML/XML (enables tag matching for `%`).
    pub const fn set_markup(&mut self, markup: bool) {
        self.markup = markup;
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Content length of `line` (excluding the newline).
    fn line_content_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let total = slice.len_chars();
        if total > 0 && slice.char(total - 1) == '\n' {
            total - 1
        } else {
            total
        }
    }
}

impl TextQuery for Buffer {
    fn size(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, pt: usize) -> Option<char> {
        (pt < self.rope.len_chars()).then(|| self.rope.char(pt))
    }

    fn substr(&self, region: Region) -> String {
        let size = self.rope.len_chars();
        let a = region.begin().min(size);
        let b = region.end().min(size);
        self.rope.slice(a..b).to_string()
    }

    fn rowcol(&self, pt: usize) -> Position {
        let pt = pt.min(self.rope.len_chars());
        let line = self.rope.char_to_line(pt);
        Position::new(line, pt - self.rope.line_to_char(line))
    }

    fn text_point(&self, row: usize, col: usize) -> usize {
        let row = row.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(row) + col.min(self.line_content_len(row))
    }

    fn line(&self, pt: usize) -> Region {
        let row = self.rowcol(pt).line;
        let start = self.rope.line_to_char(row);
        Region::new(start, start + self.line_content_len(row))
    }

    fn full_line(&self, pt: usize) -> Region {
        let row = self.rowcol(pt).line;
        let start = self.rope.line_to_char(row);
        Region::new(start, start + self.rope.line(row).len_chars())
    }

    fn folded_regions(&self) -> Vec<Region> {
        self.folds.clone()
    }

    fn is_markup(&self) -> bool {
        self.markup
    }

    fn tab_size(&self) -> usize {
        self.tab_size
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.rope.len_chars())
            .field("line_ending", &self.line_ending)
            .field("path", &self.path)
            .field("folds", &self.folds.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
