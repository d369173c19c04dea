//! Search patterns.
//!
//! A [`Pattern`] is a compiled regex plus the term it came from. Terms are
//! either literal (escaped before compiling) or Vim-flavoured regexes, where
//! the word anchors `\<` and `\>` are rewritten to `\b`. Everything else is
//! handed to the `regex` crate as-is.
//!
//! Offsets returned by searches are **char** offsets; the byte positions the
//! regex engine reports never leave this crate.

use bitflags::bitflags;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

bitflags! {
    /// How a search term is interpreted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FindFlags: u8 {
        /// Match the term verbatim.
        const LITERAL = 1 << 0;
        /// Case-insensitive matching.
        const IGNORECASE = 1 << 1;
    }
}

/// A search term that failed to compile.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern `{term}`: {source}")]
    Invalid {
        term: String,
        #[source]
        source: regex::Error,
    },
    #[error("empty search pattern")]
    Empty,
}

/// A compiled search pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    term: String,
    flags: FindFlags,
    regex: Regex,
}

impl Pattern {
    /// Compile `term` with the given flags.
    ///
    /// # Errors
    ///
    /// [`PatternError::Empty`] for an empty term, [`PatternError::Invalid`]
    /// when the regex does not compile.
    pub fn new(term: &str, flags: FindFlags) -> Result<Self, PatternError> {
        if term.is_empty() {
            return Err(PatternError::Empty);
        }

        let source = if flags.contains(FindFlags::LITERAL) {
            regex::escape(term)
        } else {
            translate_vim_anchors(term)
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(flags.contains(FindFlags::IGNORECASE))
            .multi_line(true)
            .build()
            .map_err(|source| PatternError::Invalid {
                term: term.to_string(),
                source,
            })?;

        Ok(Self {
            term: term.to_string(),
            flags,
            regex,
        })
    }

    /// Compile `term` as a literal, case-sensitive pattern.
    ///
    /// # Errors
    ///
    /// [`PatternError::Empty`] for an empty term.
    pub fn literal(term: &str) -> Result<Self, PatternError> {
        Self::new(term, FindFlags::LITERAL)
    }

    /// The term this pattern was built from.
    #[inline]
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The flags it was compiled with.
    #[inline]
    #[must_use]
    pub const fn flags(&self) -> FindFlags {
        self.flags
    }

    /// The compiled regex.
    #[inline]
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Rewrite `\<` and `\>` to `\b`, leaving escaped backslashes alone.
fn translate_vim_anchors(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut chars = term.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('<' | '>') => out.push_str("\\b"),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Offset mapping
// ---------------------------------------------------------------------------

/// Byte offset of char `char_idx` in `text`, or `text.len()` past the end.
#[must_use]
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}

/// Char index of byte offset `byte_idx` in `text`.
#[must_use]
pub fn byte_to_char(text: &str, byte_idx: usize) -> usize {
    text[..byte_idx.min(text.len())].chars().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_escapes_metacharacters() {
        let p = Pattern::literal("a.b").unwrap();
        assert!(p.regex().is_match("xa.by"));
        assert!(!p.regex().is_match("axb"));
    }

    #[test]
    fn regex_mode_keeps_metacharacters() {
        let p = Pattern::new("a.b", FindFlags::empty()).unwrap();
        assert!(p.regex().is_match("axb"));
    }

    #[test]
    fn ignorecase_flag() {
        let p = Pattern::new("foo", FindFlags::IGNORECASE).unwrap();
        assert!(p.regex().is_match("FOO"));
        let p = Pattern::new("foo", FindFlags::empty()).unwrap();
        assert!(!p.regex().is_match("FOO"));
    }

    #[test]
    fn vim_word_anchors() {
        let p = Pattern::new(r"\<foo\>", FindFlags::empty()).unwrap();
        assert!(p.regex().is_match("a foo b"));
        assert!(!p.regex().is_match("foobar"));
    }

    #[test]
    fn escaped_backslash_is_not_an_anchor() {
        assert_eq!(translate_vim_anchors(r"\\<"), r"\\<");
    }

    #[test]
    fn empty_term_is_rejected() {
        assert!(matches!(Pattern::literal(""), Err(PatternError::Empty)));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = Pattern::new("(unclosed", FindFlags::empty()).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn byte_char_mapping() {
        let text = "café x";
        assert_eq!(char_to_byte(text, 4), 5);
        assert_eq!(byte_to_char(text, 5), 4);
        assert_eq!(char_to_byte(text, 100), text.len());
    }
}
