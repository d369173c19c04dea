//! Per-view state that outlives a single motion.
//!
//! The host keeps one [`Session`] per view and passes it to every
//! [`apply_motion`](crate::motion::apply_motion) call. Motions that own a
//! field update it in the same call that moves the selection.

use std::fmt;

/// The search command that last ran, for `n` and `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCommand {
    /// `/`: forward pattern search.
    Slash,
    /// `?`: backward pattern search.
    QuestionMark,
    /// `*`: forward whole-word search.
    Star,
    /// `#`: backward whole-word search.
    Octothorp,
}

impl SearchCommand {
    /// The command `N` runs after this one.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Slash => Self::QuestionMark,
            Self::QuestionMark => Self::Slash,
            Self::Star => Self::Octothorp,
            Self::Octothorp => Self::Star,
        }
    }
}

impl fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slash => "/",
            Self::QuestionMark => "?",
            Self::Star => "*",
            Self::Octothorp => "#",
        })
    }
}

/// The last successful buffer search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// The term as typed (`*`/`#` store the bare word).
    pub last_term: Option<String>,
    pub last_command: Option<SearchCommand>,
}

impl SearchState {
    /// Record a successful search.
    pub fn record(&mut self, term: &str, command: SearchCommand) {
        self.last_term = Some(term.to_string());
        self.last_command = Some(command);
    }
}

/// Direction a visual block grew in from its single-region start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockDirection {
    Up,
    Down,
}

/// Caller-owned motion state for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub search: SearchState,
    /// Sticky display column for `j`/`k`. `None` until the first vertical
    /// motion of a run; `usize::MAX` after `$`.
    pub xpos: Option<usize>,
    pub block_direction: Option<BlockDirection>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
