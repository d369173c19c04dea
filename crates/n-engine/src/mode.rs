//! Editing modes, as seen by motions.
//!
//! Every motion computes a different span depending on the mode it runs in:
//!
//! | Mode              | Selection shape          | Motion result           |
//! |-------------------|--------------------------|-------------------------|
//! | `Normal`          | caret (`a == b`)         | new caret               |
//! | `Visual(Char)`    | inclusive char range     | resized selection       |
//! | `Visual(Line)`    | whole lines              | resized line selection  |
//! | `Visual(Block)`   | one region per row       | rectangle grown/shrunk  |
//! | `OperatorPending` | caret                    | span an operator acts on |
//! | `Select`          | host-managed             | unchanged               |

use std::fmt;

// ---------------------------------------------------------------------------
// VisualKind
// ---------------------------------------------------------------------------

/// Which visual selection is active. Decides how spans snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// `v`: anchor char through cursor char.
    Char,
    /// `V`: snaps to whole lines, newline included.
    Line,
    /// `Ctrl-V`: a rectangle, one region per row.
    Block,
}

impl fmt::Display for VisualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Mode::Visual(*self).display_name())
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The mode a motion is evaluated in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Normal,
    /// Any of the three visual sub-modes.
    Visual(VisualKind),
    /// Computing the span for a pending operator (`d`, `c`, `y`).
    OperatorPending,
    /// Host selection mode. Motions leave it alone.
    Select,
}

impl Mode {
    /// Human-readable name for status lines and logs.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Visual(kind) => match kind {
                VisualKind::Char => "VISUAL",
                VisualKind::Line => "VISUAL LINE",
                VisualKind::Block => "VISUAL BLOCK",
            },
            Self::OperatorPending => "OPERATOR PENDING",
            Self::Select => "SELECT",
        }
    }

    /// True in any visual sub-mode.
    #[inline]
    #[must_use]
    pub const fn is_visual(self) -> bool {
        matches!(self, Self::Visual(_))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    /// Parse the short names the replay tool accepts: `normal`, `visual`,
    /// `vline`, `vblock`, `op`, `select`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "normal" => Ok(Self::Normal),
            "v" | "visual" => Ok(Self::Visual(VisualKind::Char)),
            "vl" | "vline" | "visual-line" => Ok(Self::Visual(VisualKind::Line)),
            "vb" | "vblock" | "visual-block" => Ok(Self::Visual(VisualKind::Block)),
            "o" | "op" | "operator" | "operator-pending" => Ok(Self::OperatorPending),
            "s" | "select" => Ok(Self::Select),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
