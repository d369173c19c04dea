//! Motions and the dispatcher that applies them.
//!
//! A motion is evaluated against every region of a [`Selection`] at once and
//! yields a new selection plus a list of [`SideEffect`]s for the host. The
//! entry point is [`apply_motion`]:
//!
//! ```text
//! MotionRequest { motion, mode, count, args }
//!        │
//!        ▼
//! apply_motion(view, session, options, request, selection)
//!        │
//!        ├── per-region families: linear, line, jump, word, sentence,
//!        │   paragraph, bracket, find, text_object
//!        └── whole-selection families: block (visual-block j/k), search,
//!            scroll
//!        │
//!        ▼
//! MotionOutput { selection, effects, outcome }
//! ```
//!
//! A motion that does not apply in the current mode, or cannot find its
//! target, returns the selection unchanged with [`Outcome::NoOp`]. Only a
//! request missing a required argument is an error.

use std::fmt;
use std::str::FromStr;

use n_text::{Region, TextQuery};
use tracing::debug;

use crate::error::MotionError;
use crate::mode::Mode;
use crate::options::MotionOptions;
use crate::selection::Selection;
use crate::session::{BlockDirection, Session};
use crate::text_object::TextObject;
use crate::{
    block, bracket, find, jump, line, linear, paragraph, scroll, search, sentence,
    text_object, word,
};

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

/// Every motion the engine knows, named by what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// `h`
    Left,
    /// `l`
    Right,
    /// `j`
    Down,
    /// `k`
    Up,
    /// `<CR>` / `+`
    DownFirstNonBlank,
    /// `-`
    UpFirstNonBlank,

    /// `$`
    LineEnd,
    /// `0`
    LineStart,
    /// `^`
    FirstNonBlank,
    /// `_`
    FirstNonBlankDown,
    /// `g_`
    LastNonBlank,
    /// `|`
    Column,
    /// `gm`
    MidLine,

    /// `gg`
    BufferStart,
    /// `G`
    BufferEnd,
    /// `:{n}`
    GoToLine,

    /// `w`
    WordForward,
    /// `W`
    BigWordForward,
    /// `e`
    WordEnd,
    /// `E`
    BigWordEnd,
    /// `b`
    WordBackward,
    /// `B`
    BigWordBackward,
    /// `ge`
    WordEndBackward,
    /// `gE`
    BigWordEndBackward,

    /// `)`
    SentenceForward,
    /// `(`
    SentenceBackward,
    /// `}`
    ParagraphForward,
    /// `{`
    ParagraphBackward,

    /// `%`, or `{count}%` to jump to a percentage of the buffer.
    MatchPair,
    /// `[(`
    UnmatchedParenBackward,
    /// `[{`
    UnmatchedBraceBackward,
    /// `])`
    UnmatchedParenForward,
    /// `]}`
    UnmatchedBraceForward,

    /// `/`
    SearchForward,
    /// `?`
    SearchBackward,
    /// `*`
    StarForward,
    /// `#`
    StarBackward,
    /// `n`
    SearchNext,
    /// `N`
    SearchPrevious,

    /// `<C-d>`
    HalfPageDown,
    /// `<C-u>`
    HalfPageUp,
    /// `<C-f>`
    PageDown,
    /// `<C-b>`
    PageUp,
    /// `H`
    ScreenTop,
    /// `M`
    ScreenMiddle,
    /// `L`
    ScreenBottom,

    /// `f{char}`
    FindChar,
    /// `t{char}`
    TillChar,
    /// `F{char}`
    FindCharBackward,
    /// `T{char}`
    TillCharBackward,

    /// `iw`, `a(`, ...
    SelectTextObject,
}

impl Motion {
    /// The Vim key sequence for this motion.
    #[must_use]
    pub const fn keys(self) -> &'static str {
        match self {
            Self::Left => "h",
            Self::Right => "l",
            Self::Down => "j",
            Self::Up => "k",
            Self::DownFirstNonBlank => "<CR>",
            Self::UpFirstNonBlank => "-",
            Self::LineEnd => "$",
            Self::LineStart => "0",
            Self::FirstNonBlank => "^",
            Self::FirstNonBlankDown => "_",
            Self::LastNonBlank => "g_",
            Self::Column => "|",
            Self::MidLine => "gm",
            Self::BufferStart => "gg",
            Self::BufferEnd => "G",
            Self::GoToLine => ":",
            Self::WordForward => "w",
            Self::BigWordForward => "W",
            Self::WordEnd => "e",
            Self::BigWordEnd => "E",
            Self::WordBackward => "b",
            Self::BigWordBackward => "B",
            Self::WordEndBackward => "ge",
            Self::BigWordEndBackward => "gE",
            Self::SentenceForward => ")",
            Self::SentenceBackward => "(",
            Self::ParagraphForward => "}",
            Self::ParagraphBackward => "{",
            Self::MatchPair => "%",
            Self::UnmatchedParenBackward => "[(",
            Self::UnmatchedBraceBackward => "[{",
            Self::UnmatchedParenForward => "])",
            Self::UnmatchedBraceForward => "]}",
            Self::SearchForward => "/",
            Self::SearchBackward => "?",
            Self::StarForward => "*",
            Self::StarBackward => "#",
            Self::SearchNext => "n",
            Self::SearchPrevious => "N",
            Self::HalfPageDown => "<C-d>",
            Self::HalfPageUp => "<C-u>",
            Self::PageDown => "<C-f>",
            Self::PageUp => "<C-b>",
            Self::ScreenTop => "H",
            Self::ScreenMiddle => "M",
            Self::ScreenBottom => "L",
            Self::FindChar => "f",
            Self::TillChar => "t",
            Self::FindCharBackward => "F",
            Self::TillCharBackward => "T",
            Self::SelectTextObject => "i/a",
        }
    }

    /// `j`/`k` and friends that keep the sticky column alive.
    const fn keeps_xpos(self) -> bool {
        matches!(self, Self::Down | Self::Up)
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keys())
    }
}

impl FromStr for Motion {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "h" | "<Left>" | "<BS>" => Self::Left,
            "l" | "<Right>" | "<Space>" => Self::Right,
            "j" | "<Down>" | "<C-n>" => Self::Down,
            "k" | "<Up>" | "<C-p>" => Self::Up,
            "<CR>" | "<Enter>" | "+" => Self::DownFirstNonBlank,
            "-" => Self::UpFirstNonBlank,
            "$" | "<End>" => Self::LineEnd,
            "0" | "<Home>" => Self::LineStart,
            "^" => Self::FirstNonBlank,
            "_" => Self::FirstNonBlankDown,
            "g_" => Self::LastNonBlank,
            "|" => Self::Column,
            "gm" => Self::MidLine,
            "gg" => Self::BufferStart,
            "G" => Self::BufferEnd,
            ":" => Self::GoToLine,
            "w" => Self::WordForward,
            "W" => Self::BigWordForward,
            "e" => Self::WordEnd,
            "E" => Self::BigWordEnd,
            "b" => Self::WordBackward,
            "B" => Self::BigWordBackward,
            "ge" => Self::WordEndBackward,
            "gE" => Self::BigWordEndBackward,
            ")" => Self::SentenceForward,
            "(" => Self::SentenceBackward,
            "}" => Self::ParagraphForward,
            "{" => Self::ParagraphBackward,
            "%" => Self::MatchPair,
            "[(" => Self::UnmatchedParenBackward,
            "[{" => Self::UnmatchedBraceBackward,
            "])" => Self::UnmatchedParenForward,
            "]}" => Self::UnmatchedBraceForward,
            "/" => Self::SearchForward,
            "?" => Self::SearchBackward,
            "*" => Self::StarForward,
            "#" => Self::StarBackward,
            "n" => Self::SearchNext,
            "N" => Self::SearchPrevious,
            "<C-d>" => Self::HalfPageDown,
            "<C-u>" => Self::HalfPageUp,
            "<C-f>" | "<PageDown>" | "<S-CR>" => Self::PageDown,
            "<C-b>" | "<PageUp>" => Self::PageUp,
            "H" => Self::ScreenTop,
            "M" => Self::ScreenMiddle,
            "L" => Self::ScreenBottom,
            "f" => Self::FindChar,
            "t" => Self::TillChar,
            "F" => Self::FindCharBackward,
            "T" => Self::TillCharBackward,
            other => return Err(MotionError::UnknownMotion(other.to_string())),
        })
    }
}

// ---------------------------------------------------------------------------
// Arguments and requests
// ---------------------------------------------------------------------------

/// Motion-specific arguments. Each motion reads only the fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionArgs {
    /// Target char for `f`/`t`/`F`/`T`.
    pub char: Option<char>,
    /// `;`/`,` repeat of a till motion: skip the adjacent char.
    pub skipping: bool,
    /// Query for `/`, `?`, `*` and `#`. Empty repeats the last term.
    pub search: Option<String>,
    /// 1-based target line for `:`.
    pub line: Option<usize>,
    /// Percentage for `%`. A count on `%` is read the same way.
    pub percent: Option<usize>,
    pub text_object: Option<TextObject>,
}

/// One motion invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionRequest {
    pub motion: Motion,
    pub mode: Mode,
    /// `None` when the user typed no count.
    pub count: Option<usize>,
    pub args: MotionArgs,
}

impl MotionRequest {
    #[must_use]
    pub fn new(motion: Motion, mode: Mode) -> Self {
        Self {
            motion,
            mode,
            count: None,
            args: MotionArgs::default(),
        }
    }

    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: MotionArgs) -> Self {
        self.args = args;
        self
    }

    /// The repeat count, at least 1.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.unwrap_or(1).max(1)
    }
}

/// Parse a full key sequence into a motion and its inline argument:
/// `"fx"`, `"t;"`, `"/foo"`, `"?bar"`, `":12"`, `"iw"`, `"a("`, or any bare
/// motion `Motion::from_str` accepts.
///
/// # Errors
///
/// [`MotionError::UnknownMotion`] when the sequence names nothing.
pub fn parse_keys(keys: &str) -> Result<(Motion, MotionArgs), MotionError> {
    let mut args = MotionArgs::default();
    let mut chars = keys.chars();
    let first = chars.next();
    let rest = chars.as_str();

    let motion = match first {
        Some(c @ ('f' | 't' | 'F' | 'T')) if rest.chars().count() == 1 => {
            args.char = rest.chars().next();
            match c {
                'f' => Motion::FindChar,
                't' => Motion::TillChar,
                'F' => Motion::FindCharBackward,
                _ => Motion::TillCharBackward,
            }
        }
        Some('/') if !rest.is_empty() => {
            args.search = Some(rest.to_string());
            Motion::SearchForward
        }
        Some('?') if !rest.is_empty() => {
            args.search = Some(rest.to_string());
            Motion::SearchBackward
        }
        Some(':') if !rest.is_empty() => {
            let line = rest
                .parse()
                .map_err(|_| MotionError::UnknownMotion(keys.to_string()))?;
            args.line = Some(line);
            Motion::GoToLine
        }
        Some('i' | 'a') if !rest.is_empty() => {
            args.text_object = Some(keys.parse()?);
            Motion::SelectTextObject
        }
        _ => keys.parse()?,
    };
    Ok((motion, args))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Whether the motion changed the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    /// Not applicable or no target. Hosts usually blink.
    NoOp,
}

/// Requests the host carries out after committing the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Highlight every match of the last search.
    HighlightAll(Vec<Region>),
    /// Mark the match the cursor landed on.
    HighlightCurrent(Region),
    /// Drop search highlights.
    ClearHighlight,
    /// Scroll so this offset is visible.
    ShowPoint(usize),
    /// Scroll the viewport by this many rows.
    ScrollBy(isize),
    /// Visual bell.
    Blink,
    /// Record this pre-jump offset in the jump list.
    JumpListEntry(usize),
    /// Status-line message.
    Message(String),
}

/// What [`apply_motion`] hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionOutput {
    pub selection: Selection,
    pub effects: Vec<SideEffect>,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Everything a per-region motion reads.
pub(crate) struct Ctx<'a> {
    pub motion: Motion,
    pub view: &'a dyn TextQuery,
    pub mode: Mode,
    pub count: usize,
    /// The count as typed, for motions where "no count" differs from 1.
    pub explicit_count: Option<usize>,
    pub args: &'a MotionArgs,
    pub options: &'a MotionOptions,
}

/// Apply one motion to every region of `selection`.
///
/// # Errors
///
/// [`MotionError::PreconditionFailed`] when the motion needs an argument the
/// request does not carry (`f` without a char, text-object selection without
/// an object).
pub fn apply_motion(
    view: &dyn TextQuery,
    session: &mut Session,
    options: &MotionOptions,
    request: &MotionRequest,
    selection: &Selection,
) -> Result<MotionOutput, MotionError> {
    let cx = Ctx {
        motion: request.motion,
        view,
        mode: request.mode,
        count: request.count(),
        explicit_count: request.count,
        args: &request.args,
        options,
    };
    let mut effects = Vec::new();

    if request.motion.keeps_xpos() {
        if session.xpos.is_none() {
            session.xpos = Some(view.display_col(crate::span::resolve_b(selection.first())));
        }
    } else {
        session.xpos = None;
    }

    let moved = match request.mode {
        Mode::Select => selection.clone(),
        Mode::Normal | Mode::Visual(_) | Mode::OperatorPending => {
            dispatch(&cx, session, selection, &mut effects)?
        }
    };

    if request.motion == Motion::LineEnd {
        session.xpos = Some(usize::MAX);
    }

    let moved = moved.clamped(view.size());
    let outcome = if moved == *selection {
        Outcome::NoOp
    } else {
        Outcome::Moved
    };

    debug!(
        motion = %request.motion,
        mode = %request.mode,
        count = cx.count,
        before = %selection,
        after = %moved,
        ?outcome,
        "applied motion"
    );

    Ok(MotionOutput {
        selection: moved,
        effects,
        outcome,
    })
}

fn dispatch(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Result<Selection, MotionError> {
    use Motion as M;

    let xpos = session.xpos.unwrap_or(0);
    let block = cx.mode == Mode::Visual(crate::mode::VisualKind::Block);

    let out = match cx.motion {
        M::Left => {
            let baseline = linear::block_baseline(cx, sel);
            sel.transform(|s| linear::left(cx, s, baseline))
        }
        M::Right => sel.transform(|s| linear::right(cx, s)),
        M::Down if block => block::grow_or_shrink(cx, session, sel, BlockDirection::Down, effects),
        M::Up if block => block::grow_or_shrink(cx, session, sel, BlockDirection::Up, effects),
        M::Down => sel.transform(|s| linear::down(cx, s, xpos)),
        M::Up => sel.transform(|s| linear::up(cx, s, xpos)),
        M::DownFirstNonBlank => sel.transform(|s| linear::down_first_non_blank(cx, s)),
        M::UpFirstNonBlank => sel.transform(|s| linear::up_first_non_blank(cx, s)),

        M::LineEnd => sel.transform(|s| line::line_end(cx, s)),
        M::LineStart => sel.transform(|s| line::line_start(cx, s)),
        M::FirstNonBlank => sel.transform(|s| line::first_non_blank(cx, s)),
        M::FirstNonBlankDown => sel.transform(|s| line::first_non_blank_down(cx, s)),
        M::LastNonBlank => sel.transform(|s| line::last_non_blank(cx, s)),
        M::Column => sel.transform(|s| line::column(cx, s)),
        M::MidLine => line::mid_line(cx, sel, effects),

        M::BufferStart => jump::buffer_start(cx, sel, effects),
        M::BufferEnd => jump::buffer_end(cx, sel, effects),
        M::GoToLine => {
            let target = cx.args.line.or(cx.explicit_count).ok_or(
                MotionError::PreconditionFailed {
                    motion: ":",
                    reason: "missing target line",
                },
            )?;
            jump::go_to_line(cx, sel, target, effects)
        }

        M::WordForward => sel.transform(|s| word::word_forward(cx, s, false)),
        M::BigWordForward => sel.transform(|s| word::word_forward(cx, s, true)),
        M::WordEnd => sel.transform(|s| word::word_end(cx, s, false)),
        M::BigWordEnd => sel.transform(|s| word::word_end(cx, s, true)),
        M::WordBackward => sel.transform(|s| word::word_backward(cx, s, false)),
        M::BigWordBackward => sel.transform(|s| word::word_backward(cx, s, true)),
        M::WordEndBackward => sel.transform(|s| word::word_end_backward(cx, s, false)),
        M::BigWordEndBackward => sel.transform(|s| word::word_end_backward(cx, s, true)),

        M::SentenceForward => sel.transform(|s| sentence::sentence_forward(cx, s)),
        M::SentenceBackward => sel.transform(|s| sentence::sentence_backward(cx, s)),
        M::ParagraphForward => sel.transform(|s| paragraph::paragraph_forward(cx, s)),
        M::ParagraphBackward => sel.transform(|s| paragraph::paragraph_backward(cx, s)),

        M::MatchPair => match cx.args.percent.or(cx.explicit_count) {
            Some(percent) => jump::go_to_percent(cx, sel, percent, effects),
            None => sel.transform(|s| bracket::match_pair(cx, s)),
        },
        M::UnmatchedParenBackward => bracket::unmatched(cx, sel, ('(', ')'), false, effects),
        M::UnmatchedBraceBackward => bracket::unmatched(cx, sel, ('{', '}'), false, effects),
        M::UnmatchedParenForward => bracket::unmatched(cx, sel, ('(', ')'), true, effects),
        M::UnmatchedBraceForward => bracket::unmatched(cx, sel, ('{', '}'), true, effects),

        M::SearchForward => search::slash(cx, session, sel, effects),
        M::SearchBackward => search::question_mark(cx, session, sel, effects),
        M::StarForward => search::star(cx, session, sel, effects),
        M::StarBackward => search::octothorp(cx, session, sel, effects),
        M::SearchNext => search::repeat(cx, session, sel, false, effects),
        M::SearchPrevious => search::repeat(cx, session, sel, true, effects),

        M::HalfPageDown => scroll::half_page(cx, sel, true, effects),
        M::HalfPageUp => scroll::half_page(cx, sel, false, effects),
        M::PageDown => scroll::full_page(cx, sel, true, effects),
        M::PageUp => scroll::full_page(cx, sel, false, effects),
        M::ScreenTop => scroll::screen_top(cx, sel),
        M::ScreenMiddle => scroll::screen_middle(cx, sel),
        M::ScreenBottom => scroll::screen_bottom(cx, sel),

        M::FindChar => find::in_line(cx, sel, find::Direction::Forward, true, "f")?,
        M::TillChar => find::in_line(cx, sel, find::Direction::Forward, false, "t")?,
        M::FindCharBackward => find::in_line(cx, sel, find::Direction::Backward, true, "F")?,
        M::TillCharBackward => find::in_line(cx, sel, find::Direction::Backward, false, "T")?,

        M::SelectTextObject => {
            let object = cx.args.text_object.ok_or(MotionError::PreconditionFailed {
                motion: "text object",
                reason: "missing object",
            })?;
            sel.transform(|s| text_object::select(cx, s, object))
        }
    };
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
