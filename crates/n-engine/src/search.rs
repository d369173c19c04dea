//! Buffer search: `/`, `?`, `*`, `#`, `n`, `N`, and the incremental flow.
//!
//! Every search wraps around the buffer ends when `wrapscan` is set. A count
//! repeats the search from each match in turn. Only a search that lands
//! updates [`SearchState`](crate::session::SearchState); a miss leaves the
//! last term and command alone so `n` keeps working.

use n_text::{FindFlags, Pattern, PatternError, Region, TextQuery, Viewport};
use tracing::{debug, trace};

use crate::error::MotionError;
use crate::mode::Mode;
use crate::motion::{
    apply_motion, Ctx, Motion, MotionArgs, MotionOutput, MotionRequest, Outcome, SideEffect,
};
use crate::options::MotionOptions;
use crate::selection::Selection;
use crate::session::{SearchCommand, Session};
use crate::span::{land, resolve_b};

const NO_PREVIOUS: &str = "E35: No previous regular expression";
const NO_WORD: &str = "E348: No string under cursor";

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

fn compile(
    options: &MotionOptions,
    term: &str,
    command: SearchCommand,
) -> Result<Pattern, PatternError> {
    let flags = match command {
        SearchCommand::Slash | SearchCommand::QuestionMark => options.find_flags(term),
        // Word searches store a regex and ignore smartcase.
        SearchCommand::Star | SearchCommand::Octothorp => {
            if options.ignorecase {
                FindFlags::IGNORECASE
            } else {
                FindFlags::empty()
            }
        }
    };
    Pattern::new(term, flags)
}

/// The `count`-th match starting at or after `from`.
fn forward_match(
    v: &dyn TextQuery,
    options: &MotionOptions,
    pattern: &Pattern,
    from: usize,
    count: usize,
) -> Option<Region> {
    let size = v.size();
    let mut from = from;
    let mut found = None;
    for _ in 0..count {
        let m = match v.find(pattern, from.min(size), size) {
            Some(m) => m,
            None if options.wrapscan => {
                trace!(term = pattern.term(), "search hit bottom, continuing at top");
                v.find(pattern, 0, size)?
            }
            None => return None,
        };
        from = m.begin() + 1;
        found = Some(m);
    }
    found
}

/// The `count`-th match starting before `end`, walking backward.
fn backward_match(
    v: &dyn TextQuery,
    options: &MotionOptions,
    pattern: &Pattern,
    end: usize,
    count: usize,
) -> Option<Region> {
    let size = v.size();
    let mut end = end;
    let mut found = None;
    for _ in 0..count {
        let m = match v.reverse_find(pattern, 0, end) {
            Some(m) => m,
            None if options.wrapscan => {
                trace!(term = pattern.term(), "search hit top, continuing at bottom");
                v.reverse_find(pattern, 0, size)?
            }
            None => return None,
        };
        end = m.begin();
        found = Some(m);
    }
    found
}

/// Search once per region. Returns the new selection and the first region's
/// match.
fn search_each(
    cx: &Ctx<'_>,
    sel: &Selection,
    pattern: &Pattern,
    forward: bool,
    origin: impl Fn(Region) -> usize,
) -> (Selection, Option<Region>) {
    let mut current = None;
    let out = sel.transform(|s| {
        let from = origin(s);
        let found = if forward {
            forward_match(cx.view, cx.options, pattern, from, cx.count)
        } else {
            backward_match(cx.view, cx.options, pattern, from, cx.count)
        };
        match found {
            Some(m) => {
                current.get_or_insert(m);
                land(cx.view, cx.mode, s, m.begin())
            }
            None => s,
        }
    });
    (out, current)
}

/// Where a forward search starts: just past the cursor char.
fn after_cursor(s: Region) -> usize {
    resolve_b(s) + 1
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

struct Search<'t> {
    term: &'t str,
    command: SearchCommand,
    /// Whether a hit replaces the session's last command. `n`/`N` keep it.
    record: bool,
}

/// Run `search` from each region's `origin`. A miss or a bad pattern comes
/// back as the message to show.
fn run(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    search: &Search<'_>,
    origin: impl Fn(Region) -> usize,
    effects: &mut Vec<SideEffect>,
) -> Result<Selection, String> {
    let pattern = compile(cx.options, search.term, search.command).map_err(|err| {
        debug!(term = search.term, %err, "search pattern rejected");
        err.to_string()
    })?;
    let forward = matches!(search.command, SearchCommand::Slash | SearchCommand::Star);
    let (out, current) = search_each(cx, sel, &pattern, forward, origin);

    let Some(current) = current else {
        debug!(term = search.term, command = %search.command, "pattern not found");
        return Err(format!("E486: Pattern not found: {}", search.term));
    };

    if search.record {
        session.search.record(search.term, search.command);
    }
    if cx.options.hlsearch {
        effects.push(SideEffect::HighlightAll(cx.view.find_all(&pattern)));
    }
    effects.push(SideEffect::HighlightCurrent(current));
    effects.push(SideEffect::JumpListEntry(sel.first().b));
    effects.push(SideEffect::ShowPoint(out.first().b));
    Ok(out)
}

fn or_report(
    result: Result<Selection, String>,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    result.unwrap_or_else(|message| {
        effects.push(SideEffect::Message(message));
        sel.clone()
    })
}

/// The typed term, or the last one when the prompt was left empty.
fn term_or_last(cx: &Ctx<'_>, session: &Session) -> Option<String> {
    match cx.args.search.as_deref() {
        Some(term) if !term.is_empty() => Some(term.to_string()),
        _ => session.search.last_term.clone(),
    }
}

fn pattern_search(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    command: SearchCommand,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let Some(term) = term_or_last(cx, session) else {
        effects.push(SideEffect::Message(NO_PREVIOUS.to_string()));
        return sel.clone();
    };
    let search = Search {
        term: &term,
        command,
        record: true,
    };
    let result = if command == SearchCommand::Slash {
        run(cx, session, sel, &search, after_cursor, effects)
    } else {
        run(cx, session, sel, &search, resolve_b, effects)
    };
    or_report(result, sel, effects)
}

/// `/`
pub(crate) fn slash(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    pattern_search(cx, session, sel, SearchCommand::Slash, effects)
}

/// `?`
pub(crate) fn question_mark(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    pattern_search(cx, session, sel, SearchCommand::QuestionMark, effects)
}

/// Whole-word pattern for the word under the first cursor.
fn word_term(cx: &Ctx<'_>, sel: &Selection) -> Option<String> {
    let word = cx.view.word(resolve_b(sel.first()));
    if word.is_empty() {
        return None;
    }
    Some(format!(r"\b{}\b", regex::escape(&cx.view.substr(word))))
}

fn word_search(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    command: SearchCommand,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let Some(term) = word_term(cx, sel) else {
        effects.push(SideEffect::Message(NO_WORD.to_string()));
        return sel.clone();
    };
    let v = cx.view;
    let search = Search {
        term: &term,
        command,
        record: true,
    };
    let word_at = |s: Region| v.word(resolve_b(s));

    let result = if command == SearchCommand::Star {
        let origin = |s: Region| {
            let word = word_at(s);
            if word.is_empty() { after_cursor(s) } else { word.end() }
        };
        run(cx, session, sel, &search, origin, effects)
    } else {
        run(cx, session, sel, &search, |s| word_at(s).begin(), effects)
    };

    match result {
        Ok(out) => out,
        // No other occurrence: settle on the start of the word instead.
        Err(_) if cx.mode == Mode::Normal => {
            session.search.record(&term, command);
            sel.transform(|s| Region::point(word_at(s).begin()))
        }
        Err(message) => or_report(Err(message), sel, effects),
    }
}

/// `*`
pub(crate) fn star(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    word_search(cx, session, sel, SearchCommand::Star, effects)
}

/// `#`
pub(crate) fn octothorp(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    word_search(cx, session, sel, SearchCommand::Octothorp, effects)
}

/// `n`, or `N` when `reverse` is set. Neither changes the stored command.
pub(crate) fn repeat(
    cx: &Ctx<'_>,
    session: &mut Session,
    sel: &Selection,
    reverse: bool,
    effects: &mut Vec<SideEffect>,
) -> Selection {
    let (Some(term), Some(last)) = (session.search.last_term.clone(), session.search.last_command)
    else {
        effects.push(SideEffect::Message(NO_PREVIOUS.to_string()));
        return sel.clone();
    };
    let command = if reverse { last.reversed() } else { last };
    let search = Search {
        term: &term,
        command,
        record: false,
    };
    let result = match command {
        SearchCommand::Slash | SearchCommand::Star => {
            run(cx, session, sel, &search, after_cursor, effects)
        }
        SearchCommand::QuestionMark | SearchCommand::Octothorp => {
            run(cx, session, sel, &search, resolve_b, effects)
        }
    };
    or_report(result, sel, effects)
}

// ---------------------------------------------------------------------------
// Incremental search
// ---------------------------------------------------------------------------

/// As-you-type search for `/` and `?`.
///
/// [`update`](Self::update) previews a match on every keystroke without
/// touching the [`Session`]. [`confirm`](Self::confirm) runs the real motion;
/// [`cancel`](Self::cancel) hands back what the view looked like before.
#[derive(Debug, Clone)]
pub struct IncrementalSearch {
    forward: bool,
    mode: Mode,
    selection: Selection,
    viewport: Viewport,
}

impl IncrementalSearch {
    /// Start a search prompt over `selection` as shown in `viewport`.
    #[must_use]
    pub const fn begin(forward: bool, mode: Mode, selection: Selection, viewport: Viewport) -> Self {
        Self {
            forward,
            mode,
            selection,
            viewport,
        }
    }

    const fn motion(&self) -> Motion {
        if self.forward {
            Motion::SearchForward
        } else {
            Motion::SearchBackward
        }
    }

    /// Preview `term`. The selection is provisional; nothing is recorded.
    #[must_use]
    pub fn update(
        &self,
        view: &dyn TextQuery,
        options: &MotionOptions,
        term: &str,
        count: Option<usize>,
    ) -> MotionOutput {
        let unchanged = |effects| MotionOutput {
            selection: self.selection.clone(),
            effects,
            outcome: Outcome::NoOp,
        };
        if !options.incsearch || term.is_empty() {
            return unchanged(vec![SideEffect::ClearHighlight]);
        }
        let command = if self.forward {
            SearchCommand::Slash
        } else {
            SearchCommand::QuestionMark
        };
        // Half-typed patterns are expected; they just show nothing yet.
        let Ok(pattern) = compile(options, term, command) else {
            return unchanged(vec![SideEffect::ClearHighlight]);
        };

        let args = MotionArgs::default();
        let cx = Ctx {
            motion: self.motion(),
            view,
            mode: self.mode,
            count: count.unwrap_or(1).max(1),
            explicit_count: count,
            args: &args,
            options,
        };
        let (selection, current) = if self.forward {
            search_each(&cx, &self.selection, &pattern, true, after_cursor)
        } else {
            search_each(&cx, &self.selection, &pattern, false, resolve_b)
        };
        let Some(current) = current else {
            return unchanged(vec![SideEffect::ClearHighlight]);
        };
        trace!(term, ?current, "incremental match");

        let mut effects = Vec::new();
        if options.hlsearch {
            effects.push(SideEffect::HighlightAll(view.find_all(&pattern)));
        }
        effects.push(SideEffect::HighlightCurrent(current));
        effects.push(SideEffect::ShowPoint(current.begin()));
        MotionOutput {
            selection,
            effects,
            outcome: Outcome::Moved,
        }
    }

    /// Commit `term` through the regular search motion.
    ///
    /// # Errors
    ///
    /// Whatever [`apply_motion`] reports.
    pub fn confirm(
        self,
        view: &dyn TextQuery,
        session: &mut Session,
        options: &MotionOptions,
        term: &str,
        count: Option<usize>,
    ) -> Result<MotionOutput, MotionError> {
        let args = MotionArgs {
            search: Some(term.to_string()),
            ..MotionArgs::default()
        };
        let mut request = MotionRequest::new(self.motion(), self.mode).with_args(args);
        request.count = count;
        apply_motion(view, session, options, &request, &self.selection)
    }

    /// Abandon the prompt: the saved selection and scroll position.
    #[must_use]
    pub fn cancel(self) -> (MotionOutput, Viewport) {
        let output = MotionOutput {
            selection: self.selection,
            effects: vec![SideEffect::ClearHighlight],
            outcome: Outcome::NoOp,
        };
        (output, self.viewport)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
