//! # n-engine: Modal motion engine for n-motion
//!
//! Applies Vim motions to a multi-region selection over any
//! [`TextQuery`](n_text::TextQuery). A motion is a pure transform: the
//! caller passes the mode, count, and arguments, and gets back the new
//! selection plus the side effects to carry out (scrolling, highlights,
//! jump-list entries, a blink).
//!
//! - **[`mode`]**: `Mode` and `VisualKind`, which pick the span rules
//! - **[`selection`]**: `Selection`, a non-empty ordered set of regions
//! - **[`motion`]**: the `Motion` catalog, key parsing, and `apply_motion`
//! - **[`session`]**: per-view state that outlives one motion (last search,
//!   sticky column, block growth direction)
//! - **[`options`]**: `:set`-style search and scroll options
//! - **[`search`]**: `/`, `?`, `*`, `#`, `n`, `N`, and incremental search
//! - **[`text_object`]**: `iw`, `a(`, `i"` and friends
//!
//! The per-family algorithms (linear, line, word, sentence, paragraph,
//! bracket, find, jump, scroll, block) are private; `apply_motion` is the
//! only way in.

pub mod error;
pub mod mode;
pub mod motion;
pub mod options;
pub mod search;
pub mod selection;
pub mod session;
pub mod text_object;

mod block;
mod bracket;
mod find;
mod jump;
mod line;
mod linear;
mod paragraph;
mod scroll;
mod sentence;
mod span;
mod word;

#[cfg(test)]
mod testing;

pub use error::{MotionError, OptionError};
pub use mode::{Mode, VisualKind};
pub use motion::{
    apply_motion, parse_keys, Motion, MotionArgs, MotionOutput, MotionRequest, Outcome, SideEffect,
};
pub use options::{parse_set, MotionOptions, SetDirective};
pub use search::IncrementalSearch;
pub use selection::Selection;
pub use session::{BlockDirection, SearchCommand, SearchState, Session};
pub use text_object::{ObjectKind, TextObject};
