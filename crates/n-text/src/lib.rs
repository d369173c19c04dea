//! # n-text: Text query layer for n-motion
//!
//! The motion engine never touches storage directly. It asks questions
//! through [`TextQuery`], and this crate provides both the question set and a
//! reference answer:
//!
//! - **[`position`]**: `Position` (line, col) and `Region` (anchor, active end)
//! - **[`query`]**: the `TextQuery` trait, with lines, rows, search, word and
//!   class expansion, viewport
//! - **[`pattern`]**: compiled search patterns with literal/regex and case flags
//! - **[`view`]**: viewport geometry and tab-aware display columns
//! - **[`buffer`]**: `Buffer`, a rope-backed `TextQuery` with folds and view state

pub mod buffer;
pub mod pattern;
pub mod position;
pub mod query;
pub mod view;

pub use buffer::{Buffer, LineEnding};
pub use pattern::{FindFlags, Pattern, PatternError};
pub use position::{Position, Region};
pub use query::{is_word_char, PointClass, TextQuery};
pub use view::Viewport;
