//! Engine errors.
//!
//! Failed searches, unbalanced brackets and mode mismatches are not errors:
//! they come back as [`Outcome::NoOp`](crate::motion::Outcome::NoOp). The
//! variants here are caller bugs or bad configuration.

use thiserror::Error;

/// Errors from [`apply_motion`](crate::motion::apply_motion) and motion parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionError {
    /// A motion was dispatched without an argument it cannot run without,
    /// such as `f` with no target char.
    #[error("{motion}: {reason}")]
    PreconditionFailed {
        motion: &'static str,
        reason: &'static str,
    },

    /// The key sequence does not name a motion.
    #[error("unknown motion: {0}")]
    UnknownMotion(String),

    /// The selection handed in was empty.
    #[error("selection has no regions")]
    EmptySelection,
}

/// Errors from applying `:set` directives to [`MotionOptions`](crate::options::MotionOptions).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("E518: Unknown option: {0}")]
    UnknownOption(String),

    #[error("E474: Invalid argument: {0} is not a boolean option")]
    NotBoolean(String),

    #[error("E521: Number required after =: {name}={value}")]
    InvalidValue { name: String, value: String },
}
