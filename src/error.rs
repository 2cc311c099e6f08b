//! # Error Types
//!
//! This module defines all error types for refrain.
//!
//! Parameter errors carry the offending key (and token, where there is one)
//! so users can fix their phrase file; process errors carry the stderr of
//! the external tool that failed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefrainError {
    /// A required parameter key (`mel`, `med`, `deg`, `dur`) is absent,
    /// or `xdd` was needed for diminished-degree handling but not given.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A referenced cyclic sequence has no elements.
    #[error("parameter `{0}` must not be empty")]
    EmptyParameter(&'static str),

    /// A value token failed numeric conversion.
    ///
    /// # Example
    /// ```
    /// # use refrain::RefrainError;
    /// let err = RefrainError::InvalidParameter {
    ///     key: "bpm",
    ///     value: "fast".to_string(),
    ///     message: "expected an integer".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid value `fast` for parameter `bpm`: expected an integer"
    /// );
    /// ```
    #[error("invalid value `{value}` for parameter `{key}`: {message}")]
    InvalidParameter {
        key: &'static str,
        value: String,
        message: String,
    },

    /// An accessor was called on a `Generator` that has not been fed.
    #[error("no parameters loaded; feed a phrase file first")]
    NoParameters,

    /// A mapped scale-degree offset fell outside the pitch table.
    #[error("scale degree offset {0} is outside the pitch table")]
    DegreeOutOfRange(i64),

    /// An `acc` chord selector fell outside the chord table.
    #[error("chord selector {0} is outside the chord table")]
    ChordOutOfRange(i64),

    /// The typesetting engine exited with a non-zero status.
    #[error("lilypond failed: {message}")]
    RenderFailed { message: String },

    /// The player exited with a non-zero status.
    #[error("player failed: {message}")]
    PlayerFailed { message: String },

    /// File or child-process plumbing failed. A missing `lilypond` or
    /// `timidity` executable surfaces here as a not-found error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
