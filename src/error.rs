//! Error types shared by all optics.
//!
//! Two kinds of failure exist and they are kept apart by type:
//!
//! - [`MatchError::NoMatch`] is the benign "variant absent" outcome of a
//!   prism match. `modify`, `over` and every traversal conversion absorb it
//!   as zero foci.
//! - Everything else is a failure of type `E` (the optic's `Error`) and is
//!   always propagated. [`OpticError`] is the failure type used by the
//!   standard instantiations and is a convenient default for callers.
//!
//! # Examples
//!
//! ```rust
//! use contextual_optics::error::{MatchError, OpticError};
//!
//! let error = OpticError::IndexOutOfRange { index: 3, length: 2 };
//! assert_eq!(
//!     format!("{error}"),
//!     "index 3 out of range for sequence of length 2"
//! );
//!
//! let absent: MatchError<OpticError> = MatchError::NoMatch;
//! assert!(absent.is_no_match());
//! assert_eq!(format!("{absent}"), "optics: no match");
//! ```

use thiserror::Error;

/// Failures raised by the standard optics and by callers through the context.
///
/// This is never used to express "no match"; absence has its own channel
/// ([`MatchError::NoMatch`] or `Ok(None)` from a prism preview).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpticError {
    /// A sequence accessor was asked for a position outside `0..length`.
    #[error("index {index} out of range for sequence of length {length}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The length of the sequence at the time of the request.
        length: usize,
    },

    /// The caller's context signalled cancellation.
    #[error("operation cancelled")]
    Cancelled,

    /// A caller-supplied failure with a message.
    #[error("{0}")]
    Custom(String),
}

impl OpticError {
    /// Creates a [`OpticError::Custom`] from anything string-like.
    ///
    /// ```rust
    /// use contextual_optics::error::OpticError;
    ///
    /// let error = OpticError::custom("negative age");
    /// assert_eq!(error, OpticError::Custom("negative age".to_string()));
    /// ```
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Outcome of a prism match that did not produce a focus.
///
/// Returned by [`Prism::extract`](crate::optics::Prism::extract).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError<E> {
    /// The source does not currently hold the variant.
    #[error("optics: no match")]
    NoMatch,

    /// Matching failed for a reason other than absence.
    #[error("{0}")]
    Failed(E),
}

impl<E> MatchError<E> {
    /// Returns `true` for [`MatchError::NoMatch`].
    pub const fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    /// Returns the underlying failure, or `None` for [`MatchError::NoMatch`].
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::NoMatch => None,
            Self::Failed(error) => Some(error),
        }
    }
}

impl<E> From<E> for MatchError<E> {
    fn from(error: E) -> Self {
        Self::Failed(error)
    }
}
