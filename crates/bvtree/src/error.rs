//! Fatal errors raised while stepping a tree.
//!
//! Ordinary outcomes (`Failure`, `Abort`) travel as [`Status`](crate::Status)
//! values. A [`BvError`] means the tree itself was assembled wrong, so it is
//! returned through `Err` and no combinator remaps it.

use thiserror::Error;

/// Severity level of a [`BvError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The tree was assembled with invalid parameters or capture cells.
    ///
    /// Retrying the same tree will fail the same way.
    Configuration,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        false
    }
}

/// Errors surfaced to the driver from `reset` or `update`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BvError {
    /// A repeat loop resolved a target count below zero.
    #[error("negative repeat count: {count}")]
    NegativeRepeat { count: i64 },

    /// A capture cell was read while empty.
    #[error("capture cell is empty, expected {expected}")]
    EmptyCell { expected: &'static str },

    /// A capture cell holds a payload of another type.
    #[error("capture cell holds {found}, expected {expected}")]
    CellType {
        expected: &'static str,
        found: &'static str,
    },

    /// A loop condition cell is empty or holds a non bool/int/string payload.
    #[error("loop condition cell holds {found}, expected bool, int or string")]
    InvalidLoopCondition { found: &'static str },
}

impl BvError {
    /// Classifies this error.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NegativeRepeat { .. }
            | Self::EmptyCell { .. }
            | Self::CellType { .. }
            | Self::InvalidLoopCondition { .. } => ErrorSeverity::Configuration,
        }
    }
}

/// Result alias used by every node operation.
pub type Result<T, E = BvError> = core::result::Result<T, E>;
