//! Status returned by tree nodes.

/// The result of stepping a node once.
///
/// # Multi-tick Semantics
///
/// Work may span many driver ticks:
/// - `Success` / `Failure` mean the node finished this activation with a verdict
/// - `Pending` means "not done yet, call `update` again on a later tick"
/// - `Abort` means an unrecoverable failure that should propagate without retry
///
/// The enum is closed, so a combinator can never observe a status outside
/// these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The node finished and its goal was met.
    Success,

    /// The node finished without meeting its goal.
    ///
    /// This is an ordinary outcome; parents may retry or branch on it.
    Failure,

    /// The node has not finished yet.
    Pending,

    /// The node hit a condition that must not be retried at this level.
    Abort,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Pending`.
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, Status::Pending)
    }

    /// Returns `true` if this status is `Abort`.
    #[inline]
    pub fn is_abort(self) -> bool {
        matches!(self, Status::Abort)
    }

    /// Returns `true` for the two verdicts, `Success` and `Failure`.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, Status::Success | Status::Failure)
    }

    /// Swaps `Success` and `Failure`; `Pending` and `Abort` are unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            other => other,
        }
    }

    /// Lowercase name, used in log fields and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Pending => "pending",
            Status::Abort => "abort",
        }
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
