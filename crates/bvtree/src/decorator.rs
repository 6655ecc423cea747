//! Decorator nodes.
//!
//! Decorators wrap a single child, pass `reset` through untouched and remap
//! the child's status. They never change *when* the child runs, only what
//! the parent sees. Configuration errors from the child are propagated as
//! errors and are not remapped.
//!
//! | Decorator        | Success | Failure | Pending | Abort   |
//! |------------------|---------|---------|---------|---------|
//! | [`CatchAbort`]     | Success | Failure | Pending | Failure |
//! | [`AbortOnFailure`] | Success | Abort   | Pending | Abort   |
//! | [`AlwaysSucceed`]  | Success | Success | Pending | Abort   |
//! | [`Inverter`]       | Failure | Success | Pending | Abort   |

use crate::{BoxedNode, Node, Result, Status};

/// Turns `Abort` into `Failure` so a parent can retry or branch on it.
pub struct CatchAbort<C> {
    child: BoxedNode<C>,
}

impl<C> CatchAbort<C> {
    pub fn new(child: BoxedNode<C>) -> Self {
        Self { child }
    }
}

impl<C> Node<C> for CatchAbort<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.child.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        Ok(match self.child.update(ctx)? {
            Status::Abort => Status::Failure,
            status => status,
        })
    }
}

/// Escalates `Failure` to `Abort`.
///
/// Useful around a timeout, whose expiry is an ordinary `Failure`, when the
/// surrounding tree must stop instead of retrying.
pub struct AbortOnFailure<C> {
    child: BoxedNode<C>,
}

impl<C> AbortOnFailure<C> {
    pub fn new(child: BoxedNode<C>) -> Self {
        Self { child }
    }
}

impl<C> Node<C> for AbortOnFailure<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.child.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        Ok(match self.child.update(ctx)? {
            Status::Failure => Status::Abort,
            status => status,
        })
    }
}

/// Reports `Success` whenever the child finishes.
///
/// # Semantics
///
/// - If the child returns `Success` or `Failure`, returns `Success`
/// - `Pending` and `Abort` pass through, so the child still runs to
///   completion and can still stop the tree
///
/// This is useful for optional steps that shouldn't fail their parent.
pub struct AlwaysSucceed<C> {
    child: BoxedNode<C>,
}

impl<C> AlwaysSucceed<C> {
    /// Creates a new always-succeed wrapper around the given child.
    pub fn new(child: BoxedNode<C>) -> Self {
        Self { child }
    }
}

impl<C> Node<C> for AlwaysSucceed<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.child.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        Ok(match self.child.update(ctx)? {
            Status::Failure => Status::Success,
            status => status,
        })
    }
}

/// Inverts the verdict of its child.
///
/// This is analogous to a logical NOT (!) operation on `Success`/`Failure`;
/// `Pending` and `Abort` are not verdicts and pass through.
pub struct Inverter<C> {
    child: BoxedNode<C>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter that wraps the given child.
    pub fn new(child: BoxedNode<C>) -> Self {
        Self { child }
    }
}

impl<C> Node<C> for Inverter<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.child.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        self.child.update(ctx).map(Status::invert)
    }
}

/// Leaf that always reports `Abort`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceAbort;

impl<C> Node<C> for ForceAbort {
    fn update(&mut self, _ctx: &mut C) -> Result<Status> {
        Ok(Status::Abort)
    }
}
