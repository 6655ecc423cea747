//! Conditional nodes.
//!
//! [`IfCheck`] gates an operation behind a check; [`IfBranch`] picks one of
//! two operations from the check's verdict. Both remember which phase they
//! are in, so a check that passed on an earlier tick is not re-run while the
//! operation is still pending.
//!
//! Once the chosen operation finishes, its `Success` and `Failure` both
//! collapse to `Success` at this level: the check decides whether the
//! operation runs, and a finished operation counts as "done".

use tracing::trace;

use crate::{BoxedNode, Node, Result, Status};

/// Runs `operation` only after `check` succeeds.
///
/// # Semantics
///
/// While checking:
/// - `Success` moves on to the operation within the same `update`
/// - `Failure`, `Pending` and `Abort` are returned as-is
///
/// While operating:
/// - `Success` or `Failure` returns `Success`
/// - `Pending` and `Abort` are returned as-is
pub struct IfCheck<C> {
    check: BoxedNode<C>,
    operation: BoxedNode<C>,
    in_check: bool,
}

impl<C> IfCheck<C> {
    /// Creates a node that runs `operation` once `check` succeeds.
    pub fn new(check: BoxedNode<C>, operation: BoxedNode<C>) -> Self {
        Self {
            check,
            operation,
            in_check: true,
        }
    }
}

impl<C> Node<C> for IfCheck<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.in_check = true;
        self.check.reset(ctx)?;
        self.operation.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        if self.in_check {
            match self.check.update(ctx)? {
                Status::Success => {
                    trace!("if_check passed");
                    self.in_check = false;
                }
                status => return Ok(status),
            }
        }

        Ok(match self.operation.update(ctx)? {
            Status::Success | Status::Failure => Status::Success,
            status => status,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    InCheck,
    OnTrue,
    OnFalse,
}

/// Runs `on_true` or `on_false` depending on `check`.
///
/// # Semantics
///
/// While checking:
/// - `Success` selects `on_true`, `Failure` selects `on_false`; the chosen
///   branch is stepped within the same `update`
/// - `Pending` and `Abort` are returned as-is
///
/// Once a branch is chosen it is driven on every `update`; its `Success` or
/// `Failure` returns `Success`, its `Pending` and `Abort` are returned as-is.
pub struct IfBranch<C> {
    check: BoxedNode<C>,
    on_true: BoxedNode<C>,
    on_false: BoxedNode<C>,
    branch: Branch,
}

impl<C> IfBranch<C> {
    /// Creates a node that branches on the verdict of `check`.
    pub fn new(check: BoxedNode<C>, on_true: BoxedNode<C>, on_false: BoxedNode<C>) -> Self {
        Self {
            check,
            on_true,
            on_false,
            branch: Branch::InCheck,
        }
    }
}

impl<C> Node<C> for IfBranch<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.check.reset(ctx)?;
        self.on_true.reset(ctx)?;
        self.on_false.reset(ctx)?;
        self.branch = Branch::InCheck;
        Ok(())
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        if self.branch == Branch::InCheck {
            self.branch = match self.check.update(ctx)? {
                Status::Success => Branch::OnTrue,
                Status::Failure => Branch::OnFalse,
                status => return Ok(status),
            };
            trace!(branch = ?self.branch, "if_branch selected");
        }

        let operation = match self.branch {
            Branch::OnTrue => &mut self.on_true,
            _ => &mut self.on_false,
        };

        Ok(match operation.update(ctx)? {
            Status::Success | Status::Failure => Status::Success,
            status => status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{lambda, lambda_bool};

    #[derive(Default)]
    struct TestContext {
        flag: bool,
        check_calls: u32,
        true_calls: u32,
        false_calls: u32,
        pending_left: u32,
    }

    fn check() -> BoxedNode<TestContext> {
        lambda_bool(|ctx: &mut TestContext| {
            ctx.check_calls += 1;
            ctx.flag
        })
    }

    fn on_true(result: Status) -> BoxedNode<TestContext> {
        lambda(move |ctx: &mut TestContext| {
            ctx.true_calls += 1;
            result
        })
    }

    fn on_false(result: Status) -> BoxedNode<TestContext> {
        lambda(move |ctx: &mut TestContext| {
            ctx.false_calls += 1;
            result
        })
    }

    #[test]
    fn if_check_failure_skips_operation() {
        let mut node = IfCheck::new(check(), on_true(Status::Success));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Failure));
        assert_eq!(ctx.true_calls, 0);
    }

    #[test]
    fn if_check_collapses_operation_failure_to_success() {
        // A finished operation reports success even when it failed itself.
        let mut node = IfCheck::new(check(), on_true(Status::Failure));
        let mut ctx = TestContext {
            flag: true,
            ..Default::default()
        };

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));
        assert_eq!(ctx.true_calls, 1);
    }

    #[test]
    fn if_check_does_not_recheck_while_operation_pending() {
        let operation = lambda(|ctx: &mut TestContext| {
            if ctx.pending_left == 0 {
                Status::Success
            } else {
                ctx.pending_left -= 1;
                Status::Pending
            }
        });
        let mut node = IfCheck::new(check(), operation);
        let mut ctx = TestContext {
            flag: true,
            pending_left: 2,
            ..Default::default()
        };

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));
        assert_eq!(ctx.check_calls, 1);
    }

    #[test]
    fn if_check_propagates_abort_from_operation() {
        let mut node = IfCheck::new(check(), on_true(Status::Abort));
        let mut ctx = TestContext {
            flag: true,
            ..Default::default()
        };

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Abort));
    }

    #[test]
    fn if_branch_follows_check_across_resets() {
        let mut node = IfBranch::new(check(), on_true(Status::Success), on_false(Status::Failure));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));
        assert_eq!((ctx.true_calls, ctx.false_calls), (0, 1));

        ctx.flag = true;
        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));
        assert_eq!((ctx.true_calls, ctx.false_calls), (1, 1));
        assert_eq!(ctx.check_calls, 2);
    }

    #[test]
    fn if_branch_keeps_selected_branch_until_reset() {
        let mut node = IfBranch::new(check(), on_true(Status::Pending), on_false(Status::Pending));
        let mut ctx = TestContext {
            flag: true,
            ..Default::default()
        };

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        ctx.flag = false;
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        assert_eq!((ctx.true_calls, ctx.false_calls), (2, 0));
        assert_eq!(ctx.check_calls, 1);
    }

    #[test]
    fn if_branch_pending_check_stays_in_check() {
        let pending_check = lambda(|ctx: &mut TestContext| {
            ctx.check_calls += 1;
            Status::Pending
        });
        let mut node = IfBranch::new(
            pending_check,
            on_true(Status::Success),
            on_false(Status::Success),
        );
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        assert_eq!(ctx.check_calls, 2);
        assert_eq!((ctx.true_calls, ctx.false_calls), (0, 0));
    }
}
