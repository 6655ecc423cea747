//! Builder utilities for ergonomic tree construction.
//!
//! Every node type has a constructor function here returning a
//! [`BoxedNode`], so trees read as nested calls:
//!
//! ```rust
//! use bvtree::builder::*;
//! use bvtree::{Node, Status};
//!
//! let mut tree = catch_abort(if_branch(
//!     lambda_bool(|hp: &mut u32| *hp > 10),
//!     lambda(|_hp: &mut u32| Status::Success),
//!     op_abort(),
//! ));
//!
//! let mut hp = 3;
//! tree.reset(&mut hp).unwrap();
//! assert_eq!(tree.update(&mut hp), Ok(Status::Failure));
//! ```
//!
//! The timing constructors without a clock argument use
//! [`SystemClock::shared`]; the `*_with_clock` variants take any
//! [`SharedClock`], such as a [`ManualClock`](crate::ManualClock) in tests.

use crate::{
    AbortOnFailure, AlwaysSucceed, ArgRef, BoxedNode, CatchAbort, CellCondition, Delay, ForceAbort,
    IfBranch, IfCheck, Inverter, Lambda, LoopRepeat, LoopWhile, RepeatCount, SharedClock, Slowdown,
    Stage, Status, SystemClock, Timeout,
};

/// Creates a leaf that returns `update`'s status verbatim.
#[inline]
pub fn lambda<C: 'static>(update: impl FnMut(&mut C) -> Status + Send + 'static) -> BoxedNode<C> {
    lambda_with_reset(|_ctx: &mut C| {}, update)
}

/// Creates a leaf that also runs `reset` on every reset.
#[inline]
pub fn lambda_with_reset<C: 'static>(
    reset: impl FnMut(&mut C) + Send + 'static,
    update: impl FnMut(&mut C) -> Status + Send + 'static,
) -> BoxedNode<C> {
    Box::new(Lambda::new(reset, update))
}

/// Creates a leaf from a predicate: `true` is `Success`, `false` is `Failure`.
#[inline]
pub fn lambda_bool<C: 'static>(
    predicate: impl FnMut(&mut C) -> bool + Send + 'static,
) -> BoxedNode<C> {
    lambda_bool_with_reset(|_ctx: &mut C| {}, predicate)
}

/// Predicate leaf with a reset hook.
#[inline]
pub fn lambda_bool_with_reset<C: 'static>(
    reset: impl FnMut(&mut C) + Send + 'static,
    mut predicate: impl FnMut(&mut C) -> bool + Send + 'static,
) -> BoxedNode<C> {
    lambda_with_reset(reset, move |ctx: &mut C| Status::from(predicate(ctx)))
}

/// Creates a [`Stage`] leaf.
///
/// `body` runs once per activation and receives the stage's cell, which
/// holds `Pending` until `body` (or whoever it hands the cell to) assigns a
/// final [`Status`].
#[inline]
pub fn lambda_stage<C: 'static>(
    body: impl FnMut(&mut C, &ArgRef) + Send + 'static,
) -> BoxedNode<C> {
    Box::new(Stage::new(body))
}

/// Creates an [`IfCheck`] node.
#[inline]
pub fn if_check<C: 'static>(check: BoxedNode<C>, operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(IfCheck::new(check, operation))
}

/// Creates an [`IfBranch`] node.
#[inline]
pub fn if_branch<C: 'static>(
    check: BoxedNode<C>,
    on_true: BoxedNode<C>,
    on_false: BoxedNode<C>,
) -> BoxedNode<C> {
    Box::new(IfBranch::new(check, on_true, on_false))
}

/// Creates a [`LoopWhile`] node.
#[inline]
pub fn loop_while<C: 'static>(check: BoxedNode<C>, operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(LoopWhile::new(check, operation))
}

/// Creates a [`LoopWhile`] whose condition is read from `cell`.
///
/// See [`CellCondition`] for how the cell's payload is interpreted.
#[inline]
pub fn loop_while_arg<C: 'static>(cell: ArgRef, operation: BoxedNode<C>) -> BoxedNode<C> {
    loop_while(Box::new(CellCondition::new(cell)), operation)
}

/// Creates a [`LoopRepeat`] running `operation` `count` times.
///
/// A negative `count` is reported by `reset`.
#[inline]
pub fn loop_repeat<C: 'static>(count: i64, operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(LoopRepeat::new(RepeatCount::Fixed(count), operation))
}

/// Creates a [`LoopRepeat`] whose count is read from an integer `cell` on
/// every reset.
#[inline]
pub fn loop_repeat_arg<C: 'static>(cell: ArgRef, operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(LoopRepeat::new(RepeatCount::Cell(cell), operation))
}

/// Creates a [`CatchAbort`] node.
#[inline]
pub fn catch_abort<C: 'static>(operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(CatchAbort::new(operation))
}

/// Creates an [`AbortOnFailure`] node.
#[inline]
pub fn abort_failure<C: 'static>(operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(AbortOnFailure::new(operation))
}

/// Creates an always-succeed node.
///
/// Shorthand for `Box::new(AlwaysSucceed::new(operation))`.
#[inline]
pub fn always_success<C: 'static>(operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(AlwaysSucceed::new(operation))
}

/// Creates an inverter node.
///
/// Shorthand for `Box::new(Inverter::new(operation))`.
#[inline]
pub fn op_not<C: 'static>(operation: BoxedNode<C>) -> BoxedNode<C> {
    Box::new(Inverter::new(operation))
}

/// Creates a leaf that always aborts.
#[inline]
pub fn op_abort<C: 'static>() -> BoxedNode<C> {
    Box::new(ForceAbort)
}

/// Creates a [`Delay`] on the system clock.
#[inline]
pub fn op_delay<C: 'static>(delay_ms: u64, operation: BoxedNode<C>) -> BoxedNode<C> {
    op_delay_with_clock(SystemClock::shared(), delay_ms, operation)
}

/// Creates a [`Delay`] on `clock`.
#[inline]
pub fn op_delay_with_clock<C: 'static>(
    clock: SharedClock,
    delay_ms: u64,
    operation: BoxedNode<C>,
) -> BoxedNode<C> {
    Box::new(Delay::new(clock, delay_ms, operation))
}

/// Creates a leaf that succeeds once `delay_ms` has passed.
#[inline]
pub fn op_wait<C: 'static>(delay_ms: u64) -> BoxedNode<C> {
    op_wait_with_clock(SystemClock::shared(), delay_ms)
}

/// [`op_wait`] on `clock`.
#[inline]
pub fn op_wait_with_clock<C: 'static>(clock: SharedClock, delay_ms: u64) -> BoxedNode<C> {
    op_delay_with_clock(clock, delay_ms, lambda(|_ctx: &mut C| Status::Success))
}

/// Creates a [`Timeout`] on the system clock.
#[inline]
pub fn op_timeout<C: 'static>(timeout_ms: u64, operation: BoxedNode<C>) -> BoxedNode<C> {
    op_timeout_with_clock(SystemClock::shared(), timeout_ms, operation)
}

/// Creates a [`Timeout`] on `clock`.
#[inline]
pub fn op_timeout_with_clock<C: 'static>(
    clock: SharedClock,
    timeout_ms: u64,
    operation: BoxedNode<C>,
) -> BoxedNode<C> {
    Box::new(Timeout::new(clock, timeout_ms, operation))
}

/// Creates a [`Slowdown`] on the system clock.
#[inline]
pub fn op_slowdown<C: 'static>(min_ms: u64, operation: BoxedNode<C>) -> BoxedNode<C> {
    op_slowdown_with_clock(SystemClock::shared(), min_ms, operation)
}

/// Creates a [`Slowdown`] on `clock`.
#[inline]
pub fn op_slowdown_with_clock<C: 'static>(
    clock: SharedClock,
    min_ms: u64,
    operation: BoxedNode<C>,
) -> BoxedNode<C> {
    Box::new(Slowdown::new(clock, min_ms, operation))
}

/// Wraps `node` in a [`SharedNode`](crate::SharedNode) so it can be
/// embedded under more than one parent.
#[inline]
pub fn shared<C: 'static>(node: BoxedNode<C>) -> crate::SharedNode<C> {
    crate::SharedNode::new(node)
}
