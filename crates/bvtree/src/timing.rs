//! Time-based nodes.
//!
//! Each node starts its [`Timer`] on the first `update` after a `reset` and
//! compares elapsed milliseconds against its duration on every later call.
//! Nothing here sleeps; waiting is reported as `Pending`.

use tracing::trace;

use crate::{BoxedNode, Node, Result, SharedClock, Status, Timer};

/// Holds `operation` back until `delay_ms` has passed.
///
/// # Semantics
///
/// - While elapsed time is at most `delay_ms`, returns `Pending` without
///   touching the operation
/// - Afterwards, every `update` steps the operation and returns its status
pub struct Delay<C> {
    delay_ms: u64,
    timer: Timer,
    running: bool,
    operation: BoxedNode<C>,
}

impl<C> Delay<C> {
    /// Creates a delay of `delay_ms` in front of `operation`, timed by `clock`.
    pub fn new(clock: SharedClock, delay_ms: u64, operation: BoxedNode<C>) -> Self {
        Self {
            delay_ms,
            timer: Timer::new(clock),
            running: false,
            operation,
        }
    }
}

impl<C> Node<C> for Delay<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.running = false;
        self.operation.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        if !self.running {
            self.timer.restart();
            self.running = true;
        }

        if self.timer.elapsed_ms() <= self.delay_ms {
            return Ok(Status::Pending);
        }
        self.operation.update(ctx)
    }
}

/// Fails `operation` once `timeout_ms` has passed.
///
/// # Semantics
///
/// - While elapsed time is at most `timeout_ms`, steps the operation and
///   returns its status
/// - Afterwards, returns `Failure` without stepping the operation
///
/// Expiry is a plain `Failure`; wrap in
/// [`AbortOnFailure`](crate::AbortOnFailure) when it must stop the tree.
pub struct Timeout<C> {
    timeout_ms: u64,
    timer: Timer,
    running: bool,
    operation: BoxedNode<C>,
}

impl<C> Timeout<C> {
    /// Creates a timeout of `timeout_ms` around `operation`, timed by `clock`.
    pub fn new(clock: SharedClock, timeout_ms: u64, operation: BoxedNode<C>) -> Self {
        Self {
            timeout_ms,
            timer: Timer::new(clock),
            running: false,
            operation,
        }
    }
}

impl<C> Node<C> for Timeout<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.running = false;
        self.operation.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        if !self.running {
            self.timer.restart();
            self.running = true;
        }

        let elapsed = self.timer.elapsed_ms();
        if elapsed > self.timeout_ms {
            trace!(elapsed, timeout_ms = self.timeout_ms, "timeout expired");
            return Ok(Status::Failure);
        }
        self.operation.update(ctx)
    }
}

/// Pads a fast operation to a minimum visible duration.
///
/// # Semantics
///
/// - The operation is stepped until it returns `Success` or `Failure`;
///   `Pending` and `Abort` are returned as-is
/// - The verdict is cached and the timer restarted at that moment
/// - Until `min_ms` has elapsed since then, returns `Pending`; afterwards,
///   returns the cached verdict without stepping the operation again
pub struct Slowdown<C> {
    min_ms: u64,
    timer: Timer,
    done: Option<Status>,
    operation: BoxedNode<C>,
}

impl<C> Slowdown<C> {
    /// Creates a slowdown holding `operation`'s verdict for `min_ms`.
    pub fn new(clock: SharedClock, min_ms: u64, operation: BoxedNode<C>) -> Self {
        Self {
            min_ms,
            timer: Timer::new(clock),
            done: None,
            operation,
        }
    }
}

impl<C> Node<C> for Slowdown<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.done = None;
        self.operation.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        let verdict = match self.done {
            Some(verdict) => verdict,
            None => match self.operation.update(ctx)? {
                verdict @ (Status::Success | Status::Failure) => {
                    trace!(%verdict, min_ms = self.min_ms, "slowdown captured verdict");
                    self.done = Some(verdict);
                    self.timer.restart();
                    verdict
                }
                status => return Ok(status),
            },
        };

        if self.timer.elapsed_ms() >= self.min_ms {
            Ok(verdict)
        } else {
            Ok(Status::Pending)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use crate::builder::lambda;

    #[derive(Default)]
    struct TestContext {
        calls: u32,
    }

    fn returning(status: Status) -> BoxedNode<TestContext> {
        lambda(move |ctx: &mut TestContext| {
            ctx.calls += 1;
            status
        })
    }

    #[test]
    fn delay_waits_then_delegates() {
        let clock = ManualClock::new();
        let mut node = Delay::new(clock.shared(), 50, returning(Status::Failure));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(50);
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        assert_eq!(ctx.calls, 0);

        clock.advance(1);
        assert_eq!(node.update(&mut ctx), Ok(Status::Failure));
        assert_eq!(ctx.calls, 1);
    }

    #[test]
    fn delay_timer_starts_on_first_update() {
        let clock = ManualClock::new();
        let mut node = Delay::new(clock.shared(), 10, returning(Status::Success));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        // Time spent before the first update does not count.
        clock.advance(100);
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(11);
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));
    }

    #[test]
    fn delay_restarts_after_reset() {
        let clock = ManualClock::new();
        let mut node = Delay::new(clock.shared(), 10, returning(Status::Success));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        node.update(&mut ctx).unwrap();
        clock.advance(20);
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
    }

    #[test]
    fn timeout_fails_after_expiry_without_stepping() {
        let clock = ManualClock::new();
        let mut node = Timeout::new(clock.shared(), 100, returning(Status::Pending));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(100);
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        assert_eq!(ctx.calls, 2);

        clock.advance(1);
        assert_eq!(node.update(&mut ctx), Ok(Status::Failure));
        assert_eq!(ctx.calls, 2);
    }

    #[test]
    fn timeout_passes_verdict_through_in_time() {
        let clock = ManualClock::new();
        let mut node = Timeout::new(clock.shared(), 100, returning(Status::Abort));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Abort));
    }

    #[test]
    fn slowdown_holds_verdict_until_elapsed() {
        let clock = ManualClock::new();
        let mut node = Slowdown::new(clock.shared(), 200, returning(Status::Success));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(199);
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(1);
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));
        assert_eq!(node.update(&mut ctx), Ok(Status::Success));
        assert_eq!(ctx.calls, 1);
    }

    #[test]
    fn slowdown_times_from_the_verdict() {
        let clock = ManualClock::new();
        let operation = lambda(|ctx: &mut TestContext| {
            ctx.calls += 1;
            if ctx.calls < 3 {
                Status::Pending
            } else {
                Status::Failure
            }
        });
        let mut node = Slowdown::new(clock.shared(), 50, operation);
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(40);
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(40);
        // Verdict captured now; the 80 ms already spent do not count.
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(49);
        assert_eq!(node.update(&mut ctx), Ok(Status::Pending));
        clock.advance(1);
        assert_eq!(node.update(&mut ctx), Ok(Status::Failure));
        assert_eq!(ctx.calls, 3);
    }

    #[test]
    fn slowdown_does_not_cache_abort() {
        let clock = ManualClock::new();
        let mut node = Slowdown::new(clock.shared(), 500, returning(Status::Abort));
        let mut ctx = TestContext::default();

        node.reset(&mut ctx).unwrap();
        assert_eq!(node.update(&mut ctx), Ok(Status::Abort));
        assert_eq!(node.update(&mut ctx), Ok(Status::Abort));
        assert_eq!(ctx.calls, 2);
    }
}
