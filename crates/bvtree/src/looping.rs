//! Loop nodes.
//!
//! Both loops drive their body to completion and start the next iteration
//! inside the same `update`; they only hand control back to the driver when
//! the loop ends or a child reports `Pending` or `Abort`. A body that always
//! finishes immediately under a condition that never fails will therefore
//! never return.
//!
//! Between iterations the loop resets the children it is about to re-run, so
//! stateful bodies (stages, timers, nested loops) start each iteration fresh.

use tracing::{trace, warn};

use crate::{ArgRef, ArgValue, BoxedNode, BvError, Node, Result, Status};

/// Repeats `operation` while `check` succeeds.
///
/// # Semantics
///
/// While checking:
/// - `Success` starts (or continues) the body
/// - `Failure` ends the loop and is returned
/// - `Pending` and `Abort` are returned as-is
///
/// While operating:
/// - `Success` or `Failure` finishes the iteration and re-evaluates `check`
/// - `Pending` and `Abort` are returned as-is
pub struct LoopWhile<C> {
    check: BoxedNode<C>,
    operation: BoxedNode<C>,
    in_check: bool,
}

impl<C> LoopWhile<C> {
    /// Creates a loop that runs `operation` while `check` succeeds.
    pub fn new(check: BoxedNode<C>, operation: BoxedNode<C>) -> Self {
        Self {
            check,
            operation,
            in_check: true,
        }
    }
}

impl<C> Node<C> for LoopWhile<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.in_check = true;
        self.check.reset(ctx)?;
        self.operation.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        loop {
            if self.in_check {
                match self.check.update(ctx)? {
                    Status::Success => self.in_check = false,
                    status => return Ok(status),
                }
            }

            match self.operation.update(ctx)? {
                Status::Success | Status::Failure => {
                    trace!("loop_while iteration finished");
                    self.in_check = true;
                    self.check.reset(ctx)?;
                    self.operation.reset(ctx)?;
                }
                status => return Ok(status),
            }
        }
    }
}

/// Loop condition read from a capture cell.
///
/// - `bool`: `true` continues
/// - `int`: non-zero continues
/// - `string`: non-empty continues, empty stops
///
/// An empty cell or any other payload is a configuration error.
#[derive(Debug, Clone)]
pub struct CellCondition {
    cell: ArgRef,
}

impl CellCondition {
    /// Creates a condition that reads `cell` on every `update`.
    pub fn new(cell: ArgRef) -> Self {
        Self { cell }
    }
}

impl<C> Node<C> for CellCondition {
    fn update(&mut self, _ctx: &mut C) -> Result<Status> {
        let keep_going = match self.cell.value() {
            Some(ArgValue::Bool(flag)) => flag,
            Some(ArgValue::Int(n)) => n != 0,
            Some(ArgValue::Str(s)) => !s.is_empty(),
            other => {
                let found = other.as_ref().map_or("empty", ArgValue::kind);
                warn!(found, "loop condition cell holds an unsupported value");
                return Err(BvError::InvalidLoopCondition { found });
            }
        };
        Ok(Status::from(keep_going))
    }
}

/// Where a [`LoopRepeat`] gets its target count.
#[derive(Debug, Clone)]
pub enum RepeatCount {
    /// The same count on every activation.
    Fixed(i64),
    /// Read from an integer cell on every `reset`.
    Cell(ArgRef),
}

impl RepeatCount {
    fn resolve(&self) -> Result<i64> {
        match self {
            Self::Fixed(n) => Ok(*n),
            Self::Cell(cell) => cell.get::<i64>().inspect_err(|err| {
                warn!(%err, "loop_repeat count cell is unusable");
            }),
        }
    }
}

impl From<i64> for RepeatCount {
    fn from(n: i64) -> Self {
        Self::Fixed(n)
    }
}

impl From<ArgRef> for RepeatCount {
    fn from(cell: ArgRef) -> Self {
        Self::Cell(cell)
    }
}

/// Runs `operation` to completion a fixed number of times.
///
/// # Semantics
///
/// - The target count is computed on `reset` and stays fixed for the
///   activation, even if its cell changes meanwhile
/// - Each `Success` or `Failure` of the body counts one iteration
/// - `Pending` and `Abort` are returned as-is without counting
/// - Once the count is reached, returns `Success`
pub struct LoopRepeat<C> {
    count: RepeatCount,
    operation: BoxedNode<C>,
    index: i64,
    repeat: i64,
}

impl<C> LoopRepeat<C> {
    /// Creates a loop that runs `operation` `count` times per activation.
    pub fn new(count: impl Into<RepeatCount>, operation: BoxedNode<C>) -> Self {
        Self {
            count: count.into(),
            operation,
            index: 0,
            repeat: 0,
        }
    }

    /// Iterations completed in the current activation.
    pub fn completed(&self) -> i64 {
        self.index
    }
}

impl<C> Node<C> for LoopRepeat<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.index = 0;
        self.repeat = self.count.resolve()?;
        if self.repeat < 0 {
            warn!(count = self.repeat, "negative repeat count");
            return Err(BvError::NegativeRepeat { count: self.repeat });
        }
        self.operation.reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        while self.index < self.repeat {
            match self.operation.update(ctx)? {
                Status::Success | Status::Failure => {
                    self.index += 1;
                    trace!(
                        index = self.index,
                        repeat = self.repeat,
                        "loop_repeat iteration finished"
                    );
                    if self.index < self.repeat {
                        self.operation.reset(ctx)?;
                    }
                }
                status => return Ok(status),
            }
        }
        Ok(Status::Success)
    }
}
