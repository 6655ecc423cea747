//! Non-blocking behavior tree engine for multi-tick game tasks.
//!
//! Long-running operations (walking a path, a combat exchange, a spell with
//! a cast time) are assembled from small reusable nodes and driven to
//! completion across many polling ticks without blocking the thread that
//! steps them.
//!
//! - **Four outcomes**: `Success`, `Failure`, `Pending` (call again later)
//!   and `Abort` (stop, do not retry here)
//! - **Poll-driven**: suspension is a returned `Pending`; nothing sleeps
//! - **Explicit activations**: `reset` starts a node fresh, `update` steps it
//! - **Injectable time**: timing nodes read a [`Clock`], so tests can use a
//!   [`ManualClock`]
//!
//! # Architecture
//!
//! - [`Node`]: Core trait for all nodes; [`BoxedNode`] is an owned child
//! - [`Status`]: The four-valued outcome
//! - [`ArgRef`]: Shared capture cell for stages and cell-driven loops
//! - Leaves: [`Lambda`], [`Stage`], [`ForceAbort`]
//! - Conditionals: [`IfCheck`], [`IfBranch`]
//! - Loops: [`LoopWhile`], [`LoopRepeat`]
//! - Decorators: [`CatchAbort`], [`AbortOnFailure`], [`AlwaysSucceed`], [`Inverter`]
//! - Timing: [`Delay`], [`Timeout`], [`Slowdown`]
//! - [`Driver`]: Optional per-tick stepping with a [`DriverConfig`]
//!
//! Trees are usually built with the functions in [`builder`].

pub mod arg;
pub mod builder;
pub mod clock;
pub mod conditional;
pub mod config;
pub mod decorator;
pub mod driver;
pub mod error;
pub mod leaf;
pub mod looping;
pub mod node;
pub mod status;
pub mod timing;

// Re-export core types for ergonomic API
pub use arg::{ArgRef, ArgType, ArgValue};
pub use clock::{Clock, ManualClock, SharedClock, SystemClock, Timer};
pub use conditional::{IfBranch, IfCheck};
pub use config::{DriverConfig, TickPolicy};
pub use decorator::{AbortOnFailure, AlwaysSucceed, CatchAbort, ForceAbort, Inverter};
pub use driver::Driver;
pub use error::{BvError, ErrorSeverity, Result};
pub use leaf::{Lambda, Stage};
pub use looping::{CellCondition, LoopRepeat, LoopWhile, RepeatCount};
pub use node::{BoxedNode, Node, SharedNode};
pub use status::Status;
pub use timing::{Delay, Slowdown, Timeout};
