//! Leaf nodes wrapping external callables.
//!
//! Leaves are where a tree touches the outside world: [`Lambda`] forwards to
//! a pair of closures, and [`Stage`] turns "start something, learn the
//! outcome later" into a single node.

use tracing::trace;

use crate::{ArgRef, Node, Result, Status};

/// Forwards `reset` and `update` to closures.
///
/// The update closure's status is returned verbatim.
pub struct Lambda<R, U> {
    reset_fn: R,
    update_fn: U,
}

impl<R, U> Lambda<R, U> {
    /// Creates a leaf from a reset closure and an update closure.
    pub fn new(reset_fn: R, update_fn: U) -> Self {
        Self {
            reset_fn,
            update_fn,
        }
    }
}

impl<C, R, U> Node<C> for Lambda<R, U>
where
    R: FnMut(&mut C) + Send,
    U: FnMut(&mut C) -> Status + Send,
{
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        (self.reset_fn)(ctx);
        Ok(())
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        Ok((self.update_fn)(ctx))
    }
}

/// A single stage of work whose completion may arrive later.
///
/// # Semantics
///
/// - `reset` empties the stage's capture cell
/// - The first `update` after a reset stores `Pending` in the cell and calls
///   the body once with the cell
/// - Every `update` returns whatever status the cell holds
///
/// The body may assign a verdict immediately, or clone the cell and hand it
/// to whatever will finish the work (a reply handler, a timer callback).
/// Until someone assigns a new status, the stage keeps reporting `Pending`.
///
/// # Hazard
///
/// `reset` empties the same cell rather than allocating a new one, so every
/// handle cloned in earlier activations still points at it. A late reply to
/// an abandoned activation will complete the current one. Bodies that hand
/// the cell out should make sure stale holders drop it or ignore it.
pub struct Stage<F> {
    cell: ArgRef,
    body: F,
}

impl<F> Stage<F> {
    /// Creates a stage around `body`.
    pub fn new(body: F) -> Self {
        Self {
            cell: ArgRef::new(),
            body,
        }
    }

    /// The cell this stage reads its status from.
    pub fn cell(&self) -> &ArgRef {
        &self.cell
    }
}

impl<C, F> Node<C> for Stage<F>
where
    F: FnMut(&mut C, &ArgRef) + Send,
{
    fn reset(&mut self, _ctx: &mut C) -> Result<()> {
        self.cell.clear();
        Ok(())
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        if !self.cell.has_value() {
            self.cell.assign(Status::Pending);
            trace!("stage triggered");
            (self.body)(ctx, &self.cell);
        }
        self.cell.get::<Status>()
    }
}
