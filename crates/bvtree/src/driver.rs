//! Minimal tick driver for a tree.
//!
//! The engine itself has no scheduler: whoever owns a tree calls `update`
//! on its root once per scheduling tick. [`Driver`] packages that
//! responsibility (lazy first reset, tick policy, completion handling) for
//! embedders that do not need anything more elaborate. It never sleeps or
//! spawns; one call to [`Driver::tick`] does a bounded amount of work.

use tracing::{Span, debug, debug_span, warn};

use crate::{BoxedNode, DriverConfig, Result, Status};

/// Owns a root node and steps it according to a [`DriverConfig`].
pub struct Driver<C> {
    root: BoxedNode<C>,
    config: DriverConfig,
    span: Span,
    started: bool,
    ticks: u64,
    last_status: Option<Status>,
}

impl<C> Driver<C> {
    /// Creates a driver with the default configuration.
    pub fn new(root: BoxedNode<C>) -> Self {
        Self::with_config(root, DriverConfig::default())
    }

    /// Creates a driver stepping `root` according to `config`.
    pub fn with_config(root: BoxedNode<C>, config: DriverConfig) -> Self {
        Self {
            root,
            config,
            span: debug_span!("bvtree_driver", label = "tree"),
            started: false,
            ticks: 0,
            last_status: None,
        }
    }

    /// Names this driver in its log span.
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.span = debug_span!("bvtree_driver", label);
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Status returned by the most recent successful tick.
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    /// Number of ticks driven so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns `true` if the tree has been started and has not finished.
    ///
    /// With `reset_on_completion`, a tree that just settled is reported as
    /// finished until the next tick steps the fresh activation.
    pub fn is_running(&self) -> bool {
        self.started && self.last_status.is_none_or(Status::is_pending)
    }

    /// Resets the root so the next tick begins a fresh activation.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors raised by any node's `reset`.
    pub fn start(&mut self, ctx: &mut C) -> Result<()> {
        let span = self.span.clone();
        let _guard = span.enter();
        self.last_status = None;
        self.restart(ctx)
    }

    /// Resets the root without forgetting the last reported status.
    fn restart(&mut self, ctx: &mut C) -> Result<()> {
        self.started = false;
        self.root.reset(ctx).inspect_err(|err| {
            warn!(%err, "tree reset failed");
        })?;
        self.started = true;
        debug!("tree started");
        Ok(())
    }

    /// Drives the tree for one tick and returns its status.
    ///
    /// Starts the tree first if [`start`](Self::start) was never called.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors. The driver then requires a restart,
    /// which the next tick performs automatically.
    pub fn tick(&mut self, ctx: &mut C) -> Result<Status> {
        let span = self.span.clone();
        let _guard = span.enter();

        if !self.started {
            self.last_status = None;
            self.restart(ctx)?;
        }
        self.ticks += 1;

        let mut status = Status::Pending;
        for _ in 0..self.config.updates_per_tick() {
            status = match self.root.update(ctx) {
                Ok(status) => status,
                Err(err) => {
                    warn!(%err, tick = self.ticks, "tree update failed");
                    self.started = false;
                    return Err(err);
                }
            };
            if !status.is_pending() {
                break;
            }
        }
        self.last_status = Some(status);

        if !status.is_pending() {
            debug!(tick = self.ticks, %status, "tree settled");
            if self.config.reset_on_completion {
                self.restart(ctx)?;
            }
        }
        Ok(status)
    }
}
