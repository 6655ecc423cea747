//! Core node trait.
//!
//! This module defines the [`Node`] trait, which is the fundamental
//! abstraction for all tree nodes. The trait is generic over a context type
//! `C` that the driver passes through every call, so leaves can read and
//! modify caller state without capturing it. Use `()` when closures carry
//! all the state they need.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{Result, Status};

/// A steppable unit of work.
///
/// A node must be [`reset`](Node::reset) before its first
/// [`update`](Node::update) and again before every re-activation (a new loop
/// iteration, a retried branch). `update` never blocks: work that is not
/// finished reports [`Status::Pending`] and continues on a later call.
pub trait Node<C>: Send {
    /// Discards any progress so the next `update` starts a fresh activation.
    ///
    /// # Errors
    ///
    /// Returns a [`BvError`](crate::BvError) if the node's parameters are
    /// invalid for this activation (for example a negative repeat count).
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Advances this node by one step and reports where it stands.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard.
    ///
    /// # Errors
    ///
    /// Returns a [`BvError`](crate::BvError) only for assembly mistakes such
    /// as a capture cell of the wrong type. Domain outcomes are `Ok`.
    fn update(&mut self, ctx: &mut C) -> Result<Status>;
}

/// Exclusive handle to a node; each combinator owns its children this way.
pub type BoxedNode<C> = Box<dyn Node<C>>;

/// Blanket implementation for boxed nodes.
///
/// This allows `Box<dyn Node<C>>` to also implement `Node<C>`, enabling
/// dynamic dispatch and heterogeneous children.
impl<C> Node<C> for Box<dyn Node<C>> {
    #[inline]
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        (**self).reset(ctx)
    }

    #[inline]
    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        (**self).update(ctx)
    }
}

/// Aliasing handle to a node.
///
/// Every clone drives the *same* progress state: if two parents embed clones
/// of one `SharedNode`, a reset or update through either parent is visible
/// to the other. This is rarely what a tree wants; prefer building two
/// independent subtrees unless the aliasing is the point.
pub struct SharedNode<C> {
    inner: Arc<Mutex<BoxedNode<C>>>,
}

impl<C> SharedNode<C> {
    /// Wraps `node` so it can be embedded under several parents.
    pub fn new(node: BoxedNode<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(node)),
        }
    }

    /// Returns `true` if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<C> Clone for SharedNode<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> Node<C> for SharedNode<C> {
    fn reset(&mut self, ctx: &mut C) -> Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset(ctx)
    }

    fn update(&mut self, ctx: &mut C) -> Result<Status> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .update(ctx)
    }
}
