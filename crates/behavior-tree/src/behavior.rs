//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior nodes. The trait is generic over a context
//! type `C`, allowing nodes to read a snapshot of the world and post
//! requests back to whoever drives them.

use crate::Poll;

/// A suspendable behavior node that can be resumed against a context.
pub trait Behavior<C: ?Sized>: Send {
    /// Run this node until it finishes or suspends.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context. Nodes read the snapshot it
    ///   carries and record requests (movement, messages) on it.
    ///
    /// # Returns
    ///
    /// - `Poll::Pending(wait)` if the node wants to be resumed later
    /// - `Poll::Ready(status)` once the node is finished
    fn resume(&mut self, ctx: &mut C) -> Poll;
}

/// Owned, dynamically dispatched behavior node.
pub type BoxedBehavior<C> = Box<dyn Behavior<C>>;

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C: ?Sized> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn resume(&mut self, ctx: &mut C) -> Poll {
        (**self).resume(ctx)
    }
}

/// Leaf node backed by a closure.
///
/// The closure is called on every resumption and keeps whatever state it
/// captured between calls.
pub struct FromFn<F> {
    step: F,
}

impl<F> FromFn<F> {
    pub fn new(step: F) -> Self {
        Self { step }
    }
}

impl<C, F> Behavior<C> for FromFn<F>
where
    C: ?Sized,
    F: FnMut(&mut C) -> Poll + Send,
{
    #[inline]
    fn resume(&mut self, ctx: &mut C) -> Poll {
        (self.step)(ctx)
    }
}
