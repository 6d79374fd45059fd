//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! [`Sequence`] is the chaining operator: run A to completion, then B.

use crate::{Behavior, Poll, Status};

/// Executes child behaviors in order until one fails.
///
/// # Semantics
///
/// A `Sequence` node resumes its children from left to right:
/// - If the current child suspends, the sequence suspends with the same wait
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Success`, the sequence **continues** with the next child
///   in the same resumption
/// - If all children return `Success`, the sequence returns `Success`
///
/// The position is remembered between resumptions, so a child that already
/// finished is never resumed again.
pub struct Sequence<C: ?Sized> {
    children: Vec<Box<dyn Behavior<C>>>,
    cursor: usize,
}

impl<C: ?Sized> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children,
            cursor: 0,
        }
    }

    /// Index of the child that will be resumed next.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<C: ?Sized> Behavior<C> for Sequence<C> {
    fn resume(&mut self, ctx: &mut C) -> Poll {
        while let Some(child) = self.children.get_mut(self.cursor) {
            match child.resume(ctx) {
                Poll::Pending(wait) => return Poll::Pending(wait),
                Poll::Ready(Status::Success) => self.cursor += 1,
                Poll::Ready(Status::Failure) => {
                    // Short-circuit: the remaining children never run
                    self.cursor = self.children.len();
                    return Poll::FAILURE;
                }
            }
        }
        Poll::SUCCESS
    }
}
